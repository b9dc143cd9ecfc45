use thiserror::Error;

use crate::parser::SkipReason;

/// Errors that can occur during macro table import operations
#[derive(Error, Debug)]
pub enum ImportError {
    /// The pasted text was empty or whitespace only
    #[error("Input text is empty")]
    EmptyInput,

    /// Nothing in the text matched the table format
    #[error("Could not parse any items. Check the format.")]
    NoEntries,

    /// A line failed to parse in strict mode
    #[error("Line {line_number}: {reason}")]
    MalformedLine {
        line_number: usize,
        reason: SkipReason,
    },

    /// A recipe could not be built from the given name and ingredients
    #[error("Invalid recipe: {0}")]
    InvalidRecipe(String),

    /// Portion multiplier must be finite and positive
    #[error("Invalid portion multiplier: {0}")]
    InvalidPortion(f64),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Failed to read input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize entries as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to serialize entries as CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
