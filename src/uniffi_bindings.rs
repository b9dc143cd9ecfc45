//! UniFFI bindings for macro-import
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! Everything here is synchronous; parsing does no I/O.

use std::fmt;

use crate::{FoodEntry, ImportError, MacroTotals, Recipe};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible food entry
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiFoodEntry {
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
}

impl From<FoodEntry> for FfiFoodEntry {
    fn from(entry: FoodEntry) -> Self {
        FfiFoodEntry {
            food_name: entry.food_name,
            calories: entry.calories,
            protein: entry.protein,
            fat: entry.fat,
            carbs: entry.carbs,
            fiber: entry.fiber,
        }
    }
}

impl From<FfiFoodEntry> for FoodEntry {
    fn from(ffi: FfiFoodEntry) -> Self {
        FoodEntry {
            food_name: ffi.food_name,
            calories: ffi.calories,
            protein: ffi.protein,
            fat: ffi.fat,
            carbs: ffi.carbs,
            fiber: ffi.fiber,
        }
    }
}

/// FFI-compatible macro totals
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiMacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
}

impl From<MacroTotals> for FfiMacroTotals {
    fn from(totals: MacroTotals) -> Self {
        FfiMacroTotals {
            calories: totals.calories,
            protein: totals.protein,
            fat: totals.fat,
            carbs: totals.carbs,
            fiber: totals.fiber,
        }
    }
}

/// FFI-compatible recipe structure
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    /// Dish name
    pub name: String,
    /// Ingredient rows
    pub ingredients: Vec<FfiFoodEntry>,
    /// Sum of the ingredient rows
    pub totals: FfiMacroTotals,
}

impl From<Recipe> for FfiRecipe {
    fn from(recipe: Recipe) -> Self {
        FfiRecipe {
            name: recipe.name,
            ingredients: recipe.ingredients.into_iter().map(Into::into).collect(),
            totals: recipe.totals.into(),
        }
    }
}

/// FFI-compatible parse configuration
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiImportConfig {
    /// Fail on malformed rows instead of skipping them
    pub strict: bool,
    /// Replacement header/total keywords (defaults are used if not specified)
    pub skip_keywords: Option<Vec<String>>,
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiImportError {
    /// Input text was blank
    EmptyInput { message: String },
    /// No rows could be parsed
    NoEntries { message: String },
    /// A row was malformed in strict mode
    MalformedLine { line_number: u64, message: String },
    /// Recipe name or ingredients invalid
    InvalidRecipe { message: String },
    /// Portion multiplier invalid
    InvalidPortion { message: String },
    /// Builder configuration error
    BuilderError { message: String },
    /// I/O or serialization failure
    IoError { message: String },
    /// Configuration error
    ConfigError { message: String },
}

impl fmt::Display for FfiImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiImportError::EmptyInput { message } => write!(f, "Empty input: {}", message),
            FfiImportError::NoEntries { message } => write!(f, "No entries: {}", message),
            FfiImportError::MalformedLine {
                line_number,
                message,
            } => write!(f, "Malformed line {}: {}", line_number, message),
            FfiImportError::InvalidRecipe { message } => write!(f, "Invalid recipe: {}", message),
            FfiImportError::InvalidPortion { message } => {
                write!(f, "Invalid portion: {}", message)
            }
            FfiImportError::BuilderError { message } => write!(f, "Builder error: {}", message),
            FfiImportError::IoError { message } => write!(f, "I/O error: {}", message),
            FfiImportError::ConfigError { message } => write!(f, "Config error: {}", message),
        }
    }
}

impl std::error::Error for FfiImportError {}

impl From<ImportError> for FfiImportError {
    fn from(err: ImportError) -> Self {
        let message = err.to_string();
        match err {
            ImportError::EmptyInput => FfiImportError::EmptyInput { message },
            ImportError::NoEntries => FfiImportError::NoEntries { message },
            ImportError::MalformedLine { line_number, reason } => FfiImportError::MalformedLine {
                line_number: line_number as u64,
                message: reason.to_string(),
            },
            ImportError::InvalidRecipe(msg) => FfiImportError::InvalidRecipe { message: msg },
            ImportError::InvalidPortion(_) => FfiImportError::InvalidPortion { message },
            ImportError::BuilderError(msg) => FfiImportError::BuilderError { message: msg },
            ImportError::Io(_) | ImportError::Json(_) | ImportError::Csv(_) => {
                FfiImportError::IoError { message }
            }
            ImportError::ConfigError(_) => FfiImportError::ConfigError { message },
        }
    }
}

/// Parse a pasted table, skipping rows that don't match
///
/// # Arguments
/// * `text` - The pasted table text
///
/// # Returns
/// The parsed rows in input order (possibly empty)
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn parse_table(text: String) -> Vec<FfiFoodEntry> {
    crate::parse_table(&text)
        .into_iter()
        .map(Into::into)
        .collect()
}

/// Parse a pasted table with options, reporting blank input or zero parsed rows
///
/// # Arguments
/// * `text` - The pasted table text
/// * `config` - Optional parse settings
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn import_text(
    text: String,
    config: Option<FfiImportConfig>,
) -> Result<Vec<FfiFoodEntry>, FfiImportError> {
    let config = config.unwrap_or_default();

    let mut builder = crate::MacroImporter::builder().text(text);

    if config.strict {
        builder = builder.strict();
    }

    if let Some(keywords) = config.skip_keywords {
        builder = builder.skip_keywords(keywords);
    }

    match builder.build()? {
        crate::ImportResult::Entries { entries, .. } => {
            Ok(entries.into_iter().map(Into::into).collect())
        }
        _ => Err(FfiImportError::BuilderError {
            message: "Unexpected result when importing text".to_string(),
        }),
    }
}

/// Sum the macro columns of the given rows
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn calculate_totals(entries: Vec<FfiFoodEntry>) -> FfiMacroTotals {
    let entries: Vec<FoodEntry> = entries.into_iter().map(Into::into).collect();
    MacroTotals::from_entries(&entries).into()
}

/// Group rows into a named recipe with precomputed totals
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn build_recipe(
    name: String,
    ingredients: Vec<FfiFoodEntry>,
) -> Result<FfiRecipe, FfiImportError> {
    let ingredients = ingredients.into_iter().map(Into::into).collect();
    Ok(Recipe::new(name, ingredients)?.into())
}

/// Collapse a recipe into a single log row scaled by `portion`
///
/// Totals are recomputed from the ingredients, so edited rows are honoured.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn log_recipe(recipe: FfiRecipe, portion: f64) -> Result<FfiFoodEntry, FfiImportError> {
    let ingredients = recipe.ingredients.into_iter().map(Into::into).collect();
    let recipe = Recipe::new(recipe.name, ingredients)?;
    Ok(recipe.to_log_entry(portion)?.into())
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
