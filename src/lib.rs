pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;

// UniFFI bindings for iOS/Android
pub mod uniffi_bindings;

// Re-export commonly used types
pub use builder::{ImportResult, InputSource, MacroImporter, MacroImporterBuilder, OutputFormat};
pub use error::ImportError;
pub use model::{FoodEntry, MacroTotals, Recipe};
pub use parser::{parse_table, ParseMode, ParseReport, SkipReason, SkippedLine, TableParser};

/// Parse pasted text into entries, treating "nothing parsed" as an error.
///
/// This is the paste-and-preview flow: blank input and input where no row
/// matched are reported so the caller can show them to the user.
///
/// # Example
/// ```
/// let entries = macro_import::text_to_entries("Honey (1 tsp) 21 0.0 0.0 6.0 0.0").unwrap();
/// assert_eq!(entries[0].food_name, "Honey (1 tsp)");
/// ```
pub fn text_to_entries(text: &str) -> Result<Vec<FoodEntry>, ImportError> {
    match MacroImporter::builder().text(text).build()? {
        ImportResult::Entries { entries, .. } => Ok(entries),
        _ => Err(ImportError::BuilderError(
            "Unexpected result when parsing text".to_string(),
        )),
    }
}

/// Parse pasted text and group the rows into a named recipe.
pub fn text_to_recipe(text: &str, name: &str) -> Result<Recipe, ImportError> {
    match MacroImporter::builder().text(text).recipe(name).build()? {
        ImportResult::Recipe(recipe) => Ok(recipe),
        _ => Err(ImportError::BuilderError(
            "Unexpected result when building recipe".to_string(),
        )),
    }
}

/// Sum the macro columns of a set of entries.
pub fn calculate_totals(entries: &[FoodEntry]) -> MacroTotals {
    MacroTotals::from_entries(entries)
}
