use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use log::{debug, info};

use crate::config::ImportConfig;
use crate::export;
use crate::parser::ParseMode;
use crate::{FoodEntry, ImportError, MacroTotals, Recipe};

/// Represents the input source for a table
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Use pasted text directly
    Text(String),
    /// Read the table from a file
    File(PathBuf),
}

/// Represents the desired output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Parsed records plus their totals (default)
    #[default]
    Entries,
    /// JSON array of records
    Json,
    /// CSV with a header row
    Csv,
    /// Table rows in the paste format
    Table,
}

impl FromStr for OutputFormat {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entries" => Ok(OutputFormat::Entries),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "table" => Ok(OutputFormat::Table),
            other => Err(ImportError::BuilderError(format!(
                "Unknown output format: {}",
                other
            ))),
        }
    }
}

/// Result of an import operation
#[derive(Debug, Clone, PartialEq)]
pub enum ImportResult {
    /// Parsed records and their column sums
    Entries {
        entries: Vec<FoodEntry>,
        totals: MacroTotals,
    },
    /// Records grouped into a named recipe
    Recipe(Recipe),
    /// A recipe collapsed into one log row
    LogEntry(FoodEntry),
    /// Records rendered as JSON, CSV or table text
    Rendered(String),
}

/// Builder for configuring and executing table imports
#[derive(Debug, Default)]
pub struct MacroImporterBuilder {
    source: Option<InputSource>,
    config: ImportConfig,
    mode: Option<ParseMode>,
    skip_keywords: Option<Vec<String>>,
    format: Option<OutputFormat>,
    recipe_name: Option<String>,
    portion: Option<f64>,
}

impl MacroImporterBuilder {
    /// Set the input source to pasted text
    ///
    /// # Example
    /// ```
    /// use macro_import::MacroImporter;
    ///
    /// let builder = MacroImporter::builder()
    ///     .text("Kimchi (50g) 15 1.1 0.2 2.4 1.2");
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(InputSource::Text(text.into()));
        self
    }

    /// Set the input source to a file containing the table
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(InputSource::File(path.into()));
        self
    }

    /// Use settings from a loaded configuration. Explicit builder calls
    /// take precedence over it.
    pub fn config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    /// Fail on rows that have too few tokens or non-numeric fields
    /// instead of skipping them
    pub fn strict(mut self) -> Self {
        self.mode = Some(ParseMode::Strict);
        self
    }

    /// Replace the keywords that mark header and total rows
    pub fn skip_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    /// Render the parsed records instead of returning them
    ///
    /// # Example
    /// ```
    /// use macro_import::{MacroImporter, OutputFormat};
    ///
    /// let builder = MacroImporter::builder()
    ///     .text("Kimchi (50g) 15 1.1 0.2 2.4 1.2")
    ///     .format(OutputFormat::Csv);
    /// ```
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Group the parsed records into a named recipe
    ///
    /// # Example
    /// ```
    /// use macro_import::MacroImporter;
    ///
    /// let builder = MacroImporter::builder()
    ///     .text("Kimchi (50g) 15 1.1 0.2 2.4 1.2")
    ///     .recipe("Kimchi Bowl");
    /// ```
    pub fn recipe(mut self, name: impl Into<String>) -> Self {
        self.recipe_name = Some(name.into());
        self
    }

    /// Collapse the recipe into a single log row scaled by `portion`.
    /// Requires `.recipe()`.
    pub fn portion(mut self, portion: f64) -> Self {
        self.portion = Some(portion);
        self
    }

    /// Build and execute the import
    ///
    /// # Errors
    /// Returns `ImportError` if:
    /// - No input source was specified
    /// - The input file can't be read
    /// - The input is blank, or no rows could be parsed
    /// - A row is malformed and strict mode is on
    /// - Invalid combination of options (e.g., portion without recipe)
    ///
    /// # Example
    /// ```
    /// # use macro_import::{MacroImporter, ImportResult};
    /// let result = MacroImporter::builder()
    ///     .text("Kimchi (50g) 15 1.1 0.2 2.4 1.2")
    ///     .build()
    ///     .unwrap();
    ///
    /// match result {
    ///     ImportResult::Entries { entries, .. } => assert_eq!(entries.len(), 1),
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn build(self) -> Result<ImportResult, ImportError> {
        let source = self.source.ok_or_else(|| {
            ImportError::BuilderError(
                "No input source specified. Use .text() or .file()".to_string(),
            )
        })?;

        if self.portion.is_some() && self.recipe_name.is_none() {
            return Err(ImportError::BuilderError(
                "Cannot use portion() without recipe()".to_string(),
            ));
        }
        if self.recipe_name.is_some() && matches!(self.format, Some(f) if f != OutputFormat::Entries)
        {
            return Err(ImportError::BuilderError(
                "Cannot render a recipe with format(). Use the default entries output".to_string(),
            ));
        }

        // The configured format only applies to plain entry output
        let format = match (self.format, &self.recipe_name) {
            (Some(format), _) => format,
            (None, Some(_)) => OutputFormat::Entries,
            (None, None) => self.config.output.format.parse()?,
        };

        let text = match source {
            InputSource::Text(text) => text,
            InputSource::File(path) => {
                debug!("Reading table from {}", path.display());
                fs::read_to_string(&path)?
            }
        };

        if text.trim().is_empty() {
            return Err(ImportError::EmptyInput);
        }

        let mut parser = self.config.parser.to_parser();
        if let Some(keywords) = self.skip_keywords {
            parser = parser.with_skip_keywords(keywords);
        }
        if let Some(mode) = self.mode {
            parser = parser.with_mode(mode);
        }

        let entries = parser.try_parse(&text)?;
        if entries.is_empty() {
            return Err(ImportError::NoEntries);
        }
        info!("Imported {} items", entries.len());

        match (self.recipe_name, self.portion) {
            (Some(name), Some(portion)) => {
                let recipe = Recipe::new(name, entries)?;
                Ok(ImportResult::LogEntry(recipe.to_log_entry(portion)?))
            }
            (Some(name), None) => Ok(ImportResult::Recipe(Recipe::new(name, entries)?)),
            (None, _) => match format {
                OutputFormat::Entries => {
                    let totals = MacroTotals::from_entries(&entries);
                    Ok(ImportResult::Entries { entries, totals })
                }
                OutputFormat::Json => Ok(ImportResult::Rendered(export::to_json(
                    &entries,
                    self.config.output.pretty,
                )?)),
                OutputFormat::Csv => Ok(ImportResult::Rendered(export::to_csv(&entries)?)),
                OutputFormat::Table => Ok(ImportResult::Rendered(export::to_table_text(&entries))),
            },
        }
    }
}

/// Main entry point for the builder API
pub struct MacroImporter;

impl MacroImporter {
    /// Creates a new builder for importing tables
    ///
    /// # Example
    /// ```
    /// use macro_import::MacroImporter;
    ///
    /// let builder = MacroImporter::builder();
    /// ```
    pub fn builder() -> MacroImporterBuilder {
        MacroImporterBuilder::default()
    }
}
