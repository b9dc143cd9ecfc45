use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::parser::{ParseMode, TableParser, DEFAULT_SKIP_KEYWORDS};

/// Main import configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ImportConfig {
    /// Table parser settings
    #[serde(default)]
    pub parser: ParserConfig,
    /// Output rendering settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration for the table parser
#[derive(Debug, Deserialize, Clone)]
pub struct ParserConfig {
    /// "permissive" skips rows that don't match, "strict" fails on them
    #[serde(default)]
    pub mode: ParseMode,
    /// Case-insensitive substrings that mark header and total rows
    #[serde(default = "default_skip_keywords")]
    pub skip_keywords: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            mode: ParseMode::default(),
            skip_keywords: default_skip_keywords(),
        }
    }
}

impl ParserConfig {
    /// Build a parser from these settings
    pub fn to_parser(&self) -> TableParser {
        TableParser::new()
            .with_skip_keywords(&self.skip_keywords)
            .with_mode(self.mode)
    }
}

/// Configuration for rendered output
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Default output format name ("entries", "json", "csv" or "table")
    #[serde(default = "default_format")]
    pub format: String,
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            pretty: default_pretty(),
        }
    }
}

// Default value functions
fn default_skip_keywords() -> Vec<String> {
    DEFAULT_SKIP_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_format() -> String {
    "entries".to_string()
}

fn default_pretty() -> bool {
    true
}

impl ImportConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MACRO_IMPORT__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MACRO_IMPORT__PARSER__MODE
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`ImportConfig::load`] for the priority order.
pub fn load_config() -> Result<ImportConfig, ConfigError> {
    load_config_from("config")
}

/// Same as [`load_config`] with a different config file name or path.
/// The extension may be left off, as with `config` for `config.toml`.
pub fn load_config_from(file: &str) -> Result<ImportConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(file).required(false))
        // Use double underscore for nested: MACRO_IMPORT__PARSER__MODE
        .add_source(
            Environment::with_prefix("MACRO_IMPORT")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("parser.skip_keywords")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Parse configuration from a TOML string, falling back to defaults for
/// anything not set.
pub fn config_from_toml(toml: &str) -> Result<ImportConfig, ConfigError> {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()
}
