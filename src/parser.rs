//! Right-to-left parser for pasted nutrition tables.
//!
//! Each row is expected to look like
//!
//! ```text
//! Guinness 0.0 (440ml) 75 0.6 0.0 17.0 0.0
//! ```
//!
//! The last five whitespace tokens are `calories protein fat carbs fiber` and
//! everything before them is the food name, so names can contain spaces,
//! digits and punctuation. Header and total rows are dropped, and any row that
//! does not fit the shape is skipped rather than reported as an error.

use log::{debug, info};
use serde::Deserialize;
use std::fmt;

use crate::model::FoodEntry;
use crate::ImportError;

/// Rows whose lowercased text contains any of these are headers or totals.
pub const DEFAULT_SKIP_KEYWORDS: [&str; 3] = ["food item", "calories", "total"];

const MACRO_FIELDS: usize = 5;
const MIN_TOKENS: usize = MACRO_FIELDS + 1;

/// How the parser treats rows that don't match the table shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Skip non-matching rows silently (default)
    #[default]
    Permissive,
    /// Fail on the first row that has too few tokens or a non-numeric field
    Strict,
}

/// Why a row produced no entry
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Row contained a skip keyword such as "total"
    Header { keyword: String },
    /// Fewer than six whitespace tokens
    TooFewTokens { found: usize },
    /// One of the trailing five tokens is not a number
    NotNumeric { token: String },
}

impl SkipReason {
    /// Header rows are expected in pasted tables and never count as malformed.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, SkipReason::Header { .. })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Header { keyword } => write!(f, "header or total row ('{}')", keyword),
            SkipReason::TooFewTokens { found } => write!(
                f,
                "expected at least {} tokens, found {}",
                MIN_TOKENS, found
            ),
            SkipReason::NotNumeric { token } => write!(f, "'{}' is not a number", token),
        }
    }
}

/// A non-blank row that was not turned into an entry
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    /// 1-based line number in the input
    pub line_number: usize,
    /// The trimmed row text
    pub content: String,
    pub reason: SkipReason,
}

/// Entries plus the rows that were skipped on the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub entries: Vec<FoodEntry>,
    pub skipped: Vec<SkippedLine>,
}

impl ParseReport {
    /// Skipped rows that were not headers or totals
    pub fn malformed(&self) -> impl Iterator<Item = &SkippedLine> {
        self.skipped.iter().filter(|s| s.reason.is_malformed())
    }
}

#[derive(Debug, Clone)]
pub struct TableParser {
    skip_keywords: Vec<String>,
    mode: ParseMode,
}

impl Default for TableParser {
    fn default() -> Self {
        Self {
            skip_keywords: DEFAULT_SKIP_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            mode: ParseMode::default(),
        }
    }
}

impl TableParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the header/total keywords. Matching is case-insensitive.
    pub fn with_skip_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.skip_keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self
    }

    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    pub fn skip_keywords(&self) -> &[String] {
        &self.skip_keywords
    }

    /// Parse every matching row, in input order. Never fails.
    pub fn parse(&self, text: &str) -> Vec<FoodEntry> {
        self.parse_with_report(text).entries
    }

    /// Parse and keep track of every non-blank row that was skipped.
    pub fn parse_with_report(&self, text: &str) -> ParseReport {
        let mut report = ParseReport::default();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            match self.parse_line(line) {
                Ok(entry) => report.entries.push(entry),
                Err(reason) => {
                    debug!("Skipping line {}: {} ({:?})", index + 1, reason, line);
                    report.skipped.push(SkippedLine {
                        line_number: index + 1,
                        content: line.to_string(),
                        reason,
                    });
                }
            }
        }

        info!(
            "Parsed {} items ({} lines skipped)",
            report.entries.len(),
            report.skipped.len()
        );
        report
    }

    /// Parse according to the configured mode.
    ///
    /// In permissive mode this is `Ok(self.parse(text))`. In strict mode the
    /// first malformed row is returned as [`ImportError::MalformedLine`].
    pub fn try_parse(&self, text: &str) -> Result<Vec<FoodEntry>, ImportError> {
        let report = self.parse_with_report(text);
        if self.mode == ParseMode::Strict {
            if let Some(bad) = report.malformed().next() {
                return Err(ImportError::MalformedLine {
                    line_number: bad.line_number,
                    reason: bad.reason.clone(),
                });
            }
        }
        Ok(report.entries)
    }

    /// Same as [`TableParser::try_parse`] with strict mode forced on.
    pub fn parse_strict(&self, text: &str) -> Result<Vec<FoodEntry>, ImportError> {
        self.clone().with_mode(ParseMode::Strict).try_parse(text)
    }

    /// `line` is already trimmed and non-empty.
    fn parse_line(&self, line: &str) -> Result<FoodEntry, SkipReason> {
        let lower = line.to_lowercase();
        if let Some(keyword) = self.skip_keywords.iter().find(|k| lower.contains(k.as_str())) {
            return Err(SkipReason::Header {
                keyword: keyword.clone(),
            });
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < MIN_TOKENS {
            return Err(SkipReason::TooFewTokens {
                found: tokens.len(),
            });
        }

        let (name, fields) = tokens.split_at(tokens.len() - MACRO_FIELDS);
        let mut values = [0.0; MACRO_FIELDS];
        for (value, token) in values.iter_mut().zip(fields) {
            *value = parse_number(token).ok_or_else(|| SkipReason::NotNumeric {
                token: token.to_string(),
            })?;
        }
        let [calories, protein, fat, carbs, fiber] = values;

        Ok(FoodEntry {
            food_name: name.join(" "),
            calories,
            protein,
            fat,
            carbs,
            fiber,
        })
    }
}

/// Parse a macro value. Commas are thousands separators and are dropped, so
/// `"1,500"` is 1500 and `"50,2"` is 502. Underscores are accepted only
/// between two digits (`"1_500"`). Non-finite values are rejected.
fn parse_number(token: &str) -> Option<f64> {
    let cleaned = token.replace(',', "");
    if !underscores_between_digits(&cleaned) {
        return None;
    }

    cleaned
        .replace('_', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn underscores_between_digits(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    })
}

/// Parse a pasted table with the default keywords in permissive mode.
pub fn parse_table(text: &str) -> Vec<FoodEntry> {
    TableParser::default().parse(text)
}
