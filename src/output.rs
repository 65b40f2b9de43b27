//! Output formatting for the command line front end.

use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when an output format name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown format '{0}' (expected 'lines' or 'json')")]
pub struct ParseFormatError(pub String);

/// How `split` prints its tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One token per line.
    #[default]
    Lines,
    /// A single JSON array of strings.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lines" => Ok(OutputFormat::Lines),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

/// Render tokens for stdout. Returns `None` when there is nothing to print
/// in line mode.
pub fn format_tokens(tokens: &[String], format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Lines if tokens.is_empty() => None,
        OutputFormat::Lines => Some(tokens.join("\n")),
        // A list of strings always serializes
        OutputFormat::Json => serde_json::to_string(tokens).ok(),
    }
}
