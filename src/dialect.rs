//! Tokenizer dialects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a dialect name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{0}' (expected 'posix' or 'windows')")]
pub struct ParseDialectError(pub String);

/// The rule set governing which characters quote and escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Single and double quotes, backslash escapes.
    Posix,
    /// Double quotes only, backslash is an ordinary character.
    Windows,
}

const POSIX_QUOTES: &[char] = &['\'', '"'];
const WINDOWS_QUOTES: &[char] = &['"'];
const POSIX_ESCAPES: &[char] = &['\\'];

impl Dialect {
    /// The dialect native to the host platform.
    pub fn host() -> Self {
        if cfg!(windows) {
            Dialect::Windows
        } else {
            Dialect::Posix
        }
    }

    /// Characters that open and close a quoted run.
    pub fn quote_chars(self) -> &'static [char] {
        match self {
            Dialect::Posix => POSIX_QUOTES,
            Dialect::Windows => WINDOWS_QUOTES,
        }
    }

    /// Characters that escape the character following them.
    pub fn escape_chars(self) -> &'static [char] {
        match self {
            Dialect::Posix => POSIX_ESCAPES,
            Dialect::Windows => &[],
        }
    }

    /// Whether `c` opens or closes a quote in this dialect.
    pub fn is_quote(self, c: char) -> bool {
        self.quote_chars().contains(&c)
    }

    /// Whether `c` escapes the next character in this dialect.
    pub fn is_escape(self, c: char) -> bool {
        self.escape_chars().contains(&c)
    }

    /// Whether `prev` followed by the quote `c` glues a sub-quote onto the
    /// token in progress. Looks at raw input, not at escape state.
    pub fn opens_subquote(self, prev: Option<char>, c: char) -> bool {
        match (self, prev, c) {
            (Dialect::Posix, Some('\\'), '\'' | '"') => true,
            (Dialect::Windows, Some('\\'), '"') => true,
            _ => false,
        }
    }

    /// Lowercase name, as accepted by `--mode` and config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Posix => "posix",
            Dialect::Windows => "windows",
        }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::host()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = ParseDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "posix" => Ok(Dialect::Posix),
            "windows" => Ok(Dialect::Windows),
            _ => Err(ParseDialectError(s.to_string())),
        }
    }
}
