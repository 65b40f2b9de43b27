//! Re-quoting of decoded tokens.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

use crate::dialect::Dialect;

/// Matches any character that needs quoting.
static RESERVED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_@%\-+=:,./|]").expect("reserved pattern is valid"));

/// Quote a single token so it can be placed back on a command line.
///
/// Tokens made only of unreserved characters are returned as-is. The empty
/// token becomes `""`. Anything else is wrapped in double quotes with each
/// inner `"` prefixed by a backslash.
///
/// The same rule applies to both dialects.
pub fn quote(input: &str, _dialect: Dialect) -> Cow<'_, str> {
    if input.is_empty() {
        return Cow::Borrowed("\"\"");
    }
    if !RESERVED.is_match(input) {
        return Cow::Borrowed(input);
    }
    let escaped = input.replace('"', "\\\"");
    Cow::Owned(format!("\"{}\"", escaped))
}

/// Quote each word and join them with single spaces.
pub fn join<I, S>(words: I, dialect: Dialect) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| quote(w.as_ref(), dialect).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
