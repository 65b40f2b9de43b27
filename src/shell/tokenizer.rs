//! Shell-style tokenization (shlex-like).

use crate::dialect::Dialect;

use super::quoter::quote;

/// Lazy iterator over the quoted tokens of a command line.
///
/// Created by [`split`]. Each item has already been passed through
/// [`quote`](super::quote).
#[derive(Debug, Clone)]
pub struct Split<'a> {
    chars: std::str::Chars<'a>,
    dialect: Dialect,
    /// Raw previous input character.
    prev: Option<char>,
    /// `None` when no token is in progress; `Some("")` is a real empty token.
    token: Option<String>,
    quote_char: Option<char>,
    escape_char: Option<char>,
    subquote: bool,
    done: bool,
}

/// Tokenize a command line into words, respecting quotes and escapes.
///
/// Unterminated quotes and trailing escapes are accepted as if closed.
pub fn split(input: &str, dialect: Dialect) -> Split<'_> {
    Split {
        chars: input.chars(),
        dialect,
        prev: None,
        token: None,
        quote_char: None,
        escape_char: None,
        subquote: false,
        done: false,
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, '\t' | ' ' | '\n' | '\r' | '\x0c')
}

impl Split<'_> {
    fn push(&mut self, c: char) {
        self.token.get_or_insert_with(String::new).push(c);
    }

    /// Feed one character. Returns a finished token when whitespace closes one.
    fn step(&mut self, c: char, prev: Option<char>) -> Option<String> {
        if let Some(escape) = self.escape_char.take() {
            if c == '\n' {
                // Line continuation
            } else if self.quote_char != Some(c) || self.dialect.is_escape(c) {
                self.push(c);
            } else {
                // Inside a quote only the quote itself is escaped; keep both.
                self.push(escape);
                self.push(c);
            }
            return None;
        }

        if self.dialect.is_escape(c) {
            let quoted_by_escape = self.quote_char.is_some_and(|q| self.dialect.is_escape(q));
            if !quoted_by_escape {
                self.escape_char = Some(c);
                return None;
            }
        }

        if let Some(q) = self.quote_char {
            if c == q {
                if self.subquote {
                    self.subquote = false;
                    self.push(c);
                }
                self.quote_char = None;
            } else {
                self.push(c);
            }
            return None;
        }

        if self.dialect.is_quote(c) {
            self.quote_char = Some(c);
            if self.dialect.opens_subquote(prev, c) {
                self.subquote = true;
                self.push(c);
            } else {
                self.token = Some(String::new());
            }
            return None;
        }

        if is_separator(c) {
            return self.token.take();
        }

        self.push(c);
        None
    }
}

impl Iterator for Split<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        while let Some(c) = self.chars.next() {
            let prev = self.prev.replace(c);
            if let Some(token) = self.step(c, prev) {
                return Some(quote(&token, self.dialect).into_owned());
            }
        }
        self.done = true;
        self.token
            .take()
            .map(|token| quote(&token, self.dialect).into_owned())
    }
}

impl std::iter::FusedIterator for Split<'_> {}
