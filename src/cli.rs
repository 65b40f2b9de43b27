//! Argument parsing and command execution for the `shellsplit` binary.

use std::ffi::OsString;
use thiserror::Error;

use crate::config::Config;
use crate::dialect::{Dialect, ParseDialectError};
use crate::output::{OutputFormat, ParseFormatError, format_tokens};
use crate::shell::{quote, split};

pub const USAGE: &str = "\
Usage:
  shellsplit split [--mode posix|windows] [--format lines|json] [STRING]
  shellsplit quote [--mode posix|windows] [WORD...]

Without STRING, split reads the whole of stdin.
Without WORD, quote quotes each line of stdin.";

/// Errors in the command line arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("missing command")]
    MissingCommand,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("option '{0}' requires a value")]
    MissingValue(&'static str),

    #[error("--format only applies to split")]
    FormatNotSupported,

    #[error("argument is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("split takes at most one STRING argument")]
    TooManyArguments,

    #[error(transparent)]
    Mode(#[from] ParseDialectError),

    #[error(transparent)]
    Format(#[from] ParseFormatError),
}

/// Subcommand to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Split,
    Quote,
    Help,
}

impl Command {
    pub fn name(self) -> &'static str {
        match self {
            Command::Split => "split",
            Command::Quote => "quote",
            Command::Help => "help",
        }
    }
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    /// Explicit `--mode`.
    pub mode: Option<Dialect>,
    /// Explicit `--format`.
    pub format: Option<OutputFormat>,
    /// Positional arguments.
    pub args: Vec<String>,
}

/// Result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Text for stdout, if any.
    pub output: Option<String>,
    /// The text that was processed.
    pub input: String,
    /// Number of tokens produced.
    pub tokens: usize,
    /// Dialect actually used.
    pub dialect: Dialect,
}

impl Invocation {
    /// Parse raw OS arguments (without the program name).
    pub fn parse_os<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = OsString>,
    {
        let args = args
            .into_iter()
            .map(|arg| {
                arg.into_string()
                    .map_err(|bad| UsageError::InvalidUtf8(bad.to_string_lossy().into_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::parse(args)
    }

    /// Parse arguments (without the program name).
    pub fn parse<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let command = match args.next().as_deref() {
            None => return Err(UsageError::MissingCommand),
            Some("split") => Command::Split,
            Some("quote") => Command::Quote,
            Some("help" | "-h" | "--help") => Command::Help,
            Some(other) => return Err(UsageError::UnknownCommand(other.to_string())),
        };

        let mut invocation = Invocation {
            command,
            mode: None,
            format: None,
            args: Vec::new(),
        };
        if command == Command::Help {
            return Ok(invocation);
        }

        let mut positional_only = false;
        while let Some(arg) = args.next() {
            if positional_only || !arg.starts_with("--") {
                invocation.args.push(arg);
                continue;
            }
            match arg.as_str() {
                "--" => positional_only = true,
                "--help" => invocation.command = Command::Help,
                "--mode" => {
                    let value = args.next().ok_or(UsageError::MissingValue("--mode"))?;
                    invocation.mode = Some(value.parse()?);
                }
                "--format" => {
                    let value = args.next().ok_or(UsageError::MissingValue("--format"))?;
                    invocation.format = Some(value.parse()?);
                }
                other => return Err(UsageError::UnknownOption(other.to_string())),
            }
        }

        if invocation.command == Command::Quote && invocation.format.is_some() {
            return Err(UsageError::FormatNotSupported);
        }
        if invocation.command == Command::Split && invocation.args.len() > 1 {
            return Err(UsageError::TooManyArguments);
        }
        Ok(invocation)
    }

    /// Whether the command takes its input from stdin.
    pub fn needs_stdin(&self) -> bool {
        self.command != Command::Help && self.args.is_empty()
    }

    /// Run the command. `stdin` is consulted only when [`needs_stdin`](Self::needs_stdin).
    pub fn execute(&self, config: &Config, stdin: Option<&str>) -> Execution {
        let dialect = config.resolve_dialect(self.mode);
        let input = match (self.needs_stdin(), stdin) {
            (true, Some(text)) => text.to_string(),
            (true, None) => String::new(),
            (false, _) => self.args.join(" "),
        };

        match self.command {
            Command::Help => Execution {
                output: Some(USAGE.to_string()),
                input: String::new(),
                tokens: 0,
                dialect,
            },
            Command::Split => {
                let tokens: Vec<String> = split(&input, dialect).collect();
                let format = config.resolve_format(self.format);
                Execution {
                    output: format_tokens(&tokens, format),
                    input,
                    tokens: tokens.len(),
                    dialect,
                }
            }
            Command::Quote => {
                let quoted: Vec<String> = if self.args.is_empty() {
                    input
                        .lines()
                        .map(|line| quote(line, dialect).into_owned())
                        .collect()
                } else {
                    self.args
                        .iter()
                        .map(|word| quote(word, dialect).into_owned())
                        .collect()
                };
                let separator = if self.args.is_empty() { "\n" } else { " " };
                Execution {
                    output: (!quoted.is_empty()).then(|| quoted.join(separator)),
                    input,
                    tokens: quoted.len(),
                    dialect,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Invocation, UsageError> {
        Invocation::parse(args.iter().map(|s| s.to_string()))
    }

    fn posix_config() -> Config {
        Config {
            mode: Some(Dialect::Posix),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_split() {
        let inv = parse(&["split", "--mode", "windows", "a b"]).unwrap();
        assert_eq!(inv.command, Command::Split);
        assert_eq!(inv.mode, Some(Dialect::Windows));
        assert_eq!(inv.args, vec!["a b"]);
        assert!(!inv.needs_stdin());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse(&[]), Err(UsageError::MissingCommand));
        assert_eq!(
            parse(&["explode"]),
            Err(UsageError::UnknownCommand("explode".to_string()))
        );
        assert_eq!(parse(&["split", "--mode"]), Err(UsageError::MissingValue("--mode")));
        assert!(matches!(parse(&["split", "--mode", "dos"]), Err(UsageError::Mode(_))));
        assert!(matches!(parse(&["split", "--format", "xml"]), Err(UsageError::Format(_))));
        assert_eq!(
            parse(&["split", "--verbose"]),
            Err(UsageError::UnknownOption("--verbose".to_string()))
        );
        assert_eq!(
            parse(&["quote", "--format", "json"]),
            Err(UsageError::FormatNotSupported)
        );
        assert_eq!(parse(&["split", "a", "b"]), Err(UsageError::TooManyArguments));
    }

    #[test]
    fn test_parse_os() {
        let args = ["split", "a b"].map(OsString::from);
        let inv = Invocation::parse_os(args).unwrap();
        assert_eq!(inv.command, Command::Split);
        assert_eq!(inv.args, vec!["a b"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_os_rejects_invalid_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let args = vec![
            OsString::from("split"),
            OsString::from_vec(vec![b'a', 0xff, b'b']),
        ];
        assert_eq!(
            Invocation::parse_os(args),
            Err(UsageError::InvalidUtf8("a\u{fffd}b".to_string()))
        );
    }

    #[test]
    fn test_double_dash_ends_options() {
        let inv = parse(&["quote", "--", "--mode", "-la"]).unwrap();
        assert_eq!(inv.args, vec!["--mode", "-la"]);
        assert_eq!(inv.mode, None);
    }

    #[test]
    fn test_help() {
        assert_eq!(parse(&["--help"]).unwrap().command, Command::Help);
        assert_eq!(parse(&["split", "--help"]).unwrap().command, Command::Help);
        let exec = parse(&["help"]).unwrap().execute(&Config::default(), None);
        assert_eq!(exec.output.as_deref(), Some(USAGE));
    }

    #[test]
    fn test_execute_split_argument() {
        let inv = parse(&["split", "cp 'my file' dest"]).unwrap();
        let exec = inv.execute(&posix_config(), None);
        assert_eq!(exec.output.as_deref(), Some("cp\n\"my file\"\ndest"));
        assert_eq!(exec.tokens, 3);
        assert_eq!(exec.dialect, Dialect::Posix);
    }

    #[test]
    fn test_execute_split_stdin_json() {
        let inv = parse(&["split", "--format", "json"]).unwrap();
        assert!(inv.needs_stdin());
        let exec = inv.execute(&posix_config(), Some("a \"\"\n"));
        assert_eq!(exec.output.as_deref(), Some(r#"["a","\"\""]"#));
    }

    #[test]
    fn test_execute_split_mode_flag_beats_config() {
        let inv = parse(&["split", "--mode", "windows", r"a\ b"]).unwrap();
        let exec = inv.execute(&posix_config(), None);
        assert_eq!(exec.tokens, 2);
        assert_eq!(exec.dialect, Dialect::Windows);
    }

    #[test]
    fn test_execute_quote_words() {
        let inv = parse(&["quote", "plain", "two words", ""]).unwrap();
        let exec = inv.execute(&posix_config(), None);
        assert_eq!(exec.output.as_deref(), Some(r#"plain "two words" """#));
        assert_eq!(exec.tokens, 3);
    }

    #[test]
    fn test_execute_quote_stdin_lines() {
        let inv = parse(&["quote"]).unwrap();
        let exec = inv.execute(&posix_config(), Some("a b\nc\n"));
        assert_eq!(exec.output.as_deref(), Some("\"a b\"\nc"));
    }

    #[test]
    fn test_execute_empty_input() {
        let inv = parse(&["split"]).unwrap();
        let exec = inv.execute(&posix_config(), Some("   "));
        assert!(exec.output.is_none());
        assert_eq!(exec.tokens, 0);
    }
}
