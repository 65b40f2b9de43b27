//! shellsplit - shell-style command line splitting and quoting.
//!
//! Splits a command line into arguments the way a POSIX or Windows shell
//! would, and quotes arguments so they can be placed back on a command line.
//!
//! ```
//! use shellsplit::{Dialect, split};
//!
//! let args: Vec<String> = split("cp 'my file' dest", Dialect::Posix).collect();
//! assert_eq!(args, ["cp", "\"my file\"", "dest"]);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod dialect;
pub mod output;
pub mod shell;

pub use config::Config;
pub use dialect::{Dialect, ParseDialectError};
pub use shell::{Split, join, quote, split};
