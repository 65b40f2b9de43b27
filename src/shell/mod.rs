//! Shell command line tokenizing and quoting.

mod quoter;
mod tokenizer;

pub use quoter::{join, quote};
pub use tokenizer::{Split, split};
