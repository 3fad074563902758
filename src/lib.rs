//! Schema-free command line option scanning without allocation.
//!
//! The caller drives a [`Scanner`] over its argument vector and does its own
//! dispatch on each option it reports:
//!
//! ```
//! use optwack::prelude::*;
//!
//! let mut args = ["prog", "in.txt", "-x", "--color=red", "-j4", "out.txt"];
//! let mut scanner = Scanner::permuting(&mut args).on_missing_value(Fail);
//! let (mut x, mut color, mut jobs) = (false, "auto", 1);
//! while scanner.advance() {
//!     if scanner.matches("x") {
//!         x = true;
//!     } else if scanner.matches("c|color=") {
//!         color = scanner.value()?;
//!     } else if scanner.matches("j|jobs") {
//!         jobs = scanner.parsed_value::<u32>()?;
//!     } else {
//!         panic!("unknown option {}", scanner.current().unwrap());
//!     }
//! }
//! let first = scanner.positional_start();
//! assert_eq!((x, color, jobs), (true, "red", 4));
//! assert_eq!(&args[first..], ["in.txt", "out.txt"]);
//! assert_eq!(args, ["prog", "-x", "--color=red", "-j4", "in.txt", "out.txt"]);
//! # Ok::<(), ArgError>(())
//! ```
//!
//! Conventions: `-abc` is three short options unless one of them takes the
//! rest as its value (`-ovalue`, `-o=value`, or `-o value`); `--name` is a long
//! option with an optional `=value`; a bare `--` ends option scanning and is
//! consumed; a lone `-` is always a positional or a value.

use thiserror::Error;

mod permute;
mod policy;
mod scanner;
mod token;
mod values;

pub use policy::{Exit, Fail, MissingValuePolicy};
pub use scanner::{Mode, Scanner};
pub use token::Token;

pub mod prelude {
    pub use crate::{ArgError, Exit, Fail, Mode, Scanner, Token};
}

/// The option marker. Doubled (`--`) it starts long options and, alone,
/// terminates option scanning.
pub const MARKER: u8 = b'-';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError<'s> {
    #[error("{program}: option '{option}' requires arg")]
    MissingValue { program: &'s str, option: Token<'s> },
    #[error("invalid value '{value}' for option '{option}'")]
    InvalidValue { option: Token<'s>, value: &'s str },
}
