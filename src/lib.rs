//! Argument parser driven by declared arguments.
//!
//! A [`Parser`] holds an ordered list of [`Argument`]s. Each argument names
//! the tokens that select it, how many values it consumes ([`Arity`]), what
//! to do with them ([`Action`]) and where the result goes in the
//! [`Namespace`]:
//!
//! ```
//! use argvise::{Argument, Parser};
//!
//! let mut p = Parser::new("rm");
//! p.add(Argument::flag("r recursive", "recursive"))?
//!     .add(Argument::positional("path", "path"))?;
//!
//! let parsed = p.parse(["-r", "/tmp/junk"])?;
//! assert!(parsed.namespace.flag("recursive")?);
//! assert_eq!(parsed.namespace.string("path")?, "/tmp/junk");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Parsing stops at the first error. `--help` and `--version` (see
//! [`Parser::add_help`]) print their text and then surface as
//! [`Error::ShowHelp`] / [`Error::ShowVersion`], leaving the decision of how
//! to exit to the host program.

mod action;
mod argument;
mod arity;
mod error;
mod help;
mod namespace;
mod parser;
mod tokenize;
mod validate;

pub use crate::{
    action::Action,
    argument::{Argument, ValueKind},
    arity::Arity,
    error::{ConfigError, Error},
    namespace::{Namespace, Value},
    parser::{Parsed, Parser},
    tokenize::tokenize,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;
