//! Command-line parsing with flags, typed options, positionals and commands.
//!
//! A [`Parser`] is configured by registering:
//! - flags (`--verbose`, `-v`, counted per occurrence)
//! - string, integer and floating-point options with fallback values
//! - commands, each backed by its own nested [`Parser`]
//!
//! Aliases are given as one space-separated string (`"verbose v"`). Every
//! occurrence is recorded, so repeated options can be read back in order.
//!
//! Parsing is non-terminating: [`Parser::try_parse`] returns an [`Outcome`]
//! or an [`Error`]. [`Parser::parse`] and [`Parser::parse_env`] wrap it with
//! the usual process behaviour (print help/version and exit 0, print
//! `Error: ...` and exit 1).

mod dump;
mod error;
mod map;
mod numeric;
mod option;
mod parser;
mod positionals;
mod stream;

pub use dump::{Snapshot, SnapshotCommand, SnapshotOption};
pub use error::{ERROR_EXIT_CODE, Error, ErrorKind, Result};
pub use map::AliasMap;
pub use numeric::{parse_float, parse_int};
pub use option::{FromValue, Opt, OptionKind, Value};
pub use parser::{Callback, Outcome, Parser};
pub use positionals::Positionals;
pub use stream::ArgStream;
