mod base;
mod interface;
mod printer;

pub(crate) use base::*;
pub(crate) use interface::*;
pub use base::{exit_on_error, exit_on_help, ConfigError, ParseError};
pub use printer::Printer;
pub(crate) use printer::Entry;
