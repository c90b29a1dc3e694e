//! `flagbind` is a flags parser for Rust.
//!
//! It binds command line tokens straight into caller owned variables.
//! Each parameter is registered against a `&mut` destination, and a single call to [`FlagParser::parse`] writes every matched value.
//! The tokens no parameter consumed are handed back to the caller.
//!
//! `flagbind` prioritizes the following design concerns:
//! * *Typed destinations*:
//! The caller never converts `&str` values.
//! Integers, strings, booleans and files each have a registration call, and a destination of the wrong shape is rejected at registration.
//! * *Flags anywhere, positionals in order*:
//! Names starting with `-` are flags, matched anywhere in the input.
//! Every other name is a positional, filled in registration order from the tokens the flags left behind.
//! * *Configuration errors are not parse errors*:
//! Mistakes in the parser configuration are returned from registration as [`ConfigError`], before any input is read.
//! Faults in the input are reported as [`ParseError`] through a replaceable callback.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/summer.rs")]
//! ```
//!
//! ```console
//! $ summer -h
//! usage: summer [-h] ITEM [...]
//!
//! Sums its arguments.
//!
//! positional arguments:
//!  ITEM [...]   The items to sum.
//!
//! options:
//!  -h, --help   Show this help message and exit.
//!
//! $ summer 1 2 0x10
//! Sum: 19
//!
//! $ summer 1 blah
//! Parse error: cannot convert 'blah' to integer for 'item': invalid digit found in string.
//! usage: summer [-h] ITEM [...]
//! ...
//! ```
//!
//! # Flag syntax
//! A flag takes its values from the tokens right after it, or from an `=` in the same token:
//! * `-f value`, `--flag value`, `-f=value`, `--flag=value`.
//! * A boolean flag is a switch: `--flag` alone binds its `value_on_exist`, while `--flag=false` binds the literal.
//! * A positional may also be given by keyword, as `label=value`.
//! * Every token after `--` is positional, even when it looks like a flag.
//!
//! The number of values per match is set by [`Nargs`].
//! Scalar destinations take at most one value, while `Vec` destinations need an explicit or unbounded count and append every value in order.
//!
//! # Help and errors
//! The tokens `-h` and `--help` request the help message, unless they were consumed as a flag's value.
//! By default, a help request prints the help message and exits with status `0` ([`exit_on_help`]),
//! and a parse error prints the error followed by the help message, then exits with status `1` ([`exit_on_error`]).
//! Replace either with [`FlagParser::on_help`] or [`FlagParser::on_error`]; when the callback returns, `parse` returns the error.
//!
//! ```
//! use flagbind::{FlagParser, IntOptions, ParseError};
//!
//! let mut count: i64 = 0;
//! let mut parser = FlagParser::new("program").on_error(|_, _| {});
//! parser
//!     .int_var(&mut count, "--count", "How many.", IntOptions { required: true, ..IntOptions::default() })
//!     .unwrap();
//!
//! let result = parser.parse(&["extra"]);
//!
//! assert!(matches!(result, Err(ParseError::MissingRequiredFlag { .. })));
//! ```
//!
//! # Files
//! File parameters open each path they are given, with the [`OpenMode`] and permissions of their [`FileOptions`].
//! Files declared with `close_on_exit` are tracked by the parser's [`OpenHandles`], which closes them all at once.
//! ```no_run
#![doc = include_str!("../demos/copier.rs")]
//! ```
//!
//! # Features
//! * `tracing_debug`: Emit `tracing` debug events describing the parse.

pub use flagbind_core::*;
