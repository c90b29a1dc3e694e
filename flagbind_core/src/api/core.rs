use std::collections::HashSet;

use crate::api::capture::Convert;
use crate::api::convert::*;
use crate::api::field::*;
use crate::api::handle::OpenHandles;
use crate::api::options::*;
use crate::constant::{END_OF_FLAGS, FLAG_PREFIX};
use crate::matcher::{Arity, DescriptorConfig, ParameterClass};
use crate::model::{Distribution, Nargs};
use crate::parser::{
    exit_on_error, exit_on_help, Action, AnonymousCapturable, ConfigError, ConsoleInterface,
    Descriptor, Entry, ParseError, Parser, Printer,
};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The common facts of one registration call.
struct Declaration<'n> {
    name: &'n str,
    help: &'n str,
    short: Option<String>,
    required: bool,
    nargs: Nargs,
    choices: Vec<String>,
    switch: bool,
}

/// The flags parser.
///
/// Parameters are registered against caller owned variables, which are written to during [`FlagParser::parse`].
/// Names starting with `-` are flags, matched anywhere in the input.
/// Any other name is a positional, matched in registration order against the tokens no flag consumed.
///
/// ### Example
/// ```
/// # use flagbind_core as flagbind;
/// use flagbind::{FlagParser, IntOptions, TextOptions};
///
/// let mut count: i64 = 0;
/// let mut name = String::default();
/// let mut parser = FlagParser::new("program");
/// parser
///     .int_var(&mut count, "--count", "How many.", IntOptions::default())
///     .unwrap();
/// parser
///     .text_var(&mut name, "name", "Who.", TextOptions::default())
///     .unwrap();
///
/// let remaining = parser.parse(&["alice", "--count", "3", "extra"]).unwrap();
/// drop(parser);
///
/// assert_eq!(count, 3);
/// assert_eq!(name, "alice");
/// assert_eq!(remaining, vec!["extra"]);
/// ```
pub struct FlagParser<'a> {
    parser: Parser<'a>,
    printer: Printer,
    names: HashSet<String>,
    open_handles: OpenHandles,
    on_error: Box<dyn Fn(&Printer, &ParseError) + 'a>,
    on_help: Box<dyn Fn(&Printer) + 'a>,
}

impl<'a> std::fmt::Debug for FlagParser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagParser")
            .field("program", &self.printer.program())
            .field("names", &self.names)
            .finish()
    }
}

impl<'a> FlagParser<'a> {
    /// Create a flags parser for `program`, the name shown in the help message.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            parser: Parser::default(),
            printer: Printer::terminal(program),
            names: HashSet::default(),
            open_handles: OpenHandles::default(),
            on_error: Box::new(exit_on_error),
            on_help: Box::new(exit_on_help),
        }
    }

    /// Document the about message, shown under the usage line of the help message.
    /// If repeated, only the final message applies.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.printer.set_about(description.into());
        self
    }

    /// Replace the tokens which request the help message (by default `-h` and `--help`).
    /// An empty list disables help recognition.
    ///
    /// ### Example
    /// ```
    /// # use flagbind_core as flagbind;
    /// use flagbind::{FlagParser, ParseError};
    ///
    /// let mut parser = FlagParser::new("program")
    ///     .help_tokens(["-?"])
    ///     .on_help(|_| {});
    ///
    /// assert_eq!(parser.parse(&["-h"]).unwrap(), vec!["-h"]);
    /// assert!(matches!(parser.parse(&["-?"]), Err(ParseError::HelpRequested)));
    /// ```
    pub fn help_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        self.printer.set_help_tokens(tokens.clone());
        self.parser.set_help_tokens(tokens);
        self
    }

    /// Choose how positional parameters share the tokens left over from flag matching.
    pub fn distribution(mut self, distribution: Distribution) -> Self {
        self.parser.set_distribution(distribution);
        self
    }

    /// Replace the callback invoked on a parse error, before [`FlagParser::parse`] returns it.
    /// The default, [`exit_on_error`], reports the error and exits the process.
    pub fn on_error(mut self, callback: impl Fn(&Printer, &ParseError) + 'a) -> Self {
        self.on_error = Box::new(callback);
        self
    }

    /// Replace the callback invoked when help is requested.
    /// The default, [`exit_on_help`], prints the help message and exits the process.
    pub fn on_help(mut self, callback: impl Fn(&Printer) + 'a) -> Self {
        self.on_help = Box::new(callback);
        self
    }

    /// Register an integer parameter.
    ///
    /// The destination is an `i64` or a `Vec<i64>`.
    pub fn int_var(
        &mut self,
        destination: impl Into<Destination<'a>>,
        name: &str,
        help: &str,
        options: IntOptions,
    ) -> Result<(), ConfigError> {
        let IntOptions {
            short,
            required,
            nargs,
            default,
            choices,
        } = options;
        let declaration = Declaration {
            name,
            help,
            short,
            required,
            nargs,
            choices: choices.iter().map(i64::to_string).collect(),
            switch: false,
        };

        self.register(
            declaration,
            destination.into(),
            IntConverter::new(choices),
            default,
        )
    }

    /// Register a string parameter.
    ///
    /// The destination is a `String` or a `Vec<String>`.
    pub fn text_var(
        &mut self,
        destination: impl Into<Destination<'a>>,
        name: &str,
        help: &str,
        options: TextOptions,
    ) -> Result<(), ConfigError> {
        let TextOptions {
            short,
            required,
            nargs,
            default,
            choices,
        } = options;
        let declaration = Declaration {
            name,
            help,
            short,
            required,
            nargs,
            choices: choices.clone(),
            switch: false,
        };

        self.register(
            declaration,
            destination.into(),
            TextConverter::new(choices),
            default,
        )
    }

    /// Register a boolean parameter.
    ///
    /// The destination is a `bool` or a `Vec<bool>`.
    /// A named boolean with `Nargs::Implicit` is a switch: its presence binds `value_on_exist`, and `--flag=value` binds a literal.
    ///
    /// ### Example
    /// ```
    /// # use flagbind_core as flagbind;
    /// use flagbind::{BoolOptions, FlagParser};
    ///
    /// let mut verbose = false;
    /// let mut parser = FlagParser::new("program");
    /// parser
    ///     .bool_var(&mut verbose, "--verbose", "Talk more.", BoolOptions::default())
    ///     .unwrap();
    ///
    /// parser.parse(&["--verbose"]).unwrap();
    /// drop(parser);
    ///
    /// assert!(verbose);
    /// ```
    pub fn bool_var(
        &mut self,
        destination: impl Into<Destination<'a>>,
        name: &str,
        help: &str,
        options: BoolOptions,
    ) -> Result<(), ConfigError> {
        let BoolOptions {
            short,
            required,
            nargs,
            default,
            value_on_exist,
        } = options;
        let declaration = Declaration {
            name,
            help,
            short,
            required,
            nargs,
            choices: Vec::default(),
            switch: true,
        };

        self.register(
            declaration,
            destination.into(),
            BoolConverter::new(value_on_exist),
            default,
        )
    }

    /// Register a file parameter, which opens each path it is given.
    ///
    /// The destination is an `Option<Handle>` or a `Vec<Handle>`.
    pub fn file_var(
        &mut self,
        destination: impl Into<Destination<'a>>,
        name: &str,
        help: &str,
        options: FileOptions,
    ) -> Result<(), ConfigError> {
        let FileOptions {
            short,
            required,
            nargs,
            default,
            mode,
            perms,
            close_on_exit,
        } = options;
        let declaration = Declaration {
            name,
            help,
            short,
            required,
            nargs,
            choices: Vec::default(),
            switch: false,
        };
        let tracker = if close_on_exit {
            Some(self.open_handles.clone())
        } else {
            None
        };

        self.register(
            declaration,
            destination.into(),
            HandleConverter::new(mode, perms, tracker),
            default,
        )
    }

    fn register<T, C>(
        &mut self,
        declaration: Declaration<'_>,
        destination: Destination<'a>,
        converter: C,
        default: Option<T>,
    ) -> Result<(), ConfigError>
    where
        T: Bindable<'a> + Clone,
        C: Convert<T> + 'a,
    {
        let Declaration {
            name,
            help,
            short,
            required,
            nargs,
            choices,
            switch,
        } = declaration;
        let class = ParameterClass::of(name);

        if self.names.contains(name) {
            return Err(ConfigError::DuplicateDescriptor(name.to_string()));
        }

        if let Some(short) = &short {
            if class == ParameterClass::Positional {
                return Err(ConfigError::PositionalShortFlag(name.to_string()));
            }

            if !short.starts_with(FLAG_PREFIX) || short == END_OF_FLAGS {
                return Err(ConfigError::InvalidShortFlag(short.to_string()));
            }

            if short == name || self.names.contains(short) {
                return Err(ConfigError::DuplicateShortFlag(short.to_string()));
            }
        }

        let slot = T::slot(destination).map_err(|found| ConfigError::UnresolvableDestination {
            name: name.to_string(),
            expected: T::TYPE_NAME,
            found,
        })?;
        let arity = Arity::resolve(nargs, class, switch);

        if arity == Arity::Exactly(0) {
            return Err(ConfigError::InvalidNargs(0));
        }

        let single = matches!(nargs, Nargs::Implicit | Nargs::Precisely(0));

        if (slot.is_sequence() && single) || (!slot.is_sequence() && !arity.fits_scalar()) {
            return Err(ConfigError::CollectionArityMismatch {
                name: name.to_string(),
                nargs,
            });
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Registering '{name}' ({short:?}) with arity {arity:?}.");
        }

        self.names.insert(name.to_string());

        if let Some(short) = &short {
            self.names.insert(short.clone());
        }

        self.printer.add(Entry::new(
            name.to_string(),
            short.clone(),
            arity,
            required,
            help.to_string(),
            choices,
        ));
        let capture: Box<dyn AnonymousCapturable + 'a> =
            Box::new(Binding::new(name, slot, converter, default));
        self.parser.add(Descriptor::new(
            DescriptorConfig::new(name, short, required, arity),
            capture,
        ));

        Ok(())
    }

    /// Parse the tokens, binding every registered parameter.
    ///
    /// Returns the tokens no parameter consumed, in input order.
    /// On a parse error, the error callback runs and then the error is returned.
    /// On a help request, the help callback runs and then [`ParseError::HelpRequested`] is returned.
    pub fn parse(&mut self, tokens: &[&str]) -> Result<Vec<String>, ParseError> {
        match self.parser.consume(tokens) {
            Ok(Action::Continue { remaining }) => Ok(remaining),
            Ok(Action::PrintHelp) => {
                (self.on_help)(&self.printer);
                Err(ParseError::HelpRequested)
            }
            Err(error) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Parse failed: {error:?}.");
                }

                (self.on_error)(&self.printer, &error);
                Err(error)
            }
        }
    }

    /// Parse the process arguments, excluding the program name.
    pub fn parse_env(&mut self) -> Result<Vec<String>, ParseError> {
        let tokens: Vec<String> = std::env::args().skip(1).collect();
        let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
        self.parse(&tokens)
    }

    /// Print the help message to the console.
    pub fn print_help(&self) {
        self.printer.print_help(&ConsoleInterface::default());
    }

    /// The help message printer.
    pub fn printer(&self) -> &Printer {
        &self.printer
    }

    /// The registry of files opened by `close_on_exit` parameters.
    pub fn open_handles(&self) -> OpenHandles {
        self.open_handles.clone()
    }

    /// Close every file opened by a `close_on_exit` parameter.
    pub fn close_all_open_files(&self) -> std::io::Result<()> {
        self.open_handles.close_all()
    }
}
