use std::collections::HashSet;
use thiserror::Error;

use crate::constant::*;
use crate::matcher::*;
use crate::model::{Distribution, Nargs};
use crate::parser::interface::{ConsoleInterface, UserInterface};
use crate::parser::printer::Printer;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A structural mistake in the parser configuration.
///
/// These are returned directly from the registration call, before any input is parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The canonical name is already registered.
    #[error("Config error: cannot duplicate the parameter '{0}'.")]
    DuplicateDescriptor(String),

    /// The short form is already registered.
    #[error("Config error: cannot duplicate the short flag '{0}'.")]
    DuplicateShortFlag(String),

    /// The destination's shape does not match the registration call.
    #[error("Config error: parameter '{name}' binds {expected} values, but the destination is {found}.")]
    UnresolvableDestination {
        /// The canonical name of the parameter.
        name: String,
        /// The value type the registration call binds.
        expected: &'static str,
        /// The destination that was supplied.
        found: &'static str,
    },

    /// The arity does not fit the destination.
    /// A scalar takes at most one value per match, and a sequence needs an explicit positive or unbounded count.
    #[error("Config error: parameter '{name}' cannot bind nargs {nargs} to its destination.")]
    CollectionArityMismatch {
        /// The canonical name of the parameter.
        name: String,
        /// The declared arity.
        nargs: Nargs,
    },

    /// Positional parameters are matched by position, so have no short form.
    #[error("Config error: positional parameter '{0}' cannot have a short flag.")]
    PositionalShortFlag(String),

    /// The short form must be a flag, other than `--`.
    #[error("Config error: short flag '{0}' must start with '-'.")]
    InvalidShortFlag(String),

    /// The signed count is outside `-1..=255`, or an explicit zero count was given to a non-switch.
    #[error("Config error: invalid nargs count {0}.")]
    InvalidNargs(i32),
}

/// A fault while parsing input tokens.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A required named parameter was not found under either of its forms.
    #[error("missing required flag {}.", describe(.name, .short))]
    MissingRequiredFlag {
        /// The canonical name.
        name: String,
        /// The short form, if any.
        short: Option<String>,
    },

    /// A required positional parameter has no tokens left to take.
    #[error("missing required positional argument '{0}'.")]
    MissingRequiredPositional(String),

    /// Fewer tokens follow a named parameter than its arity requires.
    #[error("not enough values passed to flag '{name}' (expected {expected}, got {provided}).")]
    InsufficientArguments {
        /// The canonical name.
        name: String,
        /// The declared count.
        expected: usize,
        /// The available count.
        provided: usize,
    },

    /// Fewer tokens remain for a required positional parameter than its arity requires.
    #[error("not enough values passed to positional argument '{name}' (expected {expected}, got {provided}).")]
    InsufficientPositionalArguments {
        /// The positional label.
        name: String,
        /// The declared count.
        expected: usize,
        /// The available count.
        provided: usize,
    },

    /// A `name=` token has nothing after the `=`.
    #[error("no value assigned to '{0}'.")]
    EmptyAssignedValue(String),

    /// A token could not be converted to the parameter's type.
    #[error("cannot convert '{token}' to {type_name} for '{name}': {reason}.")]
    InvalidValue {
        /// The canonical name.
        name: String,
        /// The offending token.
        token: String,
        /// The target type.
        type_name: &'static str,
        /// Why the conversion failed.
        reason: String,
    },

    /// A converted value is outside the declared choices.
    #[error("invalid value '{token}' for '{name}' (choose from {choices}).")]
    ValueNotInChoices {
        /// The canonical name.
        name: String,
        /// The offending token.
        token: String,
        /// The admissible values, comma separated.
        choices: String,
    },

    /// The path given to a file parameter could not be opened.
    #[error("unable to open '{path}' for '{name}': {source}")]
    ResourceOpenError {
        /// The canonical name.
        name: String,
        /// The path that failed to open.
        path: String,
        /// The underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// A help token was found and the help callback returned control.
    #[error("help requested.")]
    HelpRequested,
}

fn describe(name: &str, short: &Option<String>) -> String {
    match short {
        Some(short) => format!("'{name}'/'{short}'"),
        None => format!("'{name}'"),
    }
}

/// Behaviour to capture an implicit generic type T from an input `&str`.
///
/// We use this at the middle/top of the parser object graph so that different types may all be bound by a single parser.
pub(crate) trait AnonymousCapturable {
    /// Declare that a switch has been matched without a value.
    fn matched(&mut self);

    /// Capture a value anonymously for this parameter.
    fn capture(&mut self, value: &str) -> Result<(), ParseError>;

    /// Declare that the parameter was not matched during a parse.
    fn absent(&mut self);
}


pub(crate) struct Descriptor<'a> {
    config: DescriptorConfig,
    capture: Box<dyn AnonymousCapturable + 'a>,
}

impl<'a> Descriptor<'a> {
    pub(crate) fn new(config: DescriptorConfig, capture: Box<dyn AnonymousCapturable + 'a>) -> Self {
        Self { config, capture }
    }

    fn bind(&mut self, values: &[String]) -> Result<(), ParseError> {
        if values.is_empty() && self.config.arity() == Arity::Presence {
            self.capture.matched();
        }

        for value in values {
            self.capture.capture(value)?;
        }

        Ok(())
    }
}

pub(crate) struct Parser<'a> {
    named: Vec<Descriptor<'a>>,
    positional: Vec<Descriptor<'a>>,
    help_tokens: Vec<String>,
    distribution: Distribution,
}

impl<'a> std::fmt::Debug for Parser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser{..}").finish()
    }
}

impl<'a> Default for Parser<'a> {
    fn default() -> Self {
        Self {
            named: Vec::default(),
            positional: Vec::default(),
            help_tokens: vec![HELP_SHORT.to_string(), HELP_LONG.to_string()],
            distribution: Distribution::default(),
        }
    }
}

impl<'a> Parser<'a> {
    pub(crate) fn add(&mut self, descriptor: Descriptor<'a>) {
        match descriptor.config.class() {
            ParameterClass::Named => self.named.push(descriptor),
            ParameterClass::Positional => self.positional.push(descriptor),
        }
    }

    pub(crate) fn set_help_tokens(&mut self, help_tokens: Vec<String>) {
        self.help_tokens = help_tokens;
    }

    pub(crate) fn set_distribution(&mut self, distribution: Distribution) {
        self.distribution = distribution;
    }

    /// Run both parse phases over the tokens, binding values as they are matched.
    pub(crate) fn consume(&mut self, tokens: &[&str]) -> Result<Action, ParseError> {
        // Everything after the first '--' bypasses flag matching.
        let (flagged, trailing) = match tokens.iter().position(|token| *token == END_OF_FLAGS) {
            Some(index) => (&tokens[..index], &tokens[index + 1..]),
            None => (tokens, &tokens[tokens.len()..]),
        };
        let mut remainder: Vec<String> = flagged.iter().map(|token| token.to_string()).collect();
        let mut missing: Option<ParseError> = None;

        // 1. Match every named parameter, in registration order.
        for descriptor in self.named.iter_mut() {
            match match_flag(&remainder, &descriptor.config)? {
                Some(FlagMatch { values, remainder: rest }) => {
                    descriptor.bind(&values)?;
                    remainder = rest;
                }
                None if descriptor.config.required() => {
                    // Deferred until after help recognition, so `-h` always works.
                    if missing.is_none() {
                        missing.replace(ParseError::MissingRequiredFlag {
                            name: descriptor.config.name().to_string(),
                            short: descriptor.config.short().map(str::to_string),
                        });
                    }
                }
                None => descriptor.capture.absent(),
            }
        }

        // 2. Bind positional parameters given by keyword, as 'label=value'.
        let mut assigned: HashSet<usize> = HashSet::default();

        for (index, descriptor) in self.positional.iter_mut().enumerate() {
            if let Some(FlagMatch { values, remainder: rest }) =
                match_assignment(&remainder, &descriptor.config)?
            {
                descriptor.bind(&values)?;
                remainder = rest;
                assigned.insert(index);
            }
        }

        // 3. Help is only recognized amongst the tokens no flag consumed.
        if remainder
            .iter()
            .any(|token| self.help_tokens.contains(token))
        {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Help requested in remainder {remainder:?}.");
            }

            return Ok(Action::PrintHelp);
        }

        if let Some(error) = missing {
            return Err(error);
        }

        // 4. Distribute what is left amongst the positional parameters.
        remainder.extend(trailing.iter().map(|token| token.to_string()));
        let pending: Vec<usize> = (0..self.positional.len())
            .filter(|index| !assigned.contains(index))
            .collect();
        let configs: Vec<&DescriptorConfig> = pending
            .iter()
            .map(|index| &self.positional[*index].config)
            .collect();
        let Distributed { claims, consumed } =
            distribute(remainder.len(), &configs, self.distribution)?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Positionals consumed {consumed} of {total} tokens.", total = remainder.len());
        }

        for (index, claim) in pending.into_iter().zip(claims) {
            let descriptor = &mut self.positional[index];

            if claim.is_empty() {
                descriptor.capture.absent();
            } else {
                descriptor.bind(&remainder[claim])?;
            }
        }

        Ok(Action::Continue {
            remaining: remainder.split_off(consumed),
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Continue { remaining: Vec<String> },
    PrintHelp,
}

/// The default failure callback: report the error and the help message to the console, then exit with status `1`.
pub fn exit_on_error(printer: &Printer, error: &ParseError) {
    let user_interface = ConsoleInterface::default();
    user_interface.print_error(error);
    printer.print_help(&user_interface);
    std::process::exit(1);
}

/// The default help callback: print the help message to the console, then exit with status `0`.
pub fn exit_on_help(printer: &Printer) {
    printer.print_help(&ConsoleInterface::default());
    std::process::exit(0);
}
