use terminal_size::{terminal_size, Width};

use crate::constant::*;
use crate::matcher::{Arity, ParameterClass};
use crate::parser::interface::*;

/// The help text facts of one registered descriptor.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    name: String,
    short: Option<String>,
    arity: Arity,
    required: bool,
    help: String,
    choices: Vec<String>,
}

impl Entry {
    pub(crate) fn new(
        name: String,
        short: Option<String>,
        arity: Arity,
        required: bool,
        help: String,
        choices: Vec<String>,
    ) -> Self {
        Self {
            name,
            short,
            arity,
            required,
            help,
            choices,
        }
    }

    fn meta(&self) -> String {
        self.name
            .trim_start_matches(FLAG_PREFIX)
            .replace(FLAG_PREFIX, "_")
            .to_ascii_uppercase()
    }

    /// The value grammar following the name, ex: `FLAG`, `FLAG FLAG`, `[FLAG ...]`.
    fn grammar(&self) -> String {
        let meta = self.meta();

        match self.arity {
            Arity::Presence => String::default(),
            Arity::Exactly(n) => vec![meta; n].join(" "),
            Arity::Unbounded => format!("[{meta} ...]"),
        }
    }

    fn usage(&self) -> String {
        match ParameterClass::of(&self.name) {
            ParameterClass::Named => {
                let grammar = self.grammar();
                let base = if grammar.is_empty() {
                    self.name.clone()
                } else {
                    format!("{} {grammar}", self.name)
                };

                if self.required {
                    base
                } else {
                    format!("[{base}]")
                }
            }
            ParameterClass::Positional => match (self.arity, self.required) {
                (Arity::Unbounded, true) => format!("{m} [...]", m = self.meta()),
                (Arity::Unbounded, false) => self.grammar(),
                (_, true) => self.grammar(),
                (_, false) => format!("[{}]", self.grammar()),
            },
        }
    }

    /// The name column, ex: `-f, --flag FLAG`.
    fn left(&self) -> String {
        match ParameterClass::of(&self.name) {
            ParameterClass::Named => {
                let grammar = self.grammar();
                let mut left = match &self.short {
                    Some(short) => format!("{short}, {}", self.name),
                    None => self.name.clone(),
                };

                if !grammar.is_empty() {
                    left.push(' ');
                    left.push_str(&grammar);
                }

                left
            }
            ParameterClass::Positional => self.usage(),
        }
    }

    /// The description column, ex: `The mode. Choices: a, b.`.
    fn middle(&self) -> String {
        let mut middle = self.help.clone();

        if !self.choices.is_empty() {
            if !middle.is_empty() {
                middle.push(' ');
            }

            middle.push_str(&format!("Choices: {}.", self.choices.join(", ")));
        }

        if self.required && ParameterClass::of(&self.name) == ParameterClass::Named {
            if !middle.is_empty() {
                middle.push(' ');
            }

            middle.push_str("(required)");
        }

        middle
    }
}

/// Renders the help message of a `FlagParser`.
pub struct Printer {
    program: String,
    about: Option<String>,
    help_tokens: Vec<String>,
    named: Vec<Entry>,
    positional: Vec<Entry>,
    terminal_width: Option<usize>,
}

const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;

impl Printer {
    pub(crate) fn terminal(program: impl Into<String>) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(program, terminal_width)
    }

    pub(crate) fn new(program: impl Into<String>, terminal_width: Option<usize>) -> Self {
        Self {
            program: program.into(),
            about: None,
            help_tokens: vec![HELP_SHORT.to_string(), HELP_LONG.to_string()],
            named: Vec::default(),
            positional: Vec::default(),
            terminal_width,
        }
    }

    pub(crate) fn set_about(&mut self, about: String) {
        self.about.replace(about);
    }

    pub(crate) fn set_help_tokens(&mut self, help_tokens: Vec<String>) {
        self.help_tokens = help_tokens;
    }

    pub(crate) fn add(&mut self, entry: Entry) {
        match ParameterClass::of(&entry.name) {
            ParameterClass::Named => self.named.push(entry),
            ParameterClass::Positional => self.positional.push(entry),
        }
    }

    /// The program name shown in the usage line.
    pub fn program(&self) -> &str {
        &self.program
    }

    fn help_entry(&self) -> Option<(String, String)> {
        if self.help_tokens.is_empty() {
            None
        } else {
            Some((self.help_tokens.join(", "), HELP_MESSAGE.to_string()))
        }
    }

    fn usage(&self) -> String {
        let mut parts = vec![format!("usage: {}", self.program)];

        if let Some(help) = self.help_tokens.first() {
            parts.push(format!("[{help}]"));
        }

        parts.extend(self.named.iter().map(Entry::usage));
        parts.extend(self.positional.iter().map(Entry::usage));
        parts.join(" ")
    }

    /// Render the full help message, one element per line.
    pub fn lines(&self) -> Vec<String> {
        let options: Vec<(String, String)> = self
            .help_entry()
            .into_iter()
            .chain(self.named.iter().map(|e| (e.left(), e.middle())))
            .collect();
        let arguments: Vec<(String, String)> = self
            .positional
            .iter()
            .map(|e| (e.left(), e.middle()))
            .collect();
        let left_width = options
            .iter()
            .chain(arguments.iter())
            .map(|(left, _)| left.len())
            .max()
            .unwrap_or(0)
            .max(1);
        let middle_width = options
            .iter()
            .chain(arguments.iter())
            .map(|(_, middle)| middle.len())
            .max()
            .unwrap_or(0)
            .max(MINIMUM_MIDDLE_WIDTH);
        let column_renderer = match self.terminal_width {
            Some(total) => ColumnRenderer::guided(
                PaddingWidth(PADDING_WIDTH),
                LeftWidth(left_width),
                MiddleWidth(middle_width),
                TotalWidth(total.saturating_sub(MAIN_INDENT)),
            ),
            None => ColumnRenderer::new(
                PaddingWidth(PADDING_WIDTH),
                LeftWidth(left_width),
                MiddleWidth(middle_width),
            ),
        };
        let mut lines = vec![self.usage()];

        if let Some(about) = &self.about {
            lines.push(String::default());
            let width = self
                .terminal_width
                .unwrap_or(usize::MAX)
                .max(MINIMUM_MIDDLE_WIDTH);
            lines.extend(chunk(about, width));
        }

        if !arguments.is_empty() {
            lines.push(String::default());
            lines.push("positional arguments:".to_string());

            for (left, middle) in &arguments {
                lines.extend(column_renderer.render(MAIN_INDENT, left, middle));
            }
        }

        if !options.is_empty() {
            lines.push(String::default());
            lines.push("options:".to_string());

            for (left, middle) in &options {
                lines.extend(column_renderer.render(MAIN_INDENT, left, middle));
            }
        }

        lines
    }

    /// Render the full help message.
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }

    pub(crate) fn print_help(&self, user_interface: &(impl UserInterface + ?Sized)) {
        for line in self.lines() {
            user_interface.print(line);
        }
    }
}

impl std::fmt::Debug for Printer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Printer")
            .field("program", &self.program)
            .finish()
    }
}
