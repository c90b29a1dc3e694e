use crate::constant::FLAG_PREFIX;
use crate::model::Nargs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParameterClass {
    Named,
    Positional,
}

impl ParameterClass {
    pub(crate) fn of(name: &str) -> Self {
        if name.starts_with(FLAG_PREFIX) {
            ParameterClass::Named
        } else {
            ParameterClass::Positional
        }
    }
}

/// The resolved token count for one match of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Arity {
    /// Matching the flag is the whole value; no tokens follow.
    Presence,
    Exactly(usize),
    Unbounded,
}

impl Arity {
    /// Resolve the declared `Nargs`.
    /// Only a named switch (boolean flag) treats `Nargs::Implicit` as presence.
    pub(crate) fn resolve(nargs: Nargs, class: ParameterClass, switch: bool) -> Self {
        match nargs {
            Nargs::Implicit | Nargs::Precisely(0) if switch && class == ParameterClass::Named => {
                Arity::Presence
            }
            Nargs::Implicit => Arity::Exactly(1),
            Nargs::Precisely(n) => Arity::Exactly(n as usize),
            Nargs::Unbounded => Arity::Unbounded,
        }
    }

    /// Whether a single-value destination can hold every value of one match.
    pub(crate) fn fits_scalar(&self) -> bool {
        matches!(self, Arity::Presence | Arity::Exactly(0) | Arity::Exactly(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DescriptorConfig {
    name: String,
    short: Option<String>,
    required: bool,
    arity: Arity,
}

impl DescriptorConfig {
    pub(crate) fn new(
        name: impl Into<String>,
        short: Option<String>,
        required: bool,
        arity: Arity,
    ) -> Self {
        Self {
            name: name.into(),
            short,
            required,
            arity,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    pub(crate) fn required(&self) -> bool {
        self.required
    }

    pub(crate) fn arity(&self) -> Arity {
        self.arity
    }

    pub(crate) fn class(&self) -> ParameterClass {
        ParameterClass::of(&self.name)
    }
}
