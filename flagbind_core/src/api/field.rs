use crate::api::capture::*;
use crate::api::handle::Handle;
use crate::parser::{AnonymousCapturable, ParseError};

/// The caller owned variable that a parameter binds into.
///
/// Scalar variants are overwritten by each bound value, list variants are appended to.
/// Every `&mut` destination converts with `into()`, so registration calls may pass `&mut x` directly.
#[derive(Debug)]
pub enum Destination<'a> {
    /// A single integer.
    Int(&'a mut i64),
    /// A list of integers.
    Ints(&'a mut Vec<i64>),
    /// A single string.
    Text(&'a mut String),
    /// A list of strings.
    Texts(&'a mut Vec<String>),
    /// A single boolean.
    Bool(&'a mut bool),
    /// A list of booleans.
    Bools(&'a mut Vec<bool>),
    /// A single file, absent until opened.
    File(&'a mut Option<Handle>),
    /// A list of files.
    Files(&'a mut Vec<Handle>),
}

impl<'a> Destination<'a> {
    /// Describes the destination, for configuration errors.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Destination::Int(_) => "an integer",
            Destination::Ints(_) => "an integer list",
            Destination::Text(_) => "a string",
            Destination::Texts(_) => "a string list",
            Destination::Bool(_) => "a boolean",
            Destination::Bools(_) => "a boolean list",
            Destination::File(_) => "a file",
            Destination::Files(_) => "a file list",
        }
    }
}

macro_rules! destination_from {
    ($variant:ident, $type:ty) => {
        impl<'a> From<&'a mut $type> for Destination<'a> {
            fn from(value: &'a mut $type) -> Self {
                Destination::$variant(value)
            }
        }
    };
}

destination_from!(Int, i64);
destination_from!(Ints, Vec<i64>);
destination_from!(Text, String);
destination_from!(Texts, Vec<String>);
destination_from!(Bool, bool);
destination_from!(Bools, Vec<bool>);
destination_from!(File, Option<Handle>);
destination_from!(Files, Vec<Handle>);

/// A destination resolved to its value type.
pub(crate) enum Slot<'a, T> {
    Scalar(&'a mut T),
    Optional(&'a mut Option<T>),
    Sequence(&'a mut Vec<T>),
}

impl<'a, T> Slot<'a, T> {
    fn bind(&mut self, value: T) {
        match self {
            Slot::Scalar(variable) => **variable = value,
            Slot::Optional(variable) => {
                variable.replace(value);
            }
            Slot::Sequence(variable) => variable.push(value),
        }
    }

    pub(crate) fn is_sequence(&self) -> bool {
        matches!(self, Slot::Sequence(_))
    }
}

/// A value type that may be bound into a `Destination`.
pub(crate) trait Bindable<'a>: Sized + 'a {
    const TYPE_NAME: &'static str;

    /// Resolve the destination into a slot of this type, or describe what was found instead.
    fn slot(destination: Destination<'a>) -> Result<Slot<'a, Self>, &'static str>;
}

impl<'a> Bindable<'a> for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn slot(destination: Destination<'a>) -> Result<Slot<'a, Self>, &'static str> {
        match destination {
            Destination::Int(variable) => Ok(Slot::Scalar(variable)),
            Destination::Ints(variable) => Ok(Slot::Sequence(variable)),
            other => Err(other.kind()),
        }
    }
}

impl<'a> Bindable<'a> for String {
    const TYPE_NAME: &'static str = "string";

    fn slot(destination: Destination<'a>) -> Result<Slot<'a, Self>, &'static str> {
        match destination {
            Destination::Text(variable) => Ok(Slot::Scalar(variable)),
            Destination::Texts(variable) => Ok(Slot::Sequence(variable)),
            other => Err(other.kind()),
        }
    }
}

impl<'a> Bindable<'a> for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn slot(destination: Destination<'a>) -> Result<Slot<'a, Self>, &'static str> {
        match destination {
            Destination::Bool(variable) => Ok(Slot::Scalar(variable)),
            Destination::Bools(variable) => Ok(Slot::Sequence(variable)),
            other => Err(other.kind()),
        }
    }
}

impl<'a> Bindable<'a> for Handle {
    const TYPE_NAME: &'static str = "file";

    fn slot(destination: Destination<'a>) -> Result<Slot<'a, Self>, &'static str> {
        match destination {
            Destination::File(variable) => Ok(Slot::Optional(variable)),
            Destination::Files(variable) => Ok(Slot::Sequence(variable)),
            other => Err(other.kind()),
        }
    }
}

/// Ties a converter to the slot it writes into.
pub(crate) struct Binding<'a, T, C> {
    name: String,
    slot: Slot<'a, T>,
    converter: C,
    default: Option<T>,
}

impl<'a, T, C> Binding<'a, T, C> {
    pub(crate) fn new(
        name: impl Into<String>,
        slot: Slot<'a, T>,
        converter: C,
        default: Option<T>,
    ) -> Self {
        Self {
            name: name.into(),
            slot,
            converter,
            default,
        }
    }
}

impl<'a, T, C> AnonymousCapturable for Binding<'a, T, C>
where
    T: Clone,
    C: Convert<T>,
{
    fn matched(&mut self) {
        if let Some(value) = self.converter.present() {
            self.slot.bind(value);
        }
    }

    fn capture(&mut self, token: &str) -> Result<(), ParseError> {
        let value = self
            .converter
            .convert(token)
            .map_err(|invalid| invalid.named(&self.name))?;
        self.slot.bind(value);
        Ok(())
    }

    fn absent(&mut self) {
        if let Some(default) = &self.default {
            self.slot.bind(default.clone());
        }
    }
}
