use crate::api::handle::Handle;
use crate::model::{Nargs, OpenMode};

/// Options for an integer parameter.
///
/// ### Example
/// ```
/// # use flagbind_core as flagbind;
/// use flagbind::{IntOptions, Nargs};
///
/// let options = IntOptions {
///     short: Some("-n".to_string()),
///     nargs: Nargs::Precisely(2),
///     ..IntOptions::default()
/// };
/// assert!(!options.required);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IntOptions {
    /// The alternative name, ex: `-n` for `--number`.
    pub short: Option<String>,
    /// Whether the parse fails without this parameter.
    pub required: bool,
    /// The number of values per match.
    pub nargs: Nargs,
    /// The value bound when the parameter is not given.
    pub default: Option<i64>,
    /// The admissible values; empty admits any.
    pub choices: Vec<i64>,
}

/// Options for a string parameter.
#[derive(Debug, Clone, Default)]
pub struct TextOptions {
    /// The alternative name, ex: `-n` for `--name`.
    pub short: Option<String>,
    /// Whether the parse fails without this parameter.
    pub required: bool,
    /// The number of values per match.
    pub nargs: Nargs,
    /// The value bound when the parameter is not given.
    pub default: Option<String>,
    /// The admissible values; empty admits any.
    pub choices: Vec<String>,
}

/// Options for a boolean parameter.
///
/// With the default `Nargs::Implicit`, a named boolean is a switch: its presence binds `value_on_exist`.
#[derive(Debug, Clone)]
pub struct BoolOptions {
    /// The alternative name, ex: `-v` for `--verbose`.
    pub short: Option<String>,
    /// Whether the parse fails without this parameter.
    pub required: bool,
    /// The number of values per match.
    pub nargs: Nargs,
    /// The value bound when the parameter is not given.
    pub default: Option<bool>,
    /// The value a switch binds when present.
    pub value_on_exist: bool,
}

impl Default for BoolOptions {
    fn default() -> Self {
        Self {
            short: None,
            required: false,
            nargs: Nargs::default(),
            default: None,
            value_on_exist: true,
        }
    }
}

/// Options for a file parameter.
#[derive(Debug, Clone, Default)]
pub struct FileOptions {
    /// The alternative name, ex: `-o` for `--output`.
    pub short: Option<String>,
    /// Whether the parse fails without this parameter.
    pub required: bool,
    /// The number of values per match.
    pub nargs: Nargs,
    /// The handle bound when the parameter is not given.
    pub default: Option<Handle>,
    /// How each path is opened.
    pub mode: OpenMode,
    /// The permission bits for created files (unix only), `0o640` when unset.
    pub perms: Option<u32>,
    /// Register every opened handle with the parser's [`OpenHandles`](crate::OpenHandles).
    pub close_on_exit: bool,
}
