use std::str::FromStr;

use crate::parser::ConfigError;

/// The cardinality of tokens a descriptor consumes per match.
///
/// Mirrors the signed count convention: `0` is [`Nargs::Implicit`], `k > 0` is [`Nargs::Precisely`], `-1` is [`Nargs::Unbounded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nargs {
    /// `0`: Precisely one value, or presence alone for a boolean flag.
    #[default]
    Implicit,
    /// `k`: Precisely `k` values, for `k` in `1..=255`.
    ///
    /// `Precisely(0)` is only accepted on a named boolean flag, where it means presence alone.
    Precisely(u8),
    /// `-1`: Every value available.
    Unbounded,
}

impl TryFrom<i32> for Nargs {
    type Error = ConfigError;

    fn try_from(count: i32) -> Result<Self, Self::Error> {
        match count {
            -1 => Ok(Nargs::Unbounded),
            0 => Ok(Nargs::Implicit),
            k if k > 0 && k <= u8::MAX as i32 => Ok(Nargs::Precisely(k as u8)),
            _ => Err(ConfigError::InvalidNargs(count)),
        }
    }
}

impl std::fmt::Display for Nargs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// How positional descriptors share the tokens left over after flag matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Distribution {
    /// Each positional starts where the previous one stopped, so consumption accumulates.
    #[default]
    Sequential,
    /// Every positional reads from the same head, and the widest single claim is what gets consumed.
    Overlapping,
}

/// How a file-typed descriptor opens its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// `r`: Read only; the file must exist.
    #[default]
    Read,
    /// `w`: Write only, truncating and creating as needed.
    Write,
    /// `rw`: Read and write, truncating and creating as needed.
    ReadWrite,
}

impl OpenMode {
    pub(crate) fn writable(&self) -> bool {
        !matches!(self, OpenMode::Read)
    }
}

impl FromStr for OpenMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "r" => Ok(OpenMode::Read),
            "w" => Ok(OpenMode::Write),
            "rw" | "wr" => Ok(OpenMode::ReadWrite),
            _ => Err(format!("unknown open mode '{value}'")),
        }
    }
}
