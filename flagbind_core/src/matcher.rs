mod flags;
mod model;
mod positional;

pub(crate) use flags::*;
pub(crate) use model::*;
pub(crate) use positional::*;
