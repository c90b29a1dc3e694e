mod capture;
mod convert;
mod core;
mod field;
mod handle;
mod options;

pub use self::core::FlagParser;
pub use field::Destination;
pub use handle::{Handle, OpenHandles};
pub use options::*;
