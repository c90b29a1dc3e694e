pub(crate) const FLAG_PREFIX: char = '-';
pub(crate) const ASSIGNMENT: char = '=';
pub(crate) const END_OF_FLAGS: &str = "--";
pub(crate) const HELP_SHORT: &str = "-h";
pub(crate) const HELP_LONG: &str = "--help";
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";
#[cfg(unix)]
pub(crate) const DEFAULT_PERMS: u32 = 0o640;
