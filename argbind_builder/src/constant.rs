pub(crate) const HELP_SHORT: &str = "-h";
pub(crate) const HELP_LONG: &str = "--help";
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";
pub(crate) const LONG_PREFIX: &str = "--";
pub(crate) const DEFAULT_SEPARATOR: char = '=';

// Fractional part tolerated when an integer field receives a decimal representation.
pub(crate) const INTEGER_TOLERANCE: f64 = 1e-10;

// Used whenever the terminal cannot be queried (ex: output is redirected).
pub(crate) const DEFAULT_TOTAL_WIDTH: usize = 100;
pub(crate) const CHILD_INDENT: usize = 4;
