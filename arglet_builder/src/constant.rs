pub(crate) const SHORT_PREFIX: char = '-';
pub(crate) const LONG_PREFIX: &str = "--";
pub(crate) const SEPARATOR: &str = "--";
pub(crate) const VALUE_DELIMITER: char = '=';
pub(crate) const DEFAULT_PROGRAM: &str = "program";
pub(crate) const DEFAULT_LINE_WIDTH: usize = 80;
pub(crate) const MANDATORY_MARKER: &str = "(mandatory)";
