/// How an option relates to a value on the command line.
///
/// Derived from the option's configuration, never stored:
/// an option without a value slot is [`ArgType::NoArg`], and one with a value slot is
/// [`ArgType::Optional`] when that slot carries a default, otherwise [`ArgType::Mandatory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// The option never takes a value (ex: `--verbose`).
    NoArg,
    /// The option takes a value, falling back to its default when none is attached (ex: `-o` or `-o5`).
    Optional,
    /// The option must be given a value, attached or as the next token (ex: `-f x`).
    Mandatory,
}

impl std::fmt::Display for ArgType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgType::NoArg => write!(f, "no_arg"),
            ArgType::Optional => write!(f, "optional"),
            ArgType::Mandatory => write!(f, "mandatory"),
        }
    }
}

/// What a parse error is about: a named option or a positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    /// A `-s`/`--long` option.
    Option,
    /// A positional argument (single or trailing list).
    Argument,
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::Option => write!(f, "option"),
            Subject::Argument => write!(f, "argument"),
        }
    }
}
