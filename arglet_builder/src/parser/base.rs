use thiserror::Error;

use crate::model::Subject;

/// A mistake in how the parser was declared.
///
/// These are programming errors: they are raised by the declaring call itself (ex: [`Parser::option`](crate::Parser::option)),
/// or, for the two checks that need the whole declaration, at the start of [`Parser::parse`](crate::Parser::parse) before any token is read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The alias set was empty.
    #[error("Config error: an option requires at least one alias.")]
    NoAliases,

    /// More aliases than one short and one long name.
    #[error("Config error: an option takes at most 2 aliases (found {0}).")]
    TooManyAliases(usize),

    /// An alias was the empty string.
    #[error("Config error: an alias cannot be empty.")]
    EmptyAlias,

    /// An alias collides with the `-`/`--`/`=` token syntax, or contains whitespace.
    #[error("Config error: alias '{0}' cannot start with '-' or contain '=' or whitespace.")]
    InvalidAlias(String),

    /// Two single character aliases were given to the same option.
    #[error("Config error: only one short alias can be given for an option (found '{first}' and '{second}').")]
    MultipleShort {
        /// The first short alias.
        first: char,
        /// The repeated short alias.
        second: char,
    },

    /// Two multi character aliases were given to the same option.
    #[error("Config error: only one long alias can be given for an option (found '{first}' and '{second}').")]
    MultipleLong {
        /// The first long alias.
        first: String,
        /// The repeated long alias.
        second: String,
    },

    /// The alias is already used by a previously declared option.
    #[error("Config error: alias '{0}' is already in use.")]
    DuplicateAlias(String),

    /// A value was bound with an empty display name.
    #[error("Config error: a value name cannot be empty.")]
    EmptyName,

    /// A value was bound twice to the same option or argument.
    #[error("Config error: a value has already been configured for '{0}'.")]
    AlreadyConfigured(String),

    /// `between(min, max)` with `min > max` (or an unordered bound, such as `NaN`).
    #[error("Config error: min cannot be greater than max (min={min}, max={max}).")]
    InvalidBounds {
        /// The rejected lower bound.
        min: String,
        /// The rejected upper bound.
        max: String,
    },

    /// `from(values)` with no values.
    #[error("Config error: the set of allowed values cannot be empty.")]
    NoChoices,

    /// A single argument was declared after the trailing argument list.
    #[error("Config error: cannot declare an argument after the argument list.")]
    ArgumentAfterList,

    /// The trailing argument list was declared twice.
    #[error("Config error: the argument list has already been declared.")]
    ListRedeclared,

    /// A positional argument was declared but never given a value.
    #[error("Config error: argument #{0} has no value configured.")]
    UnboundArgument(usize),

    /// The trailing argument list was declared but never given a value.
    #[error("Config error: the argument list has no value configured.")]
    UnboundArgumentList,

    /// A positional without a default follows one with a default.
    #[error("Config error: mandatory argument '{mandatory}' cannot follow optional argument '{optional}'.")]
    MandatoryAfterOptional {
        /// The earlier argument, which has a default.
        optional: String,
        /// The later argument, which has none.
        mandatory: String,
    },
}

/// A rejection of the command line input.
///
/// Every variant other than [`ParseError::EmptyInput`] and [`ParseError::Config`] carries the offending option/argument name.
/// Options are named by the alias they were invoked with (ex: `f` for `-f`, `format` for `--format`).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The token references an alias which was never declared.
    #[error("Parse error: unknown option '{name}'.")]
    BadOption {
        /// The unknown alias, without its `-`/`--` prefix.
        name: String,
    },

    /// A value was present but rejected.
    #[error("Parse error: invalid value '{value}' for {subject} '{name}': {reason}")]
    BadValue {
        /// Whether `name` refers to an option or an argument.
        subject: Subject,
        /// The option alias or argument name.
        name: String,
        /// The rejected token.
        value: String,
        /// Why the token was rejected.
        reason: String,
    },

    /// A mandatory option was never observed.
    #[error("Parse error: mandatory option '{name}' is missing.")]
    MissingOption {
        /// The option's primary alias.
        name: String,
    },

    /// An option's value, or a mandatory positional, had no token available.
    #[error("Parse error: missing value for {subject} '{name}'.")]
    MissingValue {
        /// Whether `name` refers to an option or an argument.
        subject: Subject,
        /// The option alias or argument name.
        name: String,
    },

    /// There are more positional tokens than declared arguments, and no argument list.
    #[error("Parse error: too many arguments (unexpected '{token}').")]
    TooManyArguments {
        /// The first token that could not be placed.
        token: String,
    },

    /// The token sequence did not even contain the program name.
    #[error("Parse error: no tokens provided (expected at least the program name).")]
    EmptyInput,

    /// The declaration was found to be invalid before any token was read.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ParseError {
    /// The name of the option or argument this error is about, when there is one.
    ///
    /// ### Example
    /// ```
    /// # use arglet_builder as arglet;
    /// use arglet::ParseError;
    ///
    /// let error = ParseError::BadOption { name: "x".to_string() };
    /// assert_eq!(error.name(), Some("x"));
    /// assert_eq!(ParseError::EmptyInput.name(), None);
    /// ```
    pub fn name(&self) -> Option<&str> {
        match self {
            ParseError::BadOption { name }
            | ParseError::BadValue { name, .. }
            | ParseError::MissingOption { name }
            | ParseError::MissingValue { name, .. } => Some(name),
            ParseError::TooManyArguments { .. }
            | ParseError::EmptyInput
            | ParseError::Config(_) => None,
        }
    }
}
