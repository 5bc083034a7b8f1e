use crate::api::{ValueListSlot, ValueSlot};
use crate::constant::*;
use crate::matcher::{OptionEntry, PositionalEntry, Registry, Session};
use crate::parser::{ConfigError, ParseError};

/// The command line parser: declare options and arguments, then parse tokens into their destinations.
///
/// Every destination is borrowed for `'a`, the lifetime of the parser.
/// Drop the parser (or let it go out of scope) before reading them.
///
/// ### Example
/// ```
/// # use arglet_builder as arglet;
/// use arglet::Parser;
///
/// let mut verbose = false;
/// let mut count: i64 = 0;
/// let mut parser = Parser::new();
/// parser.flag(&["v", "verbose"], "Prints more.", &mut verbose).unwrap();
/// parser
///     .option(&["n", "count"], "How many times.").unwrap()
///     .int_val("COUNT", &mut count).unwrap();
///
/// parser.parse(&["program", "-vn", "3"]).unwrap();
/// drop(parser);
///
/// assert!(verbose);
/// assert_eq!(count, 3);
/// ```
#[derive(Default)]
pub struct Parser<'a> {
    program: Option<String>,
    invoked_as: Option<String>,
    registry: Registry<'a>,
}

impl<'a> Parser<'a> {
    /// Create an empty command line parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a mandatory option.
    /// Parsing fails with [`ParseError::MissingOption`] unless it appears on the command line.
    ///
    /// The aliases are at most one short (single character, invoked as `-s`) and one long (invoked as `--long`) name.
    /// Attach a value via the returned handle; without one, the option takes no value.
    ///
    /// ### Example
    /// ```
    /// # use arglet_builder as arglet;
    /// use arglet::{Parser, ParseError};
    ///
    /// let mut name = String::default();
    /// let mut parser = Parser::new();
    /// parser
    ///     .option(&["n", "name"], "Who to greet.").unwrap()
    ///     .string_val("NAME", &mut name).unwrap();
    ///
    /// assert_eq!(
    ///     parser.parse(&["program"]),
    ///     Err(ParseError::MissingOption { name: "n".to_string() }),
    /// );
    /// ```
    pub fn option(
        &mut self,
        aliases: &[&str],
        hint: impl Into<String>,
    ) -> Result<ValueSlot<'_, 'a>, ConfigError> {
        let entry = self.registry.declare_option(aliases, hint, None)?;
        let owner = entry.aliases().primary();
        Ok(ValueSlot::new(owner, entry.slot_mut()))
    }

    /// Declare an optional option; `observed` is set to whether it appeared on the command line.
    ///
    /// ### Example
    /// ```
    /// # use arglet_builder as arglet;
    /// use arglet::Parser;
    ///
    /// let mut version = false;
    /// let mut parser = Parser::new();
    /// parser.flag(&["V", "version"], "Show the version.", &mut version).unwrap();
    ///
    /// parser.parse(&["program", "--version"]).unwrap();
    /// drop(parser);
    /// assert!(version);
    /// ```
    pub fn flag(
        &mut self,
        aliases: &[&str],
        hint: impl Into<String>,
        observed: &'a mut bool,
    ) -> Result<ValueSlot<'_, 'a>, ConfigError> {
        let entry = self.registry.declare_option(aliases, hint, Some(observed))?;
        let owner = entry.aliases().primary();
        Ok(ValueSlot::new(owner, entry.slot_mut()))
    }

    /// Declare the next single positional argument.
    ///
    /// Arguments consume tokens in declaration order.
    /// Every argument must be given a value, and those with a default must come after those without.
    /// Fails if the argument list has already been declared.
    ///
    /// ### Example
    /// ```
    /// # use arglet_builder as arglet;
    /// use arglet::Parser;
    ///
    /// let mut source = String::default();
    /// let mut copies: i64 = 0;
    /// let mut parser = Parser::new();
    /// parser.argument().unwrap().string_val("SOURCE", &mut source).unwrap();
    /// parser.argument().unwrap().int_val("COPIES", &mut copies).unwrap().with_default(1);
    ///
    /// parser.parse(&["program", "notes.txt"]).unwrap();
    /// drop(parser);
    /// assert_eq!(source, "notes.txt");
    /// assert_eq!(copies, 1);
    /// ```
    pub fn argument(&mut self) -> Result<ValueSlot<'_, 'a>, ConfigError> {
        let position = self.registry.positionals().singles().len();
        let entry = self.registry.positionals_mut().push_single()?;
        Ok(ValueSlot::new(
            format!("argument #{position}"),
            entry.slot_mut(),
        ))
    }

    /// Declare the trailing argument list, which collects every positional token left over after the single arguments.
    /// Fails if called twice.
    pub fn argument_list(&mut self) -> Result<ValueListSlot<'_, 'a>, ConfigError> {
        let entry = self.registry.positionals_mut().declare_list()?;
        Ok(ValueListSlot::new("argument list", entry.slot_mut()))
    }

    /// Set the program name displayed by the help message.
    /// Otherwise, the name the program was invoked as (the first parsed token) is used.
    pub fn set_program(&mut self, program: impl Into<String>) {
        self.program.replace(program.into());
    }

    /// The program name displayed by the help message.
    pub fn program(&self) -> &str {
        self.program
            .as_deref()
            .or(self.invoked_as.as_deref())
            .unwrap_or(DEFAULT_PROGRAM)
    }

    /// The declared options, in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &OptionEntry<'a>> {
        self.registry.options().iter()
    }

    /// The declared single positional arguments, in declaration order.
    pub fn arguments(&self) -> impl Iterator<Item = &PositionalEntry<'a>> {
        self.registry.positionals().singles().iter()
    }

    /// The trailing argument list, if declared.
    pub fn argument_list_entry(&self) -> Option<&PositionalEntry<'a>> {
        self.registry.positionals().list()
    }

    /// Parse the command line `tokens` into the declared destinations.
    ///
    /// The first token is the program name; it is only used for display.
    /// Options are read first, up to the first positional token or the `--` separator.
    /// The remaining tokens fill the arguments, then the argument list.
    ///
    /// Parsing stops at the first error, so destinations may be partially written.
    /// The parser may be reused: each call starts from a clean state.
    ///
    /// The destinations stay borrowed for the whole life of the parser, not just for one call.
    /// So the results of one parse cannot be read while the same parser is kept for another:
    /// ```compile_fail
    /// # use arglet_builder as arglet;
    /// use arglet::Parser;
    ///
    /// let mut count: i64 = 0;
    /// let mut parser = Parser::new();
    /// parser.option(&["n"], "").unwrap().int_val("COUNT", &mut count).unwrap();
    ///
    /// parser.parse(&["program", "-n", "1"]).unwrap();
    /// println!("{count}");
    /// parser.parse(&["program", "-n", "2"]).unwrap();
    /// ```
    /// Declare a parser per parse instead (ex: in a function or a block), dropping it before reading:
    /// ```
    /// # use arglet_builder as arglet;
    /// use arglet::{ParseError, Parser};
    ///
    /// fn count(tokens: &[&str]) -> Result<i64, ParseError> {
    ///     let mut count: i64 = 0;
    ///     let mut parser = Parser::new();
    ///     parser.option(&["n"], "")?.int_val("COUNT", &mut count)?;
    ///     parser.parse(tokens)?;
    ///     drop(parser);
    ///     Ok(count)
    /// }
    ///
    /// assert_eq!(count(&["program", "-n", "1"]), Ok(1));
    /// assert_eq!(count(&["program", "-n", "2"]), Ok(2));
    /// ```
    pub fn parse(&mut self, tokens: &[&str]) -> Result<(), ParseError> {
        let (program, rest) = tokens.split_first().ok_or(ParseError::EmptyInput)?;
        self.invoked_as.replace(basename(program).to_string());
        Session::new(&mut self.registry, rest).run()
    }
}

fn basename(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArgType, Subject};
    use rstest::rstest;

    #[rstest]
    #[case("program", "program")]
    #[case("./program", "program")]
    #[case("/usr/local/bin/program", "program")]
    #[case("C:\\tools\\program.exe", "program.exe")]
    #[case("dir/", "")]
    fn program(#[case] token: &str, #[case] expected: &str) {
        // Setup
        let mut parser = Parser::new();
        assert_eq!(parser.program(), "program");

        // Execute
        parser.parse(&[token]).unwrap();

        // Verify
        assert_eq!(parser.program(), expected);
        parser.set_program("override");
        parser.parse(&[token]).unwrap();
        assert_eq!(parser.program(), "override");
    }

    #[test]
    fn parse_empty() {
        let mut parser = Parser::new();
        assert_eq!(parser.parse(&[]), Err(ParseError::EmptyInput));
    }

    #[test]
    fn parse_program_only() {
        // Setup
        let mut flag = false;
        let mut parser = Parser::new();
        parser.flag(&["f"], "", &mut flag).unwrap();

        // Execute
        parser.parse(&["-f"]).unwrap();

        // Verify
        drop(parser);
        assert!(!flag);
    }

    #[test]
    fn argument_after_list() {
        // Setup
        let mut values: Vec<i64> = Vec::default();
        let mut parser = Parser::new();
        parser
            .argument_list()
            .unwrap()
            .int_val("values", &mut values)
            .unwrap();

        // Execute
        let result = parser.argument().err();

        // Verify
        assert_matches!(result, Some(ConfigError::ArgumentAfterList));
        assert_eq!(parser.arguments().count(), 0);
    }

    #[test]
    fn argument_list_twice() {
        let mut parser = Parser::new();
        parser.argument_list().unwrap();
        assert_matches!(parser.argument_list().err(), Some(ConfigError::ListRedeclared));
    }

    #[test]
    fn duplicate_alias() {
        // Setup
        let mut flag = false;
        let mut parser = Parser::new();
        parser.option(&["f", "format"], "").unwrap();

        // Execute
        let result = parser.flag(&["format"], "", &mut flag).err();

        // Verify
        assert_eq!(result, Some(ConfigError::DuplicateAlias("format".to_string())));
        assert_eq!(parser.options().count(), 1);
    }

    #[test]
    fn mandatory_after_optional() {
        // Setup
        let mut a: i64 = 0;
        let mut b: i64 = 0;
        let mut parser = Parser::new();
        parser
            .argument()
            .unwrap()
            .int_val("arg", &mut a)
            .unwrap()
            .with_default(1);
        parser.argument().unwrap().int_val("arg2", &mut b).unwrap();

        // Execute
        let result = parser.parse(&["program", "1", "2"]);

        // Verify
        assert_eq!(
            result,
            Err(ParseError::Config(ConfigError::MandatoryAfterOptional {
                optional: "arg".to_string(),
                mandatory: "arg2".to_string(),
            }))
        );
        drop(parser);
        assert_eq!(a, 0);
        assert_eq!(b, 0);
    }

    #[test]
    fn argument_without_value() {
        // Setup
        let mut parser = Parser::new();
        parser.argument().unwrap();

        // Execute
        let result = parser.parse(&["program", "1"]);

        // Verify
        assert_eq!(
            result,
            Err(ParseError::Config(ConfigError::UnboundArgument(0)))
        );
    }

    #[test]
    fn metadata() {
        // Setup
        let mut verbose = false;
        let mut format = String::default();
        let mut input = String::default();
        let mut rest: Vec<f64> = Vec::default();
        let mut parser = Parser::new();
        parser.flag(&["v"], "Verbose.", &mut verbose).unwrap();
        parser
            .option(&["format", "f"], "The format.")
            .unwrap()
            .string_val("FORMAT", &mut format)
            .unwrap()
            .with_default("utc");
        parser
            .argument()
            .unwrap()
            .string_val("INPUT", &mut input)
            .unwrap();
        parser
            .argument_list()
            .unwrap()
            .double_val("REST", &mut rest)
            .unwrap();

        // Execute
        let options: Vec<(String, bool, ArgType, Option<&str>)> = parser
            .options()
            .map(|o| (o.aliases().to_string(), o.mandatory(), o.arg_type(), o.value_name()))
            .collect();
        let arguments: Vec<Option<&str>> = parser.arguments().map(|a| a.name()).collect();

        // Verify
        assert_eq!(
            options,
            vec![
                ("-v".to_string(), false, ArgType::NoArg, None),
                ("-f, --format".to_string(), true, ArgType::Optional, Some("FORMAT")),
            ]
        );
        assert_eq!(arguments, vec![Some("INPUT")]);
        assert_eq!(
            parser.argument_list_entry().and_then(|entry| entry.name()),
            Some("REST")
        );
    }

    #[test]
    fn parse_bad_value_argument() {
        // Setup
        let mut a: f64 = 0.0;
        let mut parser = Parser::new();
        parser.argument().unwrap().double_val("ratio", &mut a).unwrap();

        // Execute
        let result = parser.parse(&["program", "half"]);

        // Verify
        assert_matches!(result, Err(ParseError::BadValue { subject: Subject::Argument, name, value, .. }) => {
            assert_eq!(name, "ratio");
            assert_eq!(value, "half");
        });
    }
}
