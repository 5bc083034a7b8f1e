use std::env;

use crate::api::Parser;
use crate::parser::base::*;
use crate::parser::interface::{BufferInterface, ConsoleInterface, UserInterface};
use crate::parser::printer::{ArgumentParameter, OptionParameter, Printer};

impl<'a> Parser<'a> {
    /// Render the help message.
    ///
    /// ### Example
    /// ```
    /// # use arglet_builder as arglet;
    /// use arglet::Parser;
    ///
    /// let mut verbose = false;
    /// let mut parser = Parser::new();
    /// parser.set_program("greet");
    /// parser.flag(&["v", "verbose"], "Enables verbose output.", &mut verbose).unwrap();
    ///
    /// assert_eq!(
    ///     parser.help(),
    ///     "usage: greet [OPTIONS...]\n\noptions:\n -v, --verbose   Enables verbose output."
    /// );
    /// ```
    pub fn help(&self) -> String {
        let interface = BufferInterface::default();
        self.printer().print_help(self.program(), &interface);
        interface.into_string()
    }

    /// Print the help message to stdout.
    pub fn print_help(&self) {
        self.printer()
            .print_help(self.program(), &ConsoleInterface::default());
    }

    /// Run the parser against the Cli [`env::args`].
    /// Non-utf8 arguments are converted lossily.
    pub fn parse_env(&mut self) -> Result<(), ParseError> {
        let tokens = env_tokens();
        self.parse(as_slices(&tokens).as_slice())
    }

    /// Run the parser against the Cli [`env::args`], exiting the process when parsing fails.
    ///
    /// On failure the error and the usage are printed, and the process exits with error code `1` (via `std::process::exit`).
    pub fn parse_or_exit(&mut self) {
        let tokens = env_tokens();

        if let Err(exit_code) =
            self.parse_reporting(as_slices(&tokens).as_slice(), &ConsoleInterface::default())
        {
            std::process::exit(exit_code);
        }
    }

    pub(crate) fn parse_reporting(
        &mut self,
        tokens: &[&str],
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Result<(), i32> {
        match self.parse(tokens) {
            Ok(()) => Ok(()),
            Err(error) => {
                user_interface.print_error(error);
                self.printer().print_help(self.program(), user_interface);
                Err(1)
            }
        }
    }

    fn printer(&self) -> Printer {
        let mut arguments: Vec<ArgumentParameter> =
            self.arguments().map(ArgumentParameter::from).collect();

        if let Some(list) = self.argument_list_entry() {
            if let Some(name) = list.name() {
                arguments.push(ArgumentParameter::list(name));
            }
        }

        Printer::terminal(self.options().map(OptionParameter::from).collect(), arguments)
    }
}

fn env_tokens() -> Vec<String> {
    env::args_os()
        .map(|token| token.to_string_lossy().into_owned())
        .collect()
}

fn as_slices(tokens: &[String]) -> Vec<&str> {
    tokens.iter().map(AsRef::as_ref).collect()
}
