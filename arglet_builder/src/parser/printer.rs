use terminal_size::{terminal_size, Width};

use crate::constant::*;
use crate::matcher::{Aliases, OptionEntry, PositionalEntry};
use crate::model::ArgType;
use crate::parser::interface::UserInterface;
use crate::parser::{ColumnRenderer, LeftWidth, MiddleWidth, TotalWidth};

pub(crate) struct OptionParameter {
    aliases: Aliases,
    hint: String,
    mandatory: bool,
    placeholder: Option<String>,
    choices: Vec<String>,
}

impl OptionParameter {
    pub(crate) fn new(
        aliases: Aliases,
        hint: impl Into<String>,
        mandatory: bool,
        arg_type: ArgType,
        value_name: Option<&str>,
        choices: Vec<String>,
    ) -> Self {
        Self {
            aliases,
            hint: hint.into(),
            mandatory,
            placeholder: value_name.map(|name| placeholder(name, arg_type == ArgType::Optional)),
            choices,
        }
    }
}

impl From<&OptionEntry<'_>> for OptionParameter {
    fn from(entry: &OptionEntry<'_>) -> Self {
        OptionParameter::new(
            entry.aliases().clone(),
            entry.hint(),
            entry.mandatory(),
            entry.arg_type(),
            entry.value_name(),
            entry.choices(),
        )
    }
}

pub(crate) struct ArgumentParameter {
    grammar: String,
}

impl ArgumentParameter {
    pub(crate) fn single(name: &str, has_default: bool) -> Self {
        Self {
            grammar: placeholder(name, has_default),
        }
    }

    pub(crate) fn list(name: &str) -> Self {
        Self {
            grammar: format!("[{name}...]"),
        }
    }
}

impl From<&PositionalEntry<'_>> for ArgumentParameter {
    fn from(entry: &PositionalEntry<'_>) -> Self {
        ArgumentParameter::single(entry.name().unwrap_or(UNBOUND_NAME), entry.has_default())
    }
}

fn placeholder(name: &str, has_default: bool) -> String {
    if has_default {
        format!("[{name}]")
    } else {
        format!("<{name}>")
    }
}

// Shown for a positional that was never given a value.
const UNBOUND_NAME: &str = "?";
const MAIN_INDENT: usize = 1;
// "-s, " is replaced by this when there is no short alias, to line up the long aliases.
const NO_SHORT_INDENT: &str = "    ";

pub(crate) struct Printer {
    options: Vec<OptionParameter>,
    arguments: Vec<ArgumentParameter>,
    total_width: usize,
}

impl Printer {
    pub(crate) fn terminal(options: Vec<OptionParameter>, arguments: Vec<ArgumentParameter>) -> Self {
        let total_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            terminal_width as usize
        } else {
            DEFAULT_LINE_WIDTH
        };

        Self::new(options, arguments, total_width)
    }

    pub(crate) fn new(
        options: Vec<OptionParameter>,
        arguments: Vec<ArgumentParameter>,
        total_width: usize,
    ) -> Self {
        Self {
            options,
            arguments,
            total_width,
        }
    }

    pub(crate) fn print_help(&self, program: &str, user_interface: &(impl UserInterface + ?Sized)) {
        let mut summary = vec![format!("usage: {program}")];
        let mut rows: Vec<(String, String)> = Vec::default();

        if !self.options.is_empty() {
            summary.push("[OPTIONS...]".to_string());
        }

        for OptionParameter {
            aliases,
            hint,
            mandatory,
            placeholder,
            choices,
        } in &self.options
        {
            let grammar = match placeholder {
                Some(placeholder) => format!(" {placeholder}"),
                None => "".to_string(),
            };

            if *mandatory {
                let invocation = match aliases.short() {
                    Some(short) => format!("{SHORT_PREFIX}{short}"),
                    None => format!("{LONG_PREFIX}{}", aliases.primary()),
                };
                summary.push(format!("{invocation}{grammar}"));
            }

            let flags = match aliases.short() {
                Some(_) => format!("{aliases}{grammar}"),
                None => format!("{NO_SHORT_INDENT}{aliases}{grammar}"),
            };
            let mut description = Vec::default();

            if !choices.is_empty() {
                description.push(format!("{{{}}}", choices.join(", ")));
            }

            if !hint.is_empty() {
                description.push(hint.clone());
            }

            if *mandatory {
                description.push(MANDATORY_MARKER.to_string());
            }

            rows.push((flags, description.join(" ")));
        }

        for ArgumentParameter { grammar } in &self.arguments {
            summary.push(grammar.clone());
        }

        user_interface.print(summary.join(" "));

        if rows.is_empty() {
            return;
        }

        let left_column_width = rows
            .iter()
            .map(|(flags, _)| flags.chars().count())
            .max()
            .unwrap_or_default();
        let middle_column_width = rows
            .iter()
            .map(|(_, description)| description.chars().count() + MAIN_INDENT)
            .max()
            .unwrap_or_default();
        let column_renderer = ColumnRenderer::guided(
            LeftWidth(left_column_width),
            MiddleWidth(middle_column_width),
            TotalWidth(self.total_width),
        );

        user_interface.print("".to_string());
        user_interface.print("options:".to_string());

        for (flags, description) in rows {
            for line in column_renderer.render(MAIN_INDENT, &flags, &description) {
                user_interface.print(line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::util::InMemoryInterface;

    fn option(
        aliases: &[&str],
        hint: &str,
        mandatory: bool,
        arg_type: ArgType,
        value_name: Option<&str>,
    ) -> OptionParameter {
        OptionParameter::new(
            Aliases::parse(aliases).unwrap(),
            hint,
            mandatory,
            arg_type,
            value_name,
            Vec::default(),
        )
    }

    #[test]
    fn print_help_empty() {
        // Setup
        let printer = Printer::new(Vec::default(), Vec::default(), 80);
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_help("program", &interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(message, "usage: program");
    }

    #[test]
    fn print_help_flag() {
        // Setup
        let printer = Printer::new(
            vec![option(&["V", "version"], "Prints out version.", false, ArgType::NoArg, None)],
            Vec::default(),
            80,
        );
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_help("program", &interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(
            message,
            r#"usage: program [OPTIONS...]

options:
 -V, --version   Prints out version."#
        );
    }

    #[test]
    fn print_help_mandatory() {
        // Setup
        let printer = Printer::new(
            vec![
                option(&["f", "format"], "Sets format.", true, ArgType::Mandatory, Some("FORMAT")),
                option(&["level"], "", true, ArgType::Optional, Some("LEVEL")),
                option(&["q"], "Quiet.", false, ArgType::NoArg, None),
            ],
            Vec::default(),
            80,
        );
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_help("program", &interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(
            message,
            r#"usage: program [OPTIONS...] -f <FORMAT> --level [LEVEL]

options:
 -f, --format <FORMAT>   Sets format. (mandatory)
     --level [LEVEL]     (mandatory)
 -q                      Quiet."#
        );
    }

    #[test]
    fn print_help_choices() {
        // Setup
        let printer = Printer::new(
            vec![OptionParameter::new(
                Aliases::parse(&["f", "format"]).unwrap(),
                "Sets format for the output.",
                false,
                ArgType::Optional,
                Some("FORMAT"),
                vec!["utc".to_string(), "local".to_string()],
            )],
            Vec::default(),
            80,
        );
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_help("program", &interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(
            message,
            r#"usage: program [OPTIONS...]

options:
 -f, --format [FORMAT]   {utc, local} Sets format for the output."#
        );
    }

    #[test]
    fn print_help_arguments() {
        // Setup
        let printer = Printer::new(
            Vec::default(),
            vec![
                ArgumentParameter::single("SOURCE", false),
                ArgumentParameter::single("COPIES", true),
                ArgumentParameter::list("FILE"),
            ],
            80,
        );
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_help("copy", &interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(message, "usage: copy <SOURCE> [COPIES] [FILE...]");
    }

    #[test]
    fn print_help_wrapped() {
        // Setup
        let printer = Printer::new(
            vec![option(
                &["v", "verbose"],
                "Enables verbose output, printing every step as it is taken.",
                false,
                ArgType::NoArg,
                None,
            )],
            Vec::default(),
            40,
        );
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_help("program", &interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(
            message,
            r#"usage: program [OPTIONS...]

options:
 -v, --verbose   Enables verbose output,
                 printing every step as
                 it is taken."#
        );
    }
}
