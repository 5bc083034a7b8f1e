use arglet::{ConfigError, Parser};

const VERSION: &str = "0.3.1";

fn main() -> Result<(), ConfigError> {
    let mut version = false;
    let mut verbose = false;
    let mut help = false;
    let mut format_given = false;
    let mut format = String::default();
    let mut offset_given = false;
    let mut offset: i64 = 0;
    let mut labels: Vec<String> = Vec::default();

    let help_message = {
        let mut parser = Parser::new();
        parser.set_program("timestamp");
        parser.flag(
            &["V", "version"],
            "Prints out version and exits successfully.",
            &mut version,
        )?;
        parser
            .flag(&["f", "format"], "Sets format for the output.", &mut format_given)?
            .string_val("FORMAT", &mut format)?
            .from(&["utc", "local"])?
            .with_default("utc");
        parser
            .flag(&["o", "offset"], "Shifts the time, in hours.", &mut offset_given)?
            .int_val("HOURS", &mut offset)?
            .between(-12, 14)?
            .with_default(0);
        parser.flag(&["v", "verbose"], "Enables verbose output.", &mut verbose)?;
        parser.flag(
            &["h", "help"],
            "Prints out usage and exits successfully.",
            &mut help,
        )?;
        parser
            .argument_list()?
            .string_val("LABEL", &mut labels)?;

        parser.parse_or_exit();
        parser.help()
    };

    if help {
        println!("{help_message}");
        return Ok(());
    }

    if version {
        println!("timestamp {VERSION}");
        return Ok(());
    }

    if verbose {
        println!("format={format} (given: {format_given}) offset={offset} (given: {offset_given})");
    }

    println!("{format}{offset:+03}:00 {}", labels.join(" "));
    Ok(())
}
