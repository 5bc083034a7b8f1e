//! `arglet` is a small, declarative command line parser for Rust.
//!
//! Declare options and positional arguments against a [`Parser`], point each of them at one of your program variables, then parse.
//! Parsing writes straight into those variables, so there is no intermediate "matches" structure to query afterwards.
//! `arglet` attempts to prioritize the following design concerns:
//! * *Write-through destinations*:
//! Every option/argument value is bound to a `&mut` destination at declaration time.
//! * *Typed, validated values*:
//! Integers (`i64`), floating points (`f64`) and strings are built in, with range (`between`) and allowed-set (`from`) constraints.
//! Any other type can be plugged in via a [`prelude::Coercer`].
//! * *Getopt style syntax*:
//! Short options may be condensed (`-abc`) and take attached values (`-o5`); long options take `=` values (`--level=5`).
//! * *Fail early on misconfiguration*:
//! Mistakes in the declaration are reported as [`ConfigError`]s, separate from the [`ParseError`]s caused by user input.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/timestamp.rs")]
//! ```
//!
//! Which produces the following Cli program:
//! ```console
//! $ timestamp -h
//! usage: timestamp [OPTIONS...] [LABEL...]
//!
//! options:
//!  -V, --version           Prints out version and exits successfully.
//!  -f, --format [FORMAT]   {utc, local} Sets format for the output.
//!  -o, --offset [HOURS]    Shifts the time, in hours.
//!  -v, --verbose           Enables verbose output.
//!  -h, --help              Prints out usage and exits successfully.
//!
//! $ timestamp --format=local -o+2 deploy
//! local+02:00 deploy
//!
//! $ timestamp --offset=30
//! Parse error: invalid value '30' for option 'offset': value '30' is out of bounds [-12, 14].
//! usage: timestamp [OPTIONS...] [LABEL...]
//! ...
//! ```
//!
//! # Declaring
//! There are two classes of declarations: *options* and *arguments*.
//!
//! Options are named by at most two aliases: one short (a single character, invoked as `-s`) and one long (invoked as `--long`).
//! An option declared via [`Parser::option`] is mandatory: parsing fails with [`ParseError::MissingOption`] when it is absent.
//! An option declared via [`Parser::flag`] is optional, and reports whether it was observed through its `&mut bool`.
//!
//! Arguments are positional.
//! [`Parser::argument`] declares the next single argument, while [`Parser::argument_list`] declares the trailing list that collects all remaining tokens.
//! Arguments with a default must follow those without.
//!
//! Each declaration returns a slot, to which at most one value may be attached:
//! ```
//! use arglet::Parser;
//!
//! let mut level: i64 = 0;
//! let mut ratio: f64 = 0.0;
//! let mut name = String::default();
//! let mut parser = Parser::new();
//! parser
//!     .option(&["l", "level"], "The level.").unwrap()
//!     .int_val("LEVEL", &mut level).unwrap()
//!     .between(0, 9).unwrap();
//! parser
//!     .argument().unwrap()
//!     .string_val("NAME", &mut name).unwrap()
//!     .from(&["alpha", "beta"]).unwrap();
//! parser
//!     .argument().unwrap()
//!     .double_val("RATIO", &mut ratio).unwrap()
//!     .with_default(0.5);
//!
//! parser.parse(&["program", "--level=3", "beta"]).unwrap();
//! drop(parser);
//!
//! assert_eq!(level, 3);
//! assert_eq!(name, "beta");
//! assert_eq!(ratio, 0.5);
//! ```
//!
//! An option without a value takes no value.
//! An option whose value has a default only accepts an *attached* value (`-o5`, `--offset=5`); otherwise the default is used and the next token is left alone.
//! An option whose value has no default takes the attached value, or else the next token.
//!
//! # Parsing
//! The first token is the program name.
//! Options are read until the first token which does not start with `-` (the lone `-` is a positional), or until the `--` separator.
//! The remaining tokens fill the arguments in order, and then the argument list.
//!
//! Parsing is fail-fast.
//! Use [`Parser::parse`] (or [`Parser::parse_env`]) to handle the [`ParseError`] yourself, or [`Parser::parse_or_exit`] to print it with the usage and exit.
//!
//! Destinations stay borrowed by the parser; drop it (or let it go out of scope) before reading them.
//! A parser may be reused: each parse starts over, with flags reset to `false`.
//!
//! # Features
//! * `tracing_debug`: emit `tracing` debug events while parsing and laying out the help message.
pub use arglet_builder::*;
