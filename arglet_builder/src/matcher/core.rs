use crate::api::Slot;
use crate::constant::*;
use crate::matcher::model::Registry;
use crate::model::{ArgType, Subject};
use crate::parser::ParseError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// One pass of the parsing engine over the tokens following the program name.
pub(crate) struct Session<'r, 'a, 't> {
    registry: &'r mut Registry<'a>,
    tokens: &'t [&'t str],
    cursor: usize,
}

impl<'r, 'a, 't> Session<'r, 'a, 't> {
    pub(crate) fn new(registry: &'r mut Registry<'a>, tokens: &'t [&'t str]) -> Self {
        Self {
            registry,
            tokens,
            cursor: 0,
        }
    }

    /// Scan the options, verify them, then consume the positionals.
    /// Fails fast: destinations written before an error keep their values.
    pub(crate) fn run(mut self) -> Result<(), ParseError> {
        self.registry.positionals().validate()?;
        self.registry.reset();

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Parsing tokens: {:?}.", self.tokens);
        }

        self.scan_options()?;
        self.verify_options()?;
        self.consume_positionals()
    }

    fn scan_options(&mut self) -> Result<(), ParseError> {
        while let Some(token) = self.tokens.get(self.cursor).copied() {
            if token == SEPARATOR {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Separator at {}, option scanning ends.", self.cursor);
                }

                self.cursor += 1;
                break;
            }

            if let Some(body) = token.strip_prefix(LONG_PREFIX) {
                self.match_long(body)?;
            } else {
                match token.strip_prefix(SHORT_PREFIX) {
                    Some(body) if !body.is_empty() => self.match_short(body)?,
                    // Either a plain token, or the lone '-'.
                    _ => break,
                }
            }

            self.cursor += 1;
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Positional tokens begin at {}.", self.cursor);
        }

        Ok(())
    }

    fn match_long(&mut self, body: &str) -> Result<(), ParseError> {
        let (name, attached) = match body.split_once(VALUE_DELIMITER) {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let index = self
            .registry
            .lookup_long(name)
            .ok_or_else(|| ParseError::BadOption {
                name: name.to_string(),
            })?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Matched long option '{name}' (attached: {attached:?}).");
        }

        self.registry.option_mut(index).mark_found();
        self.resolve(index, name, attached)
    }

    fn match_short(&mut self, body: &str) -> Result<(), ParseError> {
        for (offset, letter) in body.char_indices() {
            let index = self
                .registry
                .lookup_short(letter)
                .ok_or_else(|| ParseError::BadOption {
                    name: letter.to_string(),
                })?;
            let option = self.registry.option_mut(index);
            option.mark_found();

            if option.arg_type() != ArgType::NoArg {
                // The rest of the cluster belongs to this option, even if it reads like more flags.
                let rest = &body[offset + letter.len_utf8()..];
                let attached = if rest.is_empty() { None } else { Some(rest) };

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Matched short option '{letter}' (attached: {attached:?}).");
                }

                return self.resolve(index, &letter.to_string(), attached);
            }

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Matched short flag '{letter}'.");
            }
        }

        Ok(())
    }

    fn resolve(
        &mut self,
        index: usize,
        name: &str,
        attached: Option<&str>,
    ) -> Result<(), ParseError> {
        let arg_type = self.registry.options()[index].arg_type();

        match (arg_type, attached) {
            (ArgType::NoArg, None) => Ok(()),
            (ArgType::NoArg, Some(value)) => Err(ParseError::BadValue {
                subject: Subject::Option,
                name: name.to_string(),
                value: value.to_string(),
                reason: "does not take any values".to_string(),
            }),
            (ArgType::Optional, None) => {
                if let Some(slot) = self.registry.option_mut(index).slot_mut() {
                    slot.binding_mut().apply_default();
                }

                Ok(())
            }
            (ArgType::Mandatory, None) => match self.tokens.get(self.cursor + 1).copied() {
                Some(value) => {
                    self.cursor += 1;
                    self.capture_option(index, name, value)
                }
                None => Err(ParseError::MissingValue {
                    subject: Subject::Option,
                    name: name.to_string(),
                }),
            },
            (_, Some(value)) => self.capture_option(index, name, value),
        }
    }

    fn capture_option(&mut self, index: usize, name: &str, value: &str) -> Result<(), ParseError> {
        match self.registry.option_mut(index).slot_mut() {
            Some(slot) => capture(slot, Subject::Option, name, value),
            None => unreachable!("internal error - an option taking a value must have a slot"),
        }
    }

    fn verify_options(&mut self) -> Result<(), ParseError> {
        if let Some(missing) = self
            .registry
            .options()
            .iter()
            .find(|option| option.mandatory() && !option.found())
        {
            return Err(ParseError::MissingOption {
                name: missing.aliases().primary(),
            });
        }

        for option in self.registry.options_mut() {
            if !option.found() {
                if let Some(slot) = option.slot_mut() {
                    slot.binding_mut().apply_default();
                }
            }
        }

        Ok(())
    }

    fn consume_positionals(&mut self) -> Result<(), ParseError> {
        let tokens = self.tokens;
        let mut remaining = tokens[self.cursor..].iter().copied();
        let (singles, list) = self.registry.positionals_mut().parts_mut();

        for entry in singles.iter_mut() {
            let slot = match entry.slot_mut() {
                Some(slot) => slot,
                None => unreachable!("internal error - positionals must be validated before parsing"),
            };

            match remaining.next() {
                Some(token) => {
                    let name = slot.binding().name().to_string();
                    capture(slot, Subject::Argument, &name, token)?;
                    entry.set_found(true);
                }
                None if slot.binding().has_default() => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Argument '{}' defaulted.", slot.binding().name());
                    }

                    slot.binding_mut().apply_default();
                }
                None => {
                    return Err(ParseError::MissingValue {
                        subject: Subject::Argument,
                        name: slot.binding().name().to_string(),
                    });
                }
            }
        }

        match list {
            Some(entry) => {
                let slot = match entry.slot_mut() {
                    Some(slot) => slot,
                    None => unreachable!(
                        "internal error - positionals must be validated before parsing"
                    ),
                };
                let name = slot.binding().name().to_string();
                let mut found = false;

                for token in remaining {
                    capture(slot, Subject::Argument, &name, token)?;
                    found = true;
                }

                entry.set_found(found);
                Ok(())
            }
            None => match remaining.next() {
                Some(token) => Err(ParseError::TooManyArguments {
                    token: token.to_string(),
                }),
                None => Ok(()),
            },
        }
    }
}

fn capture(slot: &mut Slot, subject: Subject, name: &str, token: &str) -> Result<(), ParseError> {
    slot.binding_mut()
        .capture(token)
        .map_err(|error| ParseError::BadValue {
            subject,
            name: name.to_string(),
            value: token.to_string(),
            reason: error.message().to_string(),
        })
}
