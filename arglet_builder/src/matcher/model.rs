use std::collections::HashMap;

use crate::api::Slot;
use crate::constant::*;
use crate::model::ArgType;
use crate::parser::ConfigError;

/// The names by which an option is invoked: at most one short (`-s`) and one long (`--long`) alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aliases {
    short: Option<char>,
    long: Option<String>,
}

impl Aliases {
    /// Sort the raw aliases into short (single character) and long (multi character) names.
    pub(crate) fn parse(aliases: &[&str]) -> Result<Self, ConfigError> {
        if aliases.is_empty() {
            return Err(ConfigError::NoAliases);
        }

        if aliases.len() > 2 {
            return Err(ConfigError::TooManyAliases(aliases.len()));
        }

        let mut short: Option<char> = None;
        let mut long: Option<String> = None;

        for alias in aliases {
            if alias.is_empty() {
                return Err(ConfigError::EmptyAlias);
            }

            if alias.starts_with(SHORT_PREFIX)
                || alias.contains(VALUE_DELIMITER)
                || alias.chars().any(char::is_whitespace)
            {
                return Err(ConfigError::InvalidAlias(alias.to_string()));
            }

            let mut characters = alias.chars();

            match (characters.next(), characters.next()) {
                (Some(letter), None) => {
                    if let Some(first) = short.replace(letter) {
                        return Err(ConfigError::MultipleShort {
                            first,
                            second: letter,
                        });
                    }
                }
                _ => {
                    if let Some(first) = long.replace(alias.to_string()) {
                        return Err(ConfigError::MultipleLong {
                            first,
                            second: alias.to_string(),
                        });
                    }
                }
            }
        }

        Ok(Self { short, long })
    }

    /// The short alias, if any.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// The long alias, if any.
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// The name the option is reported by: the short alias when present, otherwise the long one.
    pub fn primary(&self) -> String {
        match (&self.short, &self.long) {
            (Some(short), _) => short.to_string(),
            (None, Some(long)) => long.clone(),
            (None, None) => unreachable!("internal error - aliases must contain at least one name"),
        }
    }
}

impl std::fmt::Display for Aliases {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.short, &self.long) {
            (Some(short), Some(long)) => write!(f, "{SHORT_PREFIX}{short}, {LONG_PREFIX}{long}"),
            (Some(short), None) => write!(f, "{SHORT_PREFIX}{short}"),
            (None, Some(long)) => write!(f, "{LONG_PREFIX}{long}"),
            (None, None) => unreachable!("internal error - aliases must contain at least one name"),
        }
    }
}

/// A declared option, as seen by help formatters and after parsing.
pub struct OptionEntry<'a> {
    aliases: Aliases,
    hint: String,
    observed: Option<&'a mut bool>,
    slot: Option<Slot<'a>>,
    found: bool,
}

impl<'a> OptionEntry<'a> {
    fn new(aliases: Aliases, hint: String, observed: Option<&'a mut bool>) -> Self {
        Self {
            aliases,
            hint,
            observed,
            slot: None,
            found: false,
        }
    }

    /// The option's aliases.
    pub fn aliases(&self) -> &Aliases {
        &self.aliases
    }

    /// The human readable description of the option.
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Whether the option must appear on the command line.
    /// Options declared with an observation flag are never mandatory.
    pub fn mandatory(&self) -> bool {
        self.observed.is_none()
    }

    /// Whether, and how, the option takes a value.
    pub fn arg_type(&self) -> ArgType {
        match &self.slot {
            None => ArgType::NoArg,
            Some(slot) if slot.binding().has_default() => ArgType::Optional,
            Some(_) => ArgType::Mandatory,
        }
    }

    /// The display name of the option's value, if it takes one.
    pub fn value_name(&self) -> Option<&str> {
        self.slot.as_ref().map(|slot| slot.binding().name())
    }

    /// The allowed tokens for the option's value, if restricted.
    pub fn choices(&self) -> Vec<String> {
        self.slot
            .as_ref()
            .map(|slot| slot.binding().choices())
            .unwrap_or_default()
    }

    /// Whether the option was observed during the last parse.
    pub fn found(&self) -> bool {
        self.found
    }

    pub(crate) fn slot_mut(&mut self) -> &mut Option<Slot<'a>> {
        &mut self.slot
    }

    pub(crate) fn mark_found(&mut self) {
        self.found = true;

        if let Some(observed) = &mut self.observed {
            **observed = true;
        }
    }

    pub(crate) fn reset(&mut self) {
        self.found = false;

        if let Some(observed) = &mut self.observed {
            **observed = false;
        }
    }
}

/// A declared positional argument (single, or the trailing list).
pub struct PositionalEntry<'a> {
    slot: Option<Slot<'a>>,
    found: bool,
}

impl<'a> PositionalEntry<'a> {
    fn new() -> Self {
        Self {
            slot: None,
            found: false,
        }
    }

    /// The display name of the argument, once its value has been attached.
    pub fn name(&self) -> Option<&str> {
        self.slot.as_ref().map(|slot| slot.binding().name())
    }

    /// Whether the argument has a default, making it optional.
    pub fn has_default(&self) -> bool {
        self.slot
            .as_ref()
            .map(|slot| slot.binding().has_default())
            .unwrap_or(false)
    }

    /// Whether a token was captured into this argument during the last parse.
    pub fn found(&self) -> bool {
        self.found
    }

    pub(crate) fn slot_mut(&mut self) -> &mut Option<Slot<'a>> {
        &mut self.slot
    }

    pub(crate) fn set_found(&mut self, found: bool) {
        self.found = found;
    }
}

/// The ordered single positionals, followed by at most one trailing list.
#[derive(Default)]
pub(crate) struct Positionals<'a> {
    singles: Vec<PositionalEntry<'a>>,
    list: Option<PositionalEntry<'a>>,
}

impl<'a> Positionals<'a> {
    pub(crate) fn push_single(&mut self) -> Result<&mut PositionalEntry<'a>, ConfigError> {
        if self.list.is_some() {
            return Err(ConfigError::ArgumentAfterList);
        }

        let index = self.singles.len();
        self.singles.push(PositionalEntry::new());
        Ok(&mut self.singles[index])
    }

    pub(crate) fn declare_list(&mut self) -> Result<&mut PositionalEntry<'a>, ConfigError> {
        if self.list.is_some() {
            return Err(ConfigError::ListRedeclared);
        }

        Ok(self.list.insert(PositionalEntry::new()))
    }

    pub(crate) fn singles(&self) -> &[PositionalEntry<'a>] {
        &self.singles
    }

    pub(crate) fn list(&self) -> Option<&PositionalEntry<'a>> {
        self.list.as_ref()
    }

    pub(crate) fn parts_mut(
        &mut self,
    ) -> (
        &mut Vec<PositionalEntry<'a>>,
        Option<&mut PositionalEntry<'a>>,
    ) {
        (&mut self.singles, self.list.as_mut())
    }

    /// Check the invariants which can only be judged once every value has been attached.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let mut optional: Option<&str> = None;

        for (position, entry) in self.singles.iter().enumerate() {
            let name = entry
                .name()
                .ok_or(ConfigError::UnboundArgument(position))?;

            match optional {
                Some(previous) if !entry.has_default() => {
                    return Err(ConfigError::MandatoryAfterOptional {
                        optional: previous.to_string(),
                        mandatory: name.to_string(),
                    });
                }
                None if entry.has_default() => optional = Some(name),
                _ => {}
            }
        }

        if let Some(list) = &self.list {
            if list.name().is_none() {
                return Err(ConfigError::UnboundArgumentList);
            }
        }

        Ok(())
    }

    pub(crate) fn reset(&mut self) {
        for entry in self.singles.iter_mut() {
            entry.set_found(false);
        }

        if let Some(list) = &mut self.list {
            list.set_found(false);
        }
    }
}

/// The owned arena of declarations, indexed by alias.
#[derive(Default)]
pub(crate) struct Registry<'a> {
    options: Vec<OptionEntry<'a>>,
    short_index: HashMap<char, usize>,
    long_index: HashMap<String, usize>,
    positionals: Positionals<'a>,
}

impl<'a> Registry<'a> {
    pub(crate) fn declare_option(
        &mut self,
        aliases: &[&str],
        hint: impl Into<String>,
        observed: Option<&'a mut bool>,
    ) -> Result<&mut OptionEntry<'a>, ConfigError> {
        let aliases = Aliases::parse(aliases)?;

        if let Some(short) = aliases.short() {
            if self.short_index.contains_key(&short) {
                return Err(ConfigError::DuplicateAlias(short.to_string()));
            }
        }

        if let Some(long) = aliases.long() {
            if self.long_index.contains_key(long) {
                return Err(ConfigError::DuplicateAlias(long.to_string()));
            }
        }

        let index = self.options.len();

        if let Some(short) = aliases.short() {
            self.short_index.insert(short, index);
        }

        if let Some(long) = aliases.long() {
            self.long_index.insert(long.to_string(), index);
        }

        self.options
            .push(OptionEntry::new(aliases, hint.into(), observed));
        Ok(&mut self.options[index])
    }

    pub(crate) fn lookup_short(&self, short: char) -> Option<usize> {
        self.short_index.get(&short).copied()
    }

    pub(crate) fn lookup_long(&self, long: &str) -> Option<usize> {
        self.long_index.get(long).copied()
    }

    pub(crate) fn options(&self) -> &[OptionEntry<'a>] {
        &self.options
    }

    pub(crate) fn option_mut(&mut self, index: usize) -> &mut OptionEntry<'a> {
        &mut self.options[index]
    }

    pub(crate) fn options_mut(&mut self) -> &mut [OptionEntry<'a>] {
        &mut self.options
    }

    pub(crate) fn positionals(&self) -> &Positionals<'a> {
        &self.positionals
    }

    pub(crate) fn positionals_mut(&mut self) -> &mut Positionals<'a> {
        &mut self.positionals
    }

    /// Forget everything observed by a previous parse.
    pub(crate) fn reset(&mut self) {
        for option in self.options.iter_mut() {
            option.reset();
        }

        self.positionals.reset();
    }
}
