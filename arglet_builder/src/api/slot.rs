use crate::api::{FormatError, NumberCoercer, Numeric, TextCoercer};
use crate::parser::ConfigError;
use crate::prelude::Coercer;

/// Where coerced values are written: a single cell (overwritten) or a sequence (appended to).
pub(crate) enum Target<'a, T> {
    Single(&'a mut T),
    Many(&'a mut Vec<T>),
}

pub(crate) struct Binding<'a, C: Coercer> {
    name: String,
    coercer: C,
    target: Target<'a, C::Value>,
}

impl<'a, C: Coercer> Binding<'a, C> {
    pub(crate) fn new(
        name: impl Into<String>,
        coercer: C,
        target: Target<'a, C::Value>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();

        if name.is_empty() {
            return Err(ConfigError::EmptyName);
        }

        Ok(Self {
            name,
            coercer,
            target,
        })
    }
}

/// Behaviour to capture a value without knowing its type.
///
/// The registry works across all value types through this trait, while each [`Binding`] keeps its concrete type.
pub(crate) trait AnonymousBinding {
    /// The display name of the value (ex: `FORMAT`).
    fn name(&self) -> &str;

    /// Coerce the token and write it to the destination.
    fn capture(&mut self, token: &str) -> Result<(), FormatError>;

    /// Whether a default has been configured.
    fn has_default(&self) -> bool;

    /// Write the default to the destination, if there is one.
    /// Does nothing for sequences: an absent list simply stays as it is.
    fn apply_default(&mut self);

    /// The allowed tokens, for display.
    fn choices(&self) -> Vec<String>;
}

impl<'a, C: Coercer> AnonymousBinding for Binding<'a, C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn capture(&mut self, token: &str) -> Result<(), FormatError> {
        let value = self.coercer.coerce(token)?;

        match &mut self.target {
            Target::Single(cell) => **cell = value,
            Target::Many(sequence) => sequence.push(value),
        }

        Ok(())
    }

    fn has_default(&self) -> bool {
        self.coercer.has_default()
    }

    fn apply_default(&mut self) {
        if let Target::Single(cell) = &mut self.target {
            if let Some(value) = self.coercer.default_value() {
                **cell = value;
            }
        }
    }

    fn choices(&self) -> Vec<String> {
        self.coercer.choices()
    }
}

/// The value attached to an option or positional argument.
pub(crate) enum Slot<'a> {
    Int(Binding<'a, NumberCoercer<i64>>),
    Double(Binding<'a, NumberCoercer<f64>>),
    Text(Binding<'a, TextCoercer>),
    Custom(Box<dyn AnonymousBinding + 'a>),
}

impl<'a> Slot<'a> {
    pub(crate) fn binding(&self) -> &(dyn AnonymousBinding + 'a) {
        match self {
            Slot::Int(binding) => binding,
            Slot::Double(binding) => binding,
            Slot::Text(binding) => binding,
            Slot::Custom(binding) => binding.as_ref(),
        }
    }

    pub(crate) fn binding_mut(&mut self) -> &mut (dyn AnonymousBinding + 'a) {
        match self {
            Slot::Int(binding) => binding,
            Slot::Double(binding) => binding,
            Slot::Text(binding) => binding,
            Slot::Custom(binding) => binding.as_mut(),
        }
    }
}

// The common part of `ValueSlot` and `ValueListSlot`: an empty place for a value.
struct Socket<'p, 'a> {
    owner: String,
    slot: &'p mut Option<Slot<'a>>,
}

impl<'p, 'a> Socket<'p, 'a> {
    fn install(self, slot: Slot<'a>) -> Result<&'p mut Slot<'a>, ConfigError> {
        let Socket { owner, slot: place } = self;

        if place.is_some() {
            return Err(ConfigError::AlreadyConfigured(owner));
        }

        Ok(place.insert(slot))
    }

    fn int(
        self,
        name: impl Into<String>,
        target: Target<'a, i64>,
    ) -> Result<NumberConfig<'p, i64>, ConfigError> {
        let binding = Binding::new(name, NumberCoercer::default(), target)?;

        match self.install(Slot::Int(binding))? {
            Slot::Int(binding) => Ok(NumberConfig {
                coercer: &mut binding.coercer,
            }),
            _ => unreachable!("internal error - installed slot must be an integer"),
        }
    }

    fn double(
        self,
        name: impl Into<String>,
        target: Target<'a, f64>,
    ) -> Result<NumberConfig<'p, f64>, ConfigError> {
        let binding = Binding::new(name, NumberCoercer::default(), target)?;

        match self.install(Slot::Double(binding))? {
            Slot::Double(binding) => Ok(NumberConfig {
                coercer: &mut binding.coercer,
            }),
            _ => unreachable!("internal error - installed slot must be a double"),
        }
    }

    fn text(
        self,
        name: impl Into<String>,
        target: Target<'a, String>,
    ) -> Result<TextConfig<'p>, ConfigError> {
        let binding = Binding::new(name, TextCoercer::default(), target)?;

        match self.install(Slot::Text(binding))? {
            Slot::Text(binding) => Ok(TextConfig {
                coercer: &mut binding.coercer,
            }),
            _ => unreachable!("internal error - installed slot must be a string"),
        }
    }

    fn custom<C>(
        self,
        name: impl Into<String>,
        target: Target<'a, C::Value>,
        coercer: C,
    ) -> Result<(), ConfigError>
    where
        C: Coercer + 'a,
        C::Value: 'a,
    {
        let binding = Binding::new(name, coercer, target)?;
        self.install(Slot::Custom(Box::new(binding)))?;
        Ok(())
    }
}

/// Handle to attach a single value to an option or positional argument.
///
/// Returned by [`Parser::option`](crate::Parser::option), [`Parser::flag`](crate::Parser::flag) and [`Parser::argument`](crate::Parser::argument).
/// If no value is attached to an option, the option takes no value.
/// Each method consumes the handle, so a value may only be attached once.
pub struct ValueSlot<'p, 'a> {
    socket: Socket<'p, 'a>,
}

impl<'p, 'a> ValueSlot<'p, 'a> {
    pub(crate) fn new(owner: impl Into<String>, slot: &'p mut Option<Slot<'a>>) -> Self {
        Self {
            socket: Socket {
                owner: owner.into(),
                slot,
            },
        }
    }

    /// Attach an integer value.
    ///
    /// ### Example
    /// ```
    /// # use arglet_builder as arglet;
    /// use arglet::Parser;
    ///
    /// let mut level: i64 = 0;
    /// let mut parser = Parser::new();
    /// parser
    ///     .option(&["l", "level"], "The level.").unwrap()
    ///     .int_val("LEVEL", &mut level).unwrap()
    ///     .between(0, 9).unwrap();
    ///
    /// parser.parse(&["program", "-l", "7"]).unwrap();
    /// drop(parser);
    /// assert_eq!(level, 7);
    /// ```
    pub fn int_val(
        self,
        name: impl Into<String>,
        dest: &'a mut i64,
    ) -> Result<NumberConfig<'p, i64>, ConfigError> {
        self.socket.int(name, Target::Single(dest))
    }

    /// Attach a floating point value.
    pub fn double_val(
        self,
        name: impl Into<String>,
        dest: &'a mut f64,
    ) -> Result<NumberConfig<'p, f64>, ConfigError> {
        self.socket.double(name, Target::Single(dest))
    }

    /// Attach a string value.
    ///
    /// ### Example
    /// ```
    /// # use arglet_builder as arglet;
    /// use arglet::Parser;
    ///
    /// let mut format = String::default();
    /// let mut parser = Parser::new();
    /// parser
    ///     .option(&["f", "format"], "Sets format for the output.").unwrap()
    ///     .string_val("FORMAT", &mut format).unwrap()
    ///     .from(&["utc", "local"]).unwrap()
    ///     .with_default("utc");
    ///
    /// parser.parse(&["program", "--format=local"]).unwrap();
    /// drop(parser);
    /// assert_eq!(format, "local");
    /// ```
    pub fn string_val(
        self,
        name: impl Into<String>,
        dest: &'a mut String,
    ) -> Result<TextConfig<'p>, ConfigError> {
        self.socket.text(name, Target::Single(dest))
    }

    /// Attach a value of a custom type, converted by `coercer`.
    ///
    /// Configure the coercer (ex: its default via [`Coercer::with_default`]) before passing it in.
    pub fn custom_val<C>(
        self,
        name: impl Into<String>,
        dest: &'a mut C::Value,
        coercer: C,
    ) -> Result<(), ConfigError>
    where
        C: Coercer + 'a,
        C::Value: 'a,
    {
        self.socket.custom(name, Target::Single(dest), coercer)
    }
}

/// Handle to attach the value of the trailing argument list.
///
/// Returned by [`Parser::argument_list`](crate::Parser::argument_list).
/// Every remaining positional token is coerced and appended to the destination.
pub struct ValueListSlot<'p, 'a> {
    socket: Socket<'p, 'a>,
}

impl<'p, 'a> ValueListSlot<'p, 'a> {
    pub(crate) fn new(owner: impl Into<String>, slot: &'p mut Option<Slot<'a>>) -> Self {
        Self {
            socket: Socket {
                owner: owner.into(),
                slot,
            },
        }
    }

    /// Collect integer values.
    pub fn int_val(
        self,
        name: impl Into<String>,
        dest: &'a mut Vec<i64>,
    ) -> Result<NumberConfig<'p, i64>, ConfigError> {
        self.socket.int(name, Target::Many(dest))
    }

    /// Collect floating point values.
    pub fn double_val(
        self,
        name: impl Into<String>,
        dest: &'a mut Vec<f64>,
    ) -> Result<NumberConfig<'p, f64>, ConfigError> {
        self.socket.double(name, Target::Many(dest))
    }

    /// Collect string values.
    ///
    /// ### Example
    /// ```
    /// # use arglet_builder as arglet;
    /// use arglet::Parser;
    ///
    /// let mut files: Vec<String> = Vec::default();
    /// let mut parser = Parser::new();
    /// parser.argument_list().unwrap().string_val("FILE", &mut files).unwrap();
    ///
    /// parser.parse(&["program", "a.txt", "b.txt"]).unwrap();
    /// drop(parser);
    /// assert_eq!(files, vec!["a.txt", "b.txt"]);
    /// ```
    pub fn string_val(
        self,
        name: impl Into<String>,
        dest: &'a mut Vec<String>,
    ) -> Result<TextConfig<'p>, ConfigError> {
        self.socket.text(name, Target::Many(dest))
    }

    /// Collect values of a custom type, converted by `coercer`.
    pub fn custom_val<C>(
        self,
        name: impl Into<String>,
        dest: &'a mut Vec<C::Value>,
        coercer: C,
    ) -> Result<(), ConfigError>
    where
        C: Coercer + 'a,
        C::Value: 'a,
    {
        self.socket.custom(name, Target::Many(dest), coercer)
    }
}

/// Further configuration of an integer or floating point value.
#[derive(Debug)]
pub struct NumberConfig<'p, T> {
    coercer: &'p mut NumberCoercer<T>,
}

impl<'p, T: Numeric> NumberConfig<'p, T> {
    /// Constrain the value to `min <= value <= max`.
    /// Fails when `min > max`.
    pub fn between(self, min: T, max: T) -> Result<Self, ConfigError> {
        self.coercer.between(min, max)?;
        Ok(self)
    }

    /// Make the value optional, using `value` when none is supplied.
    /// The default is not checked against `between`.
    pub fn with_default(self, value: T) -> Self {
        self.coercer.accept_default(value);
        self
    }
}

/// Further configuration of a string value.
#[derive(Debug)]
pub struct TextConfig<'p> {
    coercer: &'p mut TextCoercer,
}

impl<'p> TextConfig<'p> {
    /// Restrict the value to exactly one of `values`.
    /// Fails when `values` is empty.
    pub fn from(self, values: &[&str]) -> Result<Self, ConfigError> {
        self.coercer.from(values)?;
        Ok(self)
    }

    /// Make the value optional, using `value` when none is supplied.
    /// The default is not checked against `from`.
    pub fn with_default(self, value: impl Into<String>) -> Self {
        self.coercer.accept_default(value.into());
        self
    }
}
