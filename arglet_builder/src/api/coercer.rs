use std::cmp::Ordering;
use std::str::FromStr;

use thiserror::Error;

use crate::parser::ConfigError;
use crate::prelude::Coercer;

/// A token could not be converted into the target value.
///
/// Raised by a [`Coercer`]; the parser re-wraps it as a [`ParseError::BadValue`](crate::ParseError::BadValue) naming the option/argument.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct FormatError(String);

impl FormatError {
    /// Create a format error with a human readable explanation.
    pub fn new(message: impl Into<String>) -> Self {
        FormatError(message.into())
    }

    /// The explanation.
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// An optionally configured default value.
///
/// Embed this in a custom [`Coercer`] to implement its default-related methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Fallback<V>(Option<V>);

impl<V> Default for Fallback<V> {
    fn default() -> Self {
        Fallback(None)
    }
}

impl<V: Clone> Fallback<V> {
    /// Whether a default has been set.
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// A copy of the default, if set.
    pub fn get(&self) -> Option<V> {
        self.0.clone()
    }

    /// Set the default, replacing any previous one.
    pub fn set(&mut self, value: V) {
        self.0.replace(value);
    }
}

/// Numeric types which [`NumberCoercer`] can parse and bound.
pub trait Numeric: FromStr + PartialOrd + Copy + std::fmt::Display {
    /// The smallest value of the type; the implicit lower bound.
    const LOWEST: Self;
    /// The largest value of the type; the implicit upper bound.
    const HIGHEST: Self;
}

macro_rules! numeric {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                const LOWEST: Self = <$t>::MIN;
                const HIGHEST: Self = <$t>::MAX;
            }
        )*
    };
}

numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Coerces tokens into a number, optionally constrained to an inclusive range.
///
/// The whole token must parse (`"4.2"` is not an integer, and neither is `"12abc"`).
/// Without `between`, the type's full range applies, which for floating point also excludes infinities and `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberCoercer<T> {
    min: T,
    max: T,
    fallback: Fallback<T>,
}

impl<T: Numeric> Default for NumberCoercer<T> {
    fn default() -> Self {
        Self {
            min: T::LOWEST,
            max: T::HIGHEST,
            fallback: Fallback::default(),
        }
    }
}

impl<T: Numeric> NumberCoercer<T> {
    /// Constrain values to `min <= value <= max`.
    ///
    /// ### Example
    /// ```
    /// # use arglet_builder as arglet;
    /// use arglet::prelude::*;
    /// use arglet::NumberCoercer;
    ///
    /// let mut coercer: NumberCoercer<i64> = NumberCoercer::default();
    /// coercer.between(1, 2).unwrap();
    /// assert_eq!(coercer.coerce("2").unwrap(), 2);
    /// assert!(coercer.coerce("18").is_err());
    /// assert!(coercer.between(10, 0).is_err());
    /// ```
    pub fn between(&mut self, min: T, max: T) -> Result<(), ConfigError> {
        match min.partial_cmp(&max) {
            Some(Ordering::Less) | Some(Ordering::Equal) => {
                self.min = min;
                self.max = max;
                Ok(())
            }
            _ => Err(ConfigError::InvalidBounds {
                min: min.to_string(),
                max: max.to_string(),
            }),
        }
    }

    /// The inclusive bounds currently in effect.
    pub fn bounds(&self) -> (T, T) {
        (self.min, self.max)
    }
}

impl<T: Numeric> Coercer for NumberCoercer<T> {
    type Value = T;

    fn coerce(&self, token: &str) -> Result<T, FormatError> {
        let value = T::from_str(token).map_err(|_| {
            FormatError::new(format!("value '{token}' does not represent a valid number."))
        })?;

        match (value.partial_cmp(&self.min), value.partial_cmp(&self.max)) {
            (Some(Ordering::Less), _) | (_, Some(Ordering::Greater)) => Err(FormatError::new(
                format!(
                    "value '{token}' is out of bounds [{min}, {max}].",
                    min = self.min,
                    max = self.max
                ),
            )),
            (Some(_), Some(_)) => Ok(value),
            // Only reachable for NaN.
            _ => Err(FormatError::new(format!(
                "value '{token}' does not represent a valid number."
            ))),
        }
    }

    fn has_default(&self) -> bool {
        self.fallback.is_set()
    }

    fn default_value(&self) -> Option<T> {
        self.fallback.get()
    }

    fn accept_default(&mut self, value: T) {
        self.fallback.set(value);
    }
}

/// Coerces tokens into a `String`, optionally restricted to an allowed set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextCoercer {
    allowed: Vec<String>,
    fallback: Fallback<String>,
}

impl TextCoercer {
    /// Restrict tokens to exactly one of `values`.
    ///
    /// ### Example
    /// ```
    /// # use arglet_builder as arglet;
    /// use arglet::prelude::*;
    /// use arglet::TextCoercer;
    ///
    /// let mut coercer = TextCoercer::default();
    /// coercer.from(&["a", "b", "c"]).unwrap();
    /// assert_eq!(coercer.coerce("c").unwrap(), "c".to_string());
    /// assert!(coercer.coerce("cc").is_err());
    /// assert!(coercer.from(&[]).is_err());
    /// ```
    pub fn from(&mut self, values: &[&str]) -> Result<(), ConfigError> {
        if values.is_empty() {
            return Err(ConfigError::NoChoices);
        }

        self.allowed = values.iter().map(|v| v.to_string()).collect();
        Ok(())
    }
}

impl Coercer for TextCoercer {
    type Value = String;

    fn coerce(&self, token: &str) -> Result<String, FormatError> {
        if !self.allowed.is_empty() && !self.allowed.iter().any(|a| a == token) {
            return Err(FormatError::new(format!(
                "value '{token}' is not allowed (expected one of: {}).",
                self.allowed.join(", ")
            )));
        }

        Ok(token.to_string())
    }

    fn has_default(&self) -> bool {
        self.fallback.is_set()
    }

    fn default_value(&self) -> Option<String> {
        self.fallback.get()
    }

    fn accept_default(&mut self, value: String) {
        self.fallback.set(value);
    }

    fn choices(&self) -> Vec<String> {
        self.allowed.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    #[rstest]
    #[case("0", 0)]
    #[case("12", 12)]
    #[case("-7", -7)]
    #[case("+3", 3)]
    #[case("9223372036854775807", i64::MAX)]
    #[case("-9223372036854775808", i64::MIN)]
    fn integer(#[case] token: &str, #[case] expected: i64) {
        let coercer: NumberCoercer<i64> = NumberCoercer::default();
        assert_eq!(coercer.coerce(token).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("args")]
    #[case("4.2")]
    #[case("12abc")]
    #[case(" 12")]
    #[case("9223372036854775808")]
    fn integer_invalid(#[case] token: &str) {
        let coercer: NumberCoercer<i64> = NumberCoercer::default();
        let error = coercer.coerce(token).unwrap_err();
        assert_eq!(
            error.message(),
            format!("value '{token}' does not represent a valid number.")
        );
    }

    #[rstest]
    #[case("12.88", 12.88)]
    #[case("-0.5", -0.5)]
    #[case("3", 3.0)]
    #[case("1e3", 1000.0)]
    fn double(#[case] token: &str, #[case] expected: f64) {
        let coercer: NumberCoercer<f64> = NumberCoercer::default();
        assert_eq!(coercer.coerce(token).unwrap(), expected);
    }

    #[rstest]
    #[case("inf", "is out of bounds")]
    #[case("-inf", "is out of bounds")]
    #[case("NaN", "does not represent a valid number")]
    #[case("1.2.3", "does not represent a valid number")]
    fn double_invalid(#[case] token: &str, #[case] expected: &str) {
        let coercer: NumberCoercer<f64> = NumberCoercer::default();
        let error = coercer.coerce(token).unwrap_err();
        assert!(error.message().contains(expected), "{error}");
    }

    #[test]
    fn between_round_trip() {
        for _ in 0..100 {
            let a: i64 = thread_rng().gen_range(-1000..1000);
            let b: i64 = thread_rng().gen_range(-1000..1000);
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            let mut coercer: NumberCoercer<i64> = NumberCoercer::default();
            coercer.between(min, max).unwrap();

            for value in (min - 3)..=(max + 3) {
                let result = coercer.coerce(&value.to_string());

                if min <= value && value <= max {
                    assert_eq!(result.unwrap(), value);
                } else {
                    assert_eq!(
                        result.unwrap_err().message(),
                        format!("value '{value}' is out of bounds [{min}, {max}].")
                    );
                }
            }
        }
    }

    #[test]
    fn between_single_point() {
        let mut coercer: NumberCoercer<f64> = NumberCoercer::default();
        coercer.between(0.5, 0.5).unwrap();
        assert_eq!(coercer.bounds(), (0.5, 0.5));
        assert_eq!(coercer.coerce("0.5").unwrap(), 0.5);
        assert!(coercer.coerce("0.6").is_err());
    }

    #[rstest]
    #[case(10, 0)]
    #[case(1, -1)]
    fn between_invalid(#[case] min: i64, #[case] max: i64) {
        let mut coercer: NumberCoercer<i64> = NumberCoercer::default();
        assert_matches!(coercer.between(min, max), Err(ConfigError::InvalidBounds { .. }));
        assert_eq!(coercer.bounds(), (i64::MIN, i64::MAX));
    }

    #[test]
    fn between_nan() {
        let mut coercer: NumberCoercer<f64> = NumberCoercer::default();
        assert_matches!(
            coercer.between(f64::NAN, 1.0),
            Err(ConfigError::InvalidBounds { .. })
        );
    }

    #[test]
    fn number_default() {
        let mut coercer: NumberCoercer<i64> = NumberCoercer::default();
        assert!(!coercer.has_default());
        assert_eq!(coercer.default_value(), None);

        coercer.accept_default(2);
        assert!(coercer.has_default());
        assert_eq!(coercer.default_value(), Some(2));

        // Defaults are not validated against the bounds.
        coercer.between(5, 6).unwrap();
        coercer.accept_default(100);
        assert_eq!(coercer.default_value(), Some(100));
    }

    #[rstest]
    #[case("")]
    #[case("anything")]
    #[case("-f")]
    fn text(#[case] token: &str) {
        let coercer = TextCoercer::default();
        assert_eq!(coercer.coerce(token).unwrap(), token.to_string());
        assert!(coercer.choices().is_empty());
    }

    #[rstest]
    #[case("a", true)]
    #[case("c", true)]
    #[case("z", false)]
    #[case("cc", false)]
    #[case("A", false)]
    fn text_from(#[case] token: &str, #[case] expected_ok: bool) {
        let mut coercer = TextCoercer::default();
        coercer.from(&["a", "b", "c"]).unwrap();
        let result = coercer.coerce(token);

        if expected_ok {
            assert_eq!(result.unwrap(), token.to_string());
        } else {
            assert_eq!(
                result.unwrap_err().message(),
                format!("value '{token}' is not allowed (expected one of: a, b, c).")
            );
        }
    }

    #[test]
    fn text_from_empty() {
        let mut coercer = TextCoercer::default();
        assert_eq!(coercer.from(&[]), Err(ConfigError::NoChoices));
    }

    #[test]
    fn text_default() {
        let coercer = TextCoercer::default().with_default("utc".to_string());
        assert!(coercer.has_default());
        assert_eq!(coercer.default_value(), Some("utc".to_string()));
    }

    #[test]
    fn fallback() {
        let mut fallback: Fallback<u8> = Fallback::default();
        assert!(!fallback.is_set());
        fallback.set(1);
        fallback.set(2);
        assert_eq!(fallback.get(), Some(2));
    }
}
