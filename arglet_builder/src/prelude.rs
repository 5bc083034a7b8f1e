//! Traits which, typically, may be imported without concern: `use arglet::prelude::*`.

use crate::FormatError;

/// Behaviour to turn a raw token into a typed value.
///
/// The built-in integer, floating point and string values are all `Coercer`s.
/// Implement this trait to plug a custom type into [`ValueSlot::custom_val`](crate::ValueSlot::custom_val).
///
/// ### Example
/// ```
/// # use arglet_builder as arglet;
/// use arglet::prelude::*;
/// use arglet::{Fallback, FormatError};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Point(i32, i32);
///
/// #[derive(Default)]
/// struct PointCoercer(Fallback<Point>);
///
/// impl Coercer for PointCoercer {
///     type Value = Point;
///
///     fn coerce(&self, token: &str) -> Result<Point, FormatError> {
///         let (x, y) = token
///             .split_once(',')
///             .ok_or_else(|| FormatError::new(format!("value '{token}' is not of the form 'x,y'.")))?;
///         let x = x.parse().map_err(|_| FormatError::new(format!("'{x}' is not a coordinate.")))?;
///         let y = y.parse().map_err(|_| FormatError::new(format!("'{y}' is not a coordinate.")))?;
///         Ok(Point(x, y))
///     }
///
///     fn has_default(&self) -> bool {
///         self.0.is_set()
///     }
///
///     fn default_value(&self) -> Option<Point> {
///         self.0.get()
///     }
///
///     fn accept_default(&mut self, value: Point) {
///         self.0.set(value);
///     }
/// }
///
/// let coercer = PointCoercer::default().with_default(Point(0, 0));
/// assert_eq!(coercer.coerce("3,-4").unwrap(), Point(3, -4));
/// assert_eq!(coercer.default_value(), Some(Point(0, 0)));
/// ```
pub trait Coercer {
    /// The type produced from a token.
    type Value;

    /// Convert the token, or explain why it cannot be converted.
    fn coerce(&self, token: &str) -> Result<Self::Value, FormatError>;

    /// Whether a default value has been configured.
    fn has_default(&self) -> bool;

    /// The configured default, if any.
    fn default_value(&self) -> Option<Self::Value>;

    /// Configure the default value, replacing any previous one.
    fn accept_default(&mut self, value: Self::Value);

    /// The exhaustive set of accepted tokens, when the coercer restricts its input that way.
    /// Only used for display.
    fn choices(&self) -> Vec<String> {
        Vec::default()
    }

    /// Builder form of [`Coercer::accept_default`].
    fn with_default(mut self, value: Self::Value) -> Self
    where
        Self: Sized,
    {
        self.accept_default(value);
        self
    }
}
