//! Builder module for `arglet`.
//! See [documentation root](https://docs.rs/arglet/latest/arglet/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
pub mod prelude;

pub use api::*;
pub use matcher::{Aliases, OptionEntry, PositionalEntry};
pub use model::*;
pub use parser::{ConfigError, ParseError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
pub(crate) mod test {
    macro_rules! assert_contains {
        ($base:expr, $sub:expr) => {
            assert!(
                $base.contains($sub),
                "'{b}' does not contain '{s}'",
                b = $base,
                s = $sub,
            );
        };
    }

    pub(crate) use assert_contains;
}
