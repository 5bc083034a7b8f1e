mod core;
mod model;

pub(crate) use self::core::Session;
pub use self::model::{Aliases, OptionEntry, PositionalEntry};
pub(crate) use self::model::Registry;
