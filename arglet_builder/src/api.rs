mod coercer;
mod core;
mod slot;

pub use self::coercer::*;
pub use self::core::*;
pub use self::slot::*;
