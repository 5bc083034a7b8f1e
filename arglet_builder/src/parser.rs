mod base;
mod interface;
mod middleware;
mod printer;

pub use self::base::*;
pub(crate) use self::interface::*;
