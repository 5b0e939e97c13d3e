mod bind;
mod core;
mod field;

pub use self::core::*;
pub use bind::*;
pub use field::*;
