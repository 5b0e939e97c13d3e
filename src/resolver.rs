mod core;
pub(crate) mod model;

pub use self::core::{ConfigError, ResolveError, Resolver};
