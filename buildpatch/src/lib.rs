/// Errors shared by all the utilities.
pub mod error;

/// Lookups of variables from the shell env or from memory.
pub mod env;

/// A stderr logger.
pub mod logger;

/// Replacing `$NAME$` placeholders in configuration files with environment values.
pub mod placeholder;

/// Stamping deployment templates with the current time.
pub mod timestamp;

pub use error::{Error, Result};
