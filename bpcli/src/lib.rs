//! Command line front ends for the `buildpatch` utilities.

use buildpatch::env::{self, Environment};

pub mod commands;

/// The log level used when none is given on the command line or in [LOG_LEVEL_VAR].
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Consulted for the log level when `--log-level` is not given.
pub const LOG_LEVEL_VAR: &str = "BUILDPATCH_LOG";

/// The level given on the command line, otherwise the one in [LOG_LEVEL_VAR], otherwise [DEFAULT_LOG_LEVEL].
pub fn log_level(arg: Option<&str>, env: &impl Environment) -> String {
    match arg {
        Some(level) => level.to_string(),
        None => env::get_or_default(env, LOG_LEVEL_VAR, DEFAULT_LOG_LEVEL),
    }
}
