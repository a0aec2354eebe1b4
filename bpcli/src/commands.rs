/// Replace `$NAME$` placeholders in a configuration file with environment values
pub mod configuration;

/// Stamp a deployment template with the current time
pub mod timestamp;
