use buildpatch::{
    env::{self, ProcessEnv},
    placeholder::{self, Report, DEFAULT_PATH},
};
use clap::Parser;
use colored::Colorize;

/// Replaces `$NAME$` placeholders in a configuration file with the values of the
/// environment variables of the same name. The original is kept in `<PATH>.bak`.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct ConfigurationArgs {
    /// The configuration file. If it does not exist, the same path one directory up is tried
    #[arg(default_value = DEFAULT_PATH)]
    pub path: String,

    /// A .env file to load before substituting. Variables already set in the shell take precedence
    #[arg(long, short)]
    pub env_file: Option<String>,

    /// One of trace, debug, info, warn, error or off. Falls back to $BUILDPATCH_LOG, then warn
    #[arg(long, short)]
    pub log_level: Option<String>,
}

pub fn update_configuration(args: &ConfigurationArgs) -> buildpatch::Result<Report> {
    if let Some(ref env_file) = args.env_file {
        env::load_from_file(env_file)?;
    }

    let report = placeholder::update_file_with(&args.path, &ProcessEnv, |path, scan| {
        println!("Found {} placeholders in {}", scan.total(), path.display());
        println!(
            "Unique placeholders {}: {:?}",
            scan.unique(),
            scan.names().collect::<Vec<_>>()
        );
    })?;

    println!(
        "{} {} by replacing placeholders with environment variable values",
        "Updated".green(),
        report.path.display()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults() {
        let args = ConfigurationArgs::parse_from(["update-template-configuration"]);
        assert_eq!(args.path, DEFAULT_PATH);
        assert!(args.log_level.is_none());
        assert!(args.env_file.is_none());
    }

    #[test]
    fn parses_options() {
        let args = ConfigurationArgs::parse_from([
            "update-template-configuration",
            "application-infrastructure/template-configuration.json",
            "--env-file",
            "build.env",
            "-l",
            "debug",
        ]);
        assert_eq!(args.path, "application-infrastructure/template-configuration.json");
        assert_eq!(args.env_file.as_deref(), Some("build.env"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}
