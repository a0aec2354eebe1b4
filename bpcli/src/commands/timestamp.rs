use buildpatch::timestamp::{
    FieldRule, Patched, Patcher, Strategy, Timestamp, AUTO_PUBLISH_CODE_SHA256, DEFAULT_PATH,
    DEFAULT_SEPARATOR, VERSION_DESCRIPTION,
};
use clap::{Parser, ValueEnum};
use colored::Colorize;

/// Writes the current time to the `AutoPublishCodeSha256` and `VersionDescription` fields
/// of a deployment template, forcing a new version to be published on the next deploy.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct TimestampArgs {
    /// The template to patch
    #[arg(default_value = DEFAULT_PATH)]
    pub path: String,

    /// The fields to patch. Defaults to all of them
    #[arg(long = "field", short, value_enum)]
    pub fields: Vec<Field>,

    /// Fail without writing if a field is not found in the template
    #[arg(long)]
    pub strict: bool,

    /// One of trace, debug, info, warn, error or off. Falls back to $BUILDPATCH_LOG, then warn
    #[arg(long, short)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Field {
    /// Replaced with the timestamp
    #[value(name = "auto-publish-code-sha256")]
    AutoPublishCodeSha256,
    /// Timestamp appended after ' - '
    #[value(name = "version-description")]
    VersionDescription,
}

impl Field {
    pub fn rule(self) -> FieldRule {
        match self {
            Field::AutoPublishCodeSha256 => FieldRule::replace(AUTO_PUBLISH_CODE_SHA256),
            Field::VersionDescription => FieldRule::append(VERSION_DESCRIPTION, DEFAULT_SEPARATOR),
        }
    }
}

impl TimestampArgs {
    pub fn patcher(&self) -> Patcher {
        let patcher = if self.fields.is_empty() {
            Patcher::default()
        } else {
            let mut fields = Vec::with_capacity(self.fields.len());
            for field in &self.fields {
                if !fields.contains(field) {
                    fields.push(*field);
                }
            }
            Patcher::new(fields.into_iter().map(Field::rule).collect())
        };
        patcher.strict(self.strict)
    }
}

pub fn update_timestamp(args: &TimestampArgs) -> buildpatch::Result<Patched> {
    let patched = args.patcher().patch_file(&args.path, Timestamp::now())?;

    for field in &patched.matches {
        if field.count == 0 {
            continue;
        }
        match field.strategy {
            Strategy::Replace => {
                println!("{} {} to {}", "Updated".green(), field.label, patched.stamp)
            }
            Strategy::Append { .. } => println!(
                "{} {} with timestamp {}",
                "Updated".green(),
                field.label,
                patched.stamp
            ),
        }
    }

    Ok(patched)
}
