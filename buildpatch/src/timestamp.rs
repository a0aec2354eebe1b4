//! Stamping of labeled template fields with the current time.
//!
//! Each [FieldRule] matches `Label: "value"` anywhere in the template and rewrites the quoted value.
//! Labels that do not appear are skipped silently unless the [Patcher] is strict.

use crate::error::{file_error, Error, Result};
use chrono::{Local, NaiveDateTime, Timelike};
use regex::{Captures, Regex};
use std::fmt::Display;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// The template the patcher works on when no path is given.
pub const DEFAULT_PATH: &str = "template.yml";

pub const AUTO_PUBLISH_CODE_SHA256: &str = "AutoPublishCodeSha256";
pub const VERSION_DESCRIPTION: &str = "VersionDescription";

/// Placed between a version description and the appended timestamp.
pub const DEFAULT_SEPARATOR: &str = " - ";

/// `YYYYMMDDTHHMM`
pub const FORMAT: &str = "%Y%m%dT%H%M";

/// A local wall clock time truncated to the minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn now() -> Self {
        Self::at(Local::now().naive_local())
    }

    pub fn at(time: NaiveDateTime) -> Self {
        let truncated = time
            .with_second(0)
            .and_then(|time| time.with_nanosecond(0))
            .unwrap_or(time);
        Self(truncated)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

/// How a matched field value is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// The whole value becomes the timestamp.
    Replace,
    /// The timestamp is appended to the existing value after the separator.
    Append { separator: String },
}

#[derive(Debug, Clone)]
pub struct FieldRule {
    label: String,
    strategy: Strategy,
    pattern: Regex,
}

impl FieldRule {
    pub fn new(label: &str, strategy: Strategy) -> Self {
        let pattern = Regex::new(&format!(r#"({}:\s*)"([^"]*)""#, regex::escape(label)))
            .expect("escaped label pattern");
        Self {
            label: label.to_string(),
            strategy,
            pattern,
        }
    }

    pub fn replace(label: &str) -> Self {
        Self::new(label, Strategy::Replace)
    }

    pub fn append(label: &str, separator: &str) -> Self {
        Self::new(
            label,
            Strategy::Append {
                separator: separator.to_string(),
            },
        )
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Rewrites every match of this rule in `content`, returning the new content and the number of matches.
    pub fn apply(&self, content: &str, stamp: &Timestamp) -> (String, usize) {
        let mut count = 0;
        let patched = self
            .pattern
            .replace_all(content, |caps: &Captures| {
                count += 1;
                match &self.strategy {
                    Strategy::Replace => format!(r#"{}"{stamp}""#, &caps[1]),
                    Strategy::Append { separator } => {
                        format!(r#"{}"{}{separator}{stamp}""#, &caps[1], &caps[2])
                    }
                }
            })
            .into_owned();
        (patched, count)
    }
}

/// How often a rule matched during a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub label: String,
    pub strategy: Strategy,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub content: String,
    pub stamp: Timestamp,
    pub matches: Vec<FieldMatch>,
}

impl Patched {
    /// The first rule that matched nothing, if any.
    pub fn unmatched(&self) -> Option<&FieldMatch> {
        self.matches.iter().find(|m| m.count == 0)
    }
}

/// Applies a set of field rules to a template.
#[derive(Debug, Clone)]
pub struct Patcher {
    rules: Vec<FieldRule>,
    strict: bool,
}

impl Default for Patcher {
    /// Replaces `AutoPublishCodeSha256` and appends to `VersionDescription`.
    fn default() -> Self {
        Self::new(vec![
            FieldRule::replace(AUTO_PUBLISH_CODE_SHA256),
            FieldRule::append(VERSION_DESCRIPTION, DEFAULT_SEPARATOR),
        ])
    }
}

impl Patcher {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self {
            rules,
            strict: false,
        }
    }

    /// When strict, [Patcher::patch_file] fails instead of writing if any rule matched nothing.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Applies all rules in order.
    pub fn patch(&self, content: &str, stamp: Timestamp) -> Patched {
        let mut content = content.to_string();
        let mut matches = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let (patched, count) = rule.apply(&content, &stamp);
            if count == 0 {
                warn!("{} not found, leaving it as is", rule.label());
            } else {
                debug!("{} matched {count} time(s)", rule.label());
            }
            content = patched;
            matches.push(FieldMatch {
                label: rule.label().to_string(),
                strategy: rule.strategy().clone(),
                count,
            });
        }

        Patched {
            content,
            stamp,
            matches,
        }
    }

    /// Patches the template at `path` in place. The file is overwritten even if nothing matched.
    pub fn patch_file(&self, path: impl AsRef<Path>, stamp: Timestamp) -> Result<Patched> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(file_error(path))?;
        let patched = self.patch(&content, stamp);

        if self.strict {
            if let Some(unmatched) = patched.unmatched() {
                return Err(Error::Unmatched(unmatched.label.clone()));
            }
        }

        fs::write(path, &patched.content).map_err(file_error(path))?;
        debug!("Wrote {}", path.display());
        Ok(patched)
    }
}
