//! Substitution of `$NAME$` placeholders with values from an [Environment].
//!
//! All lookups happen before anything is written back, so a target file is either left
//! untouched or has every placeholder replaced.

use crate::env::Environment;
use crate::error::{file_error, Error, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// The file the substitutor works on when no path is given.
pub const DEFAULT_PATH: &str = "template-configuration.json";

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([A-Z_][A-Z0-9_]*)\$").expect("placeholder pattern"));

/// The placeholders found in a piece of text.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Scan {
    total: usize,
    names: BTreeSet<String>,
}

impl Scan {
    /// Number of placeholder occurrences, duplicates included.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct placeholder names.
    pub fn unique(&self) -> usize {
        self.names.len()
    }

    /// Distinct placeholder names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Finds all the placeholders in `content`.
pub fn scan(content: &str) -> Scan {
    let mut scan = Scan::default();
    for caps in PLACEHOLDER.captures_iter(content) {
        scan.total += 1;
        scan.names.insert(caps[1].to_string());
    }
    scan
}

/// Looks up every distinct name of the scan, aborting on the first one that is not bound.
pub fn resolve(scan: &Scan, env: &impl Environment) -> Result<BTreeMap<String, String>> {
    let mut bindings = BTreeMap::new();
    for name in scan.names() {
        let value = env.get(name)?;
        trace!("Resolved ${name}$");
        bindings.insert(name.to_string(), value);
    }
    Ok(bindings)
}

/// The result of substituting a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub content: String,
    pub scan: Scan,
}

/// Replaces every placeholder in `content` with its bound value.
///
/// Values are inserted as is. A value that looks like a placeholder itself is not expanded again.
pub fn substitute(content: &str, env: &impl Environment) -> Result<Substitution> {
    substitute_scanned(content, scan(content), env)
}

/// Same as [substitute] for content whose placeholders were already scanned.
pub fn substitute_scanned(
    content: &str,
    scan: Scan,
    env: &impl Environment,
) -> Result<Substitution> {
    let bindings = resolve(&scan, env)?;

    let content = PLACEHOLDER
        .replace_all(content, |caps: &Captures| match bindings.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned();

    Ok(Substitution { content, scan })
}

/// Returns `path` if it exists, otherwise the same relative path one directory up.
pub fn locate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(path.to_path_buf());
    }

    let parent = Path::new("..").join(path);
    if parent.exists() {
        debug!("{} not found, using {}", path.display(), parent.display());
        return Ok(parent);
    }

    Err(Error::NotFound(path.display().to_string()))
}

/// `<path>.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut backup = OsString::from(path.as_os_str());
    backup.push(".bak");
    PathBuf::from(backup)
}

/// What happened to a configuration file after a successful substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub path: PathBuf,
    pub scan: Scan,
}

/// A configuration file loaded in memory.
#[derive(Debug)]
pub struct ConfigFile {
    path: PathBuf,
    content: String,
}

impl ConfigFile {
    /// Locates and reads the file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = locate(path)?;
        let content = fs::read_to_string(&path).map_err(file_error(&path))?;
        debug!("Read {} bytes from {}", content.len(), path.display());
        Ok(Self { path, content })
    }

    /// The path the file was resolved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the current content to `<path>.bak`, overwriting any previous backup.
    pub fn backup(&self) -> Result<PathBuf> {
        let backup = backup_path(&self.path);
        fs::write(&backup, &self.content).map_err(file_error(&backup))?;
        debug!("Wrote backup to {}", backup.display());
        Ok(backup)
    }

    pub fn scan(&self) -> Scan {
        scan(&self.content)
    }

    /// Substitutes the scanned placeholders and overwrites the file. Nothing is written if a lookup fails.
    pub fn substitute(self, scan: Scan, env: &impl Environment) -> Result<Report> {
        let Substitution { content, scan } = substitute_scanned(&self.content, scan, env)?;
        fs::write(&self.path, content).map_err(file_error(&self.path))?;
        Ok(Report {
            path: self.path,
            scan,
        })
    }
}

/// Backs up the file at `path` and replaces its placeholders with values from `env`.
pub fn update_file(path: impl AsRef<Path>, env: &impl Environment) -> Result<Report> {
    update_file_with(path, env, |_, _| {})
}

/// Same as [update_file], calling `on_scan` with the resolved path and the placeholders found
/// once the backup is written and before any variable is looked up.
pub fn update_file_with(
    path: impl AsRef<Path>,
    env: &impl Environment,
    on_scan: impl FnOnce(&Path, &Scan),
) -> Result<Report> {
    let file = ConfigFile::open(path)?;
    file.backup()?;

    let scan = file.scan();
    on_scan(file.path(), &scan);

    file.substitute(scan, env)
}
