use crate::error::{Error, Result};
use std::collections::HashMap;
use std::env::{self, VarError};

/// A source of string values keyed by variable name.
pub trait Environment {
    /// Gets the value for the given key. Fails with [Error::MissingVariable] if the key is not bound.
    fn get(&self, key: &str) -> Result<String>;
}

/// Reads variables from the shell env of the running process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn get(&self, key: &str) -> Result<String> {
        match env::var(key) {
            Ok(value) => Ok(value),
            // A non unicode value is as good as unset for text substitution
            Err(VarError::NotPresent) | Err(VarError::NotUnicode(_)) => {
                Err(Error::MissingVariable(key.to_string()))
            }
        }
    }
}

/// An in memory environment.
#[derive(Debug, Default, Clone)]
pub struct MapEnv(HashMap<String, String>);

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Environment for MapEnv {
    fn get(&self, key: &str) -> Result<String> {
        self.0
            .get(key)
            .cloned()
            .ok_or_else(|| Error::MissingVariable(key.to_string()))
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Tries to load a variable from the env and if not found returns the provided default value
pub fn get_or_default(env: &impl Environment, key: &str, default: &str) -> String {
    env.get(key).unwrap_or_else(|_| String::from(default))
}

/// Reads a file and sets all of its declared variables in the shell environment.
/// Variables that are already set are left as they are.
pub fn load_from_file(path: &str) -> Result<()> {
    dotenv::from_path(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn map_env() {
        let env: MapEnv = [("STAGE_ID", "dev"), ("REGION", "us-east-1")]
            .into_iter()
            .collect();

        assert_eq!(env.get("STAGE_ID").unwrap(), "dev");
        assert_eq!(env.get("REGION").unwrap(), "us-east-1");
        assert!(matches!(
            env.get("NOPE"),
            Err(Error::MissingVariable(key)) if key == "NOPE"
        ));
        assert_eq!(get_or_default(&env, "NOPE", "fallback"), "fallback");
        assert_eq!(get_or_default(&env, "STAGE_ID", "fallback"), "dev");
    }

    /// The only test in the crate that writes to the process env.
    #[test]
    fn process_env() {
        env::set_var("BUILDPATCH_ENV_TEST_PRESENT", "ayy");

        assert_eq!(
            ProcessEnv.get("BUILDPATCH_ENV_TEST_PRESENT").unwrap(),
            "ayy"
        );
        assert!(matches!(
            ProcessEnv.get("BUILDPATCH_ENV_TEST_ABSENT"),
            Err(Error::MissingVariable(_))
        ));

        env::set_var("BUILDPATCH_DOTENV_TEST_SHELL", "shell");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "BUILDPATCH_DOTENV_TEST_FILE=file").unwrap();
        writeln!(file, "BUILDPATCH_DOTENV_TEST_SHELL=file").unwrap();

        load_from_file(file.path().to_str().unwrap()).unwrap();

        assert_eq!(ProcessEnv.get("BUILDPATCH_DOTENV_TEST_FILE").unwrap(), "file");
        assert_eq!(ProcessEnv.get("BUILDPATCH_DOTENV_TEST_SHELL").unwrap(), "shell");
    }

    #[test]
    fn missing_dotenv() {
        assert!(matches!(
            load_from_file("./definitely/not/here/.env"),
            Err(Error::DotEnv(_))
        ));
    }
}
