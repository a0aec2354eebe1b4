use std::path::Path;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0} environment variable not set")]
    MissingVariable(String),
    #[error("Error while loading .env file: {0}")]
    DotEnv(#[from] dotenv::Error),
    #[error("{0} label not found in template")]
    Unmatched(String),
}

/// Attaches the path an IO operation failed on.
pub(crate) fn file_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error {
    let path = path.display().to_string();
    move |source| Error::File { path, source }
}
