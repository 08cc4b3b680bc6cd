//! Errors that stop a run before or after the scenario is replayed.
//!
//! Failures of individual commands are not errors here: they are reported
//! as a [`crate::ResultCode`] and the run goes on.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RunnerResult<T> = Result<T, RunnerError>;

/// Read a whole file, keeping its path in the error
pub(crate) fn read_file(path: &std::path::Path) -> RunnerResult<String> {
    std::fs::read_to_string(path).map_err(|source| RunnerError::Read {
        path: path.to_path_buf(),
        source,
    })
}
