//! Runner configuration
//!
//! Loaded from a TOML file; every key is optional:
//!
//! ```toml
//! levels_path = "players_levels.txt"
//! statistics_path = "tournament_statistics.txt"
//! summary_path = "run.json"
//! log_level = "debug"
//! stop_on_error = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{read_file, RunnerResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Default destination of `save_levels` commands
    pub levels_path: PathBuf,
    /// Default destination of `save_statistics` commands
    pub statistics_path: PathBuf,
    /// Where to write the JSON run summary, if anywhere
    pub summary_path: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Stop replaying at the first command that fails
    pub stop_on_error: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            levels_path: PathBuf::from("players_levels.txt"),
            statistics_path: PathBuf::from("tournament_statistics.txt"),
            summary_path: None,
            log_level: "info".to_string(),
            stop_on_error: false,
        }
    }
}

impl RunnerConfig {
    pub fn from_toml_str(contents: &str) -> RunnerResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> RunnerResult<Self> {
        Self::from_toml_str(&read_file(path)?)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
