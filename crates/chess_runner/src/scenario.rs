//! Scenario files: an ordered list of system commands in TOML.
//!
//! ```toml
//! [[command]]
//! op = "add_tournament"
//! id = 1
//! max_games_per_player = 2
//! location = "Haifa"
//!
//! [[command]]
//! op = "add_game"
//! tournament = 1
//! first = 1
//! second = 2
//! winner = "first_player"
//! play_time = 10
//! ```
//!
//! Arguments are optional at the parsing level so that a command with a
//! missing argument is still replayed and reported as a null argument.

use std::path::{Path, PathBuf};

use chess_system::{PlayerId, TournamentId, Winner};
use serde::{Deserialize, Serialize};

use crate::error::{read_file, RunnerResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    AddTournament {
        id: Option<TournamentId>,
        max_games_per_player: Option<i32>,
        location: Option<String>,
    },
    AddGame {
        tournament: Option<TournamentId>,
        first: Option<PlayerId>,
        second: Option<PlayerId>,
        winner: Option<Winner>,
        play_time: Option<i32>,
    },
    EndTournament {
        id: Option<TournamentId>,
    },
    RemoveTournament {
        id: Option<TournamentId>,
    },
    RemovePlayer {
        id: Option<PlayerId>,
    },
    AveragePlayTime {
        player: Option<PlayerId>,
    },
    /// Write the ranking report, to the configured levels path by default
    SaveLevels {
        path: Option<PathBuf>,
    },
    /// Write the statistics report, to the configured path by default
    SaveStatistics {
        path: Option<PathBuf>,
    },
}

impl Command {
    /// The `op` tag of this command
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddTournament { .. } => "add_tournament",
            Command::AddGame { .. } => "add_game",
            Command::EndTournament { .. } => "end_tournament",
            Command::RemoveTournament { .. } => "remove_tournament",
            Command::RemovePlayer { .. } => "remove_player",
            Command::AveragePlayTime { .. } => "average_play_time",
            Command::SaveLevels { .. } => "save_levels",
            Command::SaveStatistics { .. } => "save_statistics",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default, rename = "command")]
    pub commands: Vec<Command>,
}

impl Scenario {
    pub fn from_toml_str(contents: &str) -> RunnerResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> RunnerResult<Self> {
        Self::from_toml_str(&read_file(path)?)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod scenario_tests;
