//! Replaying scenarios against a chess system

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chess_system::{ChessError, ChessSystem, PlayerId, PlayerLevel, TournamentStatistics};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::RunnerConfig;
use crate::error::{read_file, RunnerResult};
use crate::scenario::{Command, Scenario};

/// Result of one replayed command, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultCode {
    Success,
    /// A required argument was missing from the command
    NullArgument,
    InvalidId,
    InvalidLocation,
    InvalidMaxGames,
    TournamentAlreadyExists,
    TournamentNotExist,
    PlayerNotExist,
    TournamentEnded,
    GameAlreadyExists,
    InvalidPlayTime,
    ExceededGames,
    NoGames,
    NoTournamentsEnded,
    OutOfMemory,
    SaveFailure,
}

impl ResultCode {
    pub fn is_success(self) -> bool {
        self == ResultCode::Success
    }
}

impl From<&ChessError> for ResultCode {
    fn from(error: &ChessError) -> Self {
        match error {
            ChessError::InvalidId => ResultCode::InvalidId,
            ChessError::InvalidLocation(_) => ResultCode::InvalidLocation,
            ChessError::InvalidMaxGames(_) => ResultCode::InvalidMaxGames,
            ChessError::TournamentAlreadyExists(_) => ResultCode::TournamentAlreadyExists,
            ChessError::TournamentNotExist(_) => ResultCode::TournamentNotExist,
            ChessError::PlayerNotExist(_) => ResultCode::PlayerNotExist,
            ChessError::TournamentEnded(_) => ResultCode::TournamentEnded,
            ChessError::GameAlreadyExists { .. } => ResultCode::GameAlreadyExists,
            ChessError::InvalidPlayTime(_) => ResultCode::InvalidPlayTime,
            ChessError::ExceededGames { .. } => ResultCode::ExceededGames,
            ChessError::NoGames(_) => ResultCode::NoGames,
            ChessError::NoTournamentsEnded => ResultCode::NoTournamentsEnded,
            ChessError::OutOfMemory => ResultCode::OutOfMemory,
            ChessError::SaveFailure(_) => ResultCode::SaveFailure,
        }
    }
}

/// What happened to one command of a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandReport {
    /// Position in the scenario, starting at 0
    pub index: usize,
    pub op: String,
    pub code: ResultCode,
    /// Error text for failed commands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Winner returned by `end_tournament`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<PlayerId>,
    /// Value returned by `average_play_time`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_play_time: Option<f64>,
}

/// Everything a run produced, saved as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub commands: Vec<CommandReport>,
    pub succeeded: usize,
    pub failed: usize,
    /// Set when the run stopped at a failed command
    pub stopped_early: bool,
    pub tournaments: usize,
    pub players: usize,
    pub levels: Vec<PlayerLevel>,
    pub statistics: Vec<TournamentStatistics>,
}

impl RunSummary {
    /// Save the summary to a JSON file
    pub fn save(&self, path: &Path) -> RunnerResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a summary from a JSON file
    pub fn load(path: &Path) -> RunnerResult<Self> {
        Ok(serde_json::from_str(&read_file(path)?)?)
    }

    /// Codes of every replayed command, in order
    pub fn codes(&self) -> Vec<ResultCode> {
        self.commands.iter().map(|report| report.code).collect()
    }
}

enum Failure {
    Missing(&'static str),
    Chess(ChessError),
}

impl From<ChessError> for Failure {
    fn from(error: ChessError) -> Self {
        Failure::Chess(error)
    }
}

#[derive(Default)]
struct Outcome {
    winner: Option<PlayerId>,
    average_play_time: Option<f64>,
}

fn required<T: Clone>(value: &Option<T>, name: &'static str) -> Result<T, Failure> {
    value.clone().ok_or(Failure::Missing(name))
}

/// Applies scenario commands to a chess system it owns
pub struct ScenarioRunner {
    config: RunnerConfig,
    chess: ChessSystem,
}

impl ScenarioRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            chess: ChessSystem::new(),
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn system(&self) -> &ChessSystem {
        &self.chess
    }

    /// Replay every command of `scenario` and summarize the run.
    ///
    /// With `stop_on_error` set, the commands after the first failure are
    /// skipped. The summary is also written to `summary_path` if configured.
    pub fn run(&mut self, scenario: &Scenario) -> RunnerResult<RunSummary> {
        let mut commands = Vec::with_capacity(scenario.len());
        let mut stopped_early = false;

        for (index, command) in scenario.commands.iter().enumerate() {
            let report = self.execute(index, command);
            let failed = !report.code.is_success();
            commands.push(report);

            if failed && self.config.stop_on_error {
                stopped_early = index + 1 < scenario.len();
                break;
            }
        }

        let succeeded = commands.iter().filter(|r| r.code.is_success()).count();
        let summary = RunSummary {
            failed: commands.len() - succeeded,
            succeeded,
            commands,
            stopped_early,
            tournaments: self.chess.store().len(),
            players: self.chess.players().len(),
            levels: self.chess.player_levels(),
            statistics: self.chess.tournament_statistics().unwrap_or_default(),
        };

        if let Some(path) = &self.config.summary_path {
            summary.save(path)?;
            info!("Summary written to {}", path.display());
        }
        Ok(summary)
    }

    /// Apply a single command, logging its result code
    pub fn execute(&mut self, index: usize, command: &Command) -> CommandReport {
        let mut report = CommandReport {
            index,
            op: command.name().to_string(),
            code: ResultCode::Success,
            message: None,
            winner: None,
            average_play_time: None,
        };

        match self.apply(command) {
            Ok(outcome) => {
                report.winner = outcome.winner;
                report.average_play_time = outcome.average_play_time;
                info!("#{} {}: {:?}", index, report.op, report.code);
            }
            Err(Failure::Missing(field)) => {
                report.code = ResultCode::NullArgument;
                report.message = Some(format!("missing argument `{}`", field));
                warn!("#{} {}: {:?} ({})", index, report.op, report.code, field);
            }
            Err(Failure::Chess(error)) => {
                report.code = ResultCode::from(&error);
                warn!("#{} {}: {:?} ({})", index, report.op, report.code, error);
                report.message = Some(error.to_string());
            }
        }
        report
    }

    fn apply(&mut self, command: &Command) -> Result<Outcome, Failure> {
        let mut outcome = Outcome::default();
        match command {
            Command::AddTournament {
                id,
                max_games_per_player,
                location,
            } => {
                let id = required(id, "id")?;
                let max_games = required(max_games_per_player, "max_games_per_player")?;
                let location = required(location, "location")?;
                self.chess.add_tournament(id, max_games, &location)?;
            }
            Command::AddGame {
                tournament,
                first,
                second,
                winner,
                play_time,
            } => {
                self.chess.add_game(
                    required(tournament, "tournament")?,
                    required(first, "first")?,
                    required(second, "second")?,
                    required(winner, "winner")?,
                    required(play_time, "play_time")?,
                )?;
            }
            Command::EndTournament { id } => {
                outcome.winner = self.chess.end_tournament(required(id, "id")?)?;
            }
            Command::RemoveTournament { id } => {
                self.chess.remove_tournament(required(id, "id")?)?;
            }
            Command::RemovePlayer { id } => {
                self.chess.remove_player(required(id, "id")?)?;
            }
            Command::AveragePlayTime { player } => {
                let average = self.chess.average_play_time(required(player, "player")?)?;
                outcome.average_play_time = Some(average);
            }
            Command::SaveLevels { path } => {
                let path = destination(path, &self.config.levels_path);
                let mut out = BufWriter::new(File::create(&path).map_err(ChessError::from)?);
                self.chess.save_players_levels(&mut out)?;
            }
            Command::SaveStatistics { path } => {
                let path = destination(path, &self.config.statistics_path);
                self.chess.save_tournament_statistics(&path)?;
            }
        }
        Ok(outcome)
    }
}

fn destination(path: &Option<PathBuf>, default: &Path) -> PathBuf {
    path.clone().unwrap_or_else(|| default.to_path_buf())
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod runner_tests;
