//! The chess system: validates requests and routes them to the tournament store.
//!
//! A [`ChessSystem`] owns everything it manages, including the global player
//! registry, so any number of independent systems can live side by side.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::{ChessError, ChessResult};
use crate::players::{LevelRanking, PlayerRegistry};
use crate::report::{self, PlayerLevel};
use crate::tournament::{Tournament, TournamentStatistics, TournamentStore};
use crate::types::{is_valid_id, PlayerId, TournamentId, Winner};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChessSystem {
    store: TournamentStore,
}

impl ChessSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &TournamentStore {
        &self.store
    }

    pub fn tournament(&self, id: TournamentId) -> Option<&Tournament> {
        self.store.get(id)
    }

    /// System-wide player statistics
    pub fn players(&self) -> &PlayerRegistry {
        self.store.global()
    }

    /// Create tournament `id`.
    ///
    /// Checks, in order: positive id, id not taken, location format, limit of
    /// at least one game per player.
    pub fn add_tournament(
        &mut self,
        id: TournamentId,
        max_games_per_player: i32,
        location: &str,
    ) -> ChessResult<()> {
        if !is_valid_id(id) {
            return Err(ChessError::InvalidId);
        }
        self.store.create(id, location, max_games_per_player)
    }

    /// Record a game between two distinct players in tournament `id`
    pub fn add_game(
        &mut self,
        id: TournamentId,
        first: PlayerId,
        second: PlayerId,
        winner: Winner,
        play_time: i32,
    ) -> ChessResult<()> {
        if !is_valid_id(id) || !is_valid_id(first) || !is_valid_id(second) || first == second {
            return Err(ChessError::InvalidId);
        }
        self.store.record_game(id, first, second, winner, play_time)
    }

    pub fn remove_tournament(&mut self, id: TournamentId) -> ChessResult<()> {
        if !is_valid_id(id) {
            return Err(ChessError::InvalidId);
        }
        self.store.remove(id)?;
        info!("Tournament {} removed", id);
        Ok(())
    }

    /// End tournament `id`, returning its winner
    pub fn end_tournament(&mut self, id: TournamentId) -> ChessResult<Option<PlayerId>> {
        if !is_valid_id(id) {
            return Err(ChessError::InvalidId);
        }
        let winner = self.store.end(id)?;
        info!("Tournament {} ended, winner: {:?}", id, winner);
        Ok(winner)
    }

    /// Remove player `id` from the system, forfeiting their games in every
    /// tournament that is still running.
    pub fn remove_player(&mut self, id: PlayerId) -> ChessResult<()> {
        if !is_valid_id(id) {
            return Err(ChessError::InvalidId);
        }
        self.store.remove_player(id)?;
        info!("Player {} removed", id);
        Ok(())
    }

    /// Average duration of the games player `id` still takes part in, across
    /// all tournaments.
    pub fn average_play_time(&self, id: PlayerId) -> ChessResult<f64> {
        if !is_valid_id(id) {
            return Err(ChessError::InvalidId);
        }
        let games = self
            .players()
            .get(id)
            .ok_or(ChessError::PlayerNotExist(id))?
            .games_played;
        if games == 0 {
            return Ok(0.0);
        }
        Ok(self.store.total_time_for(id) as f64 / games as f64)
    }

    /// Global ranking by level, see [`PlayerRegistry::ranking`]
    pub fn ranking(&self) -> LevelRanking<'_> {
        self.players().ranking()
    }

    pub fn player_levels(&self) -> Vec<PlayerLevel> {
        self.ranking().map(PlayerLevel::from).collect()
    }

    /// Write the ranking report to `out`
    pub fn save_players_levels<W: Write>(&self, out: &mut W) -> ChessResult<()> {
        report::write_levels(out, self.ranking().map(PlayerLevel::from))?;
        out.flush()?;
        Ok(())
    }

    pub fn tournament_statistics(&self) -> ChessResult<Vec<TournamentStatistics>> {
        self.store.statistics()
    }

    /// Write the statistics report of every ended tournament to the file at
    /// `path`. Nothing is created when no tournament has ended.
    pub fn save_tournament_statistics(&self, path: impl AsRef<Path>) -> ChessResult<()> {
        let stats = self.tournament_statistics()?;
        let mut out = BufWriter::new(File::create(path)?);
        report::write_statistics(&mut out, &stats)?;
        out.flush()?;
        Ok(())
    }

    /// Remove every tournament
    pub fn clear(&mut self) {
        self.store.remove_all();
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod system_tests;
