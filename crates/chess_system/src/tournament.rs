//! Tournament records and the store that keeps them consistent with the
//! system-wide player registry.
//!
//! Each [`Tournament`] exclusively owns its game ledger and its local player
//! registry. The [`TournamentStore`] exclusively owns the global registry and
//! propagates every local change to it at the moment the change is made.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{out_of_memory, ChessError, ChessResult};
use crate::games::GameLedger;
use crate::ordered_map::OrderedMap;
use crate::players::PlayerRegistry;
use crate::types::{is_valid_location, PlayerId, TournamentId, Winner};

/// A single tournament
#[derive(Debug, Clone, PartialEq)]
pub struct Tournament {
    location: String,
    max_games_per_player: u32,
    ended: bool,
    winner: Option<PlayerId>,
    games: GameLedger,
    players: PlayerRegistry,
}

impl Tournament {
    fn new(location: &str, max_games_per_player: u32) -> Self {
        Self {
            location: location.to_string(),
            max_games_per_player,
            ended: false,
            winner: None,
            games: GameLedger::new(),
            players: PlayerRegistry::new(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn max_games_per_player(&self) -> u32 {
        self.max_games_per_player
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Set when the tournament ends; `None` while active, or if every
    /// participant had withdrawn by then.
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn games(&self) -> &GameLedger {
        &self.games
    }

    /// Local registry: statistics scoped to this tournament
    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    fn statistics(&self, id: TournamentId) -> TournamentStatistics {
        TournamentStatistics {
            tournament_id: id,
            winner: self.winner,
            longest_game: self.games.longest(),
            average_game_time: self.games.average_duration(),
            location: self.location.clone(),
            game_count: self.games.game_count(),
            participant_count: self.games.participant_count(),
        }
    }
}

/// Statistics of one ended tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentStatistics {
    pub tournament_id: TournamentId,
    pub winner: Option<PlayerId>,
    pub longest_game: u32,
    pub average_game_time: f64,
    pub location: String,
    pub game_count: usize,
    pub participant_count: usize,
}

/// All tournaments plus the global player registry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TournamentStore {
    tournaments: OrderedMap<TournamentId, Tournament>,
    global: PlayerRegistry,
}

impl TournamentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }

    pub fn contains(&self, id: TournamentId) -> bool {
        self.tournaments.contains(&id)
    }

    pub fn get(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.get(&id)
    }

    /// Tournaments in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (TournamentId, &Tournament)> {
        self.tournaments.iter().map(|(&id, tournament)| (id, tournament))
    }

    /// System-wide registry: the sum of every local registry
    pub fn global(&self) -> &PlayerRegistry {
        &self.global
    }

    /// Add an empty, active tournament
    pub fn create(
        &mut self,
        id: TournamentId,
        location: &str,
        max_games_per_player: i32,
    ) -> ChessResult<()> {
        if self.contains(id) {
            return Err(ChessError::TournamentAlreadyExists(id));
        }
        if !is_valid_location(location) {
            return Err(ChessError::InvalidLocation(location.to_string()));
        }
        let limit = match u32::try_from(max_games_per_player) {
            Ok(limit) if limit >= 1 => limit,
            _ => return Err(ChessError::InvalidMaxGames(max_games_per_player)),
        };

        self.tournaments
            .put(id, Tournament::new(location, limit))
            .map_err(out_of_memory)?;
        debug!("tournament {} created at {:?} (max {} games)", id, location, limit);
        Ok(())
    }

    /// Record a game in tournament `id` and count it in the local and global
    /// registries. Nothing changes unless every step can succeed.
    pub fn record_game(
        &mut self,
        id: TournamentId,
        first: PlayerId,
        second: PlayerId,
        winner: Winner,
        play_time: i32,
    ) -> ChessResult<()> {
        let tournament = self
            .tournaments
            .get_mut(&id)
            .ok_or(ChessError::TournamentNotExist(id))?;
        if tournament.ended {
            return Err(ChessError::TournamentEnded(id));
        }
        if tournament.games.exists_pairing(first, second) {
            return Err(ChessError::GameAlreadyExists { first, second });
        }
        if play_time < 0 {
            return Err(ChessError::InvalidPlayTime(play_time));
        }
        let limit = tournament.max_games_per_player;
        for player in [first, second] {
            if tournament.players.games_played(player) >= limit {
                return Err(ChessError::ExceededGames { player, limit });
            }
        }

        // Reserve in all three structures first so the commit below cannot
        // fail halfway through
        tournament
            .games
            .reserve_game(first, second)
            .map_err(out_of_memory)?;
        tournament
            .players
            .reserve_for(&[first, second])
            .map_err(out_of_memory)?;
        self.global
            .reserve_for(&[first, second])
            .map_err(out_of_memory)?;

        tournament.games.add_game(first, second, winner, play_time)?;
        tournament
            .players
            .record_game(first, second, winner)
            .map_err(out_of_memory)?;
        self.global
            .record_game(first, second, winner)
            .map_err(out_of_memory)?;

        debug!(
            "tournament {}: game {} vs {} ({:?}, {}s)",
            id, first, second, winner, play_time
        );
        Ok(())
    }

    /// Close tournament `id` and pick its winner, which is returned
    pub fn end(&mut self, id: TournamentId) -> ChessResult<Option<PlayerId>> {
        let tournament = self
            .tournaments
            .get_mut(&id)
            .ok_or(ChessError::TournamentNotExist(id))?;
        if tournament.ended {
            return Err(ChessError::TournamentEnded(id));
        }
        if tournament.games.game_count() == 0 {
            return Err(ChessError::NoGames(id));
        }

        tournament.ended = true;
        tournament.winner = tournament.players.tournament_winner();
        debug!("tournament {} ended, winner {:?}", id, tournament.winner);
        Ok(tournament.winner)
    }

    /// Delete tournament `id`, withdrawing its local counters from the global registry
    pub fn remove(&mut self, id: TournamentId) -> ChessResult<()> {
        let tournament = self
            .tournaments
            .remove(&id)
            .map_err(|_| ChessError::TournamentNotExist(id))?;
        self.global.subtract(&tournament.players);
        debug!(
            "tournament {} removed ({} players reclaimed)",
            id,
            tournament.players.len()
        );
        Ok(())
    }

    /// Remove every tournament, leaving the global registry with only
    /// zeroed records.
    pub fn remove_all(&mut self) {
        let mut cursor = self.tournaments.cursor();
        while let Some(id) = cursor.next(&self.tournaments) {
            if let Ok(tournament) = self.tournaments.remove(&id) {
                self.global.subtract(&tournament.players);
            }
        }
    }

    /// Drop player `id` from the system.
    ///
    /// In every active tournament the player's games become forfeits credited
    /// to their opponents; in ended tournaments the history is left as it is.
    /// Either way the player's local record is dropped.
    pub fn remove_player(&mut self, id: PlayerId) -> ChessResult<()> {
        if self.global.remove(id).is_none() {
            return Err(ChessError::PlayerNotExist(id));
        }

        let mut cursor = self.tournaments.cursor();
        while let Some(tournament_id) = cursor.next(&self.tournaments) {
            let Some(tournament) = self.tournaments.get_mut(&tournament_id) else {
                continue;
            };
            if !tournament.players.contains(id) {
                continue;
            }
            if !tournament.ended {
                let forfeited = tournament.games.apply_withdrawal(
                    id,
                    &mut tournament.players,
                    &mut self.global,
                );
                debug!(
                    "player {} withdrew from tournament {} ({} games forfeited)",
                    id, tournament_id, forfeited
                );
            }
            tournament.players.remove(id);
        }
        Ok(())
    }

    /// Play time of `id` summed over the tournaments they still belong to
    pub fn total_time_for(&self, id: PlayerId) -> u64 {
        self.tournaments
            .values()
            .filter(|tournament| tournament.players.contains(id))
            .map(|tournament| tournament.games.total_time_for(id))
            .sum()
    }

    pub fn has_ended_tournament(&self) -> bool {
        self.tournaments.values().any(Tournament::is_ended)
    }

    /// Statistics of every ended tournament in ascending id order
    pub fn statistics(&self) -> ChessResult<Vec<TournamentStatistics>> {
        let stats: Vec<TournamentStatistics> = self
            .iter()
            .filter(|(_, tournament)| tournament.ended)
            .map(|(id, tournament)| tournament.statistics(id))
            .collect();
        if stats.is_empty() {
            return Err(ChessError::NoTournamentsEnded);
        }
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "tournament_tests.rs"]
mod tournament_tests;
