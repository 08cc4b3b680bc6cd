//! Player statistics, levels and tournament-winner selection.
//!
//! A [`PlayerRegistry`] exists at two scopes at once: each tournament owns a
//! local one, and the system owns a global one holding the sum of every local
//! registry a player belongs to. Keeping the two in step is the caller's job;
//! the registry itself only knows about counters.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ordered_map::{MapError, OrderedMap};
use crate::types::{GameResult, PlayerId, Winner};

/// Weights used by [`PlayerRecord::level`]
pub const WIN_WEIGHT: i64 = 6;
pub const LOSS_WEIGHT: i64 = 10;
pub const DRAW_WEIGHT: i64 = 2;

/// Points awarded for a win in tournament standings; a draw is worth one
pub const WIN_POINTS: u32 = 2;

/// Win/loss/draw counters for one player in one scope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Always `wins + losses + draws`
    pub games_played: u32,
}

impl PlayerRecord {
    /// Tournament standing score
    pub fn points(&self) -> u32 {
        WIN_POINTS * self.wins + self.draws
    }

    /// Weighted per-game score used for the system ranking.
    ///
    /// `None` for a player who has not played, since the level is undefined.
    pub fn level(&self) -> Option<f64> {
        if self.games_played == 0 {
            return None;
        }
        let weighted = WIN_WEIGHT * self.wins as i64 - LOSS_WEIGHT * self.losses as i64
            + DRAW_WEIGHT * self.draws as i64;
        Some(weighted as f64 / self.games_played as f64)
    }

    /// Add `factor` games with `result`. A negative factor takes games away.
    ///
    /// # Panics
    /// If any counter would drop below zero.
    pub fn apply(&mut self, result: GameResult, factor: i32) {
        let counter = match result {
            GameResult::Win => &mut self.wins,
            GameResult::Loss => &mut self.losses,
            GameResult::Draw => &mut self.draws,
        };
        *counter = shift(*counter, factor);
        self.games_played = shift(self.games_played, factor);
    }

    /// True when `self` would take a tournament lead away from `holder`:
    /// more points, then fewer losses, then more wins.
    fn outranks(&self, holder: &PlayerRecord) -> bool {
        let ordering = self
            .points()
            .cmp(&holder.points())
            .then(holder.losses.cmp(&self.losses))
            .then(self.wins.cmp(&holder.wins));
        ordering == Ordering::Greater
    }
}

fn shift(counter: u32, factor: i32) -> u32 {
    counter
        .checked_add_signed(factor)
        .expect("player counter driven below zero")
}

/// Player id to record mapping for a single scope
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerRegistry {
    players: OrderedMap<PlayerId, PlayerRecord>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains(&id)
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.players.get(&id)
    }

    /// Games played by `id`, zero for an unknown player
    pub fn games_played(&self, id: PlayerId) -> u32 {
        self.get(id).map_or(0, |record| record.games_played)
    }

    pub fn points(&self, id: PlayerId) -> Option<u32> {
        self.get(id).map(PlayerRecord::points)
    }

    pub fn level(&self, id: PlayerId) -> Option<f64> {
        self.get(id).and_then(PlayerRecord::level)
    }

    /// Ascending-id iteration over all records
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &PlayerRecord)> {
        self.players.iter().map(|(&id, record)| (id, record))
    }

    /// Reserve room for whichever of `ids` are not registered yet, so that
    /// [`ensure`](Self::ensure) on them cannot fail afterwards.
    pub fn reserve_for(&mut self, ids: &[PlayerId]) -> Result<(), MapError> {
        let mut missing: Vec<PlayerId> = ids
            .iter()
            .copied()
            .filter(|&id| !self.contains(id))
            .collect();
        missing.dedup();
        self.players.reserve(missing.len())
    }

    /// Register `id` with empty counters if absent. Returns `true` if created.
    pub fn ensure(&mut self, id: PlayerId) -> Result<bool, MapError> {
        if self.contains(id) {
            return Ok(false);
        }
        self.players.put(id, PlayerRecord::default())
    }

    /// Adjust one counter of a registered player by `factor`.
    ///
    /// # Panics
    /// If `id` is not registered, or the adjustment would make a counter negative.
    pub fn record_outcome(&mut self, id: PlayerId, result: GameResult, factor: i32) {
        let record = self
            .players
            .get_mut(&id)
            .unwrap_or_else(|| panic!("player {id} is not registered"));
        record.apply(result, factor);
    }

    /// Count one game between `first` and `second`, registering either if needed
    pub fn record_game(
        &mut self,
        first: PlayerId,
        second: PlayerId,
        winner: Winner,
    ) -> Result<(), MapError> {
        self.ensure(first)?;
        self.ensure(second)?;
        let (first_result, second_result) = winner.results();
        self.record_outcome(first, first_result, 1);
        self.record_outcome(second, second_result, 1);
        Ok(())
    }

    /// Turn one counted `from` result of `id` into a `to` result
    pub fn convert(&mut self, id: PlayerId, from: GameResult, to: GameResult) {
        self.record_outcome(id, from, -1);
        self.record_outcome(id, to, 1);
    }

    pub fn remove(&mut self, id: PlayerId) -> Option<PlayerRecord> {
        self.players.remove(&id).ok()
    }

    /// Take away every counter held in `other` from the matching players here.
    ///
    /// # Panics
    /// If a player of `other` is missing here or has smaller counters.
    pub fn subtract(&mut self, other: &PlayerRegistry) {
        for (id, record) in other.iter() {
            self.record_outcome(id, GameResult::Win, -(record.wins as i32));
            self.record_outcome(id, GameResult::Loss, -(record.losses as i32));
            self.record_outcome(id, GameResult::Draw, -(record.draws as i32));
        }
    }

    /// Players by descending level, ties broken by ascending id.
    ///
    /// Players who have not played are left out. Every call starts a fresh
    /// ranking, independent of any other ranking in progress.
    pub fn ranking(&self) -> LevelRanking<'_> {
        LevelRanking {
            registry: self,
            emitted: HashSet::new(),
        }
    }

    /// Tournament winner: most points, then fewest losses, then most wins,
    /// then lowest id. `None` for an empty registry.
    pub fn tournament_winner(&self) -> Option<PlayerId> {
        let mut leader: Option<(PlayerId, &PlayerRecord)> = None;
        for (id, record) in self.iter() {
            match leader {
                Some((_, holder)) if !record.outranks(holder) => {}
                _ => leader = Some((id, record)),
            }
        }
        leader.map(|(id, _)| id)
    }
}

/// Repeated highest-level extraction over a registry, see [`PlayerRegistry::ranking`]
pub struct LevelRanking<'a> {
    registry: &'a PlayerRegistry,
    emitted: HashSet<PlayerId>,
}

impl Iterator for LevelRanking<'_> {
    type Item = (PlayerId, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let mut best: Option<(PlayerId, f64)> = None;
        for (id, record) in self.registry.iter() {
            if self.emitted.contains(&id) {
                continue;
            }
            let Some(level) = record.level() else {
                continue;
            };
            // Strictly greater only: the lowest id keeps a tie
            match best {
                Some((_, top)) if level <= top => {}
                _ => best = Some((id, level)),
            }
        }

        let (id, level) = best?;
        self.emitted.insert(id);
        Some((id, level))
    }
}

#[cfg(test)]
#[path = "players_tests.rs"]
mod players_tests;
