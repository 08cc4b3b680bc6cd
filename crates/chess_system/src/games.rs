//! Per-tournament game records and their running aggregates.

use log::debug;

use crate::error::{out_of_memory, ChessError, ChessResult};
use crate::ordered_map::{MapError, OrderedMap};
use crate::players::PlayerRegistry;
use crate::types::{GameOutcome, GameResult, PlayerId, Slot, Winner};

/// A recorded game. Rows are never deleted; a withdrawn player's side is
/// replaced by [`Slot::Forfeited`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    pub first: Slot,
    pub second: Slot,
    pub outcome: GameOutcome,
    pub duration: u32,
}

impl Game {
    /// Whether `id` still sits on either side of this game
    pub fn involves(&self, id: PlayerId) -> bool {
        self.first.is(id) || self.second.is(id)
    }

    /// Unordered match against the pair `{a, b}`
    pub fn is_pairing(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.first.is(a) && self.second.is(b)) || (self.first.is(b) && self.second.is(a))
    }

    /// Whether the stored outcome already credits the side at `first_side` with the win
    fn credits(&self, first_side: bool) -> bool {
        match self.outcome {
            GameOutcome::FirstWon | GameOutcome::SecondForfeited => first_side,
            GameOutcome::SecondWon | GameOutcome::FirstForfeited => !first_side,
            GameOutcome::Draw | GameOutcome::BothForfeited => false,
        }
    }
}

/// Games of one tournament plus count, duration and participant aggregates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameLedger {
    /// Keyed by insertion order
    games: OrderedMap<u32, Game>,
    /// Every id that ever appeared in this ledger
    participants: OrderedMap<PlayerId, ()>,
    total_duration: u64,
    longest: u32,
}

impl GameLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn longest(&self) -> u32 {
        self.longest
    }

    pub fn total_duration(&self) -> u64 {
        self.total_duration
    }

    /// Mean game duration, 0 for an empty ledger
    pub fn average_duration(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        self.total_duration as f64 / self.games.len() as f64
    }

    /// Games in the order they were recorded
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    pub fn exists_pairing(&self, a: PlayerId, b: PlayerId) -> bool {
        self.games().any(|game| game.is_pairing(a, b))
    }

    /// Total duration of the games in which `id` is still a live participant
    pub fn total_time_for(&self, id: PlayerId) -> u64 {
        self.games()
            .filter(|game| game.involves(id))
            .map(|game| game.duration as u64)
            .sum()
    }

    /// Reserve room so that [`add_game`](Self::add_game) for `{a, b}` cannot
    /// run out of memory.
    pub fn reserve_game(&mut self, a: PlayerId, b: PlayerId) -> Result<(), MapError> {
        self.games.reserve(1)?;
        let fresh = [a, b]
            .iter()
            .filter(|id| !self.participants.contains(id))
            .count();
        self.participants.reserve(fresh)
    }

    /// Record a game between `first` and `second`.
    ///
    /// Fails with [`ChessError::GameAlreadyExists`] if the pair already has a
    /// game here and [`ChessError::InvalidPlayTime`] for a negative duration.
    /// Player registries are not touched.
    pub fn add_game(
        &mut self,
        first: PlayerId,
        second: PlayerId,
        winner: Winner,
        duration: i32,
    ) -> ChessResult<()> {
        if self.exists_pairing(first, second) {
            return Err(ChessError::GameAlreadyExists { first, second });
        }
        let duration = u32::try_from(duration).map_err(|_| ChessError::InvalidPlayTime(duration))?;
        self.reserve_game(first, second).map_err(out_of_memory)?;

        let key = self.games.len() as u32;
        let game = Game {
            first: Slot::Player(first),
            second: Slot::Player(second),
            outcome: winner.into(),
            duration,
        };
        // Room was reserved above, these cannot fail
        self.games.put(key, game).map_err(out_of_memory)?;
        for id in [first, second] {
            self.participants.put(id, ()).map_err(out_of_memory)?;
        }

        self.total_duration += duration as u64;
        self.longest = self.longest.max(duration);
        Ok(())
    }

    /// Replace `quitter` by a forfeit in every game they still sit in, and
    /// credit each live opponent with the win in both registries.
    ///
    /// An opponent who had already been credited the win is left alone. One
    /// who lost or drew has that result turned into a win; their games played
    /// do not change. When the opponent had already withdrawn too, the game
    /// becomes [`GameOutcome::BothForfeited`] with no counter changes.
    ///
    /// Returns the number of games rewritten.
    pub fn apply_withdrawal(
        &mut self,
        quitter: PlayerId,
        local: &mut PlayerRegistry,
        global: &mut PlayerRegistry,
    ) -> usize {
        let mut rewritten = 0;
        for game in self.games.values_mut() {
            let quitter_first = if game.first.is(quitter) {
                true
            } else if game.second.is(quitter) {
                false
            } else {
                continue;
            };

            let opponent = if quitter_first { game.second } else { game.first };
            let forfeit = if quitter_first {
                GameOutcome::FirstForfeited
            } else {
                GameOutcome::SecondForfeited
            };

            match opponent {
                Slot::Forfeited => game.outcome = GameOutcome::BothForfeited,
                Slot::Player(opponent) => {
                    if !game.credits(!quitter_first) {
                        let previous = if game.outcome == GameOutcome::Draw {
                            GameResult::Draw
                        } else {
                            GameResult::Loss
                        };
                        local.convert(opponent, previous, GameResult::Win);
                        global.convert(opponent, previous, GameResult::Win);
                        debug!(
                            "player {} credited a forfeit win over {} ({:?} -> Win)",
                            opponent, quitter, previous
                        );
                    }
                    game.outcome = forfeit;
                }
            }

            if quitter_first {
                game.first = Slot::Forfeited;
            } else {
                game.second = Slot::Forfeited;
            }
            rewritten += 1;
        }
        rewritten
    }
}

#[cfg(test)]
#[path = "games_tests.rs"]
mod games_tests;
