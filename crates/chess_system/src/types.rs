//! Identifiers, game outcomes and input validation shared by the engine.

use serde::{Deserialize, Serialize};

/// Player identifier. Valid ids are positive.
pub type PlayerId = i32;

/// Tournament identifier. Valid ids are positive.
pub type TournamentId = i32;

/// Reported result of a game, from the caller's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    FirstPlayer,
    SecondPlayer,
    Draw,
}

/// What a single game counts as for one of its players
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    pub fn other(self) -> GameResult {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }
}

impl Winner {
    /// Results for (first player, second player)
    pub fn results(self) -> (GameResult, GameResult) {
        match self {
            Winner::FirstPlayer => (GameResult::Win, GameResult::Loss),
            Winner::SecondPlayer => (GameResult::Loss, GameResult::Win),
            Winner::Draw => (GameResult::Draw, GameResult::Draw),
        }
    }
}

/// One side of a recorded game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Player(PlayerId),
    /// The player who sat here withdrew; the row is kept for statistics only
    Forfeited,
}

impl Slot {
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Slot::Player(id) => Some(id),
            Slot::Forfeited => None,
        }
    }

    pub fn is(self, id: PlayerId) -> bool {
        self == Slot::Player(id)
    }
}

/// Stored outcome of a game, including forfeits caused by withdrawal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    FirstWon,
    SecondWon,
    Draw,
    /// First player withdrew, second player is credited the win
    FirstForfeited,
    /// Second player withdrew, first player is credited the win
    SecondForfeited,
    /// Both players withdrew
    BothForfeited,
}

impl From<Winner> for GameOutcome {
    fn from(winner: Winner) -> Self {
        match winner {
            Winner::FirstPlayer => GameOutcome::FirstWon,
            Winner::SecondPlayer => GameOutcome::SecondWon,
            Winner::Draw => GameOutcome::Draw,
        }
    }
}

pub fn is_valid_id(id: i32) -> bool {
    id > 0
}

/// Tournament locations are one uppercase ASCII letter followed by any number
/// of lowercase ASCII letters or spaces.
pub fn is_valid_location(location: &str) -> bool {
    let mut chars = location.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c == ' ')
}
