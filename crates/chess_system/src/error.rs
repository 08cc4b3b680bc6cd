//! Error types for the chess system.

use thiserror::Error;

use crate::ordered_map::MapError;
use crate::types::{PlayerId, TournamentId};

/// Recoverable failures returned by engine operations.
///
/// Every operation that returns one of these has left the system unchanged.
#[derive(Debug, Error)]
pub enum ChessError {
    /// Non-positive id, or a game between a player and themself
    #[error("Invalid id")]
    InvalidId,

    #[error("Invalid tournament location: {0:?}")]
    InvalidLocation(String),

    #[error("Invalid games-per-player limit: {0}")]
    InvalidMaxGames(i32),

    #[error("Tournament {0} already exists")]
    TournamentAlreadyExists(TournamentId),

    #[error("Tournament {0} does not exist")]
    TournamentNotExist(TournamentId),

    #[error("Player {0} does not exist")]
    PlayerNotExist(PlayerId),

    #[error("Tournament {0} has already ended")]
    TournamentEnded(TournamentId),

    #[error("Game between {first} and {second} already recorded")]
    GameAlreadyExists { first: PlayerId, second: PlayerId },

    #[error("Invalid play time: {0}")]
    InvalidPlayTime(i32),

    #[error("Player {player} reached the limit of {limit} games")]
    ExceededGames { player: PlayerId, limit: u32 },

    #[error("Tournament {0} has no games")]
    NoGames(TournamentId),

    #[error("No tournament has ended")]
    NoTournamentsEnded,

    #[error("Out of memory")]
    OutOfMemory,

    #[error("Failed to save report: {0}")]
    SaveFailure(#[from] std::io::Error),
}

/// Result type for engine operations
pub type ChessResult<T> = Result<T, ChessError>;

/// Map a failed reservation or insertion to [`ChessError::OutOfMemory`]
pub(crate) fn out_of_memory(_: MapError) -> ChessError {
    ChessError::OutOfMemory
}
