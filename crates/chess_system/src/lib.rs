//! In-memory chess tournament engine
//!
//! This crate keeps three coupled collections consistent:
//! - Tournaments, each owning a game ledger and a local player registry
//! - Games, with running duration and participant aggregates
//! - Players, tracked per tournament and system-wide
//!
//! Withdrawing a player forfeits their games in running tournaments in favour
//! of their opponents, and deleting a tournament takes its contribution back
//! out of the system-wide statistics.
//!
//! # Usage
//!
//! ```
//! use chess_system::{ChessSystem, Winner};
//!
//! let mut chess = ChessSystem::new();
//! chess.add_tournament(1, 2, "Haifa").unwrap();
//! chess.add_game(1, 1, 2, Winner::FirstPlayer, 10).unwrap();
//! chess.add_game(1, 2, 3, Winner::Draw, 20).unwrap();
//! assert_eq!(chess.end_tournament(1).unwrap(), Some(1));
//! ```

pub mod error;
pub mod games;
pub mod ordered_map;
pub mod players;
pub mod report;
pub mod system;
pub mod tournament;
pub mod types;

pub use error::*;
pub use games::*;
pub use ordered_map::*;
pub use players::*;
pub use report::{PlayerLevel, write_levels, write_statistics};
pub use system::*;
pub use tournament::*;
pub use types::*;
