//! Scenario runner for the chess system
//!
//! This crate provides:
//! - A TOML scenario format listing system commands to replay
//! - A runner that applies them to a `ChessSystem` and reports a result code
//!   for every command
//! - The runner configuration file and a JSON summary of each run
//!
//! # Usage
//!
//! ```bash
//! # Replay a scenario and keep a JSON summary of the run
//! cargo run -p chess_runner -- run season.toml --summary season.json
//!
//! # Only parse a scenario and list its commands
//! cargo run -p chess_runner -- check season.toml
//! ```

mod config;
mod error;
mod runner;
mod scenario;

pub use config::*;
pub use error::*;
pub use runner::*;
pub use scenario::*;
