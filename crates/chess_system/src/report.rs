//! Text layouts of the two reports the system produces.
//!
//! Ranking report, one line per player:
//! ```text
//! <id> <level with 2 decimals>
//! ```
//!
//! Tournament statistics report, six lines per ended tournament: winner id
//! (0 when nobody is left to win), longest game, average game time with 2
//! decimals, location, number of games, number of participants.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::tournament::TournamentStatistics;
use crate::types::PlayerId;

/// One line of the ranking report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerLevel {
    pub player_id: PlayerId,
    pub level: f64,
}

impl From<(PlayerId, f64)> for PlayerLevel {
    fn from((player_id, level): (PlayerId, f64)) -> Self {
        Self { player_id, level }
    }
}

pub fn write_levels<W, I>(out: &mut W, levels: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = PlayerLevel>,
{
    for PlayerLevel { player_id, level } in levels {
        writeln!(out, "{} {:.2}", player_id, level)?;
    }
    Ok(())
}

pub fn write_statistics<W: Write>(out: &mut W, stats: &[TournamentStatistics]) -> io::Result<()> {
    for entry in stats {
        writeln!(out, "{}", entry.winner.unwrap_or(0))?;
        writeln!(out, "{}", entry.longest_game)?;
        writeln!(out, "{:.2}", entry.average_game_time)?;
        writeln!(out, "{}", entry.location)?;
        writeln!(out, "{}", entry.game_count)?;
        writeln!(out, "{}", entry.participant_count)?;
    }
    Ok(())
}
