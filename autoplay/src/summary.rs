use std::collections::BTreeMap;

use serde::Serialize;

use crate::game::GameRecord;

/// Totals over a batch of games.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub premature_losses: usize,
    pub total_turns: usize,
    /// How many games ended with each best tile, by tile value.
    pub best_tiles: BTreeMap<u32, usize>,
}

impl Summary {
    pub fn add(&mut self, record: &GameRecord) {
        self.games += 1;
        self.wins += record.won as usize;
        self.losses += record.lost as usize;
        self.premature_losses += record.premature_loss as usize;
        self.total_turns += record.turns;
        if let Some(tile) = record.best_tile {
            *self.best_tiles.entry(tile.value()).or_default() += 1;
        }
    }

    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games as f64
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "End result after {} games:", self.games)?;
        writeln!(f, "- {} won", self.wins)?;
        write!(f, "- {} lost", self.losses)?;
        if self.premature_losses > 0 {
            write!(
                f,
                " ({} with a merge still possible on the border)",
                self.premature_losses
            )?;
        }
        writeln!(f)?;
        writeln!(f, "- {:.1} turns on average", self.average_turns())?;
        write!(f, "Best tiles:")?;
        for (value, count) in self.best_tiles.iter().rev() {
            write!(f, "\n- {:>4}: {}", value, count)?;
        }
        Ok(())
    }
}
