//! High score leaderboard
//!
//! Lives for the whole session and tracks the top 10 runs; restarts feed it.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Wave reached
    pub wave: u32,
    /// Simulation ticks the run lasted
    pub ticks: u64,
}

impl HighScoreEntry {
    /// How long the run lasted, formatted as m:ss
    pub fn survived(&self) -> String {
        let secs = (self.ticks as f32 * SIM_DT) as u64;
        format!("{}:{:02}", secs / 60, secs % 60)
    }

    /// Board order: higher score, then deeper wave, then the quicker run
    fn board_order(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then(other.wave.cmp(&self.wave))
            .then(self.ticks.cmp(&other.ticks))
    }
}

/// Runs of one session, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run. Returns its 1-based place, or None when it
    /// scored nothing or falls off the end of a full board.
    pub fn add_score(&mut self, score: u64, wave: u32, ticks: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let entry = HighScoreEntry { score, wave, ticks };
        // Equal runs keep the earlier one ahead
        let index = self
            .entries
            .partition_point(|e| e.board_order(&entry) != Ordering::Greater);
        if index >= MAX_HIGH_SCORES {
            return None;
        }
        self.entries.insert(index, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(index + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }
}
