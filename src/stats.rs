//! Lifetime player statistics.

use serde::{Deserialize, Serialize};

/// Totals across all games played.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Games started.
    pub games_played: u32,
    /// Games won.
    pub games_won: u32,
    /// Highest final score.
    pub best_score: i64,
    /// Fastest win in seconds; zero until the first win.
    pub fastest_time: f64,
}

impl Statistics {
    /// Counts a started game.
    pub const fn record_start(&mut self) {
        self.games_played += 1;
    }

    /// Counts a win and keeps the best score and fastest time.
    pub fn record_win(&mut self, final_score: i64, seconds: f64) {
        self.games_won += 1;
        if final_score > self.best_score {
            self.best_score = final_score;
        }
        if seconds > 0.0 && (self.fastest_time == 0.0 || seconds < self.fastest_time) {
            self.fastest_time = seconds;
        }
    }

    /// Returns the share of started games that were won.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.games_won) / f64::from(self.games_played)
        }
    }
}
