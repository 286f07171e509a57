//! Daily challenges.
//!
//! Every calendar date maps to a fixed seed, difficulty and name, so all
//! players get the same deal on the same day.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::options::Difficulty;

/// Challenge names, picked by day of year.
const CHALLENGE_NAMES: [&str; 7] = [
    "Örümcek Ağı",
    "Kart Ustası",
    "Zorlayıcı Eller",
    "Sabırlı Oyuncu",
    "Zorlu Durum",
    "Takım Toplama",
    "Stratejik Hamle",
];

/// The challenge for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChallenge {
    /// The challenge date.
    pub date: NaiveDate,
    /// Deal seed: `year * 1000 + day_of_year`.
    pub seed: u64,
    /// Difficulty for the day of the week.
    pub difficulty: Difficulty,
    /// Display name, `dd.mm.yyyy - <name>`.
    pub name: String,
}

impl DailyChallenge {
    /// Derives the challenge for `date`.
    ///
    /// Weekends are hard, Monday, Wednesday and Friday are medium, and
    /// Tuesday and Thursday are easy.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use spider_engine::{DailyChallenge, Difficulty};
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
    /// let challenge = DailyChallenge::for_date(date);
    /// assert_eq!(challenge.seed, 2_025_121);
    /// assert_eq!(challenge.difficulty, Difficulty::Easy);
    /// assert_eq!(challenge.name, "01.05.2025 - Zorlayıcı Eller");
    /// ```
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        let day_of_year = date.ordinal();
        let seed = u64::from(date.year().unsigned_abs()) * 1000 + u64::from(day_of_year);

        let difficulty = match date.weekday() {
            Weekday::Sat | Weekday::Sun => Difficulty::Hard,
            Weekday::Mon | Weekday::Wed | Weekday::Fri => Difficulty::Medium,
            Weekday::Tue | Weekday::Thu => Difficulty::Easy,
        };

        let title = CHALLENGE_NAMES[day_of_year as usize % CHALLENGE_NAMES.len()];
        let name = format!(
            "{:02}.{:02}.{:04} - {title}",
            date.day(),
            date.month(),
            date.year()
        );

        Self {
            date,
            seed,
            difficulty,
            name,
        }
    }

    /// Derives the challenges for every day of a month.
    ///
    /// Returns an empty list for an invalid year or month.
    #[must_use]
    pub fn for_month(year: i32, month: u32) -> Vec<Self> {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return Vec::new();
        };

        first
            .iter_days()
            .take_while(|date| date.month() == month)
            .map(Self::for_date)
            .collect()
    }
}

/// Best results for one challenge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRecord {
    /// Whether the challenge has been won at least once.
    pub completed: bool,
    /// Highest final score.
    pub best_score: i64,
    /// Fastest winning time in seconds; zero until the first win.
    pub best_time: f64,
}

impl ChallengeRecord {
    /// Records a win. Returns whether the score or time improved.
    pub fn record_completion(&mut self, score: i64, seconds: f64) -> bool {
        let first = !self.completed;
        self.completed = true;

        let better_score = first || score > self.best_score;
        if better_score {
            self.best_score = score;
        }

        let better_time = self.best_time == 0.0 || seconds < self.best_time;
        if better_time {
            self.best_time = seconds;
        }

        better_score || better_time
    }
}
