//! Game configuration options.

use serde::{Deserialize, Serialize};

use crate::card::Suit;
use crate::error::DifficultyError;

/// Number of suits in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    /// One suit (spades).
    #[default]
    Easy,
    /// Two suits (spades and hearts).
    Medium,
    /// All four suits.
    Hard,
}

impl Difficulty {
    /// Returns the number of suits dealt at this difficulty.
    #[must_use]
    pub const fn suit_count(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 4,
        }
    }

    /// Returns the suits dealt at this difficulty, in dealing order.
    #[must_use]
    pub fn suits(self) -> &'static [Suit] {
        &Suit::ALL[..usize::from(self.suit_count())]
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = DifficultyError;

    fn try_from(suits: u8) -> Result<Self, Self::Error> {
        match suits {
            1 => Ok(Self::Easy),
            2 => Ok(Self::Medium),
            4 => Ok(Self::Hard),
            _ => Err(DifficultyError::InvalidDifficulty),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.suit_count()
    }
}

/// How strictly a column checks suits when accepting a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcceptPolicy {
    /// Rank adjacency only.
    RankOnly,
    /// Rank adjacency and matching suit.
    SameSuit,
}

/// Configuration options for a Spider game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use spider_engine::{Difficulty, GameConfig};
///
/// let config = GameConfig::default()
///     .with_difficulty(Difficulty::Medium)
///     .with_strict_medium(true)
///     .with_draw_penalty(0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Number of suits in play.
    pub difficulty: Difficulty,
    /// Whether medium difficulty requires matching suits when stacking.
    pub strict_medium: bool,
    /// Score at the start of a game.
    pub starting_score: i64,
    /// Points added for every accepted move.
    pub move_points: i64,
    /// Points added for every completed sequence.
    pub sequence_points: i64,
    /// Points subtracted for every draw from the stock.
    pub draw_penalty: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            strict_medium: false,
            starting_score: 500,
            move_points: 5,
            sequence_points: 100,
            draw_penalty: 1,
        }
    }
}

impl GameConfig {
    /// Sets the difficulty.
    ///
    /// # Example
    ///
    /// ```
    /// use spider_engine::{Difficulty, GameConfig};
    ///
    /// let config = GameConfig::default().with_difficulty(Difficulty::Hard);
    /// assert_eq!(config.difficulty, Difficulty::Hard);
    /// ```
    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Sets the difficulty from a suit count.
    ///
    /// # Errors
    ///
    /// Returns an error if `suits` is not 1, 2 or 4.
    ///
    /// # Example
    ///
    /// ```
    /// use spider_engine::{Difficulty, DifficultyError, GameConfig};
    ///
    /// let config = GameConfig::default().with_suits(2).unwrap();
    /// assert_eq!(config.difficulty, Difficulty::Medium);
    /// assert_eq!(
    ///     GameConfig::default().with_suits(3),
    ///     Err(DifficultyError::InvalidDifficulty)
    /// );
    /// ```
    pub fn with_suits(self, suits: u8) -> Result<Self, DifficultyError> {
        Ok(self.with_difficulty(Difficulty::try_from(suits)?))
    }

    /// Sets whether medium difficulty requires matching suits.
    ///
    /// # Example
    ///
    /// ```
    /// use spider_engine::GameConfig;
    ///
    /// let config = GameConfig::default().with_strict_medium(true);
    /// assert!(config.strict_medium);
    /// ```
    #[must_use]
    pub const fn with_strict_medium(mut self, strict: bool) -> Self {
        self.strict_medium = strict;
        self
    }

    /// Sets the starting score.
    ///
    /// # Example
    ///
    /// ```
    /// use spider_engine::GameConfig;
    ///
    /// let config = GameConfig::default().with_starting_score(0);
    /// assert_eq!(config.starting_score, 0);
    /// ```
    #[must_use]
    pub const fn with_starting_score(mut self, score: i64) -> Self {
        self.starting_score = score;
        self
    }

    /// Sets the points awarded per move.
    ///
    /// # Example
    ///
    /// ```
    /// use spider_engine::GameConfig;
    ///
    /// let config = GameConfig::default().with_move_points(10);
    /// assert_eq!(config.move_points, 10);
    /// ```
    #[must_use]
    pub const fn with_move_points(mut self, points: i64) -> Self {
        self.move_points = points;
        self
    }

    /// Sets the points awarded per completed sequence.
    ///
    /// # Example
    ///
    /// ```
    /// use spider_engine::GameConfig;
    ///
    /// let config = GameConfig::default().with_sequence_points(150);
    /// assert_eq!(config.sequence_points, 150);
    /// ```
    #[must_use]
    pub const fn with_sequence_points(mut self, points: i64) -> Self {
        self.sequence_points = points;
        self
    }

    /// Sets the penalty for drawing from the stock.
    ///
    /// # Example
    ///
    /// ```
    /// use spider_engine::GameConfig;
    ///
    /// let config = GameConfig::default().with_draw_penalty(0);
    /// assert_eq!(config.draw_penalty, 0);
    /// ```
    #[must_use]
    pub const fn with_draw_penalty(mut self, penalty: i64) -> Self {
        self.draw_penalty = penalty;
        self
    }

    /// Returns the acceptance policy for the configured difficulty.
    #[must_use]
    pub const fn accept_policy(&self) -> AcceptPolicy {
        match self.difficulty {
            Difficulty::Easy => AcceptPolicy::RankOnly,
            Difficulty::Medium if !self.strict_medium => AcceptPolicy::RankOnly,
            Difficulty::Medium | Difficulty::Hard => AcceptPolicy::SameSuit,
        }
    }
}
