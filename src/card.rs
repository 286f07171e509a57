//! Card types and rank/suit symbols.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Card suit.
///
/// Variants are declared in dealing order: a game with `N` suits uses the
/// first `N` of [`Suit::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    /// Spades.
    #[serde(rename = "♠")]
    Spades,
    /// Hearts.
    #[serde(rename = "♥")]
    Hearts,
    /// Diamonds.
    #[serde(rename = "♦")]
    Diamonds,
    /// Clubs.
    #[serde(rename = "♣")]
    Clubs,
}

impl Suit {
    /// All suits in dealing order.
    pub const ALL: [Self; 4] = [Self::Spades, Self::Hearts, Self::Diamonds, Self::Clubs];

    /// Returns the suit symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Spades => "♠",
            Self::Hearts => "♥",
            Self::Diamonds => "♦",
            Self::Clubs => "♣",
        }
    }

    /// Position in [`Suit::ALL`].
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Parses a suit symbol.
    ///
    /// Accepts the plain symbols as well as their emoji presentation forms
    /// (symbol followed by U+FE0F).
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let symbol = symbol.strip_suffix('\u{fe0f}').unwrap_or(symbol);
        Self::ALL.into_iter().find(|suit| suit.symbol() == symbol)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Rank symbols indexed by `rank - 1`.
pub const RANKS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

/// Rank of an ace.
pub const ACE: u8 = 1;

/// Rank of a king.
pub const KING: u8 = 13;

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card (1 = Ace, 11 = Jack, 12 = Queen, 13 = King).
    pub rank: u8,
    /// Whether the card is face up.
    pub face_up: bool,
}

impl Card {
    /// Creates a new face-down card.
    ///
    /// Note: This function does not validate the rank. Values outside 1..=13
    /// are accepted but never form part of a valid run.
    #[must_use]
    pub const fn new(suit: Suit, rank: u8) -> Self {
        Self {
            suit,
            rank,
            face_up: false,
        }
    }

    /// Returns this card turned face up.
    #[must_use]
    pub const fn revealed(mut self) -> Self {
        self.face_up = true;
        self
    }

    /// Returns the rank symbol, or `None` for an out-of-range rank.
    #[must_use]
    pub fn rank_symbol(&self) -> Option<&'static str> {
        RANKS.get(usize::from(self.rank).checked_sub(1)?).copied()
    }

    /// Parses a rank symbol into its numeric rank.
    #[must_use]
    pub fn rank_from_symbol(symbol: &str) -> Option<u8> {
        RANKS
            .iter()
            .position(|&s| s == symbol)
            .map(|index| index as u8 + 1)
    }

    /// Returns whether `self` may sit directly on `below` by rank alone.
    #[must_use]
    pub const fn follows(&self, below: &Self) -> bool {
        below.rank == self.rank + 1
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank_symbol() {
            Some(rank) => write!(f, "{rank}{}", self.suit),
            None => write!(f, "?{}", self.suit),
        }
    }
}
