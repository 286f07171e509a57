//! Tableau columns and run validation.

use alloc::vec::Vec;

use crate::card::{ACE, Card, KING};
use crate::options::AcceptPolicy;

/// Number of tableau columns.
pub const TABLEAU_COLUMNS: usize = 10;

/// Number of cards in a completed K→A sequence.
pub const COMPLETE_RUN_LEN: usize = 13;

/// Returns whether `cards` form a run that can be moved as one unit.
///
/// Empty and single-card slices are always valid. Longer runs must be face
/// up, of one suit, and descend by exactly one rank per card.
///
/// ```
/// use spider_engine::{Card, Suit, is_valid_run};
///
/// let king = Card::new(Suit::Spades, 13).revealed();
/// let queen = Card::new(Suit::Spades, 12).revealed();
/// assert!(is_valid_run(&[king, queen]));
/// assert!(!is_valid_run(&[queen, king]));
/// ```
#[must_use]
pub fn is_valid_run(cards: &[Card]) -> bool {
    if cards.len() < 2 {
        return true;
    }

    cards.windows(2).all(|pair| {
        let (upper, lower) = (pair[0], pair[1]);
        upper.face_up && lower.face_up && upper.suit == lower.suit && lower.follows(&upper)
    })
}

/// Returns whether `cards` is exactly one completed K→A sequence.
fn is_completed_sequence(cards: &[Card]) -> bool {
    cards.len() == COMPLETE_RUN_LEN
        && cards.first().is_some_and(|c| c.rank == KING && c.face_up)
        && cards.last().is_some_and(|c| c.rank == ACE)
        && is_valid_run(cards)
}

/// One tableau column.
///
/// Index 0 is the bottom card (dealt first); the last card is the top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Column {
    cards: Vec<Card>,
}

impl Column {
    /// Creates an empty column.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Creates a column from cards, bottom first.
    #[must_use]
    pub const fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Returns the cards in the column, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the top card.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Deals a card onto the column.
    pub fn deal(&mut self, mut card: Card, face_up: bool) {
        card.face_up = face_up;
        self.cards.push(card);
    }

    /// Appends a run that has already been validated.
    pub fn accept(&mut self, run: impl IntoIterator<Item = Card>) {
        self.cards.extend(run);
    }

    /// Removes and returns the top `len` cards, bottom first.
    ///
    /// Removes the whole column if `len` exceeds its length.
    pub fn remove_top_run(&mut self, len: usize) -> Vec<Card> {
        let start = self.cards.len().saturating_sub(len);
        self.cards.split_off(start)
    }

    /// Turns the top card face up. Returns whether it was face down.
    pub fn reveal_top(&mut self) -> bool {
        match self.cards.last_mut() {
            Some(card) if !card.face_up => {
                card.face_up = true;
                true
            }
            _ => false,
        }
    }

    /// Turns the top card face down.
    pub fn hide_top(&mut self) {
        if let Some(card) = self.cards.last_mut() {
            card.face_up = false;
        }
    }

    /// Returns the run a player may pick up starting at `index`.
    ///
    /// The card at `index` must be face up and every card from it to the top
    /// must form a valid run. The top card on its own is always movable once
    /// face up.
    #[must_use]
    pub fn movable_run(&self, index: usize) -> Option<&[Card]> {
        let run = self.cards.get(index..)?;
        let first = run.first()?;

        (first.face_up && is_valid_run(run)).then_some(run)
    }

    /// Returns whether `run` may be placed on this column.
    ///
    /// An empty column accepts any run. Otherwise the top card must be face
    /// up and exactly one rank above the first card of `run`; under
    /// [`AcceptPolicy::SameSuit`] the suits must also match.
    #[must_use]
    pub fn can_accept(&self, run: &[Card], policy: AcceptPolicy) -> bool {
        let Some(first) = run.first() else {
            return false;
        };
        let Some(top) = self.top() else {
            return true;
        };

        if !top.face_up || !first.follows(top) {
            return false;
        }

        match policy {
            AcceptPolicy::RankOnly => true,
            AcceptPolicy::SameSuit => first.suit == top.suit,
        }
    }

    /// Finds, removes and returns a completed K→A sequence.
    ///
    /// Every starting position is checked, not only the top thirteen cards.
    /// After removal the new top card is turned face up.
    pub fn extract_completed_sequence(&mut self) -> Option<Vec<Card>> {
        let last_start = self.cards.len().checked_sub(COMPLETE_RUN_LEN)?;
        let start = (0..=last_start)
            .find(|&start| is_completed_sequence(&self.cards[start..start + COMPLETE_RUN_LEN]))?;

        let sequence: Vec<Card> = self
            .cards
            .drain(start..start + COMPLETE_RUN_LEN)
            .collect();
        self.reveal_top();
        Some(sequence)
    }

    /// Returns the number of face-down cards.
    #[must_use]
    pub fn face_down_count(&self) -> usize {
        self.cards.iter().filter(|card| !card.face_up).count()
    }
}
