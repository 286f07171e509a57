//! Deck construction, shuffling and the initial deal layout.

use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, KING};
use crate::error::DifficultyError;
use crate::options::Difficulty;
use crate::tableau::TABLEAU_COLUMNS;

/// Number of physical decks combined into a Spider deck.
pub const PHYSICAL_DECKS: usize = 2;

/// Size of the four-suit deck.
pub const FULL_DECK_SIZE: usize = 104;

/// Number of stock draws available with the four-suit deck.
const FULL_STOCK_DRAWS: usize = 5;

/// A Spider deck for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds an unshuffled deck for the given suit count.
    ///
    /// # Errors
    ///
    /// Returns an error if `suits` is not 1, 2 or 4.
    ///
    /// # Example
    ///
    /// ```
    /// use spider_engine::Deck;
    ///
    /// assert_eq!(Deck::build(2).unwrap().len(), 52);
    /// assert!(Deck::build(3).is_err());
    /// ```
    pub fn build(suits: u8) -> Result<Self, DifficultyError> {
        Ok(Self::for_difficulty(Difficulty::try_from(suits)?))
    }

    /// Builds an unshuffled deck for the given difficulty.
    ///
    /// Each physical deck contributes one A..K run per suit in play, all
    /// face down.
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let suits = difficulty.suits();
        let mut cards = Vec::with_capacity(PHYSICAL_DECKS * suits.len() * usize::from(KING));

        for _ in 0..PHYSICAL_DECKS {
            for &suit in suits {
                for rank in 1..=KING {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        Self { cards }
    }

    /// Shuffles the deck in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Returns the number of cards in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the cards in dealing order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Consumes the deck, returning its cards in dealing order.
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

/// How a deck of a given size is split between tableau and stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealLayout {
    /// Cards dealt to each column.
    pub columns: [usize; TABLEAU_COLUMNS],
    /// Cards left in the stock.
    pub stock: usize,
}

impl DealLayout {
    /// Computes the layout for a deck of `deck_len` cards.
    ///
    /// The four-suit deck deals 6 cards to the first four columns and 5 to
    /// the rest, leaving 50 cards for five draws. Smaller decks keep
    /// proportionally fewer draws in the stock and deal the remainder
    /// round-robin, so the stock always holds whole draws.
    ///
    /// ```
    /// use spider_engine::DealLayout;
    ///
    /// let layout = DealLayout::for_deck(104);
    /// assert_eq!(layout.columns, [6, 6, 6, 6, 5, 5, 5, 5, 5, 5]);
    /// assert_eq!(layout.stock, 50);
    /// ```
    #[must_use]
    pub fn for_deck(deck_len: usize) -> Self {
        let draws = if deck_len < 2 * TABLEAU_COLUMNS {
            0
        } else {
            (FULL_STOCK_DRAWS * deck_len / FULL_DECK_SIZE).max(1)
        };
        let stock = draws * TABLEAU_COLUMNS;
        let dealt = deck_len - stock;

        let mut columns = [dealt / TABLEAU_COLUMNS; TABLEAU_COLUMNS];
        for count in columns.iter_mut().take(dealt % TABLEAU_COLUMNS) {
            *count += 1;
        }

        Self { columns, stock }
    }

    /// Returns the number of cards dealt to the tableau.
    #[must_use]
    pub fn dealt(&self) -> usize {
        self.columns.iter().sum()
    }
}
