//! Saved game state.
//!
//! [`GameState`] is the versioned document a caller stores between
//! sessions. [`Game::snapshot`] produces one and [`Game::restore`] validates
//! one before replacing the running game; the engine performs no I/O itself.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use log::{debug, warn};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::card::{Card, KING, RANKS, Suit};
use crate::deck::{Deck, PHYSICAL_DECKS};
use crate::error::RestoreError;
use crate::game::{Game, Phase, TABLEAU_COLUMNS, Table};
use crate::options::Difficulty;
use crate::tableau::{COMPLETE_RUN_LEN, Column};

/// Current [`GameState`] layout version.
///
/// Version 1 documents carry only the stock size; version 2 adds the stock
/// cards themselves.
pub const STATE_VERSION: u32 = 2;

const fn legacy_version() -> u32 {
    1
}

/// One saved card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    /// Rank symbol (`A`, `2`..`10`, `J`, `Q`, `K`).
    pub rank: String,
    /// Suit symbol (`♠`, `♥`, `♦`, `♣`).
    pub suit: String,
    /// Whether the card is face up.
    pub face_up: bool,
}

impl CardRecord {
    /// Records a card.
    #[must_use]
    pub fn from_card(card: &Card) -> Self {
        Self {
            rank: card.rank_symbol().unwrap_or("?").to_string(),
            suit: card.suit.symbol().to_string(),
            face_up: card.face_up,
        }
    }

    /// Parses the record back into a card.
    ///
    /// # Errors
    ///
    /// Returns an error if the rank or suit symbol is unknown.
    pub fn to_card(&self) -> Result<Card, RestoreError> {
        let rank = Card::rank_from_symbol(&self.rank)
            .ok_or(RestoreError::CorruptState("unknown rank symbol"))?;
        let suit = Suit::from_symbol(&self.suit)
            .ok_or(RestoreError::CorruptState("unknown suit symbol"))?;
        Ok(Card {
            suit,
            rank,
            face_up: self.face_up,
        })
    }
}

/// A saved game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Layout version of this document.
    #[serde(default = "legacy_version")]
    pub version: u32,
    /// Score before any win bonus.
    pub score: i64,
    /// Moves and draws made.
    pub moves: u32,
    /// Elapsed play time in seconds.
    pub elapsed_time: f64,
    /// Number of suits in play (1, 2 or 4).
    pub difficulty: u8,
    /// Completed K→A sequences.
    pub completed_set_count: usize,
    /// Cards left in the stock.
    pub stock_count: usize,
    /// Stock cards, bottom first. Empty in version 1 documents.
    #[serde(default)]
    pub stock: Vec<CardRecord>,
    /// Seed the game was dealt from, if any.
    pub seed: Option<u64>,
    /// Whether the game is a daily challenge.
    pub is_challenge: bool,
    /// Tableau columns, each bottom first.
    pub columns: Vec<Vec<CardRecord>>,
}

impl GameState {
    pub(crate) fn capture(table: &Table) -> Self {
        let records = |cards: &[Card]| -> Vec<CardRecord> {
            cards.iter().map(CardRecord::from_card).collect()
        };

        Self {
            version: STATE_VERSION,
            score: table.score,
            moves: table.moves,
            elapsed_time: table.elapsed,
            difficulty: table.config.difficulty.suit_count(),
            completed_set_count: table.completed,
            stock_count: table.stock.len(),
            stock: records(&table.stock),
            seed: table.seed,
            is_challenge: table.is_challenge,
            columns: table
                .columns
                .iter()
                .map(|column| records(column.cards()))
                .collect(),
        }
    }

    /// Serializes the state as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a state from JSON.
    ///
    /// Only the document shape is checked here; [`Game::restore`] validates
    /// the contents.
    ///
    /// # Errors
    ///
    /// Returns [`RestoreError::CorruptState`] if the document cannot be
    /// parsed.
    pub fn from_json(json: &str) -> Result<Self, RestoreError> {
        serde_json::from_str(json).map_err(|err| {
            warn!("rejected saved game: {err}");
            RestoreError::CorruptState("malformed document")
        })
    }
}

fn parse_cards(records: &[CardRecord], difficulty: Difficulty) -> Result<Vec<Card>, RestoreError> {
    records
        .iter()
        .map(|record| {
            let card = record.to_card()?;
            if difficulty.suits().contains(&card.suit) {
                Ok(card)
            } else {
                Err(RestoreError::CorruptState("suit not in play"))
            }
        })
        .collect()
}

/// Copies of each card, indexed by suit and `rank - 1`.
type CardCounts = [[usize; RANKS.len()]; 4];

fn full_deck_counts(difficulty: Difficulty) -> CardCounts {
    let mut counts = [[0; RANKS.len()]; 4];
    for suit in difficulty.suits() {
        counts[suit.index()] = [PHYSICAL_DECKS; RANKS.len()];
    }
    counts
}

fn take_cards<'a>(
    unseen: &mut CardCounts,
    cards: impl IntoIterator<Item = &'a Card>,
) -> Result<(), RestoreError> {
    for card in cards {
        let count = &mut unseen[card.suit.index()][usize::from(card.rank - 1)];
        *count = count
            .checked_sub(1)
            .ok_or(RestoreError::CorruptState("too many copies of a card"))?;
    }
    Ok(())
}

/// Removes one full suit of cards per completed sequence.
fn take_completed_sets(unseen: &mut CardCounts, completed: usize) -> Result<(), RestoreError> {
    for _ in 0..completed {
        let ranks = unseen
            .iter_mut()
            .find(|ranks| ranks.iter().all(|&count| count > 0))
            .ok_or(RestoreError::CorruptState("completed sets do not match the cards"))?;
        for count in ranks {
            *count -= 1;
        }
    }
    Ok(())
}

/// Face-down cards may only sit below the face-up ones, and a non-empty
/// column always shows its top card.
fn check_faces(cards: &[Card]) -> Result<(), RestoreError> {
    if cards.last().is_some_and(|card| !card.face_up) {
        return Err(RestoreError::CorruptState("face-down top card"));
    }
    if cards.windows(2).any(|pair| pair[0].face_up && !pair[1].face_up) {
        return Err(RestoreError::CorruptState("face-down card above a face-up card"));
    }
    Ok(())
}

impl Game {
    /// Captures the current game.
    ///
    /// The snapshot is a plain value; serializing it does not touch the
    /// engine.
    pub fn snapshot(&self) -> GameState {
        GameState::capture(&self.table.lock())
    }

    /// Replaces the current game with a saved one.
    ///
    /// Scoring options and the medium suit rule are kept from the current
    /// configuration; the difficulty comes from the saved state. The undo
    /// history starts empty. Version 1 documents have no stock cards, so
    /// the stock is refilled in random order with the cards missing from
    /// the tableau and the completed sequences.
    ///
    /// # Errors
    ///
    /// Returns [`RestoreError::InvalidDifficulty`] for an unknown suit count
    /// and [`RestoreError::CorruptState`] if the version is unsupported,
    /// there are not exactly ten columns, a card is invalid, a column shows
    /// a face-down card above a face-up one or on top, or the cards do not
    /// add up to the deck for the difficulty. The current game
    /// is left untouched on error.
    pub fn restore(&self, state: &GameState) -> Result<(), RestoreError> {
        let table = self.validate(state).inspect_err(|err| {
            warn!("rejected saved game: {err}");
        })?;

        debug!(
            "restored game: {:?}, {} completed, {} in stock",
            table.config.difficulty,
            table.completed,
            table.stock.len()
        );

        let mut current = self.table.lock();
        *current = table;
        *self.state.lock() = Phase::Playing;
        self.settle_win(&mut current);
        Ok(())
    }

    fn validate(&self, state: &GameState) -> Result<Table, RestoreError> {
        if state.version == 0 || state.version > STATE_VERSION {
            return Err(RestoreError::CorruptState("unsupported version"));
        }

        let difficulty = Difficulty::try_from(state.difficulty)?;

        if state.columns.len() != TABLEAU_COLUMNS {
            return Err(RestoreError::CorruptState("expected ten columns"));
        }
        if !state.elapsed_time.is_finite() || state.elapsed_time < 0.0 {
            return Err(RestoreError::CorruptState("invalid elapsed time"));
        }

        let mut columns: [Column; TABLEAU_COLUMNS] = core::array::from_fn(|_| Column::new());
        for (column, records) in columns.iter_mut().zip(&state.columns) {
            let cards = parse_cards(records, difficulty)?;
            check_faces(&cards)?;
            *column = Column::from_cards(cards);
        }

        let deck_len = Deck::for_difficulty(difficulty).len();
        let sets_to_win = deck_len / COMPLETE_RUN_LEN;
        if state.completed_set_count > sets_to_win {
            return Err(RestoreError::CorruptState("too many completed sets"));
        }

        let tableau_len: usize = columns.iter().map(Column::len).sum();
        let stock_len = deck_len
            .checked_sub(tableau_len + state.completed_set_count * COMPLETE_RUN_LEN)
            .ok_or(RestoreError::CorruptState("card count mismatch"))?;
        if state.stock_count != stock_len {
            return Err(RestoreError::CorruptState("stock count mismatch"));
        }

        // Version 1 saved only the stock size.
        let legacy = state.version < STATE_VERSION && state.stock.is_empty();
        let mut stock = parse_cards(&state.stock, difficulty)?;
        if !legacy && stock.len() != stock_len {
            return Err(RestoreError::CorruptState("stock count mismatch"));
        }
        for card in &mut stock {
            card.face_up = false;
        }

        let mut unseen = full_deck_counts(difficulty);
        take_cards(&mut unseen, columns.iter().flat_map(Column::cards))?;
        take_cards(&mut unseen, &stock)?;
        take_completed_sets(&mut unseen, state.completed_set_count)?;
        if legacy {
            stock = self.refill_stock(&unseen);
        }

        let config = self.table.lock().config.with_difficulty(difficulty);
        Ok(Table {
            config,
            columns,
            stock,
            score: state.score,
            moves: state.moves,
            elapsed: state.elapsed_time,
            completed: state.completed_set_count,
            sets_to_win,
            final_score: None,
            history: Vec::new(),
            seed: state.seed,
            is_challenge: state.is_challenge,
        })
    }

    /// Shuffled face-down stock made of the cards not accounted for.
    fn refill_stock(&self, unseen: &CardCounts) -> Vec<Card> {
        let mut stock: Vec<Card> = Suit::ALL
            .into_iter()
            .zip(unseen)
            .flat_map(|(suit, ranks)| {
                (1..=KING).flat_map(move |rank| {
                    core::iter::repeat_n(Card::new(suit, rank), ranks[usize::from(rank - 1)])
                })
            })
            .collect();
        stock.shuffle(&mut *self.rng.lock());
        stock
    }
}
