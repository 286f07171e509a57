//! A Spider Solitaire rule engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that owns the ten tableau columns and
//! the stock, validates and applies moves, tracks score, moves and elapsed
//! time, detects completed K→A sequences and the win condition, and exposes a
//! versioned [`GameState`] for saving and restoring a game in progress.
//! Rendering, animation and input handling are left to the caller.
//!
//! # Example
//!
//! ```
//! use spider_engine::{Game, GameConfig, Difficulty};
//!
//! let game = Game::new(7);
//! let config = GameConfig::default().with_difficulty(Difficulty::Hard);
//! let state = game.new_game(config, Some(42));
//! assert_eq!(state.stock_count, 50);
//! assert_eq!(game.score(), 500);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod challenge;
pub mod deck;
pub mod error;
pub mod game;
pub mod options;
pub mod persist;
pub mod stats;
pub mod tableau;
mod sync;

// Re-export main types
pub use card::{Card, RANKS, Suit};
pub use challenge::{ChallengeRecord, DailyChallenge};
pub use deck::{DealLayout, Deck};
pub use error::{
    DifficultyError, DrawError, MoveError, NewGameError, RestoreError, UndoError,
};
pub use game::{CompletedSequence, Game, MoveOutcome, Phase, TABLEAU_COLUMNS};
pub use options::{AcceptPolicy, Difficulty, GameConfig};
pub use persist::{CardRecord, GameState, STATE_VERSION};
pub use stats::Statistics;
pub use tableau::{COMPLETE_RUN_LEN, Column, is_valid_run};
