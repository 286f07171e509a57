//! Game state types.

use alloc::vec::Vec;

use crate::card::{Card, Suit};

/// Game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game has been dealt yet.
    Idle,
    /// Building and dealing a new deck.
    Dealing,
    /// Accepting moves, draws and undos.
    Playing,
    /// Every sequence has been completed.
    Won,
}

/// A move kept for undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MoveRecord {
    /// Source column.
    pub from: usize,
    /// Destination column.
    pub to: usize,
    /// Number of cards moved.
    pub count: usize,
    /// Whether the move turned the new source top face up.
    pub revealed: bool,
}

/// A K→A sequence removed from the tableau.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSequence {
    /// Column the sequence was removed from.
    pub column: usize,
    /// Suit of the sequence.
    pub suit: Suit,
    /// The removed cards, king first.
    pub cards: Vec<Card>,
}

/// Result of a successful move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Number of cards moved.
    pub moved: usize,
    /// Whether a face-down card was turned up on the source column.
    pub revealed: bool,
    /// Sequences completed as a result of the move.
    pub completed: Vec<CompletedSequence>,
    /// Whether the move won the game.
    pub won: bool,
}
