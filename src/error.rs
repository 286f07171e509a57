//! Error types for game operations.

use thiserror::Error;

/// Errors that can occur when selecting a difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DifficultyError {
    /// Suit count is not 1, 2 or 4.
    #[error("difficulty must be 1, 2 or 4 suits")]
    InvalidDifficulty,
}

/// Errors that can occur when starting a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NewGameError {
    /// Suit count is not 1, 2 or 4.
    #[error("difficulty must be 1, 2 or 4 suits")]
    InvalidDifficulty,
}

impl From<DifficultyError> for NewGameError {
    fn from(err: DifficultyError) -> Self {
        match err {
            DifficultyError::InvalidDifficulty => Self::InvalidDifficulty,
        }
    }
}

/// Errors that can occur when drawing from the stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawError {
    /// Not enough cards left in the stock for a full draw.
    #[error("no cards left in the stock")]
    EmptyStock,
    /// A tableau column is empty.
    #[error("cannot draw while a column is empty")]
    BlockedColumn,
}

/// Errors that can occur when moving cards between columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The selected card does not start a movable run.
    #[error("selected cards cannot be moved")]
    NotMovable,
    /// The destination column does not accept the run.
    #[error("destination column does not accept these cards")]
    IllegalDestination,
}

/// Errors that can occur when undoing a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UndoError {
    /// There is no move to undo.
    #[error("no move to undo")]
    NoHistory,
}

/// Errors that can occur when restoring a saved game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RestoreError {
    /// Saved suit count is not 1, 2 or 4.
    #[error("difficulty must be 1, 2 or 4 suits")]
    InvalidDifficulty,
    /// The saved state failed structural validation.
    #[error("corrupt saved state: {0}")]
    CorruptState(&'static str),
}

impl From<DifficultyError> for RestoreError {
    fn from(err: DifficultyError) -> Self {
        match err {
            DifficultyError::InvalidDifficulty => Self::InvalidDifficulty,
        }
    }
}
