use alloc::vec::Vec;

use log::debug;

use crate::error::DrawError;

use super::{CompletedSequence, Game, TABLEAU_COLUMNS};

impl Game {
    /// Deals one face-up card from the stock onto every column.
    ///
    /// Counts as a move and costs the configured draw penalty. Draws cannot
    /// be undone, so the undo history is cleared. Returns any sequences the
    /// new cards completed.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::EmptyStock`] if the stock cannot cover a full
    /// draw, and [`DrawError::BlockedColumn`] if any column is empty.
    pub fn draw_from_stock(&self) -> Result<Vec<CompletedSequence>, DrawError> {
        let mut table = self.table.lock();

        if table.stock.len() < TABLEAU_COLUMNS {
            return Err(DrawError::EmptyStock);
        }
        if table.columns.iter().any(|column| column.is_empty()) {
            return Err(DrawError::BlockedColumn);
        }

        let start = table.stock.len() - TABLEAU_COLUMNS;
        let drawn = table.stock.split_off(start);
        // Cards come off the top of the stock, last card first.
        for (column, card) in table.columns.iter_mut().zip(drawn.into_iter().rev()) {
            column.deal(card, true);
        }

        let penalty = table.config.draw_penalty;
        table.moves = table.moves.saturating_add(1);
        table.score = table.score.saturating_sub(penalty);
        table.history.clear();
        debug!("drew from stock, {} cards left", table.stock.len());

        let completed = self.collect_completions(&mut table);
        self.settle_win(&mut table);
        Ok(completed)
    }

    /// Returns whether a draw from the stock is currently allowed.
    pub fn can_draw(&self) -> bool {
        let table = self.table.lock();
        table.stock.len() >= TABLEAU_COLUMNS && table.columns.iter().all(|c| !c.is_empty())
    }
}
