use log::trace;

use crate::error::{MoveError, UndoError};

use super::{Game, MoveOutcome, MoveRecord};

impl Game {
    /// Moves the run starting at `card_index` in column `from` onto column `to`.
    ///
    /// On success the move is recorded for [`Game::undo`], the score gains
    /// the configured move points, and completed sequences are collected.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NotMovable`] if `from` or `card_index` is out of
    /// range or the cards from `card_index` up do not form a movable run, and
    /// [`MoveError::IllegalDestination`] if `to` is out of range, equal to
    /// `from`, or does not accept the run.
    pub fn move_run(
        &self,
        from: usize,
        card_index: usize,
        to: usize,
    ) -> Result<MoveOutcome, MoveError> {
        let mut table = self.table.lock();
        let policy = table.config.accept_policy();

        let run = table
            .columns
            .get(from)
            .and_then(|column| column.movable_run(card_index))
            .ok_or(MoveError::NotMovable)?;

        if to == from {
            return Err(MoveError::IllegalDestination);
        }
        let destination = table
            .columns
            .get(to)
            .ok_or(MoveError::IllegalDestination)?;
        if !destination.can_accept(run, policy) {
            return Err(MoveError::IllegalDestination);
        }

        let count = run.len();
        let cards = table.columns[from].remove_top_run(count);
        let revealed = table.columns[from].reveal_top();
        table.columns[to].accept(cards);

        let points = table.config.move_points;
        table.moves = table.moves.saturating_add(1);
        table.score = table.score.saturating_add(points);
        table.history.push(MoveRecord {
            from,
            to,
            count,
            revealed,
        });
        trace!("moved {count} card(s) from column {from} to column {to}");

        let completed = self.collect_completions(&mut table);
        let won = self.settle_win(&mut table);
        drop(table);

        Ok(MoveOutcome {
            moved: count,
            revealed,
            completed,
            won,
        })
    }

    /// Reverts the most recent move.
    ///
    /// The moved cards return to their source column, a card revealed by the
    /// move is turned face down again, the move counter is decremented and
    /// the move points are taken back. Draws and completed sequences cannot
    /// be undone and clear the history.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no move to undo.
    pub fn undo(&self) -> Result<(), UndoError> {
        let mut table = self.table.lock();
        let record = table.history.pop().ok_or(UndoError::NoHistory)?;

        let cards = table.columns[record.to].remove_top_run(record.count);
        if record.revealed {
            table.columns[record.from].hide_top();
        }
        table.columns[record.from].accept(cards);

        let points = table.config.move_points;
        table.moves = table.moves.saturating_sub(1);
        table.score = table.score.saturating_sub(points);
        trace!(
            "undid move of {} card(s) from column {} to column {}",
            record.count, record.from, record.to
        );

        Ok(())
    }
}
