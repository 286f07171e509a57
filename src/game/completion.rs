use alloc::vec::Vec;

use log::debug;

use super::{CompletedSequence, Game, Phase, Table};

/// Largest possible time bonus, reduced by one point per elapsed second.
const TIME_BONUS: i64 = 1000;

/// Largest possible move bonus, reduced by two points per move.
const MOVE_BONUS: i64 = 500;

/// Win bonus for the given elapsed seconds and move count.
fn win_bonus(elapsed: f64, moves: u32) -> i64 {
    let time_bonus = (TIME_BONUS - elapsed as i64).max(0);
    let move_bonus = (MOVE_BONUS - 2 * i64::from(moves)).max(0);
    time_bonus + move_bonus
}

impl Game {
    /// Removes every completed K→A sequence from the tableau.
    ///
    /// Columns are rescanned until none yields a sequence. Each sequence
    /// adds the configured sequence points; afterwards the win condition is
    /// checked.
    pub fn check_completions(&self) -> Vec<CompletedSequence> {
        let mut table = self.table.lock();
        let completed = self.collect_completions(&mut table);
        self.settle_win(&mut table);
        completed
    }

    /// Returns whether the game is won, finishing it if every sequence has
    /// just been completed.
    ///
    /// The first successful check computes the final score: the current
    /// score plus `max(0, 1000 - seconds) + max(0, 500 - 2 * moves)`.
    /// Later calls return `true` without changing anything.
    pub fn check_win(&self) -> bool {
        let mut table = self.table.lock();
        self.settle_win(&mut table)
    }

    pub(super) fn collect_completions(&self, table: &mut Table) -> Vec<CompletedSequence> {
        let mut completed = Vec::new();

        loop {
            let before = completed.len();
            for (index, column) in table.columns.iter_mut().enumerate() {
                while let Some(cards) = column.extract_completed_sequence() {
                    let suit = cards[0].suit;
                    completed.push(CompletedSequence {
                        column: index,
                        suit,
                        cards,
                    });
                }
            }
            if completed.len() == before {
                break;
            }
        }

        if !completed.is_empty() {
            table.completed += completed.len();
            let count = i64::try_from(completed.len()).unwrap_or(i64::MAX);
            let points = table.config.sequence_points.saturating_mul(count);
            table.score = table.score.saturating_add(points);
            // Completed sequences leave play for good.
            table.history.clear();
            debug!(
                "completed {} sequence(s), {} of {}",
                completed.len(),
                table.completed,
                table.sets_to_win
            );
        }

        completed
    }

    pub(crate) fn settle_win(&self, table: &mut Table) -> bool {
        let mut state = self.state.lock();
        if *state == Phase::Won {
            return true;
        }
        if table.sets_to_win == 0 || table.completed < table.sets_to_win {
            return false;
        }

        let bonus = win_bonus(table.elapsed, table.moves);
        let final_score = table.score.saturating_add(bonus);
        table.final_score = Some(final_score);
        *state = Phase::Won;
        drop(state);

        debug!(
            "game won in {} moves, final score {}",
            table.moves,
            final_score
        );
        true
    }
}
