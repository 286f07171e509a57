//! Game engine and state management.

use alloc::vec::Vec;

use log::debug;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::sync::Mutex;

use crate::card::Card;
use crate::challenge::DailyChallenge;
use crate::deck::{DealLayout, Deck};
use crate::error::NewGameError;
use crate::options::GameConfig;
use crate::persist::GameState;
use crate::tableau::{COMPLETE_RUN_LEN, Column};

mod actions;
mod completion;
mod stock;
pub mod state;

pub(crate) use state::MoveRecord;
pub use state::{CompletedSequence, MoveOutcome, Phase};
pub use crate::tableau::TABLEAU_COLUMNS;

/// Everything that changes while a game is played.
///
/// Kept behind a single lock so every operation is applied atomically.
#[derive(Debug, Clone)]
pub(crate) struct Table {
    pub config: GameConfig,
    pub columns: [Column; TABLEAU_COLUMNS],
    pub stock: Vec<Card>,
    pub score: i64,
    pub moves: u32,
    pub elapsed: f64,
    pub completed: usize,
    pub sets_to_win: usize,
    pub final_score: Option<i64>,
    pub history: Vec<MoveRecord>,
    pub seed: Option<u64>,
    pub is_challenge: bool,
}

impl Table {
    fn empty(config: GameConfig) -> Self {
        Self {
            config,
            columns: core::array::from_fn(|_| Column::new()),
            stock: Vec::new(),
            score: config.starting_score,
            moves: 0,
            elapsed: 0.0,
            completed: 0,
            sets_to_win: 0,
            final_score: None,
            history: Vec::new(),
            seed: None,
            is_challenge: false,
        }
    }
}

/// A Spider Solitaire engine that owns the tableau, the stock and scoring.
///
/// All methods take `&self`; an `Arc<Game>` can be shared between the input
/// path and a timer calling [`Game::tick`].
pub struct Game {
    /// Current game phase.
    pub(crate) state: Mutex<Phase>,
    /// Columns, stock, score and history.
    pub(crate) table: Mutex<Table>,
    /// Source of seeds for games started without one.
    pub(crate) rng: Mutex<ChaCha8Rng>,
}

impl Game {
    /// Creates an idle engine with the given seed.
    ///
    /// The seed only drives games started without a seed of their own.
    ///
    /// # Example
    ///
    /// ```
    /// use spider_engine::{Game, Phase};
    ///
    /// let game = Game::new(42);
    /// assert_eq!(game.phase(), Phase::Idle);
    /// ```
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: Mutex::new(Phase::Idle),
            table: Mutex::new(Table::empty(GameConfig::default())),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Starts a new game, discarding the current one.
    ///
    /// With `Some(seed)` the deal is fully determined by the seed and the
    /// difficulty. Returns a snapshot of the fresh game.
    pub fn new_game(&self, config: GameConfig, seed: Option<u64>) -> GameState {
        self.deal(config, seed, false)
    }

    /// Starts a new game with a difficulty given as a suit count.
    ///
    /// # Errors
    ///
    /// Returns an error if `suits` is not 1, 2 or 4.
    pub fn new_game_with_suits(
        &self,
        suits: u8,
        seed: Option<u64>,
    ) -> Result<GameState, NewGameError> {
        let config = GameConfig::default().with_suits(suits)?;
        Ok(self.new_game(config, seed))
    }

    /// Starts the given daily challenge.
    ///
    /// The challenge's difficulty overrides the one in `config`.
    pub fn start_challenge(&self, challenge: &DailyChallenge, config: GameConfig) -> GameState {
        let config = config.with_difficulty(challenge.difficulty);
        self.deal(config, Some(challenge.seed), true)
    }

    fn deal(&self, config: GameConfig, seed: Option<u64>, is_challenge: bool) -> GameState {
        *self.state.lock() = Phase::Dealing;

        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(self.rng.lock().next_u64()),
        };

        let mut deck = Deck::for_difficulty(config.difficulty);
        deck.shuffle(&mut rng);

        let layout = DealLayout::for_deck(deck.len());
        let mut table = Table::empty(config);
        table.sets_to_win = deck.len() / COMPLETE_RUN_LEN;
        table.seed = seed;
        table.is_challenge = is_challenge;

        // Round-robin: one row at a time across all columns.
        let mut cards = deck.into_cards().into_iter();
        let rows = layout.columns.iter().copied().max().unwrap_or(0);
        for row in 0..rows {
            for (column, &count) in table.columns.iter_mut().zip(&layout.columns) {
                if row >= count {
                    continue;
                }
                let Some(card) = cards.next() else {
                    break;
                };
                column.deal(card, row + 1 == count);
            }
        }
        table.stock = cards.collect();

        debug!(
            "new game: {:?}, seed {:?}, {} dealt, {} in stock",
            config.difficulty,
            seed,
            layout.dealt(),
            table.stock.len()
        );

        let snapshot = GameState::capture(&table);
        *self.table.lock() = table;
        *self.state.lock() = Phase::Playing;
        snapshot
    }

    /// Advances the game clock.
    ///
    /// Time only runs while the game is being played; non-finite and
    /// negative values are ignored.
    pub fn tick(&self, seconds: f64) {
        if *self.state.lock() != Phase::Playing || !seconds.is_finite() || seconds <= 0.0 {
            return;
        }
        self.table.lock().elapsed += seconds;
    }

    /// Returns the current game phase.
    pub fn phase(&self) -> Phase {
        *self.state.lock()
    }

    /// Returns whether the game has been won.
    pub fn is_won(&self) -> bool {
        self.phase() == Phase::Won
    }

    /// Returns the current score.
    pub fn score(&self) -> i64 {
        self.table.lock().score
    }

    /// Returns the score including the win bonus, once the game is won.
    pub fn final_score(&self) -> Option<i64> {
        self.table.lock().final_score
    }

    /// Returns the number of moves and draws made.
    pub fn moves(&self) -> u32 {
        self.table.lock().moves
    }

    /// Returns the elapsed play time in seconds.
    pub fn elapsed(&self) -> f64 {
        self.table.lock().elapsed
    }

    /// Returns the number of completed sequences.
    pub fn completed_sets(&self) -> usize {
        self.table.lock().completed
    }

    /// Returns the number of cards left in the stock.
    pub fn stock_count(&self) -> usize {
        self.table.lock().stock.len()
    }

    /// Returns the configuration of the current game.
    pub fn config(&self) -> GameConfig {
        self.table.lock().config
    }

    /// Returns a copy of all tableau columns.
    pub fn columns(&self) -> Vec<Column> {
        self.table.lock().columns.to_vec()
    }

    /// Returns a copy of one tableau column.
    pub fn column(&self, index: usize) -> Option<Column> {
        self.table.lock().columns.get(index).cloned()
    }

    /// Returns the run that could be picked up at `index` in `column`.
    pub fn column_run(&self, column: usize, index: usize) -> Option<Vec<Card>> {
        self.table
            .lock()
            .columns
            .get(column)?
            .movable_run(index)
            .map(<[Card]>::to_vec)
    }

    /// Returns whether `column` would accept `run` under the current rules.
    pub fn can_accept(&self, column: usize, run: &[Card]) -> bool {
        let table = self.table.lock();
        let policy = table.config.accept_policy();
        table
            .columns
            .get(column)
            .is_some_and(|col| col.can_accept(run, policy))
    }

    /// Returns whether there is a move to undo.
    pub fn can_undo(&self) -> bool {
        !self.table.lock().history.is_empty()
    }
}
