//! Game integration tests.

use spider_engine::{
    COMPLETE_RUN_LEN, Card, CardRecord, Column, DailyChallenge, Deck, Difficulty, DrawError, Game,
    GameConfig, GameState, MoveError, NewGameError, Phase, RestoreError, STATE_VERSION, Suit,
    TABLEAU_COLUMNS, UndoError,
};

fn up(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank).revealed()
}

fn down(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

/// Spades from `high` down to `low`, all face up.
fn spade_run(high: u8, low: u8) -> Vec<Card> {
    (low..=high).rev().map(|rank| up(Suit::Spades, rank)).collect()
}

fn take(cards: &mut Vec<Card>, suit: Suit, rank: u8) {
    let index = cards
        .iter()
        .position(|card| card.suit == suit && card.rank == rank)
        .unwrap();
    cards.swap_remove(index);
}

/// A saved game with the given columns. `completed` full suits are set
/// aside and every remaining card of the deck goes to the stock.
fn rigged_state(difficulty: Difficulty, columns: Vec<Vec<Card>>, completed: usize) -> GameState {
    let mut columns = columns;
    columns.resize(TABLEAU_COLUMNS, Vec::new());

    let mut stock = Deck::for_difficulty(difficulty).into_cards();
    for card in columns.iter().flatten() {
        take(&mut stock, card.suit, card.rank);
    }
    for _ in 0..completed {
        let full_suit = |suit: Suit| {
            (1..=13).all(|rank| stock.iter().any(|c| c.suit == suit && c.rank == rank))
        };
        let suit = *difficulty.suits().iter().find(|&&suit| full_suit(suit)).unwrap();
        for rank in 1..=13 {
            take(&mut stock, suit, rank);
        }
    }
    let stock_len = stock.len();

    GameState {
        version: STATE_VERSION,
        score: 500,
        moves: 0,
        elapsed_time: 0.0,
        difficulty: difficulty.suit_count(),
        completed_set_count: completed,
        stock_count: stock_len,
        stock: stock.iter().map(CardRecord::from_card).collect(),
        seed: None,
        is_challenge: false,
        columns: columns
            .iter()
            .map(|column| column.iter().map(CardRecord::from_card).collect())
            .collect(),
    }
}

fn rigged_game(difficulty: Difficulty, columns: Vec<Vec<Card>>, completed: usize) -> Game {
    let game = Game::new(1);
    game.restore(&rigged_state(difficulty, columns, completed))
        .unwrap();
    game
}

/// Fills the remaining columns with a lone face-up ace or two that no
/// test card can be placed on.
fn with_aces(mut columns: Vec<Vec<Card>>) -> Vec<Vec<Card>> {
    const FILLERS: [(Suit, u8); TABLEAU_COLUMNS] = [
        (Suit::Diamonds, 1),
        (Suit::Diamonds, 1),
        (Suit::Clubs, 1),
        (Suit::Clubs, 1),
        (Suit::Hearts, 1),
        (Suit::Hearts, 1),
        (Suit::Diamonds, 2),
        (Suit::Diamonds, 2),
        (Suit::Clubs, 2),
        (Suit::Clubs, 2),
    ];
    while columns.len() < TABLEAU_COLUMNS {
        let (suit, rank) = FILLERS[columns.len()];
        columns.push(vec![up(suit, rank)]);
    }
    columns
}

fn hard() -> GameConfig {
    GameConfig::default().with_difficulty(Difficulty::Hard)
}

#[test]
fn new_game_deals_six_and_five() {
    let game = Game::new(3);
    let state = game.new_game(hard(), Some(42));

    let lens: Vec<usize> = game.columns().iter().map(|c| c.len()).collect();
    assert_eq!(lens, [6, 6, 6, 6, 5, 5, 5, 5, 5, 5]);
    assert_eq!(state.stock_count, 50);
    assert_eq!(lens.iter().sum::<usize>() + state.stock_count, 104);

    for column in game.columns() {
        let (top, rest) = column.cards().split_last().unwrap();
        assert!(top.face_up);
        assert!(rest.iter().all(|card| !card.face_up));
    }

    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.score(), 500);
    assert_eq!(game.moves(), 0);
    assert_eq!(game.completed_sets(), 0);
    assert!(!game.is_won());
}

#[test]
fn smaller_decks_deal_everything() {
    let game = Game::new(3);
    for suits in [1_u8, 2, 4] {
        let state = game.new_game_with_suits(suits, Some(9)).unwrap();
        let dealt: usize = state.columns.iter().map(Vec::len).sum();
        assert_eq!(dealt + state.stock_count, 26 * usize::from(suits));
        assert_eq!(state.stock_count % TABLEAU_COLUMNS, 0);
        assert!(state.columns.iter().all(|column| !column.is_empty()));
    }
}

#[test]
fn invalid_suit_count_is_rejected() {
    let game = Game::new(3);
    assert_eq!(
        game.new_game_with_suits(3, None).unwrap_err(),
        NewGameError::InvalidDifficulty
    );
    assert_eq!(game.phase(), Phase::Idle);
}

#[test]
fn seeded_games_are_reproducible() {
    let a = Game::new(1);
    let b = Game::new(2);
    let easy = GameConfig::default();

    a.new_game(easy, Some(42));
    b.new_game(easy, Some(42));
    assert_eq!(a.columns(), b.columns());
    assert_eq!(a.snapshot(), b.snapshot());

    a.new_game(hard(), Some(42));
    b.new_game(hard(), Some(43));
    assert_ne!(a.columns(), b.columns());
}

#[test]
fn move_scores_and_undo_restores() {
    let game = rigged_game(
        Difficulty::Hard,
        with_aces(vec![
            vec![up(Suit::Spades, 9)],
            vec![down(Suit::Hearts, 2), up(Suit::Spades, 8)],
        ]),
        0,
    );

    let outcome = game.move_run(1, 1, 0).unwrap();
    assert_eq!(outcome.moved, 1);
    assert!(outcome.revealed);
    assert!(outcome.completed.is_empty());
    assert!(!outcome.won);

    assert_eq!(game.score(), 505);
    assert_eq!(game.moves(), 1);
    assert_eq!(
        game.column(0).unwrap().cards(),
        &[up(Suit::Spades, 9), up(Suit::Spades, 8)]
    );
    assert_eq!(game.column(1).unwrap().cards(), &[up(Suit::Hearts, 2)]);

    game.undo().unwrap();
    assert_eq!(game.score(), 500);
    assert_eq!(game.moves(), 0);
    assert_eq!(game.column(0).unwrap().cards(), &[up(Suit::Spades, 9)]);
    assert_eq!(
        game.column(1).unwrap().cards(),
        &[down(Suit::Hearts, 2), up(Suit::Spades, 8)]
    );

    assert_eq!(game.undo().unwrap_err(), UndoError::NoHistory);
}

#[test]
fn moving_a_run_moves_every_card() {
    let mut source = vec![down(Suit::Clubs, 3)];
    source.extend(spade_run(10, 7));
    let game = rigged_game(
        Difficulty::Hard,
        with_aces(vec![vec![up(Suit::Spades, 11)], source]),
        0,
    );

    let outcome = game.move_run(1, 1, 0).unwrap();
    assert_eq!(outcome.moved, 4);
    assert_eq!(game.column(0).unwrap().cards(), spade_run(11, 7).as_slice());
    assert_eq!(game.column(1).unwrap().cards(), &[up(Suit::Clubs, 3)]);
}

#[test]
fn face_down_destination_rejects_at_every_difficulty() {
    let column = Column::from_cards(vec![down(Suit::Spades, 9)]);
    let run = [up(Suit::Spades, 8)];
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let policy = GameConfig::default()
            .with_difficulty(difficulty)
            .with_strict_medium(true)
            .accept_policy();
        assert!(!column.can_accept(&run, policy));
        let lenient = GameConfig::default().with_difficulty(difficulty).accept_policy();
        assert!(!column.can_accept(&run, lenient));
    }
}

#[test]
fn suit_rules_follow_difficulty() {
    let columns = with_aces(vec![vec![up(Suit::Spades, 9)], vec![up(Suit::Hearts, 8)]]);

    let hard_game = rigged_game(Difficulty::Hard, columns, 0);
    assert_eq!(
        hard_game.move_run(1, 0, 0).unwrap_err(),
        MoveError::IllegalDestination
    );

    let medium_columns = vec![vec![up(Suit::Spades, 9)], vec![up(Suit::Hearts, 8)]];
    let medium = rigged_game(Difficulty::Medium, medium_columns.clone(), 0);
    assert!(medium.move_run(1, 0, 0).is_ok());

    let strict = Game::new(1);
    strict.new_game(
        GameConfig::default()
            .with_difficulty(Difficulty::Medium)
            .with_strict_medium(true),
        Some(1),
    );
    strict
        .restore(&rigged_state(Difficulty::Medium, medium_columns, 0))
        .unwrap();
    assert_eq!(
        strict.move_run(1, 0, 0).unwrap_err(),
        MoveError::IllegalDestination
    );
}

#[test]
fn unmovable_selections_are_rejected() {
    let game = rigged_game(
        Difficulty::Hard,
        with_aces(vec![
            vec![down(Suit::Clubs, 4), up(Suit::Spades, 9), up(Suit::Hearts, 8)],
            vec![up(Suit::Hearts, 9)],
        ]),
        0,
    );
    let before = game.snapshot();

    assert_eq!(game.move_run(0, 0, 1).unwrap_err(), MoveError::NotMovable);
    assert_eq!(game.move_run(0, 1, 1).unwrap_err(), MoveError::NotMovable);
    assert_eq!(game.move_run(0, 3, 1).unwrap_err(), MoveError::NotMovable);
    assert_eq!(game.move_run(10, 0, 1).unwrap_err(), MoveError::NotMovable);
    assert_eq!(
        game.move_run(0, 2, 0).unwrap_err(),
        MoveError::IllegalDestination
    );
    assert_eq!(
        game.move_run(0, 2, 10).unwrap_err(),
        MoveError::IllegalDestination
    );
    assert_eq!(game.snapshot(), before);

    assert!(game.move_run(0, 2, 1).is_ok());
}

#[test]
fn completing_a_sequence_scores_and_clears_history() {
    let game = rigged_game(
        Difficulty::Hard,
        with_aces(vec![
            spade_run(13, 2),
            vec![down(Suit::Hearts, 5), up(Suit::Spades, 1)],
        ]),
        0,
    );

    let outcome = game.move_run(1, 1, 0).unwrap();
    assert_eq!(outcome.completed.len(), 1);
    let sequence = &outcome.completed[0];
    assert_eq!(sequence.column, 0);
    assert_eq!(sequence.suit, Suit::Spades);
    assert_eq!(sequence.cards, spade_run(13, 1));

    assert_eq!(game.completed_sets(), 1);
    assert_eq!(game.score(), 500 + 5 + 100);
    assert!(game.column(0).unwrap().is_empty());
    assert_eq!(game.column(1).unwrap().cards(), &[up(Suit::Hearts, 5)]);
    assert!(!game.can_undo());
    assert!(!game.is_won());
}

#[test]
fn check_completions_finds_buried_sequences() {
    let mut buried = vec![down(Suit::Clubs, 2)];
    buried.extend(spade_run(13, 1));
    buried.push(up(Suit::Hearts, 7));
    let game = rigged_game(Difficulty::Hard, with_aces(vec![buried]), 0);

    let completed = game.check_completions();
    assert_eq!(completed.len(), 1);
    assert_eq!(
        game.column(0).unwrap().cards(),
        &[down(Suit::Clubs, 2), up(Suit::Hearts, 7)]
    );
    assert_eq!(game.score(), 600);
    assert!(game.check_completions().is_empty());
}

#[test]
fn eighth_sequence_wins_with_bonus() {
    let game = rigged_game(
        Difficulty::Hard,
        vec![spade_run(13, 2), vec![up(Suit::Spades, 1)]],
        7,
    );
    assert_eq!(game.stock_count(), 0);
    assert!(!game.check_win());

    game.tick(100.0);
    let outcome = game.move_run(1, 0, 0).unwrap();
    assert!(outcome.won);
    assert!(game.is_won());
    assert_eq!(game.phase(), Phase::Won);
    assert_eq!(game.completed_sets(), 8);

    let expected = (500 + 5 + 100) + (1000 - 100) + (500 - 2);
    assert_eq!(game.final_score(), Some(expected));

    game.tick(50.0);
    assert!(game.check_win());
    assert!(game.check_win());
    assert_eq!(game.final_score(), Some(expected));
    assert!((game.elapsed() - 100.0).abs() < f64::EPSILON);
    assert_eq!(game.draw_from_stock().unwrap_err(), DrawError::EmptyStock);
}

#[test]
fn draw_deals_one_card_per_column() {
    let game = Game::new(5);
    game.new_game(hard(), Some(7));
    let before = game.columns();

    game.draw_from_stock().unwrap();

    let after = game.columns();
    for (old, new) in before.iter().zip(&after) {
        assert_eq!(new.len(), old.len() + 1);
        assert!(new.top().unwrap().face_up);
    }
    assert_eq!(game.stock_count(), 40);
    assert_eq!(game.moves(), 1);
    assert_eq!(game.score(), 499);
}

#[test]
fn draw_penalty_is_configurable() {
    let game = Game::new(5);
    game.new_game(hard().with_draw_penalty(0), Some(7));
    game.draw_from_stock().unwrap();
    assert_eq!(game.score(), 500);
}

#[test]
fn draw_is_blocked_by_empty_column() {
    let mut columns = with_aces(Vec::new());
    columns[9].clear();
    let game = rigged_game(Difficulty::Hard, columns, 0);

    assert!(!game.can_draw());
    assert_eq!(game.draw_from_stock().unwrap_err(), DrawError::BlockedColumn);
    assert_eq!(game.moves(), 0);
}

#[test]
fn draw_clears_undo_history() {
    let game = rigged_game(
        Difficulty::Hard,
        with_aces(vec![
            vec![up(Suit::Spades, 9)],
            vec![down(Suit::Hearts, 2), up(Suit::Spades, 8)],
        ]),
        0,
    );
    game.move_run(1, 1, 0).unwrap();
    assert!(game.can_undo());

    game.draw_from_stock().unwrap();
    assert_eq!(game.undo().unwrap_err(), UndoError::NoHistory);
}

#[test]
fn snapshot_restores_on_a_fresh_engine() {
    let game = Game::new(11);
    game.new_game(hard(), Some(2024));
    game.draw_from_stock().unwrap();
    game.tick(12.5);

    let state = game.snapshot();
    let copy = Game::new(99);
    copy.restore(&state).unwrap();

    assert_eq!(copy.snapshot(), state);
    assert_eq!(copy.columns(), game.columns());
    assert_eq!(copy.score(), game.score());
    assert_eq!(copy.moves(), game.moves());
    assert_eq!(copy.completed_sets(), game.completed_sets());
    assert_eq!(copy.phase(), Phase::Playing);
}

#[test]
fn json_round_trip() {
    let game = Game::new(11);
    let state = game.new_game(GameConfig::default().with_difficulty(Difficulty::Medium), Some(5));

    let json = state.to_json().unwrap();
    assert!(json.contains("\"completedSetCount\":0"));
    assert!(json.contains("\"faceUp\":true"));

    let parsed = GameState::from_json(&json).unwrap();
    assert_eq!(parsed, state);
}

#[test]
fn legacy_documents_refill_the_stock() {
    let game = Game::new(11);
    let state = game.new_game(hard(), Some(5));

    let mut value: serde_json::Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();
    let object = value.as_object_mut().unwrap();
    object.remove("version");
    object.remove("stock");
    let legacy = GameState::from_json(&value.to_string()).unwrap();
    assert_eq!(legacy.version, 1);
    assert!(legacy.stock.is_empty());

    let restored = Game::new(3);
    restored.restore(&legacy).unwrap();
    assert_eq!(restored.stock_count(), 50);
    assert_eq!(restored.columns(), game.columns());

    let sorted = |records: &[CardRecord]| {
        let mut cards: Vec<Card> = records.iter().map(|r| r.to_card().unwrap()).collect();
        cards.sort_by_key(|card| (card.suit, card.rank));
        cards
    };
    let refilled = restored.snapshot();
    assert_eq!(sorted(&refilled.stock), sorted(&state.stock));
    assert!(refilled.stock.iter().all(|card| !card.face_up));

    Game::new(4).restore(&refilled).unwrap();
}

#[test]
fn corrupt_states_are_rejected() {
    let game = Game::new(11);
    let state = game.new_game(GameConfig::default(), Some(5));
    let before = game.snapshot();

    let mut missing_column = state.clone();
    missing_column.columns.pop();
    assert!(matches!(
        game.restore(&missing_column),
        Err(RestoreError::CorruptState(_))
    ));

    let mut bad_difficulty = state.clone();
    bad_difficulty.difficulty = 3;
    assert_eq!(
        game.restore(&bad_difficulty).unwrap_err(),
        RestoreError::InvalidDifficulty
    );

    let mut bad_rank = state.clone();
    bad_rank.columns[0][0].rank = "1".to_string();
    assert!(matches!(
        game.restore(&bad_rank),
        Err(RestoreError::CorruptState(_))
    ));

    let mut wrong_suit = state.clone();
    wrong_suit.columns[0][0].suit = "♣".to_string();
    assert!(matches!(
        game.restore(&wrong_suit),
        Err(RestoreError::CorruptState(_))
    ));

    let mut extra_card = state.clone();
    let dup = extra_card.columns[2][0].clone();
    extra_card.columns[3].push(dup);
    assert!(matches!(
        game.restore(&extra_card),
        Err(RestoreError::CorruptState(_))
    ));

    let mut huge_stock = state.clone();
    huge_stock.stock.clear();
    huge_stock.stock_count = usize::MAX / 2;
    assert_eq!(
        game.restore(&huge_stock).unwrap_err(),
        RestoreError::CorruptState("stock count mismatch")
    );
    huge_stock.version = 1;
    assert_eq!(
        game.restore(&huge_stock).unwrap_err(),
        RestoreError::CorruptState("stock count mismatch")
    );

    let mut stockless = state.clone();
    stockless.stock.clear();
    assert_eq!(
        game.restore(&stockless).unwrap_err(),
        RestoreError::CorruptState("stock count mismatch")
    );

    let mut all_kings = state.clone();
    for card in all_kings.columns.iter_mut().flatten().chain(&mut all_kings.stock) {
        card.rank = "K".to_string();
    }
    assert_eq!(
        game.restore(&all_kings).unwrap_err(),
        RestoreError::CorruptState("too many copies of a card")
    );

    let mut hidden_top = state.clone();
    hidden_top.columns[9][0].face_up = false;
    assert_eq!(
        game.restore(&hidden_top).unwrap_err(),
        RestoreError::CorruptState("face-down top card")
    );

    let mut future = state.clone();
    future.version = STATE_VERSION + 1;
    assert!(matches!(
        game.restore(&future),
        Err(RestoreError::CorruptState(_))
    ));

    assert!(matches!(
        GameState::from_json("{\"score\": 1}"),
        Err(RestoreError::CorruptState(_))
    ));

    assert_eq!(game.snapshot(), before);
}

#[test]
fn hidden_card_above_shown_card_is_rejected() {
    let game = Game::new(11);
    let mut state = game.new_game(hard(), Some(8));
    let before = game.snapshot();

    state.columns[0][0].face_up = true;
    assert_eq!(
        game.restore(&state).unwrap_err(),
        RestoreError::CorruptState("face-down card above a face-up card")
    );
    assert_eq!(game.snapshot(), before);
}

#[test]
fn completed_sets_must_match_missing_cards() {
    // Every nine is on the tableau, so no full suit can have been completed.
    let nines = Suit::ALL
        .into_iter()
        .flat_map(|suit| [vec![up(suit, 9)], vec![up(suit, 9)]])
        .collect();
    let mut state = rigged_state(Difficulty::Hard, with_aces(nines), 0);
    state.stock.drain(..COMPLETE_RUN_LEN);
    state.stock_count -= COMPLETE_RUN_LEN;
    state.completed_set_count = 1;

    let game = Game::new(1);
    assert_eq!(
        game.restore(&state).unwrap_err(),
        RestoreError::CorruptState("completed sets do not match the cards")
    );
}

#[test]
fn score_saturates_instead_of_overflowing() {
    let mut state = rigged_state(
        Difficulty::Hard,
        with_aces(vec![vec![up(Suit::Spades, 9)], vec![up(Suit::Spades, 8)]]),
        0,
    );
    state.score = i64::MAX;
    let game = Game::new(1);
    game.restore(&state).unwrap();

    game.move_run(1, 0, 0).unwrap();
    assert_eq!(game.score(), i64::MAX);

    game.undo().unwrap();
    assert_eq!(game.score(), i64::MAX - 5);
}

#[test]
fn queries_expose_rule_primitives() {
    let game = rigged_game(
        Difficulty::Hard,
        with_aces(vec![
            vec![down(Suit::Clubs, 4), up(Suit::Spades, 9), up(Suit::Spades, 8)],
            vec![up(Suit::Spades, 10)],
        ]),
        0,
    );

    let run = game.column_run(0, 1).unwrap();
    assert_eq!(run, vec![up(Suit::Spades, 9), up(Suit::Spades, 8)]);
    assert!(game.column_run(0, 0).is_none());
    assert!(game.column_run(12, 0).is_none());

    assert!(game.can_accept(1, &run));
    assert!(!game.can_accept(2, &run));
    assert!(!game.can_accept(12, &run));
}

#[test]
fn daily_challenge_starts_a_seeded_game() {
    let date = chrono::NaiveDate::from_ymd_opt(2025, 5, 3).unwrap();
    let challenge = DailyChallenge::for_date(date);

    let game = Game::new(1);
    let state = game.start_challenge(&challenge, GameConfig::default());
    assert!(state.is_challenge);
    assert_eq!(state.seed, Some(challenge.seed));
    assert_eq!(game.config().difficulty, Difficulty::Hard);

    let again = Game::new(2);
    again.start_challenge(&challenge, GameConfig::default());
    assert_eq!(again.columns(), game.columns());
}

#[test]
fn clock_runs_only_while_playing() {
    let game = Game::new(1);
    game.tick(5.0);
    assert!(game.elapsed().abs() < f64::EPSILON);

    game.new_game(GameConfig::default(), None);
    game.tick(1.0);
    game.tick(1.5);
    game.tick(-3.0);
    game.tick(f64::NAN);
    assert!((game.elapsed() - 2.5).abs() < f64::EPSILON);
}
