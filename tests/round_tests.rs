//! Round integration tests.
//!
//! These drive a full `GameController` with the headless view, the
//! in-memory store and the virtual clock, covering the scenarios a player
//! actually walks through.

use std::time::Duration;

use cyber_memory::{
    CardFace, CardId, CardLabel, GameConfig, HeadlessController, IgnoreReason, KeyValueStore,
    Outcome, PlayerRecord, UiEvent, WinSummary,
};

fn game(seed: u64) -> HeadlessController {
    HeadlessController::headless(GameConfig::default(), seed).unwrap()
}

fn ids_of(game: &HeadlessController, label: &str) -> (CardId, CardId) {
    let ids = game.board().positions_of(&CardLabel::new(label));
    assert_eq!(ids.len(), 2, "every label is dealt twice");
    (ids[0], ids[1])
}

fn click(game: &mut HeadlessController, id: CardId) -> Outcome {
    game.dispatch(UiEvent::CardClicked(id))
}

fn clear_board(game: &mut HeadlessController) -> Outcome {
    let labels = game.config().labels.clone();
    let mut last = Outcome::Applied;
    for label in &labels {
        let (a, b) = ids_of(game, label.as_str());
        click(game, a);
        last = click(game, b);
    }
    last
}

// =============================================================================
// Board Setup
// =============================================================================

/// Every deal holds two copies of each of the six labels.
#[test]
fn test_fresh_board_multiset() {
    for seed in 0..50 {
        let game = game(seed);
        let mut labels: Vec<_> = game.board().labels().map(|l| l.as_str().to_string()).collect();
        labels.sort();

        let mut expected: Vec<String> = cyber_memory::core::DEFAULT_LABELS
            .iter()
            .flat_map(|l| [l.to_string(), l.to_string()])
            .collect();
        expected.sort();

        assert_eq!(labels, expected);
    }
}

/// The view is handed one card per board position with label-derived assets.
#[test]
fn test_view_receives_full_board() {
    let game = game(5);
    let cards = game.view().cards();

    assert_eq!(cards.len(), 12);
    for (view, card) in cards.iter().zip(game.board().iter()) {
        assert_eq!(view.id, card.id);
        assert_eq!(view.label, card.label);
        assert_eq!(view.image, format!("images/{}.png", card.label));
        assert!(view.clickable);
    }
}

// =============================================================================
// Flip and Match
// =============================================================================

/// Clicking both A cards matches them and unlocks input.
#[test]
fn test_matching_pair() {
    let mut game = game(42);
    let (a1, a2) = ids_of(&game, "rizal");

    assert_eq!(click(&mut game, a1), Outcome::Applied);
    assert_eq!(click(&mut game, a2), Outcome::Applied);

    assert_eq!(game.round().matched_pairs(), 1);
    assert_eq!(game.board().face(a1), Some(CardFace::Matched));
    assert_eq!(game.board().face(a2), Some(CardFace::Matched));
    assert!(!game.round().is_locked());
    assert_eq!(game.round().first_selected(), None);
    assert_eq!(game.view().counter(), Some(1));
}

/// An A card then a B card flip back after the delay with the counter unchanged.
#[test]
fn test_mismatched_pair_flips_back() {
    let mut game = game(42);
    let (a, _) = ids_of(&game, "rizal");
    let (b, _) = ids_of(&game, "mabini");

    click(&mut game, a);
    click(&mut game, b);
    assert!(game.round().is_locked());
    assert_eq!(game.board().face(a), Some(CardFace::FaceUp));
    assert_eq!(game.board().face(b), Some(CardFace::FaceUp));

    let outcomes = game.advance_time(Duration::from_secs(1));

    assert_eq!(outcomes, vec![Outcome::Applied]);
    assert_eq!(game.board().face(a), Some(CardFace::FaceDown));
    assert_eq!(game.board().face(b), Some(CardFace::FaceDown));
    assert_eq!(game.round().matched_pairs(), 0);
    assert!(!game.round().is_locked());
    assert_eq!(game.view().face(a), Some(CardFace::FaceDown));
}

/// Clicks while a mismatch is resolving do nothing.
#[test]
fn test_clicks_ignored_while_locked() {
    let mut game = game(42);
    let (a, a2) = ids_of(&game, "rizal");
    let (b, _) = ids_of(&game, "mabini");

    click(&mut game, a);
    click(&mut game, b);

    assert_eq!(click(&mut game, a2), Outcome::Ignored(IgnoreReason::Locked));
    assert_eq!(game.board().face(a2), Some(CardFace::FaceDown));

    game.advance_time(Duration::from_millis(500));
    assert_eq!(click(&mut game, a2), Outcome::Ignored(IgnoreReason::Locked));

    game.advance_time(Duration::from_millis(500));
    assert_eq!(click(&mut game, a2), Outcome::Applied);
}

/// The unflip timer unlocks input exactly once per mismatch.
#[test]
fn test_unlock_once_per_mismatch() {
    let mut game = game(42);
    let (a, _) = ids_of(&game, "rizal");
    let (b, _) = ids_of(&game, "mabini");

    click(&mut game, a);
    click(&mut game, b);
    assert_eq!(game.scheduler().pending_len(), 1);

    let outcomes = game.run_timers();
    assert_eq!(outcomes.len(), 1);

    // A second unflip with nothing pending is a no-op
    let generation = game.generation();
    assert_eq!(
        game.dispatch(UiEvent::Timer(cyber_memory::TimerEvent::Unflip { generation })),
        Outcome::Ignored(IgnoreReason::NothingPending)
    );
}

/// Clicking the same card twice never counts as a pair.
#[test]
fn test_double_click_same_card() {
    let mut game = game(42);
    let (a, _) = ids_of(&game, "silang");

    click(&mut game, a);
    assert_eq!(click(&mut game, a), Outcome::Ignored(IgnoreReason::AlreadySelected));
    assert_eq!(game.round().matched_pairs(), 0);
    assert_eq!(game.round().first_selected(), Some(a));
    assert!(!game.round().is_locked());
}

/// A matched card is never flipped again.
#[test]
fn test_matched_card_stays_matched() {
    let mut game = game(42);
    let (a1, a2) = ids_of(&game, "bonifacio");
    let (b, _) = ids_of(&game, "aguinaldo");

    click(&mut game, a1);
    click(&mut game, a2);

    assert_eq!(click(&mut game, a1), Outcome::Ignored(IgnoreReason::AlreadyMatched));
    click(&mut game, b);
    assert_eq!(click(&mut game, a2), Outcome::Ignored(IgnoreReason::AlreadyMatched));
    game.run_timers();

    assert_eq!(game.board().face(a1), Some(CardFace::Matched));
    assert_eq!(game.board().face(a2), Some(CardFace::Matched));
}

/// Clicks outside the board are ignored.
#[test]
fn test_unknown_card() {
    let mut game = game(42);
    assert_eq!(
        click(&mut game, CardId::new(12)),
        Outcome::Ignored(IgnoreReason::UnknownCard)
    );
}

// =============================================================================
// Win Handling
// =============================================================================

/// Clearing the board awards 60 points, stores them and shows the indicator.
#[test]
fn test_win_writes_record() {
    let mut game = game(42);

    let outcome = clear_board(&mut game);

    assert_eq!(outcome, Outcome::Won(WinSummary { pairs: 6, points: 60 }));
    assert_eq!(game.last_win(), Some(WinSummary { pairs: 6, points: 60 }));
    assert!(game.view().win_visible());
    assert_eq!(game.view().counter(), Some(6));

    let record = PlayerRecord::load(game.store(), "cyber_student");
    assert_eq!(record.game_points, 60);
    assert_eq!(record.score, 60);
}

/// The session record is overwritten, keeping fields the game does not own.
#[test]
fn test_win_overwrites_existing_record() {
    let mut game = game(42);
    game.store_mut()
        .set(
            "cyber_student",
            r#"{"score":15,"gamePoints":5,"current_scenario_index":3}"#.to_string(),
        )
        .unwrap();

    clear_board(&mut game);

    let record = PlayerRecord::load(game.store(), "cyber_student");
    assert_eq!(record.score, 60);
    assert_eq!(record.game_points, 60);
    assert_eq!(record.current_scenario_index, 3);
    assert_eq!(record.version, cyber_memory::store::RECORD_VERSION);
}

/// A corrupt stored record is replaced rather than failing the win.
#[test]
fn test_win_with_corrupt_record() {
    let mut game = game(42);
    game.store_mut().set("cyber_student", "{{{".to_string()).unwrap();

    clear_board(&mut game);

    let record = PlayerRecord::load(game.store(), "cyber_student");
    assert_eq!(record.game_points, 60);
}

/// Win resets the shared record and prompts before navigating.
#[test]
fn test_win_resets_shared_record_and_prompts() {
    let mut game = game(42);
    game.store_mut()
        .set("teacher_user_id_1", r#"{"score":50}"#.to_string())
        .unwrap();

    clear_board(&mut game);

    let shared = PlayerRecord::load(game.store(), "teacher_user_id_1");
    assert_eq!(shared, PlayerRecord::fresh_start());

    // Prompt waits for the delay
    assert!(game.view().prompts().is_empty());
    let outcomes = game.advance_time(Duration::from_secs(1));
    assert_eq!(outcomes, vec![Outcome::Prompted { accepted: true }]);
    assert_eq!(game.view().prompts().len(), 1);
    assert_eq!(game.view().navigations().to_vec(), vec!["index.html".to_string()]);
}

/// Declining the prompt stays on the game.
#[test]
fn test_declined_prompt_does_not_navigate() {
    let mut game = HeadlessController::new(
        GameConfig::default(),
        cyber_memory::GameRng::new(42),
        cyber_memory::MemoryStore::new(),
        cyber_memory::HeadlessView::new().answering(false),
        cyber_memory::ManualScheduler::new(),
    )
    .unwrap();

    clear_board(&mut game);

    assert_eq!(game.run_timers(), vec![Outcome::Prompted { accepted: false }]);
    assert!(game.view().navigations().is_empty());
}

/// A view without a win indicator is tolerated.
#[test]
fn test_win_without_indicator() {
    let mut game = HeadlessController::new(
        GameConfig::default(),
        cyber_memory::GameRng::new(1),
        cyber_memory::MemoryStore::new(),
        cyber_memory::HeadlessView::new().without_win_indicator(),
        cyber_memory::ManualScheduler::new(),
    )
    .unwrap();

    let outcome = clear_board(&mut game);

    assert!(matches!(outcome, Outcome::Won(_)));
    assert!(!game.view().win_visible());
    assert_eq!(PlayerRecord::load(game.store(), "cyber_student").game_points, 60);
}

/// Award follows the configured label count and point value.
#[test]
fn test_custom_config_award() {
    let config = GameConfig::new()
        .with_labels(["phishing", "malware", "vpn"])
        .with_points_per_match(7)
        .with_session_key("student_42");
    let mut game = HeadlessController::headless(config, 8).unwrap();

    assert_eq!(game.board().len(), 6);
    let outcome = clear_board(&mut game);

    assert_eq!(outcome, Outcome::Won(WinSummary { pairs: 3, points: 21 }));
    assert_eq!(PlayerRecord::load(game.store(), "student_42").score, 21);
    assert!(game.store().get("cyber_student").is_none());
}

/// A shared key equal to the session key would erase the award, so the game refuses to start.
#[test]
fn test_shared_key_cannot_alias_session_key() {
    let config = GameConfig::new()
        .with_session_key("student_42")
        .with_shared_player_key(Some("student_42".to_string()));

    let err = HeadlessController::headless(config, 8).err();
    assert!(matches!(err, Some(cyber_memory::ConfigError::Invalid(_))));
}

// =============================================================================
// Reset
// =============================================================================

/// Reset deals a new board with everything cleared.
#[test]
fn test_reset_after_win() {
    let mut game = game(42);
    clear_board(&mut game);
    let old_board = game.board().clone();

    assert_eq!(game.dispatch(UiEvent::ResetClicked), Outcome::Dealt);

    assert_eq!(game.round().matched_pairs(), 0);
    assert!(!game.round().is_won());
    assert!(game.board().all_face_down());
    assert_ne!(game.board(), &old_board);
    assert_eq!(game.last_win(), None);
    assert_eq!(game.view().counter(), Some(0));
    assert!(!game.view().win_visible());
    assert!(game.view().cards().iter().all(|c| c.face == CardFace::FaceDown));
    assert_eq!(game.view().renders(), 2);

    // The win prompt from the previous round is dropped
    assert_eq!(game.run_timers(), vec![Outcome::Stale]);
    assert!(game.view().prompts().is_empty());
}

/// Reset mid-round unlocks input immediately.
#[test]
fn test_reset_while_locked() {
    let mut game = game(42);
    let (a, _) = ids_of(&game, "rizal");
    let (b, _) = ids_of(&game, "mabini");

    click(&mut game, a);
    click(&mut game, b);
    game.dispatch(UiEvent::ResetClicked);

    assert!(!game.round().is_locked());
    let (c, _) = ids_of(&game, "silang");
    assert_eq!(click(&mut game, c), Outcome::Applied);
}

/// A second round can be won and is scored on its own.
#[test]
fn test_second_round_win() {
    let mut game = game(42);
    clear_board(&mut game);
    game.dispatch(UiEvent::ResetClicked);

    let outcome = clear_board(&mut game);

    assert_eq!(outcome, Outcome::Won(WinSummary { pairs: 6, points: 60 }));
    assert_eq!(PlayerRecord::load(game.store(), "cyber_student").score, 60);
}
