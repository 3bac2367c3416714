//! Session lifecycle and turn-enforcement tests.

use tictactoe::{
    Board, GameConfiguration, GameResult, GameSession, GameState, Mark, Move, Player, PlayerId,
    PlayerType, Position, SessionError,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col).unwrap()
}

/// Session with two human players joined, returning their ids.
fn started_session(configuration: GameConfiguration) -> (GameSession, PlayerId, PlayerId) {
    let mut session = GameSession::new(configuration);
    let x = Player::new("Xenia", PlayerType::Human).unwrap();
    let o = Player::new("Omar", PlayerType::Human).unwrap();
    let (x_id, o_id) = (x.id(), o.id());
    assert!(session.add_player(x, Mark::X).unwrap());
    assert!(session.add_player(o, Mark::O).unwrap());
    (session, x_id, o_id)
}

#[test]
fn test_session_starts_when_both_players_join() {
    init_tracing();
    let mut session = GameSession::new(GameConfiguration::default());
    assert_eq!(session.state(), GameState::WaitingForPlayers);
    assert!(session.started_at().is_none());

    let x = Player::new("Xenia", PlayerType::Human).unwrap();
    assert!(session.add_player(x, Mark::X).unwrap());
    assert_eq!(session.state(), GameState::WaitingForPlayers);

    let o = Player::new("Omar", PlayerType::Human).unwrap();
    assert!(session.add_player(o, Mark::O).unwrap());
    assert_eq!(session.state(), GameState::InProgress);
    assert!(session.started_at().is_some());
    assert_eq!(session.current_mark(), Mark::X);
}

#[test]
fn test_taken_slot_returns_false_without_error() {
    let mut session = GameSession::new(GameConfiguration::default());
    let first = Player::new("first", PlayerType::Human).unwrap();
    let second = Player::new("second", PlayerType::Human).unwrap();
    assert!(session.add_player(first, Mark::X).unwrap());
    assert!(!session.add_player(second, Mark::X).unwrap());
    assert_eq!(session.players().len(), 1);
}

#[test]
fn test_add_player_after_start_is_invalid_transition() {
    let (mut session, _, _) = started_session(GameConfiguration::default());
    let late = Player::new("late", PlayerType::Human).unwrap();
    assert_eq!(
        session.add_player(late, Mark::X),
        Err(SessionError::InvalidTransition {
            state: GameState::InProgress
        })
    );
}

#[test]
fn test_add_player_with_preassigned_mark_fails() {
    let mut session = GameSession::new(GameConfiguration::default());
    let mut player = Player::new("eager", PlayerType::Human).unwrap();
    player.assign_mark(Mark::O).unwrap();
    assert!(matches!(
        session.add_player(player, Mark::X),
        Err(SessionError::MarkAlreadyAssigned(_))
    ));
    assert!(session.players().is_empty());
}

#[test]
fn test_move_before_start_is_not_in_progress() {
    let mut session = GameSession::new(GameConfiguration::default());
    let x = Player::new("Xenia", PlayerType::Human).unwrap();
    let x_id = x.id();
    session.add_player(x, Mark::X).unwrap();
    assert_eq!(
        session.make_move(pos(0, 0), x_id),
        Err(SessionError::NotInProgress {
            state: GameState::WaitingForPlayers
        })
    );
}

#[test]
fn test_wrong_turn_leaves_board_and_turn_unchanged() {
    init_tracing();
    let (mut session, _x_id, o_id) = started_session(GameConfiguration::default());
    let before = session.board().clone();

    assert_eq!(
        session.make_move(pos(0, 0), o_id),
        Err(SessionError::WrongTurn { expected: Mark::X })
    );
    assert_eq!(session.board(), &before);
    assert_eq!(session.current_mark(), Mark::X);
    assert_eq!(session.move_count(), 0);
}

#[test]
fn test_occupied_cell_returns_false_and_keeps_turn() {
    let (mut session, x_id, o_id) = started_session(GameConfiguration::default());
    assert_eq!(session.make_move(pos(1, 1), x_id), Ok(true));
    assert_eq!(session.current_mark(), Mark::O);

    assert_eq!(session.make_move(pos(1, 1), o_id), Ok(false));
    assert_eq!(session.current_mark(), Mark::O, "turn must not flip");
    assert_eq!(session.move_count(), 1);
    assert_eq!(session.state(), GameState::InProgress);
}

#[test]
fn test_row_win_finishes_the_session() {
    init_tracing();
    let (mut session, x_id, o_id) = started_session(GameConfiguration::default());

    session.make_move(pos(0, 0), x_id).unwrap();
    session.make_move(pos(1, 0), o_id).unwrap();
    session.make_move(pos(0, 1), x_id).unwrap();
    assert_eq!(session.board().winner(), None);
    session.make_move(pos(1, 1), o_id).unwrap();
    session.make_move(pos(0, 2), x_id).unwrap();

    assert_eq!(session.board().winner(), Some(Mark::X));
    assert_eq!(session.state(), GameState::Finished);
    assert_eq!(session.result(), Some(GameResult::XWins));
    assert_eq!(session.winner().unwrap().name(), "Xenia");
    assert!(session.is_finished());
    assert!(!session.is_draw());
    assert!(session.finished_at().is_some());

    // No moves accepted once finished.
    assert_eq!(
        session.make_move(pos(2, 2), o_id),
        Err(SessionError::NotInProgress {
            state: GameState::Finished
        })
    );
}

#[test]
fn test_alternating_game_to_draw() {
    let (mut session, x_id, o_id) = started_session(GameConfiguration::default());

    // X O X / O O X / X X O — no line completes at any point.
    let script = [
        (pos(0, 0), x_id),
        (pos(0, 1), o_id),
        (pos(0, 2), x_id),
        (pos(1, 0), o_id),
        (pos(1, 2), x_id),
        (pos(1, 1), o_id),
        (pos(2, 0), x_id),
        (pos(2, 2), o_id),
        (pos(2, 1), x_id),
    ];
    for (position, player) in script {
        assert_eq!(session.make_move(position, player), Ok(true));
    }

    assert!(session.board().is_full());
    assert_eq!(session.board().winner(), None);
    assert_eq!(session.result(), Some(GameResult::Draw));
    assert!(session.is_draw());
    assert!(session.winner().is_none());
    assert_eq!(session.move_count(), 9);
}

#[test]
fn test_draw_board_from_unordered_placements() {
    // Board-level variant: the board itself does not sequence turns.
    let mut board = Board::new();
    let placements = [
        (0, 0, Mark::X),
        (0, 1, Mark::O),
        (0, 2, Mark::X),
        (1, 0, Mark::O),
        (1, 1, Mark::O),
        (1, 2, Mark::X),
        (2, 0, Mark::X),
        (2, 1, Mark::X),
        (2, 2, Mark::O),
    ];
    for (row, col, mark) in placements {
        assert!(board.place(Move::new(pos(row, col), mark)));
    }
    assert!(board.is_full());
    assert_eq!(board.winner(), None);
}

#[test]
fn test_statistics_recorded_once_at_finish() {
    let (mut session, x_id, o_id) = started_session(GameConfiguration::default());

    session.make_move(pos(0, 0), x_id).unwrap();
    session.make_move(pos(1, 0), o_id).unwrap();
    session.make_move(pos(0, 1), x_id).unwrap();
    assert_eq!(session.player_x().unwrap().stats().games_played(), 0);

    session.make_move(pos(1, 1), o_id).unwrap();
    session.make_move(pos(0, 2), x_id).unwrap();

    let x_stats = session.player_x().unwrap().stats();
    let o_stats = session.player_o().unwrap().stats();
    assert_eq!(x_stats.games_played(), 1);
    assert_eq!(x_stats.games_won(), 1);
    assert_eq!(o_stats.games_played(), 1);
    assert_eq!(o_stats.games_lost(), 1);
}

#[test]
fn test_statistics_disabled_by_configuration() {
    let configuration = GameConfiguration::default().with_statistics(false);
    let (mut session, x_id, o_id) = started_session(configuration);

    session.make_move(pos(0, 0), x_id).unwrap();
    session.make_move(pos(1, 0), o_id).unwrap();
    session.make_move(pos(0, 1), x_id).unwrap();
    session.make_move(pos(1, 1), o_id).unwrap();
    session.make_move(pos(0, 2), x_id).unwrap();

    assert_eq!(session.result(), Some(GameResult::XWins));
    assert_eq!(session.player_x().unwrap().stats().games_played(), 0);
    assert_eq!(session.player_o().unwrap().stats().games_played(), 0);
}

#[test]
fn test_pause_resume_and_noops() {
    let (mut session, x_id, _o_id) = started_session(GameConfiguration::default());

    session.pause();
    assert_eq!(session.state(), GameState::Paused);
    assert_eq!(
        session.make_move(pos(0, 0), x_id),
        Err(SessionError::NotInProgress {
            state: GameState::Paused
        })
    );
    // Pausing again is silently ignored.
    session.pause();
    assert_eq!(session.state(), GameState::Paused);

    session.resume();
    assert_eq!(session.state(), GameState::InProgress);
    // Resuming a running game is silently ignored.
    session.resume();
    assert_eq!(session.state(), GameState::InProgress);
    assert_eq!(session.make_move(pos(0, 0), x_id), Ok(true));
}

#[test]
fn test_abandon_from_paused_records_no_statistics() {
    let (mut session, x_id, _) = started_session(GameConfiguration::default());
    session.make_move(pos(0, 0), x_id).unwrap();
    session.pause();
    session.abandon();

    assert_eq!(session.state(), GameState::Finished);
    assert_eq!(session.result(), Some(GameResult::Abandoned));
    assert!(session.winner().is_none());
    assert_eq!(session.player_x().unwrap().stats().games_played(), 0);

    // Abandoning a finished session is silently ignored.
    session.abandon();
    assert_eq!(session.result(), Some(GameResult::Abandoned));
}

#[test]
fn test_reset_starts_fresh_game_with_same_players() {
    let (mut session, x_id, o_id) = started_session(GameConfiguration::default());
    session.make_move(pos(0, 0), x_id).unwrap();
    session.make_move(pos(1, 0), o_id).unwrap();
    session.make_move(pos(0, 1), x_id).unwrap();
    session.make_move(pos(1, 1), o_id).unwrap();
    session.make_move(pos(0, 2), x_id).unwrap();
    assert!(session.is_finished());

    session.reset();
    assert_eq!(session.state(), GameState::InProgress);
    assert_eq!(session.current_mark(), Mark::X);
    assert_eq!(session.result(), None);
    assert_eq!(session.move_count(), 0);
    assert!(session.board().move_history().is_empty());
    assert!(session.finished_at().is_none());
    // Statistics from the finished game survive the reset.
    assert_eq!(session.player_x().unwrap().stats().games_won(), 1);
    assert_eq!(session.available_moves().len(), 9);
}

#[test]
fn test_current_player_follows_the_turn() {
    let (mut session, x_id, _) = started_session(GameConfiguration::default());
    assert_eq!(session.current_player().unwrap().name(), "Xenia");
    session.make_move(pos(2, 2), x_id).unwrap();
    assert_eq!(session.current_player().unwrap().name(), "Omar");
}

#[test]
fn test_states_and_results_serialize_snake_case() {
    assert_eq!(
        serde_json::to_string(&GameState::WaitingForPlayers).unwrap(),
        "\"waiting_for_players\""
    );
    assert_eq!(
        serde_json::to_string(&GameResult::XWins).unwrap(),
        "\"x_wins\""
    );
}

#[test]
fn test_board_json_round_trip() {
    let mut board = Board::new();
    board.place(Move::new(pos(0, 0), Mark::X));
    board.place(Move::new(pos(1, 1), Mark::O));

    let json = serde_json::to_string(&board).unwrap();
    let restored: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, board);
    assert_eq!(restored.to_grid(), board.to_grid());
}
