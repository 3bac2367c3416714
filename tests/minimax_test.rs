//! Exhaustive minimax soundness tests.
//!
//! The search space on a 3x3 board is small enough to enumerate every
//! opponent line in full, so "never loses" is checked, not sampled.

use tictactoe::ai::{MinimaxStrategy, Strategy};
use tictactoe::{Board, Mark, Move, Player, PlayerType, Position, VictoryConditions};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn ai_player(mark: Mark) -> Player {
    let mut player = Player::new("search", PlayerType::AiHard).unwrap();
    player.assign_mark(mark).unwrap();
    player
}

struct Tally {
    games: u32,
    ai_losses: u32,
    ai_wins: u32,
    draws: u32,
}

/// Walks every opponent choice; the minimax side answers each one.
fn explore(
    board: &Board,
    strategy: &mut MinimaxStrategy,
    ai: &Player,
    opponent_mark: Mark,
    opponent_to_move: bool,
    tally: &mut Tally,
) {
    let victory = VictoryConditions::new();
    if let Some(winner) = victory.winner(board) {
        tally.games += 1;
        if winner == opponent_mark {
            tally.ai_losses += 1;
        } else {
            tally.ai_wins += 1;
        }
        return;
    }
    if board.is_full() {
        tally.games += 1;
        tally.draws += 1;
        return;
    }

    if opponent_to_move {
        for position in board.empty_positions() {
            let mut next = board.clone();
            assert!(next.place(Move::new(position, opponent_mark)));
            explore(&next, strategy, ai, opponent_mark, false, tally);
        }
    } else {
        let position = strategy
            .select_move(board, ai)
            .expect("minimax must move while cells remain");
        let mut next = board.clone();
        assert!(next.place(Move::new(position, ai.mark().unwrap())));
        explore(&next, strategy, ai, opponent_mark, true, tally);
    }
}

#[test]
fn test_minimax_second_player_never_loses() {
    init_tracing();
    let ai = ai_player(Mark::O);
    let mut strategy = MinimaxStrategy::new(VictoryConditions::new());
    let mut tally = Tally {
        games: 0,
        ai_losses: 0,
        ai_wins: 0,
        draws: 0,
    };

    // X (the opponent) opens and branches on every legal move at every
    // turn, up to the full 9-ply depth.
    explore(
        &Board::new(),
        &mut strategy,
        &ai,
        Mark::X,
        true,
        &mut tally,
    );

    assert!(tally.games > 0);
    assert_eq!(
        tally.ai_losses, 0,
        "minimax lost {} of {} lines",
        tally.ai_losses, tally.games
    );
    assert_eq!(tally.games, tally.ai_wins + tally.draws);
}

#[test]
fn test_minimax_first_player_never_loses() {
    let ai = ai_player(Mark::X);
    let mut strategy = MinimaxStrategy::new(VictoryConditions::new());
    let mut tally = Tally {
        games: 0,
        ai_losses: 0,
        ai_wins: 0,
        draws: 0,
    };

    explore(
        &Board::new(),
        &mut strategy,
        &ai,
        Mark::O,
        false,
        &mut tally,
    );

    assert_eq!(tally.ai_losses, 0);
    assert_eq!(tally.games, tally.ai_wins + tally.draws);
}

#[test]
fn test_minimax_against_itself_draws() {
    let x = ai_player(Mark::X);
    let o = ai_player(Mark::O);
    let mut x_strategy = MinimaxStrategy::new(VictoryConditions::new());
    let mut o_strategy = MinimaxStrategy::new(VictoryConditions::new());

    let mut board = Board::new();
    let mut x_to_move = true;
    while !board.is_game_over() {
        let (strategy, player) = if x_to_move {
            (&mut x_strategy, &x)
        } else {
            (&mut o_strategy, &o)
        };
        let position = strategy.select_move(&board, player).unwrap();
        assert!(board.place(Move::new(position, player.mark().unwrap())));
        x_to_move = !x_to_move;
    }

    assert!(board.is_full());
    assert_eq!(board.winner(), None, "perfect play must draw");
}

#[test]
fn test_depth_adjusted_scores_pick_the_quickest_finish() {
    // X can win immediately at (0,2) or set up slower wins elsewhere;
    // the depth penalty makes the immediate win score highest.
    let mut board = Board::new();
    for (row, col, mark) in [
        (0usize, 0usize, Mark::X),
        (0, 1, Mark::X),
        (1, 0, Mark::O),
        (1, 1, Mark::O),
    ] {
        board.place(Move::new(Position::new(row, col).unwrap(), mark));
    }

    let mut strategy = MinimaxStrategy::new(VictoryConditions::new());
    assert_eq!(
        strategy.select_move(&board, &ai_player(Mark::X)),
        Some(Position::new(0, 2).unwrap())
    );
}
