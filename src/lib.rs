//! Tic-tac-toe game engine.
//!
//! Pure game logic for a two-player, perfect-information 3x3 game:
//! the board, victory rules, players with running statistics, the
//! session state machine, and a family of AI strategies from random
//! play up to exhaustive minimax search.
//!
//! Delivery concerns — HTTP, CLI, storage, transport — live outside
//! this crate and drive it through [`GameSession`] and
//! [`ai::Strategy`]. The engine is synchronous and single-threaded;
//! wrap a session in a mutex if it must be shared.
//!
//! # Example
//!
//! ```
//! use tictactoe::{GameConfiguration, GameSession, Mark, Player, PlayerType, Position};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = GameSession::new(GameConfiguration::default());
//! let alice = Player::new("Alice", PlayerType::Human)?;
//! let bot = Player::new("Bot", PlayerType::AiHard)?;
//! let alice_id = alice.id();
//!
//! session.add_player(alice, Mark::X)?;
//! session.add_player(bot, Mark::O)?;
//! session.make_move(Position::new(1, 1)?, alice_id)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod ai;

mod action;
mod config;
mod player;
mod rules;
mod session;
mod types;

pub use action::Move;
pub use config::GameConfiguration;
pub use player::{
    InvalidName, MarkAlreadyAssigned, Player, PlayerId, PlayerStats, PlayerType, MAX_NAME_LEN,
};
pub use rules::{BoardControl, Line, LineKind, VictoryConditions, VictoryPattern};
pub use session::{GameResult, GameSession, GameState, SessionError};
pub use types::{Board, Cell, InvalidPosition, Mark, Position, BOARD_SIZE};

pub use ai::{Strategy, StrategyKind, UnknownStrategy};
