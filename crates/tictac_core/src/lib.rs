//! Tic-tac-toe game logic with a computer opponent.
//!
//! - [`Board`], [`Position`], [`Mark`]: the grid and what sits on it.
//! - [`rules`]: win, full-board and terminal checks.
//! - [`engine`]: minimax and heuristic move selection.
//! - [`GameController`]: turn order and game lifecycle.
//!
//! # Example
//!
//! ```
//! use tictac_core::{Difficulty, GameController, Outcome, Turn};
//!
//! let mut game = GameController::with_difficulty(Difficulty::Unbeatable);
//! let snapshot = game.reset(Turn::Player).unwrap();
//! assert_eq!(snapshot.outcome, Outcome::InProgress);
//!
//! let snapshot = game.submit_player_move(4).unwrap();
//! assert!(snapshot.computer_move.is_some());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod controller;
mod error;
mod position;
mod types;

pub mod engine;
pub mod rules;

pub use controller::{GameController, Outcome, Phase, Snapshot};
pub use engine::{Difficulty, EngineError, Heuristic, Minimax, MoveSelector};
pub use error::{GameError, IllegalMove};
pub use position::Position;
pub use types::{Board, Mark, Square, Turn};
