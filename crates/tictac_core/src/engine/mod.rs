//! Computer move selection.
//!
//! Two strategies sit behind [`MoveSelector`]: exhaustive [`Minimax`]
//! search, which never loses, and the rule-of-thumb [`Heuristic`], which
//! can be beaten. [`Difficulty`] picks between them.

mod heuristic;
mod minimax;

pub use heuristic::Heuristic;
pub use minimax::{Minimax, best_move, best_move_scored, evaluate, minimax, minimax_pruned};

use crate::{Board, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Chooses the computer's next move.
pub trait MoveSelector: std::fmt::Debug {
    /// Selects an empty square for the computer (O) on a non-terminal board.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoMoveAvailable`] if the board has no empty square.
    fn select_move(&mut self, board: &Board) -> Result<Position, EngineError>;
}

/// Error raised by a move selector.
///
/// These indicate a broken caller invariant, not bad user input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// The board has no empty square.
    #[display("No move available: the board is full")]
    NoMoveAvailable,

    /// The selector picked a square that is already occupied.
    #[display("Selector chose occupied square {}", _0)]
    IllegalSelection(Position),
}

impl std::error::Error for EngineError {}

/// Strength of the computer player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Full minimax search with alpha-beta pruning. Never loses.
    #[default]
    Unbeatable,
    /// Win/block/center/corner heuristic with random tie-breaks.
    Casual,
}

impl Difficulty {
    /// Builds the selector for this difficulty.
    #[instrument]
    pub fn selector(self) -> Box<dyn MoveSelector + Send> {
        match self {
            Difficulty::Unbeatable => Box::new(Minimax::pruned()),
            Difficulty::Casual => Box::new(Heuristic::from_entropy()),
        }
    }
}
