//! Error types for game play.

use crate::engine::EngineError;
use crate::{Position, Turn};

/// A move request the rules do not allow. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMove {
    /// Index outside 0-8.
    #[display("Position {} is out of range (must be 0-8)", _0)]
    OutOfRange(usize),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// It's the other side's turn.
    #[display("Not your turn: waiting for {:?}", _0)]
    NotYourTurn(Turn),
}

impl std::error::Error for IllegalMove {}

/// Error returned by the game controller.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum GameError {
    /// The request was rejected; nothing changed.
    #[display("Invalid move: {}", _0)]
    Illegal(IllegalMove),

    /// The computer player failed. This is an internal invariant violation.
    #[display("Engine failure: {}", _0)]
    Engine(EngineError),
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Illegal(e) => Some(e),
            GameError::Engine(e) => Some(e),
        }
    }
}
