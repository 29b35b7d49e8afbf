//! Priority-list move selection.
//!
//! Win if possible, else block, else center, else a random corner, else a
//! random square. Cheap and beatable.

use super::{EngineError, MoveSelector};
use crate::rules::find_immediate_win;
use crate::{Board, Mark, Position};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

/// Heuristic move selector with an injected random source.
#[derive(Debug, Clone)]
pub struct Heuristic<R = StdRng> {
    rng: R,
}

impl Heuristic<StdRng> {
    /// Heuristic seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Heuristic with reproducible tie-breaks.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: rand::Rng> Heuristic<R> {
    /// Heuristic drawing tie-breaks from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Picks a move for O following the priority list.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoMoveAvailable`] if the board is full.
    pub fn choose(&mut self, board: &Board) -> Result<Position, EngineError> {
        if let Some(pos) = find_immediate_win(board, Mark::O) {
            debug!(position = %pos, "Heuristic takes win");
            return Ok(pos);
        }
        if let Some(pos) = find_immediate_win(board, Mark::X) {
            debug!(position = %pos, "Heuristic blocks");
            return Ok(pos);
        }
        if board.is_empty(Position::Center) {
            return Ok(Position::Center);
        }

        let corners: Vec<Position> = Position::CORNERS
            .into_iter()
            .filter(|&pos| board.is_empty(pos))
            .collect();
        if let Some(&pos) = corners.choose(&mut self.rng) {
            debug!(position = %pos, open = corners.len(), "Heuristic takes corner");
            return Ok(pos);
        }

        Position::valid_moves(board)
            .choose(&mut self.rng)
            .copied()
            .ok_or(EngineError::NoMoveAvailable)
    }
}

impl<R: rand::Rng + std::fmt::Debug> MoveSelector for Heuristic<R> {
    fn select_move(&mut self, board: &Board) -> Result<Position, EngineError> {
        self.choose(board)
    }
}
