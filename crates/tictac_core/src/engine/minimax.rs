//! Exhaustive minimax search, optionally alpha-beta pruned.
//!
//! The computer (O) maximizes and the player (X) minimizes. The search
//! writes a mark, recurses, and clears the square again before looking at
//! the result, so the board is restored on every path including cutoffs.

use super::{EngineError, MoveSelector};
use crate::rules::{is_terminal, is_win};
use crate::{Board, Mark, Position, Square};
use tracing::{debug, instrument};

/// Scores a board: +1 if O has won, -1 if X has won, 0 otherwise.
pub fn evaluate(board: &Board) -> i32 {
    if is_win(board, Mark::O) {
        1
    } else if is_win(board, Mark::X) {
        -1
    } else {
        0
    }
}

fn mover(maximizing: bool) -> Mark {
    if maximizing { Mark::O } else { Mark::X }
}

/// Plain minimax value of `board` with `maximizing` true when O is to move.
pub fn minimax(board: &mut Board, maximizing: bool) -> i32 {
    if is_terminal(board) {
        return evaluate(board);
    }

    let mark = mover(maximizing);
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for pos in Position::ALL {
        if !board.is_empty(pos) {
            continue;
        }
        board.set(pos, Square::Occupied(mark));
        let score = minimax(board, !maximizing);
        board.clear(pos);
        best = if maximizing { best.max(score) } else { best.min(score) };
    }
    best
}

/// Minimax value with alpha-beta pruning inside the `(alpha, beta)` window.
///
/// Called with the full window `(i32::MIN, i32::MAX)` it returns exactly
/// what [`minimax`] returns.
pub fn minimax_pruned(board: &mut Board, maximizing: bool, mut alpha: i32, mut beta: i32) -> i32 {
    if is_terminal(board) {
        return evaluate(board);
    }

    let mark = mover(maximizing);
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for pos in Position::ALL {
        if !board.is_empty(pos) {
            continue;
        }
        board.set(pos, Square::Occupied(mark));
        let score = minimax_pruned(board, !maximizing, alpha, beta);
        board.clear(pos);

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(score);
        } else {
            best = best.min(score);
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }
    best
}

/// Best move for O and its minimax score.
///
/// Candidates are tried in index order and only a strictly better score
/// replaces the current pick, so ties go to the lowest index.
///
/// # Errors
///
/// Returns [`EngineError::NoMoveAvailable`] if the board is full.
#[instrument(skip(board), fields(board = %board.display()))]
pub fn best_move_scored(board: &Board, pruning: bool) -> Result<(Position, i32), EngineError> {
    let mut scratch = board.clone();
    let mut best: Option<(Position, i32)> = None;

    for pos in Position::ALL {
        if !scratch.is_empty(pos) {
            continue;
        }
        scratch.set(pos, Square::Occupied(Mark::O));
        let score = if pruning {
            minimax_pruned(&mut scratch, false, i32::MIN, i32::MAX)
        } else {
            minimax(&mut scratch, false)
        };
        scratch.clear(pos);

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
    }

    let (pos, score) = best.ok_or(EngineError::NoMoveAvailable)?;
    debug!(position = %pos, score, "Minimax chose move");
    Ok((pos, score))
}

/// Best move for O. See [`best_move_scored`].
///
/// # Errors
///
/// Returns [`EngineError::NoMoveAvailable`] if the board is full.
pub fn best_move(board: &Board, pruning: bool) -> Result<Position, EngineError> {
    best_move_scored(board, pruning).map(|(pos, _)| pos)
}

/// Minimax move selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Minimax {
    pruning: bool,
}

impl Minimax {
    /// Minimax with alpha-beta pruning.
    pub fn pruned() -> Self {
        Self { pruning: true }
    }

    /// Minimax visiting every node.
    pub fn unpruned() -> Self {
        Self { pruning: false }
    }

    /// Whether alpha-beta pruning is enabled.
    pub fn pruning(&self) -> bool {
        self.pruning
    }
}

impl Default for Minimax {
    fn default() -> Self {
        Self::pruned()
    }
}

impl MoveSelector for Minimax {
    fn select_move(&mut self, board: &Board) -> Result<Position, EngineError> {
        best_move(board, self.pruning)
    }
}
