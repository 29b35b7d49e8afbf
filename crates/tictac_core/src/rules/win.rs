//! Win detection logic for tic-tac-toe.

use crate::{Board, Mark, Position, Square};

/// The eight lines that win the game: rows, then columns, then diagonals.
pub const WIN_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns true if some line is fully occupied by `mark`.
pub fn is_win(board: &Board, mark: Mark) -> bool {
    let target = Square::Occupied(mark);
    WIN_LINES
        .iter()
        .any(|line| line.iter().all(|&pos| board.get(pos) == target))
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if that mark has three in a row, `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Mark> {
    [Mark::X, Mark::O].into_iter().find(|&mark| is_win(board, mark))
}

/// Finds the empty square that completes a line for `mark`.
///
/// A line qualifies when two of its squares hold `mark` and the third is
/// empty. Lines are scanned in [`WIN_LINES`] order and the first hit wins.
pub fn find_immediate_win(board: &Board, mark: Mark) -> Option<Position> {
    let target = Square::Occupied(mark);
    WIN_LINES.iter().find_map(|line| {
        let owned = line.iter().filter(|&&pos| board.get(pos) == target).count();
        let mut empties = line.iter().copied().filter(|&pos| board.is_empty(pos));
        match (owned, empties.next(), empties.next()) {
            (2, Some(pos), None) => Some(pos),
            _ => None,
        }
    })
}
