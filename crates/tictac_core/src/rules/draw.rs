//! Full-board and terminal-state detection.

use super::win::is_win;
use crate::{Board, Mark, Square};

/// Checks if the board is full (all squares occupied).
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// Checks if the game has concluded: either side has won or no square is left.
pub fn is_terminal(board: &Board) -> bool {
    is_win(board, Mark::X) || is_win(board, Mark::O) || is_full(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
        assert!(!is_terminal(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Mark::X));
        assert!(!is_full(&board));
        assert!(!is_terminal(&board));
    }

    #[test]
    fn test_full_board_without_line_is_terminal() {
        let board = Board::from_marks("XOXOXOOXO").expect("valid board");
        assert!(is_full(&board));
        assert!(!is_win(&board, Mark::X));
        assert!(!is_win(&board, Mark::O));
        assert!(is_terminal(&board));
    }

    #[test]
    fn test_won_board_is_terminal_before_full() {
        let board = Board::from_marks("XXXOO    ").expect("valid board");
        assert!(!is_full(&board));
        assert!(is_terminal(&board));
    }
}
