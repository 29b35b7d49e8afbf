//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Nothing here mutates
//! state, so the decision engine and the controller share one definition
//! of a win, a full board and a finished game.

pub mod draw;
pub mod win;

pub use draw::{is_full, is_terminal};
pub use win::{WIN_LINES, check_winner, find_immediate_win, is_win};
