//! Terminal application state and key handling.
//!
//! Mirrors the desktop flow: a starter screen asking who moves first, the
//! board, a game-over message, then back to the starter screen.

use crossterm::event::KeyCode;
use tictac_core::{Difficulty, GameController, GameError, Outcome, Position, Snapshot, Turn};
use tracing::{debug, error, instrument};

use super::input::move_cursor;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Choose who moves first.
    Starter,
    /// Game in progress.
    Playing,
    /// Game finished; any key returns to the starter screen.
    GameOver,
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the application.
    Quit,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    game: GameController,
    screen: Screen,
    cursor: Position,
    status: String,
}

impl App {
    /// Creates the application on the starter screen.
    #[instrument]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            game: GameController::with_difficulty(difficulty),
            screen: Screen::Starter,
            cursor: Position::Center,
            status: "Who should make the first move?".to_string(),
        }
    }

    /// The game being played.
    pub fn game(&self) -> &GameController {
        &self.game
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Highlighted square.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Status line text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Starts a game with `first` to move.
    #[instrument(skip(self))]
    pub fn start(&mut self, first: Turn) {
        self.cursor = Position::Center;
        self.screen = Screen::Playing;
        let result = self.game.reset(first);
        self.apply(result);
    }

    /// Handles one key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) -> Control {
        if matches!(key, KeyCode::Char('q') | KeyCode::Esc) {
            return Control::Quit;
        }

        match self.screen {
            Screen::Starter => match key {
                KeyCode::Char('u') | KeyCode::Char('p') => self.start(Turn::Player),
                KeyCode::Char('c') => self.start(Turn::Computer),
                KeyCode::Char('d') => self.toggle_difficulty(),
                _ => {}
            },
            Screen::Playing => match key {
                KeyCode::Enter | KeyCode::Char(' ') => self.play(self.cursor),
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    if let Some(pos) = Position::from_index(index) {
                        self.cursor = pos;
                        self.play(pos);
                    }
                }
                KeyCode::Char('r') => self.back_to_start(),
                other => self.cursor = move_cursor(self.cursor, other),
            },
            Screen::GameOver => self.back_to_start(),
        }
        Control::Continue
    }

    fn toggle_difficulty(&mut self) {
        let next = match self.game.difficulty() {
            Difficulty::Unbeatable => Difficulty::Casual,
            Difficulty::Casual => Difficulty::Unbeatable,
        };
        self.game.set_difficulty(next);
        self.status = format!("Difficulty: {}", next);
    }

    fn back_to_start(&mut self) {
        self.screen = Screen::Starter;
        self.status = "Who should make the first move?".to_string();
    }

    fn play(&mut self, pos: Position) {
        debug!(position = %pos, "Player selected square");
        let result = self.game.submit_player_move(pos.to_index());
        self.apply(result);
    }

    fn apply(&mut self, result: Result<Snapshot, GameError>) {
        match result {
            Ok(snapshot) => {
                self.status = match snapshot.outcome {
                    Outcome::InProgress => match snapshot.computer_move {
                        Some(pos) => format!("Computer played {}. Your move.", pos.label()),
                        None => "Your move.".to_string(),
                    },
                    Outcome::PlayerWon => "You win!".to_string(),
                    Outcome::ComputerWon => "Computer wins!".to_string(),
                    Outcome::Tie => "It's a tie!".to_string(),
                };
                if snapshot.outcome.is_over() {
                    self.screen = Screen::GameOver;
                }
            }
            Err(GameError::Illegal(e)) => self.status = e.to_string(),
            Err(e @ GameError::Engine(_)) => {
                error!(error = %e, "Game aborted");
                self.status = e.to_string();
                self.screen = Screen::GameOver;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictac_core::Mark;

    #[test]
    fn test_starter_screen_choices() {
        let mut app = App::new(Difficulty::Unbeatable);
        assert_eq!(app.screen(), Screen::Starter);

        app.handle_key(KeyCode::Char('c'));
        assert_eq!(app.screen(), Screen::Playing);
        assert_eq!(app.game().board().count(Mark::O), 1);
        assert_eq!(app.game().current_turn(), Turn::Player);
    }

    #[test]
    fn test_digit_keys_place_marks() {
        let mut app = App::new(Difficulty::Unbeatable);
        app.handle_key(KeyCode::Char('u'));
        app.handle_key(KeyCode::Char('1'));
        assert_eq!(app.cursor(), Position::TopLeft);
        assert_eq!(app.game().board().count(Mark::X), 1);
        assert_eq!(app.game().board().count(Mark::O), 1);
    }

    #[test]
    fn test_occupied_square_reports_error() {
        let mut app = App::new(Difficulty::Unbeatable);
        app.handle_key(KeyCode::Char('u'));
        app.handle_key(KeyCode::Enter);
        let board = app.game().board().clone();
        app.handle_key(KeyCode::Enter);
        assert!(app.status().contains("already occupied"));
        assert_eq!(app.game().board(), &board);
    }

    #[test]
    fn test_difficulty_toggle() {
        let mut app = App::new(Difficulty::Unbeatable);
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.game().difficulty(), Difficulty::Casual);
        assert_eq!(app.status(), "Difficulty: casual");
    }

    #[test]
    fn test_quit_from_any_screen() {
        let mut app = App::new(Difficulty::Unbeatable);
        assert_eq!(app.handle_key(KeyCode::Char('q')), Control::Quit);
        app.handle_key(KeyCode::Char('u'));
        assert_eq!(app.handle_key(KeyCode::Esc), Control::Quit);
    }
}
