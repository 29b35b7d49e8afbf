//! Turn-by-turn game controller.
//!
//! Owns the single live game: the board, whose turn it is and how the game
//! ended. The player submits moves; the controller answers each accepted
//! move with the computer's reply before returning.

use crate::engine::{Difficulty, MoveSelector};
use crate::error::{GameError, IllegalMove};
use crate::rules::{is_full, is_win};
use crate::{Board, Position, Square, Turn};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

/// How the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// No result yet.
    InProgress,
    /// The player completed a line.
    PlayerWon,
    /// The computer completed a line.
    ComputerWon,
    /// Board full with no line.
    Tie,
}

impl Outcome {
    /// True once the game has a result.
    pub fn is_over(self) -> bool {
        self != Outcome::InProgress
    }

    fn won_by(turn: Turn) -> Self {
        match turn {
            Turn::Player => Outcome::PlayerWon,
            Turn::Computer => Outcome::ComputerWon,
        }
    }
}

/// Controller state machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Waiting on the player.
    AwaitingPlayerMove,
    /// The computer is about to move. Never observed between calls.
    AwaitingComputerMove,
    /// Game over; only `reset` is accepted.
    Terminal,
}

/// Read-only view of the game after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// The board.
    pub board: Board,
    /// Side to move (the last mover once the game is over).
    pub current_turn: Turn,
    /// Result so far.
    pub outcome: Outcome,
    /// State machine phase.
    pub phase: Phase,
    /// Square the computer played during this call, if it moved.
    pub computer_move: Option<Position>,
}

/// Owns and advances one game.
#[derive(Debug)]
pub struct GameController {
    board: Board,
    current_turn: Turn,
    outcome: Outcome,
    phase: Phase,
    computer_move: Option<Position>,
    difficulty: Difficulty,
    selector: Box<dyn MoveSelector + Send>,
}

impl GameController {
    /// Creates a controller with a custom selector; the player moves first.
    ///
    /// `difficulty` is what [`difficulty`](Self::difficulty) reports until
    /// [`set_difficulty`](Self::set_difficulty) installs a stock selector.
    #[instrument(skip(selector))]
    pub fn new(difficulty: Difficulty, selector: Box<dyn MoveSelector + Send>) -> Self {
        Self::build(selector, difficulty)
    }

    /// Creates a controller for the given difficulty; the player moves first.
    #[instrument]
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::build(difficulty.selector(), difficulty)
    }

    fn build(selector: Box<dyn MoveSelector + Send>, difficulty: Difficulty) -> Self {
        Self {
            board: Board::new(),
            current_turn: Turn::Player,
            outcome: Outcome::InProgress,
            phase: Phase::AwaitingPlayerMove,
            computer_move: None,
            difficulty,
            selector,
        }
    }

    /// Current difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Installs the stock selector for `difficulty`. Takes effect on the
    /// computer's next move.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!(from = %self.difficulty, to = %difficulty, "Setting difficulty");
        self.selector = difficulty.selector();
        self.difficulty = difficulty;
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    pub fn current_turn(&self) -> Turn {
        self.current_turn
    }

    /// Result so far.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// State machine phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current view of the game.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            current_turn: self.current_turn,
            outcome: self.outcome,
            phase: self.phase,
            computer_move: self.computer_move,
        }
    }

    /// Starts a fresh game. If the computer goes first it moves before returning.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Engine`] if the computer player fails.
    #[instrument(skip(self))]
    pub fn reset(&mut self, first: Turn) -> Result<Snapshot, GameError> {
        info!(?first, difficulty = %self.difficulty, "Starting new game");
        self.board = Board::new();
        self.current_turn = first;
        self.outcome = Outcome::InProgress;
        self.computer_move = None;
        self.phase = match first {
            Turn::Player => Phase::AwaitingPlayerMove,
            Turn::Computer => Phase::AwaitingComputerMove,
        };

        if self.phase == Phase::AwaitingComputerMove {
            self.play_computer()?;
        }
        Ok(self.snapshot())
    }

    /// Plays the player's mark at `index`, then the computer's reply.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Illegal`] with no state change if the game is
    /// over, it isn't the player's turn, the index is out of range or the
    /// square is taken. Returns [`GameError::Engine`] if the computer fails.
    #[instrument(skip(self))]
    pub fn submit_player_move(&mut self, index: usize) -> Result<Snapshot, GameError> {
        let pos = self.validate_player_move(index).inspect_err(|e| {
            warn!(index, error = %e, "Rejected player move");
        })?;

        self.computer_move = None;
        self.place(pos, Turn::Player);
        debug!(position = %pos, outcome = ?self.outcome, "Player moved");

        if self.phase == Phase::AwaitingComputerMove {
            self.play_computer()?;
        }
        Ok(self.snapshot())
    }

    fn validate_player_move(&self, index: usize) -> Result<Position, IllegalMove> {
        if self.outcome.is_over() {
            return Err(IllegalMove::GameOver);
        }
        if self.current_turn != Turn::Player {
            return Err(IllegalMove::NotYourTurn(self.current_turn));
        }
        let pos = Position::from_index(index).ok_or(IllegalMove::OutOfRange(index))?;
        if !self.board.is_empty(pos) {
            return Err(IllegalMove::SquareOccupied(pos));
        }
        Ok(pos)
    }

    fn play_computer(&mut self) -> Result<(), GameError> {
        let pos = self.selector.select_move(&self.board).inspect_err(|e| {
            error!(error = %e, board = %self.board.display(), "Computer player failed");
        })?;
        if !self.board.is_empty(pos) {
            error!(position = %pos, "Computer selected an occupied square");
            return Err(crate::engine::EngineError::IllegalSelection(pos).into());
        }

        self.place(pos, Turn::Computer);
        self.computer_move = Some(pos);
        debug!(position = %pos, outcome = ?self.outcome, "Computer moved");
        Ok(())
    }

    /// Writes the mover's mark and advances the state machine.
    fn place(&mut self, pos: Position, turn: Turn) {
        self.board.set(pos, Square::Occupied(turn.mark()));
        debug_assert!(self.board.is_alternating(), "Turn alternation violated");

        if is_win(&self.board, turn.mark()) {
            self.outcome = Outcome::won_by(turn);
            self.phase = Phase::Terminal;
            info!(outcome = ?self.outcome, "Game over");
        } else if is_full(&self.board) {
            self.outcome = Outcome::Tie;
            self.phase = Phase::Terminal;
            info!(outcome = ?self.outcome, "Game over");
        } else {
            self.current_turn = turn.other();
            self.phase = match self.current_turn {
                Turn::Player => Phase::AwaitingPlayerMove,
                Turn::Computer => Phase::AwaitingComputerMove,
            };
        }
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::with_difficulty(Difficulty::default())
    }
}
