//! Tic-tac-toe against a computer player that never loses.
//!
//! Game logic lives in [`tictac_core`]; this crate adds the front-ends:
//!
//! - **HTTP**: JSON API plus a single-page browser client, one game per session
//! - **TUI**: terminal game driven by the same controller
//! - **Config**: TOML file, `PORT` variable and CLI overrides
//!
//! # Example
//!
//! ```no_run
//! use tictac::{AppState, ServerConfig, SessionManager, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::default();
//! let app = router(AppState::new(SessionManager::new(*config.difficulty())));
//! let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod server;
mod session;
mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - HTTP API
pub use error::ApiError;
pub use server::{
    AppState, GameStateResponse, MoveRequest, ResetRequest, SESSION_COOKIE, SESSION_HEADER,
    SessionKey, router,
};

// Crate-level exports - Session management
pub use session::{
    DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_SESSIONS, DEFAULT_SESSION, SessionId, SessionManager,
};

// Crate-level exports - Terminal UI
pub use tui::{TUI_LOG_FILE, run_tui};

// Crate-level exports - Game types
pub use tictac_core::{
    Board, Difficulty, EngineError, GameController, GameError, Heuristic, IllegalMove, Mark,
    Minimax, MoveSelector, Outcome, Phase, Position, Snapshot, Square, Turn,
};
