//! Game session management for the HTTP front-end.
//!
//! Each browser gets its own [`GameController`], keyed by session id.
//! All work on a controller happens while the map lock is held, so requests
//! against one session are applied one at a time.
//!
//! Sessions idle for longer than the timeout are dropped, and once the cap is
//! reached the least recently used session makes room for a new one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tictac_core::{Difficulty, GameController};
use tracing::{debug, info, instrument};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Session used when a request does not name one.
pub const DEFAULT_SESSION: &str = "default";

/// Default cap on live sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Default idle time after which a session is dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug)]
struct Session {
    game: GameController,
    last_used: Instant,
    // Value of `Store::uses` at the last request, for LRU ordering.
    last_use: u64,
}

#[derive(Debug, Default)]
struct Store {
    games: HashMap<SessionId, Session>,
    uses: u64,
}

/// Manages all game sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    store: Arc<Mutex<Store>>,
    default_difficulty: Difficulty,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl SessionManager {
    /// Creates a session manager whose new games use `default_difficulty`,
    /// with the default session cap and idle timeout.
    pub fn new(default_difficulty: Difficulty) -> Self {
        Self::with_limits(default_difficulty, DEFAULT_MAX_SESSIONS, DEFAULT_IDLE_TIMEOUT)
    }

    /// Creates a session manager holding at most `max_sessions` games (at
    /// least one), each dropped after `idle_timeout` without a request.
    #[instrument]
    pub fn with_limits(
        default_difficulty: Difficulty,
        max_sessions: usize,
        idle_timeout: Duration,
    ) -> Self {
        info!("Creating session manager");
        Self {
            store: Arc::new(Mutex::new(Store::default())),
            default_difficulty,
            max_sessions: max_sessions.max(1),
            idle_timeout,
        }
    }

    /// Difficulty given to newly created sessions.
    pub fn default_difficulty(&self) -> Difficulty {
        self.default_difficulty
    }

    // A panic inside a controller call cannot leave a game half-updated in a
    // way later calls would trip over, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the session's controller, creating the session first if needed.
    #[instrument(skip(self, f))]
    pub fn with_session<T>(&self, id: &str, f: impl FnOnce(&mut GameController) -> T) -> T {
        let now = Instant::now();
        let mut store = self.lock();
        self.evict(&mut store.games, id, now);
        store.uses += 1;
        let last_use = store.uses;

        let session = store.games.entry(id.to_string()).or_insert_with(|| {
            info!(session_id = id, difficulty = %self.default_difficulty, "Creating new session");
            Session {
                game: GameController::with_difficulty(self.default_difficulty),
                last_used: now,
                last_use,
            }
        });
        session.last_used = now;
        session.last_use = last_use;
        f(&mut session.game)
    }

    /// Drops idle sessions, then the least recently used one if `id` would
    /// push the map past the cap.
    fn evict(&self, sessions: &mut HashMap<SessionId, Session>, id: &str, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, session| now.duration_since(session.last_used) < self.idle_timeout);
        if sessions.len() < before {
            debug!(expired = before - sessions.len(), "Dropped idle sessions");
        }

        if sessions.contains_key(id) || sessions.len() < self.max_sessions {
            return;
        }
        let oldest = sessions
            .iter()
            .min_by_key(|(_, session)| session.last_use)
            .map(|(key, _)| key.clone());
        if let Some(oldest) = oldest {
            sessions.remove(&oldest);
            info!(
                session_id = %oldest,
                cap = self.max_sessions,
                "Evicted least recently used session"
            );
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}
