//! JSON HTTP API for the browser front-end.
//!
//! | Route          | Effect                                        |
//! |----------------|-----------------------------------------------|
//! | `GET /`        | Serves the game page and resets the session   |
//! | `GET /health`  | Readiness probe                               |
//! | `GET /state`   | Current game state                            |
//! | `POST /reset`  | New game; `firstPlayer` is `"X"` or `"O"`     |
//! | `POST /move`   | Player move at `index`, plus computer reply   |
//!
//! A session is named by the `x-session-id` header, else by the
//! `tictac_session` cookie that `GET /` hands to new visitors. Requests
//! naming neither share the `"default"` session.

use crate::error::ApiError;
use crate::session::{DEFAULT_SESSION, SessionId, SessionManager};
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, Request, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tictac_core::{Difficulty, Mark, Outcome, Snapshot, Turn};
use tower::ServiceBuilder;
use tracing::{debug, info, instrument};

/// Header naming the caller's game session.
pub const SESSION_HEADER: &str = "x-session-id";

/// Cookie naming the caller's game session when the header is absent.
pub const SESSION_COOKIE: &str = "tictac_session";

const MAX_SESSION_ID_LEN: usize = 128;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Shared state for all handlers.
#[derive(Debug, Clone, new)]
pub struct AppState {
    sessions: SessionManager,
}

/// Session id taken from the request headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKey(pub SessionId);

impl<S: Send + Sync> FromRequestParts<S> for SessionKey {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = requested_session(&parts.headers)?;
        Ok(Self(id.unwrap_or_else(|| DEFAULT_SESSION.to_string())))
    }
}

/// Session named by the request: the header first, then the cookie.
fn requested_session(headers: &HeaderMap) -> Result<Option<SessionId>, ApiError> {
    if let Some(value) = headers.get(SESSION_HEADER) {
        let id = value
            .to_str()
            .map_err(|_| ApiError::BadRequest("session id must be visible ASCII".to_string()))?;
        if let Some(id) = checked_session_id(id)? {
            return Ok(Some(id));
        }
    }

    let cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE);
    match cookie {
        Some((_, id)) => checked_session_id(id),
        None => Ok(None),
    }
}

fn checked_session_id(id: &str) -> Result<Option<SessionId>, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        Ok(None)
    } else if id.len() > MAX_SESSION_ID_LEN {
        Err(ApiError::BadRequest(format!(
            "session id longer than {} characters",
            MAX_SESSION_ID_LEN
        )))
    } else {
        Ok(Some(id.to_string()))
    }
}

fn new_session_id() -> SessionId {
    format!("{:032x}", rand::random::<u128>())
}

/// Body of `POST /reset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    /// Who moves first: `"X"` for the player, `"O"` for the computer.
    #[serde(default = "default_first_player")]
    pub first_player: Mark,
    /// Optional new difficulty for this session.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

fn default_first_player() -> Mark {
    Mark::X
}

/// Body of `POST /move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Board index, 0-8 in row-major order.
    pub index: usize,
}

/// Game state as sent to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateResponse {
    /// Nine cells: `" "`, `"X"` or `"O"`.
    pub board: Vec<String>,
    /// Mark of the side to move.
    pub current_player: Mark,
    /// Side to move.
    pub current_turn: Turn,
    /// Result so far.
    pub outcome: Outcome,
    /// Winning mark, if any.
    pub winner: Option<Mark>,
    /// True once the game has a result.
    pub game_over: bool,
    /// Index the computer played during this request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computer_move: Option<usize>,
    /// Computer strength for this session.
    pub difficulty: Difficulty,
}

impl GameStateResponse {
    /// Builds the wire view of a controller snapshot.
    pub fn from_snapshot(snapshot: &Snapshot, difficulty: Difficulty) -> Self {
        let winner = match snapshot.outcome {
            Outcome::PlayerWon => Some(Mark::X),
            Outcome::ComputerWon => Some(Mark::O),
            Outcome::InProgress | Outcome::Tie => None,
        };
        Self {
            board: snapshot
                .board
                .squares()
                .iter()
                .map(|square| square.symbol().to_string())
                .collect(),
            current_player: snapshot.current_turn.mark(),
            current_turn: snapshot.current_turn,
            outcome: snapshot.outcome,
            winner,
            game_over: snapshot.outcome.is_over(),
            computer_move: snapshot.computer_move.map(|pos| pos.to_index()),
            difficulty,
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/state", get(get_state))
        .route("/reset", post(reset))
        .route("/move", post(make_move))
        .layer(ServiceBuilder::new().map_request(log_request))
        .with_state(state)
}

fn log_request(req: Request<Body>) -> Request<Body> {
    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

#[instrument(skip(state, headers))]
async fn index(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, ApiError> {
    let (session_id, issued) = match requested_session(&headers)? {
        Some(id) => (id, false),
        None => (new_session_id(), true),
    };
    state
        .sessions
        .with_session(&session_id, |game| game.reset(Turn::Player))?;

    let mut response = Html(INDEX_HTML).into_response();
    if issued {
        info!(session_id = %session_id, "Issued session cookie");
        let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, session_id);
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| ApiError::BadRequest(format!("unusable session cookie: {}", e)))?;
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    Ok(response)
}

async fn health() -> &'static str {
    "ok"
}

#[instrument(skip(state))]
async fn get_state(
    State(state): State<AppState>,
    SessionKey(session_id): SessionKey,
) -> Json<GameStateResponse> {
    let response = state.sessions.with_session(&session_id, |game| {
        GameStateResponse::from_snapshot(&game.snapshot(), game.difficulty())
    });
    Json(response)
}

#[instrument(skip(state, payload))]
async fn reset(
    State(state): State<AppState>,
    SessionKey(session_id): SessionKey,
    payload: Result<Json<ResetRequest>, JsonRejection>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let Json(req) = payload?;
    info!(session_id = %session_id, first_player = ?req.first_player, "Resetting game");

    let response = state.sessions.with_session(&session_id, |game| {
        if let Some(difficulty) = req.difficulty {
            game.set_difficulty(difficulty);
        }
        let snapshot = game.reset(req.first_player.turn())?;
        Ok::<_, ApiError>(GameStateResponse::from_snapshot(&snapshot, game.difficulty()))
    })?;
    Ok(Json(response))
}

#[instrument(skip(state, payload))]
async fn make_move(
    State(state): State<AppState>,
    SessionKey(session_id): SessionKey,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let Json(req) = payload?;
    debug!(session_id = %session_id, index = req.index, "Processing move");

    let response = state.sessions.with_session(&session_id, |game| {
        let snapshot = game.submit_player_move(req.index)?;
        Ok::<_, ApiError>(GameStateResponse::from_snapshot(&snapshot, game.difficulty()))
    })?;

    info!(
        session_id = %session_id,
        index = req.index,
        computer_move = ?response.computer_move,
        outcome = ?response.outcome,
        "Move completed"
    );
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictac_core::{Board, Phase, Position};

    #[test]
    fn test_response_uses_space_for_empty_cells() {
        let snapshot = Snapshot {
            board: Board::from_marks("X   O    ").expect("valid board"),
            current_turn: Turn::Player,
            outcome: Outcome::InProgress,
            phase: Phase::AwaitingPlayerMove,
            computer_move: Some(Position::Center),
        };
        let response = GameStateResponse::from_snapshot(&snapshot, Difficulty::Unbeatable);
        assert_eq!(response.board, vec!["X", " ", " ", " ", "O", " ", " ", " ", " "]);
        assert_eq!(response.current_player, Mark::X);
        assert_eq!(response.computer_move, Some(4));
        assert!(!response.game_over);
    }

    #[test]
    fn test_response_json_shape() {
        let snapshot = Snapshot {
            board: Board::from_marks("XXXOO    ").expect("valid board"),
            current_turn: Turn::Player,
            outcome: Outcome::PlayerWon,
            phase: Phase::Terminal,
            computer_move: None,
        };
        let json = serde_json::to_value(GameStateResponse::from_snapshot(
            &snapshot,
            Difficulty::Casual,
        ))
        .expect("serialize");
        assert_eq!(json["currentPlayer"], "X");
        assert_eq!(json["winner"], "X");
        assert_eq!(json["gameOver"], true);
        assert_eq!(json["outcome"], "playerWon");
        assert_eq!(json["difficulty"], "casual");
        assert!(json.get("computerMove").is_none());
    }

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_str(value).expect("header value"));
        }
        map
    }

    #[test]
    fn test_header_wins_over_cookie() {
        let map = headers(&[(SESSION_HEADER, "tab-1"), ("cookie", "tictac_session=browser")]);
        assert_eq!(requested_session(&map).expect("valid"), Some("tab-1".to_string()));
    }

    #[test]
    fn test_cookie_names_session_without_header() {
        let map = headers(&[("cookie", "theme=dark; tictac_session=abc123")]);
        assert_eq!(requested_session(&map).expect("valid"), Some("abc123".to_string()));
        assert_eq!(requested_session(&HeaderMap::new()).expect("valid"), None);
    }

    #[test]
    fn test_oversized_session_id_is_rejected() {
        let long = "x".repeat(MAX_SESSION_ID_LEN + 1);
        assert!(requested_session(&headers(&[(SESSION_HEADER, long.as_str())])).is_err());
    }

    #[test]
    fn test_new_session_ids_differ() {
        assert_ne!(new_session_id(), new_session_id());
    }

    #[test]
    fn test_reset_request_defaults_to_player_first() {
        let req: ResetRequest = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(req.first_player, Mark::X);
        assert_eq!(req.difficulty, None);

        let req: ResetRequest =
            serde_json::from_str(r#"{"firstPlayer":"O","difficulty":"casual"}"#)
                .expect("deserialize");
        assert_eq!(req.first_player, Mark::O);
        assert_eq!(req.difficulty, Some(Difficulty::Casual));
    }
}
