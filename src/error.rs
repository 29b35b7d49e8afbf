//! HTTP error responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tictac_core::GameError;
use tracing::{error, warn};

/// Error returned by an API handler.
#[derive(Debug, derive_more::Display)]
pub enum ApiError {
    /// The game rejected the request or the computer player failed.
    #[display("{}", _0)]
    Game(GameError),

    /// The request could not be understood.
    #[display("Invalid request: {}", _0)]
    BadRequest(String),
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Game(GameError::Illegal(_)) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Game(GameError::Engine(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        ApiError::Game(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, "Request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
