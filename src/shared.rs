use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::game::{CardError, DeckError};
use crate::session::SessionManager;

/// Default lifetime of the session cookie, in seconds.
pub const DEFAULT_SESSION_MAX_AGE: u64 = 3600;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub session_max_age: u64,
}

impl AppState {
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self {
            sessions,
            session_max_age: DEFAULT_SESSION_MAX_AGE,
        }
    }

    pub fn with_session_max_age(mut self, seconds: u64) -> Self {
        self.session_max_age = seconds;
        self
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Card(#[from] CardError),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Card(_) => StatusCode::BAD_REQUEST,
            AppError::Deck(DeckError::Format { .. }) => StatusCode::BAD_REQUEST,
            AppError::Deck(_) => StatusCode::CONFLICT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
