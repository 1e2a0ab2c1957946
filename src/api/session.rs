use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::session::Session;
use crate::shared::{AppError, AppState};

/// Name of the cookie carrying the session identifier.
pub const SESSION_COOKIE: &str = "session";

/// The caller's session, resolved from the `session` cookie.
///
/// A request without a usable cookie gets a brand-new session, and the
/// response produced through [`CurrentSession::respond`] carries a
/// `Set-Cookie` header for it.
pub struct CurrentSession {
    session: Arc<Session>,
    set_cookie: Option<HeaderValue>,
}

impl CurrentSession {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_new(&self) -> bool {
        self.set_cookie.is_some()
    }

    /// Turns a handler result into a response, attaching the session cookie when one was issued.
    pub fn respond<T: IntoResponse>(self, result: Result<T, AppError>) -> Response {
        let mut response = match result {
            Ok(body) => body.into_response(),
            Err(err) => err.into_response(),
        };
        if let Some(cookie) = self.set_cookie {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
        response
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(session_id) = session_cookie(&parts.headers) {
            return Ok(Self {
                session: state.sessions.get_or_create(&session_id),
                set_cookie: None,
            });
        }

        let session = state.sessions.create_session(None);
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; Max-Age={}",
            SESSION_COOKIE,
            session.id(),
            state.session_max_age
        );
        let set_cookie = HeaderValue::from_str(&cookie).map_err(|_| AppError::Internal)?;

        Ok(Self {
            session,
            set_cookie: Some(set_cookie),
        })
    }
}

/// Value of the first `session` cookie, if it can serve as a session id.
///
/// Ids are written to the snapshot file as whitespace-separated tokens, so
/// anything empty or containing non-printable or whitespace characters is ignored.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty() && value.chars().all(|c| c.is_ascii_graphic()))
        .map(str::to_string)
}
