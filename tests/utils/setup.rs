use axum::{body::Body, http::Request, response::Response, Router};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use deck_service::{api, AppState, SessionManager};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestApp {
    pub sessions: Arc<SessionManager>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_sessions(SessionManager::new())
    }

    pub fn with_sessions(sessions: SessionManager) -> Self {
        let sessions = Arc::new(sessions);
        let router = api::router(AppState::new(Arc::clone(&sessions)));
        Self { sessions, router }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// A path in the system temp dir that is unique to this process and test.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "deck-service-it-{}-{}",
        std::process::id(),
        name
    ))
}
