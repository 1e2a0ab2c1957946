// Public API - what other modules can use
pub use handlers::{deal_card, index, return_card, return_card_by_name, show_deck, shuffle_deck};
pub use session::{CurrentSession, SESSION_COOKIE};
pub use types::{CardPayload, ReturnCardQuery};

// Internal modules
mod handlers;
mod session;
mod types;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::shared::AppState;

/// Builds the deck routes around the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/cards", get(show_deck))
        .route("/cards/shuffle", post(shuffle_deck).get(shuffle_deck))
        .route("/cards/deal", post(deal_card).get(deal_card))
        .route("/cards/return", post(return_card).get(return_card_by_name))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
