// Library crate for the deck service
// This file exposes the public API for integration tests

pub mod api;
pub mod config;
pub mod game;
pub mod server;
pub mod session;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use game::{Card, CardError, Deck, DeckError, Suit, Value};
pub use session::{PersistenceError, Session, SessionManager, SessionStore};
pub use shared::{AppError, AppState};
