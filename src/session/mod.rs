// Public API - what other modules can use
pub use generators::{SecureSessionIdGenerator, SessionIdGenerator, SESSION_ID_BYTES};
pub use manager::SessionManager;
pub use models::Session;
pub use persistence::PersistenceError;
pub use repository::{InMemorySessionStore, SessionStore};

// Internal modules
mod generators;
mod manager;
mod models;
mod persistence;
pub mod repository;
