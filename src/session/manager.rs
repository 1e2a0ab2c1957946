use std::sync::Arc;

use super::{
    generators::{SecureSessionIdGenerator, SessionIdGenerator},
    models::Session,
    repository::{InMemorySessionStore, SessionStore},
};
use crate::game::Deck;

/// Registry of client sessions, one deck per session.
///
/// Lookups are self-populating: asking for an unknown id creates a session
/// with a fresh deck rather than failing. Sessions are never evicted.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    id_generator: Arc<dyn SessionIdGenerator>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    /// Creates an empty registry backed by an in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemorySessionStore::new()))
    }

    pub fn with_store(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            id_generator: Arc::new(SecureSessionIdGenerator::new()),
        }
    }

    /// Replaces the identifier source, mostly for tests that need predictable ids.
    pub fn with_id_generator(mut self, id_generator: Arc<dyn SessionIdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    /// Binds a brand-new full deck to `session_id`, or to a freshly generated
    /// identifier when none is given. An existing session with the same id is replaced.
    pub fn create_session(&self, session_id: Option<&str>) -> Arc<Session> {
        let id = match session_id {
            Some(id) => id.to_string(),
            None => self.id_generator.generate(),
        };

        let session = Arc::new(Session::new(id, Deck::new()));
        self.store.insert(Arc::clone(&session));
        session
    }

    /// Returns the live session for `session_id`, creating it on first contact.
    pub fn get_or_create(&self, session_id: &str) -> Arc<Session> {
        if let Some(session) = self.store.get(session_id) {
            return session;
        }

        // Concurrent first contacts race here; the store keeps exactly one of them.
        self.store
            .get_or_insert(Arc::new(Session::new(session_id, Deck::new())))
    }

    pub fn get(&self, session_id: &str) -> Option<Arc<Session>> {
        self.store.get(session_id)
    }

    pub fn sessions(&self) -> Vec<Arc<Session>> {
        self.store.sessions()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
