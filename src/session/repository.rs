use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::models::Session;

/// Backing map for the session registry
pub trait SessionStore: Send + Sync {
    fn get(&self, session_id: &str) -> Option<Arc<Session>>;

    /// Stores `session`, replacing any session with the same id.
    fn insert(&self, session: Arc<Session>);

    /// Stores `session` unless its id is already taken and returns whichever one is stored.
    fn get_or_insert(&self, session: Arc<Session>) -> Arc<Session>;

    /// All stored sessions, in no particular order.
    fn sessions(&self) -> Vec<Arc<Session>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory implementation of SessionStore
///
/// The map lock is only held for lookups and inserts; deck operations lock
/// the individual session instead.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a store with pre-populated sessions
    pub fn with_sessions(sessions: Vec<Session>) -> Self {
        let session_map = sessions
            .into_iter()
            .map(|session| (session.id().to_string(), Arc::new(session)))
            .collect();

        Self {
            sessions: RwLock::new(session_map),
        }
    }

    pub fn has_session(&self, session_id: &str) -> bool {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(session_id)
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, session_id: &str) -> Option<Arc<Session>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .cloned()
    }

    fn insert(&self, session: Arc<Session>) {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session.id().to_string(), session);
    }

    fn get_or_insert(&self, session: Arc<Session>) -> Arc<Session> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            sessions
                .entry(session.id().to_string())
                .or_insert(session),
        )
    }

    fn sessions(&self) -> Vec<Arc<Session>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Deck;

    #[test]
    fn test_insert_and_get() {
        let store = InMemorySessionStore::new();
        assert!(store.is_empty());

        store.insert(Arc::new(Session::new("abc", Deck::new())));

        assert_eq!(store.len(), 1);
        assert!(store.has_session("abc"));
        assert_eq!(store.get("abc").unwrap().id(), "abc");
        assert!(store.get("xyz").is_none());
    }

    #[test]
    fn test_insert_replaces_existing() {
        let store = InMemorySessionStore::new();
        store.insert(Arc::new(Session::new("abc", Deck::new())));
        store.insert(Arc::new(Session::new(
            "abc",
            Deck::deserialize("ahqs").unwrap(),
        )));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("abc").unwrap().deck().serialize(), "ahqs");
    }

    #[test]
    fn test_get_or_insert_keeps_first() {
        let store = InMemorySessionStore::new();
        let first = store.get_or_insert(Arc::new(Session::new(
            "abc",
            Deck::deserialize("ahqs").unwrap(),
        )));
        let second = store.get_or_insert(Arc::new(Session::new("abc", Deck::new())));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.deck().serialize(), "ahqs");
    }

    #[test]
    fn test_with_sessions() {
        let store = InMemorySessionStore::with_sessions(vec![
            Session::new("abc", Deck::new()),
            Session::new("xyz", Deck::new()),
        ]);

        let mut ids: Vec<String> = store.sessions().iter().map(|s| s.id().to_string()).collect();
        ids.sort();
        assert_eq!(ids, vec!["abc", "xyz"]);
    }
}
