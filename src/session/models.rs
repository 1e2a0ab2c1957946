use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::game::Deck;

/// A client's session: an opaque identifier bound to exactly one deck.
///
/// The deck sits behind its own mutex, so operations on different sessions
/// never contend with each other while operations on one session are serialized.
#[derive(Debug)]
pub struct Session {
    id: String,
    deck: Mutex<Deck>,
}

impl Session {
    pub fn new(id: impl Into<String>, deck: Deck) -> Self {
        Self {
            id: id.into(),
            deck: Mutex::new(deck),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Locks the deck for the duration of the returned guard.
    ///
    /// Every deck operation leaves the card list consistent before returning,
    /// so a poisoned lock still guards a valid deck.
    pub fn deck(&self) -> MutexGuard<'_, Deck> {
        self.deck.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access to the deck.
    pub fn with_deck<T>(&self, f: impl FnOnce(&mut Deck) -> T) -> T {
        let mut deck = self.deck();
        f(&mut *deck)
    }
}
