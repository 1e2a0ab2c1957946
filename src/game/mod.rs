// Public API
pub use cards::{Card, CardError, Suit, Value};
pub use deck::{Deck, DeckError, DeckRng, DECK_CAPACITY};

// Internal modules
pub mod cards;
mod deck;
