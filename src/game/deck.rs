use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use thiserror::Error;

use super::cards::Card;

/// Number of distinct cards; a deck never holds more.
pub const DECK_CAPACITY: usize = 52;

/// Random source owned by a single deck.
pub type DeckRng = Box<dyn RngCore + Send>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("the deck is empty")]
    Empty,
    #[error("the deck is full")]
    Full,
    #[error("the card '{0}' already exists in the deck")]
    DuplicateCard(Card),
    #[error("invalid serialized deck '{input}': {reason}")]
    Format { input: String, reason: String },
}

impl DeckError {
    fn format(input: &str, reason: impl Into<String>) -> Self {
        DeckError::Format {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// An ordered, duplicate-free pile of cards. The front of the pile is the top of the deck.
pub struct Deck {
    cards: Vec<Card>,
    rng: DeckRng,
}

impl Deck {
    /// Creates a full deck in canonical order with an OS-seeded shuffle source.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates a full deck in canonical order that shuffles with `rng`.
    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            cards: Card::all_cards(),
            rng: Box::new(rng),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    /// Removes the top card and returns it.
    pub fn deal_card(&mut self) -> Result<Card, DeckError> {
        if self.cards.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(self.cards.remove(0))
    }

    /// Puts `card` at the bottom of the deck.
    pub fn return_card(&mut self, card: Card) -> Result<(), DeckError> {
        if self.cards.len() >= DECK_CAPACITY {
            return Err(DeckError::Full);
        }
        if self.contains(&card) {
            return Err(DeckError::DuplicateCard(card));
        }
        self.cards.push(card);
        Ok(())
    }

    /// Fisher-Yates shuffle driven by the rng this deck was created with.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(self.rng.as_mut());
    }

    /// Concatenated short forms, e.g. "ahqs3djstc" for five cards.
    pub fn serialize(&self) -> String {
        self.cards.iter().map(Card::short_string).collect()
    }

    pub fn deserialize(s: &str) -> Result<Self, DeckError> {
        Self::deserialize_with_rng(s, StdRng::from_os_rng())
    }

    pub fn deserialize_with_rng(
        s: &str,
        rng: impl RngCore + Send + 'static,
    ) -> Result<Self, DeckError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.is_empty() || chars.len() % 2 != 0 {
            return Err(DeckError::format(
                s,
                format!("length {} is not a positive even number", chars.len()),
            ));
        }
        if chars.len() / 2 > DECK_CAPACITY {
            return Err(DeckError::format(
                s,
                format!("more than {} cards", DECK_CAPACITY),
            ));
        }

        let mut cards = Vec::with_capacity(chars.len() / 2);
        for pair in chars.chunks(2) {
            let code: String = pair.iter().collect();
            let card = Card::parse(&code).map_err(|e| DeckError::format(s, e.to_string()))?;
            if cards.contains(&card) {
                return Err(DeckError::format(s, format!("card '{}' appears twice", code)));
            }
            cards.push(card);
        }

        Ok(Self {
            cards,
            rng: Box::new(rng),
        })
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deck").field("cards", &self.cards).finish()
    }
}

impl PartialEq for Deck {
    fn eq(&self, other: &Self) -> bool {
        self.cards == other.cards
    }
}

impl Eq for Deck {}
