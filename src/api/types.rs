use serde::{Deserialize, Serialize};

use crate::game::{Card, Suit, Value};
use crate::shared::AppError;

/// Request body for `POST /cards/return`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardPayload {
    pub value: String,
    pub suit: String,
}

impl CardPayload {
    /// Parses both fields, accepting long or short forms in any case.
    pub fn to_card(&self) -> Result<Card, AppError> {
        let value = Value::parse(&self.value)?;
        let suit = Suit::parse(&self.suit)?;
        Ok(Card::new(value, suit))
    }
}

/// Query string for `GET /cards/return?card=...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnCardQuery {
    pub card: Option<String>,
}
