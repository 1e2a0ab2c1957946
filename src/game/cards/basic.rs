use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("could not parse '{0}' as suit")]
    InvalidSuit(String),
    #[error("could not parse '{0}' as card value")]
    InvalidValue(String),
    #[error("unexpected card format '{0}'")]
    InvalidFormat(String),
}

/// Suits in deck-initialization order: clubs, hearts, diamonds, spades.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Clubs = 0,
    Hearts = 1,
    Diamonds = 2,
    Spades = 3,
}

impl Suit {
    /// Parses either the long ("clubs") or the short ("c") form, ignoring case.
    pub fn parse(s: &str) -> Result<Self, CardError> {
        match s.to_lowercase().as_str() {
            "c" | "clubs" => Ok(Suit::Clubs),
            "h" | "hearts" => Ok(Suit::Hearts),
            "d" | "diamonds" => Ok(Suit::Diamonds),
            "s" | "spades" => Ok(Suit::Spades),
            _ => Err(CardError::InvalidSuit(s.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Suit::Clubs => "clubs",
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Spades => "spades",
        }
    }

    /// Single character code used by the persisted deck format.
    pub fn short_string(&self) -> &'static str {
        match self {
            Suit::Clubs => "c",
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Spades => "s",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Suit {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Suit::parse(s)
    }
}

/// Face values, ace low.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Ace = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
    Nine = 8,
    Ten = 9,
    Jack = 10,
    Queen = 11,
    King = 12,
}

impl Value {
    /// Parses either the long ("queen") or the short ("q") form, ignoring case.
    pub fn parse(s: &str) -> Result<Self, CardError> {
        match s.to_lowercase().as_str() {
            "a" | "ace" => Ok(Value::Ace),
            "2" | "two" => Ok(Value::Two),
            "3" | "three" => Ok(Value::Three),
            "4" | "four" => Ok(Value::Four),
            "5" | "five" => Ok(Value::Five),
            "6" | "six" => Ok(Value::Six),
            "7" | "seven" => Ok(Value::Seven),
            "8" | "eight" => Ok(Value::Eight),
            "9" | "nine" => Ok(Value::Nine),
            "t" | "ten" => Ok(Value::Ten),
            "j" | "jack" => Ok(Value::Jack),
            "q" | "queen" => Ok(Value::Queen),
            "k" | "king" => Ok(Value::King),
            _ => Err(CardError::InvalidValue(s.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Value::Ace => "ace",
            Value::Two => "two",
            Value::Three => "three",
            Value::Four => "four",
            Value::Five => "five",
            Value::Six => "six",
            Value::Seven => "seven",
            Value::Eight => "eight",
            Value::Nine => "nine",
            Value::Ten => "ten",
            Value::Jack => "jack",
            Value::Queen => "queen",
            Value::King => "king",
        }
    }

    pub fn short_string(&self) -> &'static str {
        match self {
            Value::Ace => "a",
            Value::Two => "2",
            Value::Three => "3",
            Value::Four => "4",
            Value::Five => "5",
            Value::Six => "6",
            Value::Seven => "7",
            Value::Eight => "8",
            Value::Nine => "9",
            Value::Ten => "t",
            Value::Jack => "j",
            Value::Queen => "q",
            Value::King => "k",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Value {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Value::parse(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Card {
    pub value: Value,
    pub suit: Suit,
}

impl Card {
    pub fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// Parses a card from its long ("ace of diamonds") or short ("ad") form.
    pub fn parse(s: &str) -> Result<Self, CardError> {
        let lowered = s.to_lowercase();

        let tokens: Vec<&str> = lowered.split(" of ").collect();
        let (value, suit) = if tokens.len() == 2 {
            (tokens[0].to_string(), tokens[1].to_string())
        } else {
            let chars: Vec<char> = lowered.chars().collect();
            if chars.len() != 2 {
                return Err(CardError::InvalidFormat(s.to_string()));
            }
            (chars[0].to_string(), chars[1].to_string())
        };

        Ok(Self::new(Value::parse(&value)?, Suit::parse(&suit)?))
    }

    /// Two character form, e.g. "qs" for the queen of spades.
    pub fn short_string(&self) -> String {
        format!("{}{}", self.value.short_string(), self.suit.short_string())
    }

    /// All 52 cards, suit-major then value-minor.
    pub fn all_cards() -> Vec<Card> {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::iter() {
            for value in Value::iter() {
                cards.push(Card::new(value, suit));
            }
        }
        cards
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.value, self.suit)
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Card::parse(s)
    }
}
