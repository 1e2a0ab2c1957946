pub mod basic;

pub use basic::{Card, CardError, Suit, Value};
