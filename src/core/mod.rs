//! Core card types and identifiers

pub mod card;
pub mod entity;

pub use card::{Card, Position, Rank, Suit, NUM_RANKS};
pub use entity::{CardId, IdSequence};
