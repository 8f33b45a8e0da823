//! Level configuration
//!
//! A level is two ordered lists of card descriptions. It carries no card
//! IDs; those are assigned by the generator when a game starts.

pub mod format;
pub mod generator;

pub use format::LevelFile;
pub use generator::generate_from_config;

use crate::core::{Position, Rank, Suit};
use serde::{Deserialize, Serialize};

/// Static description of one card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    pub rank: Rank,
    pub suit: Suit,
    pub position: Position,
}

impl CardConfig {
    pub fn new(rank: Rank, suit: Suit, position: Position) -> Self {
        CardConfig {
            rank,
            suit,
            position,
        }
    }
}

/// Initial contents of the playfield and the reserve stack
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub playfield: Vec<CardConfig>,
    /// Reserve cards, bottom first; the last one is dealt to the base stack
    pub stack: Vec<CardConfig>,
}

impl LevelConfig {
    pub fn new(playfield: Vec<CardConfig>, stack: Vec<CardConfig>) -> Self {
        LevelConfig { playfield, stack }
    }

    pub fn is_empty(&self) -> bool {
        self.playfield.is_empty() && self.stack.is_empty()
    }

    pub fn card_count(&self) -> usize {
        self.playfield.len() + self.stack.len()
    }
}
