//! Card types and definitions

use crate::core::CardId;
use crate::{Result, SolitaireError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of distinct ranks (Ace through King)
pub const NUM_RANKS: u8 = 13;

/// Card rank, 0 = Ace through 12 = King
///
/// Ranks are cyclic for matching purposes: King is adjacent to Ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(0);
    pub const KING: Rank = Rank(12);

    pub fn new(value: u8) -> Option<Self> {
        (value < NUM_RANKS).then_some(Rank(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// True if the two ranks differ by exactly one, with Ace/King wraparound
    pub fn is_adjacent(&self, other: Rank) -> bool {
        let diff = self.0.abs_diff(other.0);
        diff == 1 || diff == NUM_RANKS - 1
    }

    fn symbol(&self) -> &'static str {
        const SYMBOLS: [&str; NUM_RANKS as usize] =
            ["A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K"];
        SYMBOLS[self.0 as usize]
    }
}

impl TryFrom<u8> for Rank {
    type Error = SolitaireError;

    fn try_from(value: u8) -> Result<Self> {
        Rank::new(value).ok_or_else(|| {
            SolitaireError::InvalidLevel(format!("rank {value} out of range 0..=12"))
        })
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> u8 {
        rank.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Card suit. Purely cosmetic, never consulted by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

impl TryFrom<u8> for Suit {
    type Error = SolitaireError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Suit::Clubs),
            1 => Ok(Suit::Diamonds),
            2 => Ok(Suit::Hearts),
            3 => Ok(Suit::Spades),
            _ => Err(SolitaireError::InvalidLevel(format!(
                "suit {value} out of range 0..=3"
            ))),
        }
    }
}

impl From<Suit> for u8 {
    fn from(suit: Suit) -> u8 {
        suit as u8
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
        };
        f.write_str(symbol)
    }
}

/// 2D layout coordinate supplied by the level and restored by undo
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Represents a card in the game
///
/// The ID is fixed at creation; everything else is runtime state that the
/// game state and controller update as the card moves between piles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique ID for this card instance
    pub id: CardId,

    pub rank: Rank,

    pub suit: Suit,

    pub face_up: bool,

    /// Lifecycle flag; no rule reads it yet
    pub removed: bool,

    /// Current layout position
    pub position: Position,
}

impl Card {
    pub fn new(id: CardId, rank: Rank, suit: Suit, position: Position) -> Self {
        Card {
            id,
            rank,
            suit,
            face_up: false,
            removed: false,
            position,
        }
    }

    pub fn flip_up(&mut self) {
        self.face_up = true;
    }

    pub fn flip_down(&mut self) {
        self.face_up = false;
    }

    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}#{}", self.rank, self.suit, self.id)
    }
}
