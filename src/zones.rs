//! Card areas (Playfield, Base Stack, Reserve Stack)

use crate::core::{Card, CardId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Different areas where cards can exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Area {
    /// Cards that must be cleared to win; any member is actionable
    Playfield,
    /// Match target pile; only the top card matters
    BaseStack,
    /// Supply pile; only the top card is actionable
    ReserveStack,
}

impl Area {
    /// Canonical lookup precedence used throughout the engine
    pub const SEARCH_ORDER: [Area; 3] = [Area::Playfield, Area::BaseStack, Area::ReserveStack];

    /// Whether only the last element of this area is ever acted upon
    pub fn is_stack(&self) -> bool {
        matches!(self, Area::BaseStack | Area::ReserveStack)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Area::Playfield => "Playfield",
            Area::BaseStack => "BaseStack",
            Area::ReserveStack => "ReserveStack",
        };
        f.write_str(name)
    }
}

/// An ordered pile of cards; the last element is the top
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pile {
    /// Area this pile represents
    pub area: Area,

    cards: Vec<Card>,
}

impl Pile {
    pub fn new(area: Area) -> Self {
        Pile {
            area,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove a card by id, preserving the order of the rest
    pub fn remove(&mut self, card_id: CardId) -> Option<Card> {
        let pos = self.cards.iter().position(|c| c.id == card_id)?;
        // remove() rather than swap_remove(): playfield order is observable
        Some(self.cards.remove(pos))
    }

    pub fn get(&self, card_id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == card_id)
    }

    /// Look at top card without removing it
    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Take the top card
    pub fn pop_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|c| c.id)
    }

    /// Clear all cards
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}
