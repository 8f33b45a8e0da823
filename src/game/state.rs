//! Main game state structure
//!
//! Owns the three piles and the ID sequence. It knows nothing about rules;
//! the controller decides what moves are legal and calls into here.

use crate::core::{Card, CardId, IdSequence};
use crate::game::GameLogger;
use crate::zones::{Area, Pile};
use crate::{Result, SolitaireError};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    playfield: Pile,

    base_stack: Pile,

    reserve_stack: Pile,

    /// ID generator; only reset together with the piles
    ids: IdSequence,

    /// Centralized logger for game events
    #[serde(skip)]
    pub logger: GameLogger,
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            playfield: Pile::new(Area::Playfield),
            base_stack: Pile::new(Area::BaseStack),
            reserve_stack: Pile::new(Area::ReserveStack),
            ids: IdSequence::new(),
            logger: GameLogger::new(),
        }
    }

    pub fn with_logger(logger: GameLogger) -> Self {
        GameState {
            logger,
            ..Self::new()
        }
    }

    /// Get next card ID
    pub fn next_card_id(&mut self) -> CardId {
        self.ids.next_id()
    }

    pub fn pile(&self, area: Area) -> &Pile {
        match area {
            Area::Playfield => &self.playfield,
            Area::BaseStack => &self.base_stack,
            Area::ReserveStack => &self.reserve_stack,
        }
    }

    fn pile_mut(&mut self, area: Area) -> &mut Pile {
        match area {
            Area::Playfield => &mut self.playfield,
            Area::BaseStack => &mut self.base_stack,
            Area::ReserveStack => &mut self.reserve_stack,
        }
    }

    pub fn playfield(&self) -> &Pile {
        &self.playfield
    }

    pub fn base_stack(&self) -> &Pile {
        &self.base_stack
    }

    pub fn reserve_stack(&self) -> &Pile {
        &self.reserve_stack
    }

    /// Append a card to an area
    pub fn add_card(&mut self, area: Area, card: Card) {
        self.pile_mut(area).add(card);
    }

    /// Remove a card from an area and hand it back
    pub fn take_card(&mut self, area: Area, card_id: CardId) -> Option<Card> {
        self.pile_mut(area).remove(card_id)
    }

    /// Remove a card from an area; false if it was not there
    pub fn remove_card(&mut self, area: Area, card_id: CardId) -> bool {
        self.take_card(area, card_id).is_some()
    }

    /// Find a card in Playfield, then BaseStack, then ReserveStack
    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        Area::SEARCH_ORDER
            .iter()
            .find_map(|&area| self.pile(area).get(card_id))
    }

    /// Same as [`GameState::card`], but a miss is an error
    pub fn get_card(&self, card_id: CardId) -> Result<&Card> {
        self.card(card_id)
            .ok_or(SolitaireError::EntityNotFound(card_id.as_u32()))
    }

    /// Which area currently holds the card
    pub fn locate(&self, card_id: CardId) -> Option<Area> {
        Area::SEARCH_ORDER
            .iter()
            .copied()
            .find(|&area| self.pile(area).contains(card_id))
    }

    /// Top card of a stack area; the playfield has no top
    pub fn top(&self, area: Area) -> Option<&Card> {
        if area.is_stack() {
            self.pile(area).peek_top()
        } else {
            None
        }
    }

    pub fn base_top(&self) -> Option<&Card> {
        self.base_stack.peek_top()
    }

    pub fn reserve_top(&self) -> Option<&Card> {
        self.reserve_stack.peek_top()
    }

    /// Move the reserve top onto the base stack without touching positions
    ///
    /// Used to deal the opening base card.
    pub fn deal_reserve_to_base(&mut self) -> Option<CardId> {
        let card = self.reserve_stack.pop_top()?;
        let id = card.id;
        self.base_stack.add(card);
        Some(id)
    }

    pub fn card_count(&self) -> usize {
        self.playfield.len() + self.base_stack.len() + self.reserve_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.card_count() == 0
    }

    /// Empty all piles and restart the ID sequence
    ///
    /// Any undo log referring to the old cards must be cleared alongside.
    pub fn clear(&mut self) {
        self.playfield.clear();
        self.base_stack.clear();
        self.reserve_stack.clear();
        self.ids.reset();
        self.logger.verbose("Game state cleared");
    }

    /// Check that every card ID lives in exactly one pile
    pub fn check_partition(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for area in Area::SEARCH_ORDER {
            for id in self.pile(area).ids() {
                if !seen.insert(id) {
                    return Err(SolitaireError::InvalidLevel(format!(
                        "card {id} appears more than once (again in {area})"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
