//! Matching and victory rules

use crate::core::{Card, CardId};
use crate::game::GameState;

/// Two cards match when their ranks are adjacent, Ace/King wrapping around
///
/// Suit is never considered.
pub fn can_match(a: &Card, b: &Card) -> bool {
    a.rank.is_adjacent(b.rank)
}

/// The game is won once the playfield is empty
pub fn check_victory(game: &GameState) -> bool {
    game.playfield().is_empty()
}

/// Cards that can currently be activated to some effect
///
/// Playfield cards matching the base top come first, in playfield order,
/// followed by the reserve top if there is one.
pub fn legal_activations(game: &GameState) -> Vec<CardId> {
    let mut ids: Vec<CardId> = match game.base_top() {
        Some(base_top) => game
            .playfield()
            .iter()
            .filter(|card| can_match(card, base_top))
            .map(|card| card.id)
            .collect(),
        None => Vec::new(),
    };
    if let Some(reserve_top) = game.reserve_top() {
        ids.push(reserve_top.id);
    }
    ids
}
