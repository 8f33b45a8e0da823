//! Read-only view of game state
//!
//! Presenters and automatic players inspect the game through this view;
//! only the controller may mutate the state.

use crate::core::{Card, CardId};
use crate::game::{rules, GameState};
use crate::zones::Area;

pub struct GameStateView<'a> {
    game: &'a GameState,
}

impl<'a> GameStateView<'a> {
    pub fn new(game: &'a GameState) -> Self {
        GameStateView { game }
    }

    pub fn playfield(&self) -> &'a [Card] {
        self.game.playfield().cards()
    }

    pub fn base_stack(&self) -> &'a [Card] {
        self.game.base_stack().cards()
    }

    pub fn reserve_stack(&self) -> &'a [Card] {
        self.game.reserve_stack().cards()
    }

    pub fn base_top(&self) -> Option<&'a Card> {
        self.game.base_top()
    }

    pub fn reserve_top(&self) -> Option<&'a Card> {
        self.game.reserve_top()
    }

    pub fn card(&self, card_id: CardId) -> Option<&'a Card> {
        self.game.card(card_id)
    }

    pub fn locate(&self, card_id: CardId) -> Option<Area> {
        self.game.locate(card_id)
    }

    pub fn card_count(&self) -> usize {
        self.game.card_count()
    }

    pub fn is_won(&self) -> bool {
        rules::check_victory(self.game)
    }

    pub fn legal_activations(&self) -> Vec<CardId> {
        rules::legal_activations(self.game)
    }

    /// Multi-line text rendering used by the CLI
    pub fn render(&self) -> String {
        let line = |label: &str, cards: &[Card]| {
            let body: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
            format!("{label:<9} [{}]", body.join(" "))
        };
        [
            line("Playfield", self.playfield()),
            line("Base", self.base_stack()),
            line("Reserve", self.reserve_stack()),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Position, Rank, Suit};

    #[test]
    fn test_view_render() {
        let mut game = GameState::new();
        game.add_card(
            Area::Playfield,
            Card::new(CardId::new(2), Rank::new(5).unwrap(), Suit::Hearts, Position::default()),
        );
        game.add_card(
            Area::BaseStack,
            Card::new(CardId::new(1), Rank::KING, Suit::Spades, Position::default()),
        );

        let view = GameStateView::new(&game);
        assert_eq!(view.card_count(), 2);
        assert!(!view.is_won());
        assert_eq!(view.locate(CardId::new(1)), Some(Area::BaseStack));

        let text = view.render();
        assert!(text.contains("Playfield [6♥#2]"));
        assert!(text.contains("Base      [K♠#1]"));
        assert!(text.contains("Reserve   []"));
    }
}
