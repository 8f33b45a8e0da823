//! Builds the initial game state from a level configuration

use crate::core::Card;
use crate::game::GameState;
use crate::level::{CardConfig, LevelConfig};
use crate::zones::Area;
use crate::{Result, SolitaireError};

/// Populate `game` from `config`
///
/// Reserve cards get IDs `0..stack.len()` in configuration order, then the
/// reserve top is dealt onto the base stack. Playfield cards continue the
/// same sequence. An empty configuration is rejected before `game` is
/// touched.
pub fn generate_from_config(config: &LevelConfig, game: &mut GameState) -> Result<()> {
    if config.is_empty() {
        game.logger.minimal("Level has no cards, game not generated");
        return Err(SolitaireError::EmptyLevel);
    }

    game.clear();

    for card_cfg in &config.stack {
        let card = instantiate(game, card_cfg);
        game.logger.verbose(&format!("Reserve card {card} at {}", card.position));
        game.add_card(Area::ReserveStack, card);
    }

    match game.deal_reserve_to_base() {
        Some(id) => game
            .logger
            .verbose(&format!("Dealt card {id} from reserve to base stack")),
        None => game
            .logger
            .normal("No reserve cards, base stack starts empty"),
    }

    for card_cfg in &config.playfield {
        let card = instantiate(game, card_cfg);
        game.logger.verbose(&format!("Playfield card {card} at {}", card.position));
        game.add_card(Area::Playfield, card);
    }

    game.logger.normal(&format!(
        "Generated level: {} playfield, {} base, {} reserve",
        game.playfield().len(),
        game.base_stack().len(),
        game.reserve_stack().len()
    ));

    Ok(())
}

fn instantiate(game: &mut GameState, card_cfg: &CardConfig) -> Card {
    let id = game.next_card_id();
    let mut card = Card::new(id, card_cfg.rank, card_cfg.suit, card_cfg.position);
    card.flip_up();
    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardId, Position, Rank, Suit};

    fn cfg(rank: u8, suit: Suit) -> CardConfig {
        CardConfig::new(Rank::new(rank).unwrap(), suit, Position::new(rank as f32, 0.0))
    }

    #[test]
    fn test_id_assignment() {
        let config = LevelConfig::new(
            vec![cfg(1, Suit::Hearts), cfg(2, Suit::Hearts)],
            vec![cfg(7, Suit::Clubs), cfg(8, Suit::Clubs), cfg(9, Suit::Clubs)],
        );
        let mut game = GameState::new();
        generate_from_config(&config, &mut game).unwrap();

        let reserve: Vec<u32> = game.reserve_stack().ids().map(|id| id.as_u32()).collect();
        let base: Vec<u32> = game.base_stack().ids().map(|id| id.as_u32()).collect();
        let playfield: Vec<u32> = game.playfield().ids().map(|id| id.as_u32()).collect();

        assert_eq!(reserve, vec![0, 1]);
        assert_eq!(base, vec![2]);
        assert_eq!(playfield, vec![3, 4]);
        assert!(game
            .playfield()
            .iter()
            .chain(game.base_stack().iter())
            .all(|c| c.face_up && !c.removed));
        game.check_partition().unwrap();
    }

    #[test]
    fn test_empty_reserve_skips_deal() {
        let config = LevelConfig::new(vec![cfg(4, Suit::Spades)], vec![]);
        let mut game = GameState::new();
        generate_from_config(&config, &mut game).unwrap();

        assert!(game.base_stack().is_empty());
        assert!(game.reserve_stack().is_empty());
        assert_eq!(game.playfield().ids().next(), Some(CardId::new(0)));
    }

    #[test]
    fn test_empty_config_leaves_state_unchanged() {
        let mut game = GameState::new();
        let seeded = LevelConfig::new(vec![cfg(4, Suit::Spades)], vec![cfg(5, Suit::Spades)]);
        generate_from_config(&seeded, &mut game).unwrap();

        let err = generate_from_config(&LevelConfig::default(), &mut game).unwrap_err();
        assert!(matches!(err, SolitaireError::EmptyLevel));
        assert_eq!(game.card_count(), 2);
    }

    #[test]
    fn test_regeneration_restarts_ids() {
        let config = LevelConfig::new(vec![cfg(4, Suit::Spades)], vec![cfg(5, Suit::Spades)]);
        let mut game = GameState::new();
        generate_from_config(&config, &mut game).unwrap();
        generate_from_config(&config, &mut game).unwrap();

        assert_eq!(game.card_count(), 2);
        assert_eq!(game.base_top().map(|c| c.id), Some(CardId::new(0)));
        assert_eq!(game.playfield().ids().next(), Some(CardId::new(1)));
    }
}
