//! Automatic players
//!
//! A player inspects a read-only view and picks one of the actions the
//! game loop offers. Used for headless play, the `auto` CLI command and
//! benchmarks.

use crate::core::CardId;
use crate::game::GameStateView;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Actions a player can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Activate(CardId),
    Undo,
}

/// Player trait
pub trait Player {
    /// Short name for logging
    fn name(&self) -> &str;

    /// Choose one of `available`, or None to stop playing
    fn choose_action(
        &mut self,
        view: &GameStateView,
        available: &[PlayerAction],
    ) -> Option<PlayerAction>;
}

/// Always takes the first available action
///
/// Legal activations list matches before the reserve draw, so this player
/// greedily clears the playfield and only draws when stuck.
#[derive(Debug, Default)]
pub struct ZeroPlayer;

impl Player for ZeroPlayer {
    fn name(&self) -> &str {
        "zero"
    }

    fn choose_action(
        &mut self,
        _view: &GameStateView,
        available: &[PlayerAction],
    ) -> Option<PlayerAction> {
        available.first().copied()
    }
}

/// Picks uniformly among available actions
pub struct RandomPlayer {
    rng: ChaCha12Rng,
}

impl RandomPlayer {
    /// Seeded for deterministic replays
    pub fn with_seed(seed: u64) -> Self {
        RandomPlayer {
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_action(
        &mut self,
        _view: &GameStateView,
        available: &[PlayerAction],
    ) -> Option<PlayerAction> {
        if available.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..available.len());
        Some(available[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    #[test]
    fn test_zero_player() {
        let game = GameState::new();
        let view = GameStateView::new(&game);
        let mut player = ZeroPlayer;

        let actions = [PlayerAction::Activate(CardId::new(4)), PlayerAction::Undo];
        assert_eq!(
            player.choose_action(&view, &actions),
            Some(PlayerAction::Activate(CardId::new(4)))
        );
        assert_eq!(player.choose_action(&view, &[]), None);
    }

    #[test]
    fn test_random_player_is_deterministic() {
        let game = GameState::new();
        let view = GameStateView::new(&game);
        let actions: Vec<_> = (0..10).map(|i| PlayerAction::Activate(CardId::new(i))).collect();

        let mut a = RandomPlayer::with_seed(7);
        let mut b = RandomPlayer::with_seed(7);
        for _ in 0..20 {
            let choice = a.choose_action(&view, &actions);
            assert!(choice.is_some());
            assert_eq!(choice, b.choose_action(&view, &actions));
        }
    }
}
