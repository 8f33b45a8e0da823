//! Headless game loop
//!
//! Repeatedly asks a [`Player`] for an action and feeds it to the
//! controller until the playfield is cleared, nothing is playable, or the
//! step limit is reached. The presenter must finish transitions
//! synchronously; a transition left in flight stops the loop.

use crate::game::player::{Player, PlayerAction};
use crate::game::presenter::Presenter;
use crate::game::GameController;

/// Reason the game loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEndReason {
    /// Playfield cleared
    Victory,
    /// No legal activation left, or the player declined to move
    NoMoves,
    /// Reached the maximum number of steps
    StepLimit,
    /// A transition is still waiting for its completion
    Stalled,
}

/// Result of running a game loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub end_reason: GameEndReason,
    /// Committed actions (activations and undos)
    pub steps: u32,
    /// Undo log length when the loop stopped
    pub undo_depth: usize,
}

impl GameResult {
    pub fn is_victory(&self) -> bool {
        self.end_reason == GameEndReason::Victory
    }
}

pub struct GameLoop<'a, P: Presenter> {
    pub controller: &'a mut GameController<P>,
    max_steps: u32,
    /// Offer undo alongside activations
    allow_undo: bool,
}

impl<'a, P: Presenter> GameLoop<'a, P> {
    pub fn new(controller: &'a mut GameController<P>) -> Self {
        GameLoop {
            controller,
            max_steps: 1000,
            allow_undo: false,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_undo(mut self, allow_undo: bool) -> Self {
        self.allow_undo = allow_undo;
        self
    }

    fn available_actions(&self) -> Vec<PlayerAction> {
        let mut actions: Vec<PlayerAction> = self
            .controller
            .legal_activations()
            .into_iter()
            .map(PlayerAction::Activate)
            .collect();
        if self.allow_undo && self.controller.can_undo() {
            actions.push(PlayerAction::Undo);
        }
        actions
    }

    /// Play until a terminal condition
    pub fn run(&mut self, player: &mut dyn Player) -> GameResult {
        let mut steps = 0;
        let end_reason = loop {
            if self.controller.is_busy() {
                break GameEndReason::Stalled;
            }
            if self.controller.is_won() {
                break GameEndReason::Victory;
            }
            if steps >= self.max_steps {
                break GameEndReason::StepLimit;
            }

            let available = self.available_actions();
            let choice = {
                let view = self.controller.view();
                player.choose_action(&view, &available)
            };
            let Some(action) = choice else {
                break GameEndReason::NoMoves;
            };

            let committed = match action {
                PlayerAction::Activate(card_id) => self.controller.activate(card_id).is_committed(),
                PlayerAction::Undo => {
                    matches!(self.controller.undo(), crate::game::UndoOutcome::Undone(_))
                }
            };
            if !committed {
                // Players only get legal actions, so this means they chose badly
                self.controller
                    .logger()
                    .verbose(&format!("{} chose {action:?} with no effect", player.name()));
                break GameEndReason::NoMoves;
            }
            steps += 1;
        };

        self.controller.logger().normal(&format!(
            "Game loop finished after {steps} steps: {end_reason:?}"
        ));
        GameResult {
            end_reason,
            steps,
            undo_depth: self.controller.undo_count(),
        }
    }
}
