//! Game controller
//!
//! Turns card activations and undo requests into validated state changes.
//! The controller exclusively owns the game state and the undo log; the
//! presenter only sees them through [`GameStateView`].
//!
//! One transition may be in flight at a time. While a transition awaits
//! its completion token, further activations and undo requests are
//! rejected with a `Busy` outcome and leave everything untouched.

use crate::core::{CardId, Position};
use crate::game::logger::VerbosityLevel;
use crate::game::presenter::{Completion, Presenter, TransitionKind, TransitionRequest};
use crate::game::{rules, GameLogger, GameState, GameStateView};
use crate::level::{generate_from_config, LevelConfig};
use crate::undo::{UndoAction, UndoLog, UndoRecord, DEFAULT_MAX_DEPTH};
use crate::zones::Area;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Controller settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Maximum number of undoable steps (0 disables undo)
    pub max_undo_depth: usize,
    pub verbosity: VerbosityLevel,
}

impl ControllerConfig {
    pub fn with_max_undo_depth(mut self, depth: usize) -> Self {
        self.max_undo_depth = depth;
        self
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            max_undo_depth: DEFAULT_MAX_DEPTH,
            verbosity: VerbosityLevel::default(),
        }
    }
}

/// Where the controller is in its turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    /// Waiting for an activation
    Idle,
    /// Validating an activation
    Evaluating,
    /// A transition was committed and awaits its completion token
    Animating { ticket: u64, kind: TransitionKind },
}

/// Why an activation had no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No pile holds this id
    UnknownCard,
    /// Base stack cards are never actionable
    BaseStackCard,
    /// Nothing on the base stack to match against
    EmptyBase,
    /// Only the reserve top can be drawn
    NotReserveTop,
}

/// Result of activating a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Playfield card moved onto the base stack
    Matched(CardId),
    /// Reserve top moved onto the base stack
    Drawn(CardId),
    /// Playfield card does not match the base top; rejection cue played
    Rejected(CardId),
    Ignored(IgnoreReason),
    /// A transition is still in flight
    Busy,
}

impl ActivationOutcome {
    /// Whether the activation changed the game state
    pub fn is_committed(&self) -> bool {
        matches!(self, ActivationOutcome::Matched(_) | ActivationOutcome::Drawn(_))
    }
}

/// Result of an undo request
#[derive(Debug, Clone, PartialEq)]
pub enum UndoOutcome {
    Undone(UndoRecord),
    NothingToUndo,
    /// The record's card was not where the record said; record dropped
    Inconsistent(UndoRecord),
    /// A transition is still in flight
    Busy,
}

/// Drives one game: owns its state, undo log and presenter
pub struct GameController<P: Presenter> {
    state: GameState,
    undo_log: UndoLog,
    presenter: P,
    phase: ControllerPhase,
    /// Ticket for the next transition; never reset, so tokens from an
    /// earlier game can't match a later transition
    next_ticket: u64,
    started: bool,
    /// Victory already announced in this game
    victory_shown: bool,
    config: ControllerConfig,
}

impl<P: Presenter> GameController<P> {
    pub fn new(presenter: P, config: ControllerConfig) -> Self {
        GameController {
            state: GameState::with_logger(GameLogger::with_verbosity(config.verbosity)),
            undo_log: UndoLog::with_max_depth(config.max_undo_depth),
            presenter,
            phase: ControllerPhase::Idle,
            next_ticket: 0,
            started: false,
            victory_shown: false,
            config,
        }
    }

    pub fn with_presenter(presenter: P) -> Self {
        Self::new(presenter, ControllerConfig::default())
    }

    /// Generate a fresh game from `level`
    ///
    /// On error nothing changes: the previous game (if any) stays intact.
    pub fn start_game(&mut self, level: &LevelConfig) -> Result<()> {
        self.state.logger.normal("Starting game");
        generate_from_config(level, &mut self.state)?;

        // Old records refer to ids that no longer exist
        self.undo_log.clear();
        self.phase = ControllerPhase::Idle;
        self.started = true;
        self.victory_shown = false;

        self.presenter.on_game_started(&GameStateView::new(&self.state));
        self.presenter.set_undo_enabled(self.undo_log.can_undo());
        Ok(())
    }

    /// Handle a player activating a card
    pub fn activate(&mut self, card_id: CardId) -> ActivationOutcome {
        if self.is_busy() {
            self.state.logger.event(
                VerbosityLevel::Verbose,
                "busy",
                format_args!("ignoring card {card_id}, transition in flight"),
            );
            return ActivationOutcome::Busy;
        }

        self.phase = ControllerPhase::Evaluating;
        let outcome = match self.state.locate(card_id) {
            Some(Area::Playfield) => self.activate_playfield(card_id),
            Some(Area::ReserveStack) => self.activate_reserve(card_id),
            Some(Area::BaseStack) => ActivationOutcome::Ignored(IgnoreReason::BaseStackCard),
            None => ActivationOutcome::Ignored(IgnoreReason::UnknownCard),
        };
        if self.phase == ControllerPhase::Evaluating {
            self.phase = ControllerPhase::Idle;
        }

        self.state.logger.event(
            VerbosityLevel::Normal,
            "activate",
            format_args!("card {card_id}: {outcome:?}"),
        );
        outcome
    }

    fn activate_playfield(&mut self, card_id: CardId) -> ActivationOutcome {
        let (from, target, matched) = {
            let Some(base_top) = self.state.base_top() else {
                return ActivationOutcome::Ignored(IgnoreReason::EmptyBase);
            };
            let Some(clicked) = self.state.card(card_id) else {
                return ActivationOutcome::Ignored(IgnoreReason::UnknownCard);
            };
            (
                clicked.position,
                base_top.position,
                rules::can_match(clicked, base_top),
            )
        };

        if !matched {
            self.presenter.reject(card_id);
            return ActivationOutcome::Rejected(card_id);
        }

        self.commit_move(UndoRecord {
            action: UndoAction::MoveCard,
            card_id,
            from_area: Area::Playfield,
            to_area: Area::BaseStack,
            from_position: from,
            to_position: target,
        });
        self.begin_transition(card_id, target, TransitionKind::Match);
        ActivationOutcome::Matched(card_id)
    }

    fn activate_reserve(&mut self, card_id: CardId) -> ActivationOutcome {
        let (from, target) = {
            let Some(top) = self.state.reserve_top().filter(|c| c.id == card_id) else {
                return ActivationOutcome::Ignored(IgnoreReason::NotReserveTop);
            };
            // With no base card the drawn card stays where it is
            let target = self.state.base_top().map_or(top.position, |c| c.position);
            (top.position, target)
        };

        self.commit_move(UndoRecord {
            action: UndoAction::DrawFromReserve,
            card_id,
            from_area: Area::ReserveStack,
            to_area: Area::BaseStack,
            from_position: from,
            to_position: target,
        });
        self.begin_transition(card_id, target, TransitionKind::Draw);
        ActivationOutcome::Drawn(card_id)
    }

    /// Relocate the card onto the base stack, then record the move
    ///
    /// Callers have already validated the card, so a failed take is a no-op
    /// that leaves no record behind.
    fn commit_move(&mut self, record: UndoRecord) {
        let card_id = record.card_id;
        let (from_area, to_area, target) = (record.from_area, record.to_area, record.to_position);

        let Some(mut card) = self.state.take_card(from_area, card_id) else {
            self.state.logger.event(
                VerbosityLevel::Minimal,
                "move",
                format_args!("card {card_id} vanished from {from_area}, move not recorded"),
            );
            return;
        };
        card.move_to(target);
        self.state.add_card(to_area, card);
        self.state.logger.event(
            VerbosityLevel::Verbose,
            "move",
            format_args!("card {card_id} {from_area} -> {to_area} at {target}"),
        );

        let disabled = self.undo_log.max_depth() == 0;
        if let Some(evicted) = self.undo_log.push(record) {
            if !disabled {
                self.state.logger.event(
                    VerbosityLevel::Verbose,
                    "undo",
                    format_args!("log full, dropped oldest record for card {}", evicted.card_id),
                );
            }
        }
    }

    fn begin_transition(&mut self, card_id: CardId, target: Position, kind: TransitionKind) {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.phase = ControllerPhase::Animating { ticket, kind };

        let request = TransitionRequest {
            card_id,
            target,
            kind,
            completion: Completion::new(ticket, kind),
        };
        if let Some(done) = self.presenter.animate(request) {
            self.complete_transition(done);
        }
    }

    /// Deliver a completion token from the presenter
    ///
    /// Returns false if the token does not belong to the transition in
    /// flight (stale or from a previous game); such tokens are ignored.
    pub fn complete_transition(&mut self, completion: Completion) -> bool {
        let kind = match self.phase {
            ControllerPhase::Animating { ticket, kind } if ticket == completion.ticket() => kind,
            _ => {
                self.state.logger.event(
                    VerbosityLevel::Verbose,
                    "complete",
                    format_args!("ignoring stale completion #{}", completion.ticket()),
                );
                return false;
            }
        };

        self.phase = ControllerPhase::Idle;
        if kind == TransitionKind::Match && !self.victory_shown && self.check_victory() {
            self.victory_shown = true;
            self.state.logger.minimal("Victory! Playfield cleared");
            self.presenter.show_victory();
        }
        self.presenter.set_undo_enabled(self.undo_log.can_undo());
        true
    }

    /// Revert the most recent committed move
    pub fn undo(&mut self) -> UndoOutcome {
        if self.is_busy() {
            return UndoOutcome::Busy;
        }
        let Some(record) = self.undo_log.pop() else {
            self.state.logger.verbose("Nothing to undo");
            return UndoOutcome::NothingToUndo;
        };

        let Some(mut card) = self.state.take_card(record.to_area, record.card_id) else {
            self.state.logger.event(
                VerbosityLevel::Minimal,
                "undo",
                format_args!(
                    "card {} not in {}, dropping record {:?}",
                    record.card_id, record.to_area, record.action
                ),
            );
            self.presenter.set_undo_enabled(self.undo_log.can_undo());
            return UndoOutcome::Inconsistent(record);
        };

        card.move_to(record.from_position);
        self.state.add_card(record.from_area, card);
        self.state.logger.event(
            VerbosityLevel::Normal,
            "undo",
            format_args!(
                "card {} back to {} at {}",
                record.card_id, record.from_area, record.from_position
            ),
        );

        self.begin_transition(record.card_id, record.from_position, TransitionKind::Undo);
        UndoOutcome::Undone(record)
    }

    /// True iff the playfield is empty
    pub fn check_victory(&self) -> bool {
        rules::check_victory(&self.state)
    }

    /// Victory in a started game
    pub fn is_won(&self) -> bool {
        self.started && self.check_victory()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, ControllerPhase::Animating { .. })
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn can_undo(&self) -> bool {
        self.undo_log.can_undo()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_log.len()
    }

    pub fn undo_log(&self) -> &UndoLog {
        &self.undo_log
    }

    pub fn legal_activations(&self) -> Vec<CardId> {
        rules::legal_activations(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn view(&self) -> GameStateView<'_> {
        GameStateView::new(&self.state)
    }

    pub fn logger(&self) -> &GameLogger {
        &self.state.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.state.logger
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rank, Suit};
    use crate::game::presenter::{PresenterEvent, RecordingPresenter};
    use crate::level::CardConfig;

    fn cfg(rank: u8, x: f32) -> CardConfig {
        CardConfig::new(Rank::new(rank).unwrap(), Suit::Clubs, Position::new(x, 0.0))
    }

    fn quiet() -> ControllerConfig {
        ControllerConfig::default().with_verbosity(VerbosityLevel::Silent)
    }

    /// Reserve [5, 6] -> base 6 (id 1), reserve 5 (id 0); playfield [7 (id 2), 2 (id 3)]
    fn started(presenter: RecordingPresenter) -> GameController<RecordingPresenter> {
        let level = LevelConfig::new(
            vec![cfg(7, 100.0), cfg(2, 200.0)],
            vec![cfg(5, 10.0), cfg(6, 20.0)],
        );
        let mut controller = GameController::new(presenter, quiet());
        controller.start_game(&level).unwrap();
        controller
    }

    #[test]
    fn test_start_game_notifies_presenter() {
        let controller = started(RecordingPresenter::immediate());
        assert_eq!(
            controller.presenter().events(),
            &[PresenterEvent::GameStarted { cards: 4 }, PresenterEvent::UndoEnabled(false)]
        );
        assert_eq!(controller.phase(), ControllerPhase::Idle);
        assert!(!controller.is_won());
    }

    #[test]
    fn test_start_game_rejects_empty_level() {
        let mut controller = GameController::new(RecordingPresenter::immediate(), quiet());
        assert!(controller.start_game(&LevelConfig::default()).is_err());
        assert!(!controller.is_started());
        assert!(controller.presenter().events().is_empty());
    }

    #[test]
    fn test_match_moves_card_and_records_undo() {
        let mut controller = started(RecordingPresenter::immediate());

        let outcome = controller.activate(CardId::new(2));
        assert_eq!(outcome, ActivationOutcome::Matched(CardId::new(2)));
        assert_eq!(controller.state().locate(CardId::new(2)), Some(Area::BaseStack));
        assert_eq!(
            controller.state().base_top().unwrap().position,
            Position::new(20.0, 0.0)
        );

        let record = controller.undo_log().peek().unwrap();
        assert_eq!(record.action, UndoAction::MoveCard);
        assert_eq!(record.from_position, Position::new(100.0, 0.0));
        assert_eq!(record.to_position, Position::new(20.0, 0.0));
        assert_eq!(controller.presenter().last_undo_enabled(), Some(true));
        assert_eq!(controller.phase(), ControllerPhase::Idle);
    }

    #[test]
    fn test_mismatch_is_rejected_without_mutation() {
        let mut controller = started(RecordingPresenter::immediate());

        let outcome = controller.activate(CardId::new(3));
        assert_eq!(outcome, ActivationOutcome::Rejected(CardId::new(3)));
        assert_eq!(controller.state().locate(CardId::new(3)), Some(Area::Playfield));
        assert_eq!(controller.undo_count(), 0);
        assert_eq!(
            controller.presenter().events().last(),
            Some(&PresenterEvent::Reject(CardId::new(3)))
        );
    }

    #[test]
    fn test_ignored_activations() {
        let mut controller = started(RecordingPresenter::immediate());

        assert_eq!(
            controller.activate(CardId::new(1)),
            ActivationOutcome::Ignored(IgnoreReason::BaseStackCard)
        );
        assert_eq!(
            controller.activate(CardId::new(99)),
            ActivationOutcome::Ignored(IgnoreReason::UnknownCard)
        );
        assert_eq!(controller.undo_count(), 0);
    }

    #[test]
    fn test_only_reserve_top_is_drawable() {
        let level = LevelConfig::new(
            vec![cfg(9, 0.0)],
            vec![cfg(1, 1.0), cfg(2, 2.0), cfg(3, 3.0)],
        );
        let mut controller = GameController::new(RecordingPresenter::immediate(), quiet());
        controller.start_game(&level).unwrap();

        // Reserve holds ids 0 and 1; 1 is the top
        assert_eq!(
            controller.activate(CardId::new(0)),
            ActivationOutcome::Ignored(IgnoreReason::NotReserveTop)
        );
        assert_eq!(controller.activate(CardId::new(1)), ActivationOutcome::Drawn(CardId::new(1)));
        assert_eq!(controller.state().base_top().map(|c| c.id), Some(CardId::new(1)));
        assert_eq!(
            controller.state().base_top().unwrap().position,
            Position::new(3.0, 0.0)
        );
        assert_eq!(
            controller.undo_log().peek().map(|r| r.action),
            Some(UndoAction::DrawFromReserve)
        );
    }

    #[test]
    fn test_empty_base_blocks_matching() {
        let level = LevelConfig::new(vec![cfg(4, 0.0)], vec![]);
        let mut controller = GameController::new(RecordingPresenter::immediate(), quiet());
        controller.start_game(&level).unwrap();

        assert_eq!(
            controller.activate(CardId::new(0)),
            ActivationOutcome::Ignored(IgnoreReason::EmptyBase)
        );
    }

    #[test]
    fn test_undo_restores_area_and_position() {
        let mut controller = started(RecordingPresenter::immediate());
        controller.activate(CardId::new(2));
        assert_eq!(controller.undo_count(), 1);

        let outcome = controller.undo();
        assert!(matches!(outcome, UndoOutcome::Undone(ref r) if r.card_id == CardId::new(2)));
        assert_eq!(controller.state().locate(CardId::new(2)), Some(Area::Playfield));
        assert_eq!(
            controller.state().card(CardId::new(2)).unwrap().position,
            Position::new(100.0, 0.0)
        );
        assert_eq!(controller.undo_count(), 0);
        assert_eq!(controller.presenter().last_undo_enabled(), Some(false));
        assert_eq!(controller.undo(), UndoOutcome::NothingToUndo);
    }

    #[test]
    fn test_busy_while_animating() {
        let mut controller = started(RecordingPresenter::deferred());

        assert!(controller.activate(CardId::new(0)).is_committed());
        assert!(controller.is_busy());
        assert_eq!(controller.activate(CardId::new(3)), ActivationOutcome::Busy);
        assert_eq!(controller.undo(), UndoOutcome::Busy);

        let done = controller.presenter_mut().take_pending().unwrap();
        assert_eq!(done.kind(), TransitionKind::Draw);
        assert!(controller.complete_transition(done));
        assert!(!controller.is_busy());
        assert_eq!(controller.presenter().last_undo_enabled(), Some(true));
    }

    #[test]
    fn test_stale_completion_ignored_after_restart() {
        let mut controller = started(RecordingPresenter::deferred());
        controller.activate(CardId::new(0));
        let stale = controller.presenter_mut().take_pending().unwrap();

        let level = LevelConfig::new(vec![cfg(1, 0.0)], vec![cfg(2, 0.0)]);
        controller.start_game(&level).unwrap();
        assert!(!controller.is_busy());

        controller.activate(CardId::new(1));
        assert!(!controller.complete_transition(stale));
        assert!(controller.is_busy());

        let fresh = controller.presenter_mut().take_pending().unwrap();
        assert!(controller.complete_transition(fresh));
        assert!(controller.is_won());
    }

    #[test]
    fn test_victory_only_after_match_completion() {
        let level = LevelConfig::new(vec![cfg(4, 0.0)], vec![cfg(3, 0.0)]);
        let mut controller = GameController::new(RecordingPresenter::deferred(), quiet());
        controller.start_game(&level).unwrap();

        controller.activate(CardId::new(1));
        assert!(controller.check_victory());
        assert!(!controller.presenter().victory_shown());

        let done = controller.presenter_mut().take_pending().unwrap();
        controller.complete_transition(done);
        assert!(controller.presenter().victory_shown());
    }

    #[test]
    fn test_undo_disabled_by_zero_depth() {
        let level = LevelConfig::new(vec![cfg(7, 0.0)], vec![cfg(5, 0.0), cfg(6, 0.0)]);
        let config = quiet().with_max_undo_depth(0);
        let mut controller = GameController::new(RecordingPresenter::immediate(), config);
        controller.start_game(&level).unwrap();

        assert!(controller.activate(CardId::new(2)).is_committed());
        assert!(!controller.can_undo());
        assert_eq!(controller.undo(), UndoOutcome::NothingToUndo);
    }

    #[test]
    fn test_zero_depth_does_not_report_eviction() {
        let level = LevelConfig::new(vec![cfg(7, 0.0)], vec![cfg(5, 0.0), cfg(6, 0.0)]);
        let mut controller =
            GameController::new(RecordingPresenter::immediate(), quiet().with_max_undo_depth(0));
        controller.logger_mut().enable_capture();
        controller.start_game(&level).unwrap();

        assert!(controller.activate(CardId::new(2)).is_committed());
        let evictions = controller
            .logger()
            .logs()
            .iter()
            .filter(|log| log.message.contains("dropped oldest"))
            .count();
        assert_eq!(evictions, 0);
    }

    #[test]
    fn test_victory_announced_once_per_game() {
        let level = LevelConfig::new(vec![cfg(4, 0.0)], vec![cfg(3, 0.0)]);
        let mut controller = GameController::new(RecordingPresenter::immediate(), quiet());
        controller.start_game(&level).unwrap();

        assert!(controller.activate(CardId::new(1)).is_committed());
        assert!(matches!(controller.undo(), UndoOutcome::Undone(_)));
        assert!(controller.activate(CardId::new(1)).is_committed());
        assert!(controller.is_won());

        let victories = |c: &GameController<RecordingPresenter>| {
            c.presenter()
                .events()
                .iter()
                .filter(|e| **e == PresenterEvent::Victory)
                .count()
        };
        assert_eq!(victories(&controller), 1);

        // A new game may announce again
        controller.start_game(&level).unwrap();
        controller.activate(CardId::new(1));
        assert_eq!(victories(&controller), 2);
    }

    #[test]
    fn test_inconsistent_undo_drops_record_and_refreshes_button() {
        let mut controller = started(RecordingPresenter::immediate());
        assert!(controller.activate(CardId::new(2)).is_committed());
        assert_eq!(controller.presenter().last_undo_enabled(), Some(true));

        // Put the card back without going through the undo log
        let card = controller.state.take_card(Area::BaseStack, CardId::new(2)).unwrap();
        controller.state.add_card(Area::Playfield, card);

        let outcome = controller.undo();
        assert!(matches!(outcome, UndoOutcome::Inconsistent(ref r) if r.card_id == CardId::new(2)));
        assert_eq!(controller.undo_count(), 0);
        assert_eq!(controller.presenter().last_undo_enabled(), Some(false));
        assert_eq!(controller.state().locate(CardId::new(2)), Some(Area::Playfield));
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_failed_move_leaves_no_record() {
        let mut controller = started(RecordingPresenter::immediate());

        // Card 3 is on the playfield, not in the reserve
        controller.commit_move(UndoRecord {
            action: UndoAction::DrawFromReserve,
            card_id: CardId::new(3),
            from_area: Area::ReserveStack,
            to_area: Area::BaseStack,
            from_position: Position::default(),
            to_position: Position::default(),
        });
        assert_eq!(controller.undo_count(), 0);
        assert_eq!(controller.state().locate(CardId::new(3)), Some(Area::Playfield));
    }
}
