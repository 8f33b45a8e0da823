//! Presentation collaborator interface
//!
//! The engine never owns visuals. For every committed transition it hands
//! the presenter a [`TransitionRequest`] carrying a one-shot [`Completion`]
//! token. The presenter either returns the token right away (finished
//! synchronously) or keeps it and later passes it to
//! [`GameController::complete_transition`](crate::game::GameController::complete_transition).

use crate::core::{CardId, Position};
use crate::game::GameStateView;

/// What a transition visualizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Playfield card moving onto the base stack
    Match,
    /// Reserve top moving onto the base stack
    Draw,
    /// A previous move being reverted
    Undo,
}

/// One-shot completion token for a single transition
///
/// Deliberately neither `Clone` nor `Copy`: it can be handed back once.
#[derive(Debug, PartialEq, Eq)]
pub struct Completion {
    ticket: u64,
    kind: TransitionKind,
}

impl Completion {
    pub(crate) fn new(ticket: u64, kind: TransitionKind) -> Self {
        Completion { ticket, kind }
    }

    pub(crate) fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }
}

/// Request to animate a card to a target position
#[derive(Debug)]
pub struct TransitionRequest {
    pub card_id: CardId,
    pub target: Position,
    pub kind: TransitionKind,
    pub completion: Completion,
}

/// Presentation layer driven by the controller
pub trait Presenter {
    /// A new game has been generated; build visuals from it
    fn on_game_started(&mut self, _view: &GameStateView) {}

    /// Animate a committed transition
    ///
    /// Return `Some(completion)` if the transition finished synchronously,
    /// otherwise keep the token and deliver it later.
    fn animate(&mut self, request: TransitionRequest) -> Option<Completion>;

    /// Play a rejection cue for a card that could not be matched
    fn reject(&mut self, _card_id: CardId) {}

    fn set_undo_enabled(&mut self, _enabled: bool) {}

    fn show_victory(&mut self) {}
}

/// Everything a [`RecordingPresenter`] observed
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    GameStarted { cards: usize },
    Animate {
        card_id: CardId,
        target: Position,
        kind: TransitionKind,
    },
    Reject(CardId),
    UndoEnabled(bool),
    Victory,
}

/// Presenter that records events, for tests and headless play
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: Vec<PresenterEvent>,
    /// Keep completions instead of finishing transitions immediately
    deferred: bool,
    pending: Vec<Completion>,
}

impl RecordingPresenter {
    /// Completes every transition synchronously
    pub fn immediate() -> Self {
        RecordingPresenter::default()
    }

    /// Holds completions until [`RecordingPresenter::take_pending`]
    pub fn deferred() -> Self {
        RecordingPresenter {
            deferred: true,
            ..Default::default()
        }
    }

    pub fn events(&self) -> &[PresenterEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Oldest outstanding completion, if any
    pub fn take_pending(&mut self) -> Option<Completion> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn last_undo_enabled(&self) -> Option<bool> {
        self.events.iter().rev().find_map(|e| match e {
            PresenterEvent::UndoEnabled(enabled) => Some(*enabled),
            _ => None,
        })
    }

    pub fn victory_shown(&self) -> bool {
        self.events.contains(&PresenterEvent::Victory)
    }
}

impl Presenter for RecordingPresenter {
    fn on_game_started(&mut self, view: &GameStateView) {
        self.events.push(PresenterEvent::GameStarted {
            cards: view.card_count(),
        });
    }

    fn animate(&mut self, request: TransitionRequest) -> Option<Completion> {
        self.events.push(PresenterEvent::Animate {
            card_id: request.card_id,
            target: request.target,
            kind: request.kind,
        });
        if self.deferred {
            self.pending.push(request.completion);
            None
        } else {
            Some(request.completion)
        }
    }

    fn reject(&mut self, card_id: CardId) {
        self.events.push(PresenterEvent::Reject(card_id));
    }

    fn set_undo_enabled(&mut self, enabled: bool) {
        self.events.push(PresenterEvent::UndoEnabled(enabled));
    }

    fn show_victory(&mut self) {
        self.events.push(PresenterEvent::Victory);
    }
}
