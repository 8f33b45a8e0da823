//! Game state, rules and the controller driving them

pub mod command;
pub mod controller;
pub mod game_loop;
pub mod logger;
pub mod player;
pub mod presenter;
pub mod rules;
pub mod state;
pub mod view;

pub use command::Command;
pub use controller::{
    ActivationOutcome, ControllerConfig, ControllerPhase, GameController, IgnoreReason,
    UndoOutcome,
};
pub use game_loop::{GameEndReason, GameLoop, GameResult};
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode, VerbosityLevel};
pub use player::{Player, PlayerAction, RandomPlayer, ZeroPlayer};
pub use presenter::{
    Completion, Presenter, PresenterEvent, RecordingPresenter, TransitionKind, TransitionRequest,
};
pub use rules::{can_match, check_victory, legal_activations};
pub use state::GameState;
pub use view::GameStateView;
