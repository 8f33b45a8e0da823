//! TriPeaks-style card matching engine
//!
//! Playfield cards are cleared by matching them against the top of the
//! base stack (ranks one apart, Ace and King adjacent). The reserve stack
//! feeds the base stack one card at a time, and every move can be undone.
//!
//! Rendering and input live outside this crate behind the
//! [`game::Presenter`] trait.

pub mod core;
pub mod error;
pub mod game;
pub mod level;
pub mod undo;
pub mod zones;

pub use error::{Result, SolitaireError};
