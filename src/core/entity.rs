//! Card identifiers and their allocation sequence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer ID for cards
///
/// IDs are assigned once by the level generator and never reused while
/// the owning game state is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(u32);

impl CardId {
    pub fn new(id: u32) -> Self {
        CardId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        CardId(id)
    }
}

/// Monotonic ID sequence
///
/// Restarting the sequence is only valid together with discarding every
/// card that was allocated from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdSequence {
    next_id: u32,
}

impl IdSequence {
    pub fn new() -> Self {
        IdSequence { next_id: 0 }
    }

    /// Generate a new unique CardId
    pub fn next_id(&mut self) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Number of IDs handed out so far
    pub fn allocated(&self) -> u32 {
        self.next_id
    }

    pub fn reset(&mut self) {
        self.next_id = 0;
    }
}
