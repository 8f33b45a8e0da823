//! Bounded undo log
//!
//! Every committed move is recorded here so a single step can be reverted.
//! The log pops from the newest end and, once it reaches its depth limit,
//! evicts from the oldest end.

use crate::core::{CardId, Position};
use crate::zones::Area;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of undoable steps
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Kind of reversible move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UndoAction {
    /// Playfield card matched onto the base stack
    MoveCard,
    /// Reserve top moved onto the base stack
    DrawFromReserve,
}

/// One reversible transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndoRecord {
    pub action: UndoAction,
    pub card_id: CardId,
    pub from_area: Area,
    pub to_area: Area,
    pub from_position: Position,
    pub to_position: Position,
}

/// Undo log with FIFO eviction at a fixed depth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoLog {
    /// Records, most recent at the back
    records: VecDeque<UndoRecord>,

    max_depth: usize,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// A zero depth disables recording
    pub fn with_max_depth(max_depth: usize) -> Self {
        UndoLog {
            records: VecDeque::with_capacity(max_depth.min(DEFAULT_MAX_DEPTH)),
            max_depth,
        }
    }

    /// Append a record, evicting the oldest one if the log is full
    ///
    /// Returns the evicted record, if any.
    pub fn push(&mut self, record: UndoRecord) -> Option<UndoRecord> {
        if self.max_depth == 0 {
            return Some(record);
        }
        let evicted = if self.records.len() >= self.max_depth {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    /// Pop and return the most recent record
    pub fn pop(&mut self) -> Option<UndoRecord> {
        self.records.pop_back()
    }

    /// Get the most recent record without removing it
    pub fn peek(&self) -> Option<&UndoRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Records from oldest to newest (for debugging/serialization)
    pub fn records(&self) -> impl Iterator<Item = &UndoRecord> {
        self.records.iter()
    }
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32) -> UndoRecord {
        UndoRecord {
            action: UndoAction::MoveCard,
            card_id: CardId::new(id),
            from_area: Area::Playfield,
            to_area: Area::BaseStack,
            from_position: Position::new(id as f32, 0.0),
            to_position: Position::default(),
        }
    }

    #[test]
    fn test_undo_log() {
        let mut log = UndoLog::new();
        assert_eq!(log.len(), 0);
        assert!(!log.can_undo());

        log.push(record(1));
        log.push(record(2));
        assert_eq!(log.len(), 2);
        assert_eq!(log.peek().unwrap().card_id, CardId::new(2));

        let popped = log.pop().unwrap();
        assert_eq!(popped.card_id, CardId::new(2));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut log = UndoLog::new();
        for i in 0..100 {
            assert!(log.push(record(i)).is_none());
        }
        assert_eq!(log.len(), 100);

        let evicted = log.push(record(100)).unwrap();
        assert_eq!(evicted.card_id, CardId::new(0));
        assert_eq!(log.len(), 100);
        assert_eq!(log.records().next().unwrap().card_id, CardId::new(1));
        assert_eq!(log.pop().unwrap().card_id, CardId::new(100));
    }

    #[test]
    fn test_small_depth() {
        let mut log = UndoLog::with_max_depth(2);
        log.push(record(1));
        log.push(record(2));
        log.push(record(3));

        let ids: Vec<_> = log.records().map(|r| r.card_id.as_u32()).collect();
        assert_eq!(ids, vec![2, 3]);

        let mut disabled = UndoLog::with_max_depth(0);
        assert!(disabled.push(record(4)).is_some());
        assert!(disabled.is_empty()); // Nothing recorded when depth is zero
    }

    #[test]
    fn test_pop_empty() {
        let mut log = UndoLog::new();
        assert!(log.pop().is_none());
        log.push(record(7));
        log.clear();
        assert!(log.is_empty());
    }
}
