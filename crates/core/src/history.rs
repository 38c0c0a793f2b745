//! Undo history - bounded stack of pre-move snapshots
//!
//! Backed by a `VecDeque` capped at `capacity`: pushing onto a full history
//! evicts the oldest snapshot. Storage grows with use, so only snapshots that
//! were actually pushed take memory.

use std::collections::VecDeque;

use crate::grid::Grid;

/// Board, score, and move count captured immediately before a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoSnapshot {
    pub grid: Grid,
    pub score: u32,
    pub moves: u32,
}

/// Capped LIFO of [`UndoSnapshot`]s.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    entries: VecDeque<UndoSnapshot>,
    capacity: usize,
}

impl UndoHistory {
    /// A capacity of 0 disables undo.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(crate::types::MAX_UNDO_HISTORY)),
            capacity,
        }
    }

    /// Push the newest snapshot, dropping the oldest one when full.
    pub fn push(&mut self, snapshot: UndoSnapshot) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Remove and return the newest snapshot.
    pub fn pop(&mut self) -> Option<UndoSnapshot> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(crate::types::MAX_UNDO_HISTORY)
    }
}
