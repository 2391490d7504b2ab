use std::collections::VecDeque;

use crate::engine::progression::Progression;
use crate::game::{GameStatus, Level};

/// Everything undo restores. Progression rides along so that points earned
/// by a completion are taken back with the move that completed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub level: Level,
    pub status: GameStatus,
    pub progression: Progression,
}

/// Linear undo stack holding at most `limit` snapshots; the oldest entry is
/// dropped when a push would exceed it.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit.min(64)),
            limit,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
