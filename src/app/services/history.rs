use std::collections::VecDeque;

use crate::app::domain::presentation::Presentation;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Linear undo/redo over whole-document snapshots.
///
/// `past` is ordered oldest to newest, `future` nearest to farthest. Every
/// snapshot is an owned clone, so edits to the live document never reach a
/// stored entry.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<Presentation>,
    future: VecDeque<Presentation>,
    limit: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// A limit of 0 is treated as 1.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Remember `previous` as the state before a change. Clears redo.
    pub fn record(&mut self, previous: &Presentation) {
        self.push_past(previous.clone());
        self.future.clear();
    }

    /// Step back. Returns the document to show, or `None` if there is
    /// nothing to undo.
    pub fn undo(&mut self, current: &Presentation) -> Option<Presentation> {
        let previous = self.past.pop_back()?;
        self.future.push_front(current.clone());
        Some(previous)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: &Presentation) -> Option<Presentation> {
        let next = self.future.pop_front()?;
        self.push_past(current.clone());
        Some(next)
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn push_past(&mut self, snapshot: Presentation) {
        self.past.push_back(snapshot);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
