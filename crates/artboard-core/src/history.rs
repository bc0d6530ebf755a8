//! Snapshot-based undo/redo history.
//!
//! Only artboards and elements are checkpointed. Viewport, selection and the
//! active tool never create undo steps.

use crate::artboard::Artboard;
use crate::element::Element;
use crate::id::ElementId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 50;

/// The undoable portion of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub artboards: Vec<Artboard>,
    pub elements: HashMap<ElementId, Element>,
}

/// Linear past/present/future history.
///
/// `present` is the last checkpoint, not necessarily the live document: the
/// live state may carry edits made after the most recent
/// [`History::save_snapshot`]. The owner tracks whether it has such edits and
/// hands them to [`History::undo`].
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<ProjectSnapshot>,
    present: ProjectSnapshot,
    future: VecDeque<ProjectSnapshot>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(MAX_UNDO_HISTORY)
    }

    /// History keeping at most `limit` past entries (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present: ProjectSnapshot::default(),
            future: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    pub fn past(&self) -> &VecDeque<ProjectSnapshot> {
        &self.past
    }

    pub fn present(&self) -> &ProjectSnapshot {
        &self.present
    }

    pub fn future(&self) -> &VecDeque<ProjectSnapshot> {
        &self.future
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Checkpoint the live state.
    ///
    /// The previous `present` moves onto `past` (oldest evicted beyond the
    /// limit), `live` becomes the new `present`, and redo history is dropped.
    /// Callers only checkpoint a state that differs from `present`.
    pub fn save_snapshot(&mut self, live: ProjectSnapshot) {
        let previous = std::mem::replace(&mut self.present, live);
        self.push_past(previous);
        self.future.clear();
        log::trace!("History checkpoint: {} past, redo cleared", self.past.len());
    }

    /// Drop redo history without adding an undo step.
    pub fn clear_future(&mut self) {
        self.future.clear();
    }

    /// Step back. Returns the state the document must become, or `None`
    /// when there is nothing to undo.
    ///
    /// `pending` is the live state when it carries edits made since the last
    /// checkpoint. Those are undone first: they go to the front of `future`
    /// and the document reverts to `present`. Otherwise the newest `past`
    /// entry becomes `present`.
    pub fn undo(&mut self, pending: Option<ProjectSnapshot>) -> Option<ProjectSnapshot> {
        if let Some(live) = pending {
            self.future.push_front(live);
            return Some(self.present.clone());
        }

        let previous = self.past.pop_back()?;
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        Some(self.present.clone())
    }

    /// Step forward. Returns the state the document must become, or `None`
    /// when there is nothing to redo.
    pub fn redo(&mut self) -> Option<ProjectSnapshot> {
        let next = self.future.pop_front()?;
        let current = std::mem::replace(&mut self.present, next);
        self.push_past(current);
        Some(self.present.clone())
    }

    /// Forget everything and take `live` as the new baseline.
    pub fn reset(&mut self, live: ProjectSnapshot) {
        self.past.clear();
        self.future.clear();
        self.present = live;
    }

    fn push_past(&mut self, snapshot: ProjectSnapshot) {
        self.past.push_back(snapshot);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
    }
}
