//! Snapshot-based undo/redo.
//!
//! Each committed action records the element collection as it was before the
//! action. Snapshots share unchanged elements with the live scene through
//! `Arc`, so an entry costs one pointer per element plus the changed copies.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use whiteboard_settings::HistorySettings;

use crate::model::Element;

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Name of the action that produced the change.
    pub label: String,
    pub elements: Vec<Arc<Element>>,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    fn new(label: &str, elements: Vec<Arc<Element>>) -> Self {
        Self {
            label: label.to_string(),
            elements,
            recorded_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    max_depth: usize,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    pub fn from_settings(settings: &HistorySettings) -> Self {
        Self::new(settings.max_depth)
    }

    /// Records the state before `label` ran. Clears the redo stack.
    pub fn record(&mut self, label: &str, before: Vec<Arc<Element>>) {
        self.undo_stack.push_back(HistoryEntry::new(label, before));
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    /// Steps back, returning the collection to restore. `current` becomes the
    /// redo target.
    pub fn undo(&mut self, current: Vec<Arc<Element>>) -> Option<Vec<Arc<Element>>> {
        let entry = self.undo_stack.pop_back()?;
        self.redo_stack.push(HistoryEntry::new(&entry.label, current));
        Some(entry.elements)
    }

    pub fn redo(&mut self, current: Vec<Arc<Element>>) -> Option<Vec<Arc<Element>>> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push_back(HistoryEntry::new(&entry.label, current));
        Some(entry.elements)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Label of the entry the next undo would revert.
    pub fn last_label(&self) -> Option<&str> {
        self.undo_stack.back().map(|e| e.label.as_str())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::from_settings(&HistorySettings::default())
    }
}
