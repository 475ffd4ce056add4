use std::collections::VecDeque;

use crate::annotation::Annotation;

pub const UNDO_HISTORY_LIMIT: usize = 50;

pub type Snapshot = Vec<Annotation>;

/// Bounded undo/redo stacks of full annotation-list snapshots.
///
/// Snapshots are owned deep copies; nothing outside this type can reach them.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    undo: VecDeque<Snapshot>,
    redo: VecDeque<Snapshot>,
    limit: usize,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(UNDO_HISTORY_LIMIT)
    }
}

impl SnapshotHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Records the state before a new edit. Any redo future is abandoned.
    pub fn record(&mut self, snapshot: Snapshot) {
        push_bounded(&mut self.undo, snapshot, self.limit);
        self.redo.clear();
    }

    /// Pops the latest undo snapshot, parking `current` on the redo stack.
    pub fn step_back(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo.pop_back()?;
        push_bounded(&mut self.redo, current, self.limit);
        Some(previous)
    }

    /// Pops the latest redo snapshot, parking `current` on the undo stack.
    pub fn step_forward(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop_back()?;
        push_bounded(&mut self.undo, current, self.limit);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub const fn limit(&self) -> usize {
        self.limit
    }
}

fn push_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot, limit: usize) {
    stack.push_back(snapshot);
    while stack.len() > limit {
        stack.pop_front();
    }
}
