//! Owner of the live annotation list for one image session, with bounded
//! snapshot undo/redo.

mod history;

use crate::annotation::{
    Annotation, AnnotationId, ApproximateTextMetrics, CanvasPoint, CanvasRect, TextMetrics,
};

pub use history::{Snapshot, SnapshotHistory, UNDO_HISTORY_LIMIT};

/// Ordered annotation list (later entries draw on top) plus undo/redo.
///
/// The store is the only writer of its list. Structural edits (`add`,
/// `remove`, `clear`) snapshot automatically; in-place edits (`translate`,
/// `resize_oval`, ...) are bracketed by the caller with one
/// [`AnnotationStore::begin_mutation`] per gesture.
#[derive(Debug)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    history: SnapshotHistory,
    next_id: u64,
    metrics: Box<dyn TextMetrics>,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::with_metrics(Box::new(ApproximateTextMetrics))
    }

    pub fn with_metrics(metrics: Box<dyn TextMetrics>) -> Self {
        Self {
            annotations: Vec::new(),
            history: SnapshotHistory::default(),
            next_id: 1,
            metrics,
        }
    }

    /// Hands out the next identifier. The counter only moves forward, so an
    /// id dropped by undo is never handed out again.
    pub fn allocate_id(&mut self) -> AnnotationId {
        let id = AnnotationId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    fn snapshot(&self) -> Snapshot {
        self.annotations.clone()
    }

    fn record_snapshot(&mut self) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);
    }

    /// Appends `annotation` on top. An id already in the list is rejected
    /// without touching the list or history.
    pub fn add(&mut self, annotation: Annotation) -> Option<AnnotationId> {
        let id = annotation.id();
        if self.contains(id) {
            tracing::debug!(%id, "annotation id already present; add ignored");
            return None;
        }
        self.next_id = self.next_id.max(id.get().saturating_add(1));
        self.record_snapshot();
        self.annotations.push(annotation);
        tracing::debug!(%id, count = self.annotations.len(), "annotation added");
        Some(id)
    }

    /// Removes by identity. Unknown ids leave the list and history alone.
    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        let index = self
            .annotations
            .iter()
            .position(|annotation| annotation.id() == id)?;
        self.record_snapshot();
        let removed = self.annotations.remove(index);
        tracing::debug!(%id, count = self.annotations.len(), "annotation removed");
        Some(removed)
    }

    /// Snapshots the current list ahead of an in-place edit.
    pub fn begin_mutation(&mut self) {
        self.record_snapshot();
        tracing::debug!(undo_depth = self.history.undo_depth(), "in-place mutation started");
    }

    pub fn clear(&mut self) {
        self.record_snapshot();
        let removed = self.annotations.len();
        self.annotations.clear();
        tracing::debug!(removed, "annotations cleared");
    }

    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.step_back(current) {
            Some(previous) => {
                self.annotations = previous;
                tracing::debug!(count = self.annotations.len(), "undo applied");
                true
            }
            None => {
                tracing::debug!("undo stack empty");
                false
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.step_forward(current) {
            Some(next) => {
                self.annotations = next;
                tracing::debug!(count = self.annotations.len(), "redo applied");
                true
            }
            None => {
                tracing::debug!("redo stack empty");
                false
            }
        }
    }

    /// Topmost annotation under `point`; the most recently added wins ties.
    pub fn find_at(&self, point: CanvasPoint) -> Option<&Annotation> {
        self.annotations
            .iter()
            .rev()
            .find(|annotation| annotation.contains_point_with(point, self.metrics.as_ref()))
    }

    pub fn translate(&mut self, id: AnnotationId, delta_x: f64, delta_y: f64) -> bool {
        match self.get_mut(id) {
            Some(annotation) => {
                annotation.translate(delta_x, delta_y);
                true
            }
            None => false,
        }
    }

    /// Applies new bounds to an oval, clamped to the minimum size.
    pub fn resize_oval(&mut self, id: AnnotationId, bounds: CanvasRect) -> bool {
        match self.get_mut(id).and_then(Annotation::as_oval_mut) {
            Some(oval) => {
                oval.resize(bounds);
                true
            }
            None => false,
        }
    }

    pub fn set_text_content(&mut self, id: AnnotationId, content: impl Into<String>) -> bool {
        match self.get_mut(id).and_then(Annotation::as_text_mut) {
            Some(text) => {
                text.set_content(content);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|annotation| annotation.id() == id)
    }

    fn get_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations
            .iter_mut()
            .find(|annotation| annotation.id() == id)
    }

    pub fn contains(&self, id: AnnotationId) -> bool {
        self.get(id).is_some()
    }

    pub fn bounding_box(&self, id: AnnotationId) -> Option<CanvasRect> {
        self.get(id)
            .map(|annotation| annotation.bounding_box_with(self.metrics.as_ref()))
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }
}
