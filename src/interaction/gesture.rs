use crate::annotation::{AnnotationId, CanvasPoint, CanvasRect, ResizeHandle};

/// Select-mode sub-state while the pointer is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(AnnotationId),
    Resizing(AnnotationId, ResizeHandle),
}

/// Pointer bookkeeping for the gesture in flight.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(super) struct GestureTracker {
    pub(super) state: InteractionState,
    /// Last pointer position seen by the gesture; drag deltas are measured
    /// from here, not from the press position.
    pub(super) last_point: Option<CanvasPoint>,
    /// Set once the gesture has snapshotted the store.
    pub(super) dirty: bool,
}

impl GestureTracker {
    pub(super) fn arm(&mut self, state: InteractionState, point: CanvasPoint) {
        self.state = state;
        self.last_point = Some(point);
        self.dirty = false;
    }

    pub(super) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(super) const fn is_active(&self) -> bool {
        self.last_point.is_some() || !matches!(self.state, InteractionState::Idle)
    }

    /// Returns true exactly once per gesture: on the first edit frame.
    pub(super) fn mark_dirty(&mut self) -> bool {
        let first = !self.dirty;
        self.dirty = true;
        first
    }
}

/// In-progress oval outline while the user drags out a new shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct RubberBand {
    pub(super) start: CanvasPoint,
    pub(super) end: CanvasPoint,
}

impl RubberBand {
    pub(super) const fn at(point: CanvasPoint) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    pub(super) fn bounds(&self) -> CanvasRect {
        CanvasRect::from_corners(self.start, self.end)
    }
}
