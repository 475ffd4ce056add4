//! Pointer-driven state machine that turns raw down/drag/up events into
//! annotation creation, selection, move and resize.

mod gesture;

use crate::annotation::{
    Annotation, AnnotationId, CanvasPoint, CanvasRect, Color, OvalAnnotation, ResizeHandle,
    TextAnnotation, DEFAULT_TEXT_FONT_SIZE,
};
use crate::geometry::AnnotationColor;
use crate::store::AnnotationStore;

use gesture::{GestureTracker, RubberBand};

pub use gesture::InteractionState;

/// Rubber bands must exceed this in both dimensions to become an oval.
pub const OVAL_CREATE_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    Select,
    CreateOval,
    CreateText,
}

impl ToolMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Select => "Select",
            Self::CreateOval => "Oval",
            Self::CreateText => "Text",
        }
    }
}

/// What a pointer event did. `BeginTextEdit` asks the text-input
/// collaborator to open an editor for that annotation; it answers later via
/// [`InteractionController::commit_text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    Ignored,
    Selected(AnnotationId),
    SelectionCleared,
    ResizeStarted(AnnotationId, ResizeHandle),
    Moved(AnnotationId),
    Resized(AnnotationId),
    RubberBandStarted,
    RubberBandUpdated(CanvasRect),
    RubberBandDiscarded,
    OvalCreated(AnnotationId),
    GestureEnded { edited: bool },
    BeginTextEdit(AnnotationId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCommit {
    Updated,
    Unchanged,
    Removed,
    UnknownAnnotation,
}

/// Transient interaction state for one session. It reads the store for hit
/// tests and changes it only through the store's mutation API.
#[derive(Debug, Clone)]
pub struct InteractionController {
    mode: ToolMode,
    color: Color,
    text_font_size: f64,
    selected: Option<AnnotationId>,
    gesture: GestureTracker,
    rubber_band: Option<RubberBand>,
    editing_text: Option<AnnotationId>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self::with_defaults(AnnotationColor::default().color(), DEFAULT_TEXT_FONT_SIZE)
    }

    pub fn with_defaults(color: Color, text_font_size: f64) -> Self {
        Self {
            mode: ToolMode::Select,
            color,
            text_font_size,
            selected: None,
            gesture: GestureTracker::default(),
            rubber_band: None,
            editing_text: None,
        }
    }

    pub fn tool_mode(&self) -> ToolMode {
        self.mode
    }

    /// Switching tools abandons any gesture or rubber band in flight.
    pub fn set_tool_mode(&mut self, mode: ToolMode) {
        if self.mode != mode {
            tracing::debug!(from = ?self.mode, to = ?mode, "tool mode changed");
        }
        self.cancel();
        self.mode = mode;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn text_font_size(&self) -> f64 {
        self.text_font_size
    }

    pub fn set_text_font_size(&mut self, size: f64) {
        self.text_font_size = size.max(1.0);
    }

    pub fn selected(&self) -> Option<AnnotationId> {
        self.selected
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.gesture.state
    }

    pub fn rubber_band(&self) -> Option<CanvasRect> {
        self.rubber_band.as_ref().map(RubberBand::bounds)
    }

    pub fn editing_text(&self) -> Option<AnnotationId> {
        self.editing_text
    }

    /// Whether the gesture in flight has already taken its undo snapshot.
    pub fn is_dirty(&self) -> bool {
        self.gesture.dirty
    }

    /// Drops the rubber band and any gesture in flight. Selection and tool
    /// mode are kept.
    pub fn cancel(&mut self) {
        self.gesture.reset();
        self.rubber_band = None;
    }

    /// ESC key: cancels the gesture, deselects and returns to the Select
    /// tool. A text edit that is open stays with its collaborator.
    pub fn escape(&mut self) {
        self.cancel();
        self.selected = None;
        if self.mode != ToolMode::Select {
            tracing::debug!(from = ?self.mode, "escape returned to select tool");
        }
        self.mode = ToolMode::Select;
    }

    /// `click_count` is the platform's press count; 2 or more is a double
    /// click and takes priority over the tool mode.
    pub fn pointer_down(
        &mut self,
        store: &mut AnnotationStore,
        point: CanvasPoint,
        click_count: u32,
    ) -> PointerOutcome {
        if click_count >= 2 {
            return self.double_click(store, point);
        }

        match self.mode {
            ToolMode::Select => self.select_pointer_down(store, point),
            ToolMode::CreateOval => {
                self.rubber_band = Some(RubberBand::at(point));
                PointerOutcome::RubberBandStarted
            }
            ToolMode::CreateText => self.create_text_at(store, point),
        }
    }

    pub fn pointer_drag(
        &mut self,
        store: &mut AnnotationStore,
        point: CanvasPoint,
    ) -> PointerOutcome {
        match self.mode {
            ToolMode::Select => self.select_pointer_drag(store, point),
            ToolMode::CreateOval => match self.rubber_band.as_mut() {
                Some(band) => {
                    band.end = point;
                    PointerOutcome::RubberBandUpdated(band.bounds())
                }
                None => PointerOutcome::Ignored,
            },
            ToolMode::CreateText => PointerOutcome::Ignored,
        }
    }

    pub fn pointer_up(
        &mut self,
        store: &mut AnnotationStore,
        point: CanvasPoint,
    ) -> PointerOutcome {
        if self.mode == ToolMode::CreateOval {
            return self.finish_rubber_band(store, point);
        }
        if !self.gesture.is_active() {
            return PointerOutcome::Ignored;
        }

        let edited = self.gesture.dirty;
        tracing::debug!(state = ?self.gesture.state, edited, "gesture ended");
        self.gesture.reset();
        PointerOutcome::GestureEnded { edited }
    }

    /// Final string from the text-input collaborator. Empty text is removed
    /// through the normal `remove` path so the deletion is undoable.
    pub fn commit_text(
        &mut self,
        store: &mut AnnotationStore,
        id: AnnotationId,
        text: impl Into<String>,
    ) -> TextCommit {
        let text = text.into();
        if self.editing_text == Some(id) {
            self.editing_text = None;
        }

        let Some(previous) = store
            .get(id)
            .and_then(Annotation::as_text)
            .map(|annotation| annotation.content.clone())
        else {
            tracing::debug!(%id, "text commit for unknown annotation ignored");
            return TextCommit::UnknownAnnotation;
        };

        if text.is_empty() {
            store.remove(id);
            if self.selected == Some(id) {
                self.selected = None;
            }
            tracing::debug!(%id, "empty text annotation removed");
            return TextCommit::Removed;
        }
        if text == previous {
            return TextCommit::Unchanged;
        }

        // A fresh label was snapshotted by its `add`; only edits to existing
        // content need their own undo step.
        if !previous.is_empty() {
            store.begin_mutation();
        }
        store.set_text_content(id, text);
        tracing::debug!(%id, "text committed");
        TextCommit::Updated
    }

    pub fn undo(&mut self, store: &mut AnnotationStore) -> bool {
        let changed = store.undo();
        self.reset_after_command(store);
        changed
    }

    pub fn redo(&mut self, store: &mut AnnotationStore) -> bool {
        let changed = store.redo();
        self.reset_after_command(store);
        changed
    }

    pub fn delete_selected(&mut self, store: &mut AnnotationStore) -> bool {
        let removed = self
            .selected
            .take()
            .and_then(|id| store.remove(id))
            .is_some();
        self.reset_after_command(store);
        removed
    }

    /// Returns whether there was anything to clear.
    pub fn clear_all(&mut self, store: &mut AnnotationStore) -> bool {
        let had_annotations = !store.is_empty();
        store.clear();
        self.reset_after_command(store);
        had_annotations
    }

    fn reset_after_command(&mut self, store: &AnnotationStore) {
        self.selected = None;
        self.cancel();
        if self.editing_text.is_some_and(|id| !store.contains(id)) {
            self.editing_text = None;
        }
    }

    fn select_pointer_down(
        &mut self,
        store: &AnnotationStore,
        point: CanvasPoint,
    ) -> PointerOutcome {
        if let Some((id, handle)) = self.selected_oval_handle_at(store, point) {
            self.gesture
                .arm(InteractionState::Resizing(id, handle), point);
            tracing::debug!(%id, handle = handle.index(), "oval resize started");
            return PointerOutcome::ResizeStarted(id, handle);
        }

        match store.find_at(point).map(Annotation::id) {
            Some(id) => {
                self.selected = Some(id);
                self.gesture.arm(InteractionState::Idle, point);
                tracing::debug!(%id, "annotation selected");
                PointerOutcome::Selected(id)
            }
            None => {
                self.selected = None;
                self.gesture.reset();
                PointerOutcome::SelectionCleared
            }
        }
    }

    fn selected_oval_handle_at(
        &self,
        store: &AnnotationStore,
        point: CanvasPoint,
    ) -> Option<(AnnotationId, ResizeHandle)> {
        let oval = store.get(self.selected?)?.as_oval()?;
        oval.handle_at(point).map(|handle| (oval.id, handle))
    }

    fn select_pointer_drag(
        &mut self,
        store: &mut AnnotationStore,
        point: CanvasPoint,
    ) -> PointerOutcome {
        let Some(last) = self.gesture.last_point else {
            return PointerOutcome::Ignored;
        };

        match self.gesture.state {
            InteractionState::Resizing(id, handle) => {
                let Some(bounds) = store
                    .get(id)
                    .and_then(Annotation::as_oval)
                    .map(|oval| oval.bounds)
                else {
                    self.gesture.reset();
                    return PointerOutcome::Ignored;
                };
                if self.gesture.mark_dirty() {
                    store.begin_mutation();
                }
                store.resize_oval(id, handle.resize_bounds(&bounds, point));
                self.gesture.last_point = Some(point);
                PointerOutcome::Resized(id)
            }
            InteractionState::Idle | InteractionState::Dragging(_) => {
                let target = match self.gesture.state {
                    InteractionState::Dragging(id) => Some(id),
                    _ => self.selected,
                };
                let Some(id) = target.filter(|id| store.contains(*id)) else {
                    self.gesture.reset();
                    return PointerOutcome::Ignored;
                };
                let (delta_x, delta_y) = point.delta_from(last);
                if self.gesture.mark_dirty() {
                    store.begin_mutation();
                }
                store.translate(id, delta_x, delta_y);
                self.gesture.state = InteractionState::Dragging(id);
                self.gesture.last_point = Some(point);
                PointerOutcome::Moved(id)
            }
        }
    }

    fn finish_rubber_band(
        &mut self,
        store: &mut AnnotationStore,
        point: CanvasPoint,
    ) -> PointerOutcome {
        let Some(mut band) = self.rubber_band.take() else {
            return PointerOutcome::Ignored;
        };
        band.end = point;
        let bounds = band.bounds();
        if !(bounds.width > OVAL_CREATE_THRESHOLD && bounds.height > OVAL_CREATE_THRESHOLD) {
            tracing::debug!(
                width = bounds.width,
                height = bounds.height,
                "rubber band too small; discarded"
            );
            return PointerOutcome::RubberBandDiscarded;
        }

        let id = store.allocate_id();
        store.add(OvalAnnotation::new(id, bounds, self.color).into());
        self.selected = Some(id);
        self.mode = ToolMode::Select;
        tracing::debug!(%id, ?bounds, "oval created");
        PointerOutcome::OvalCreated(id)
    }

    fn create_text_at(
        &mut self,
        store: &mut AnnotationStore,
        point: CanvasPoint,
    ) -> PointerOutcome {
        self.drop_abandoned_text(store);
        let id = store.allocate_id();
        store.add(TextAnnotation::new(id, point, self.text_font_size, self.color).into());
        self.selected = Some(id);
        self.editing_text = Some(id);
        self.mode = ToolMode::Select;
        tracing::debug!(%id, x = point.x, y = point.y, "text annotation created");
        PointerOutcome::BeginTextEdit(id)
    }

    fn double_click(&mut self, store: &mut AnnotationStore, point: CanvasPoint) -> PointerOutcome {
        self.cancel();
        let hit_text = store
            .find_at(point)
            .and_then(Annotation::as_text)
            .map(|text| text.id);

        match hit_text {
            Some(id) => {
                if self.editing_text != Some(id) {
                    self.drop_abandoned_text(store);
                }
                self.selected = Some(id);
                self.editing_text = Some(id);
                tracing::debug!(%id, "text annotation editing");
                PointerOutcome::BeginTextEdit(id)
            }
            None => self.create_text_at(store, point),
        }
    }

    /// A label left empty when editing moves elsewhere is deleted, so empty
    /// text never outlives its edit session.
    fn drop_abandoned_text(&mut self, store: &mut AnnotationStore) {
        let Some(id) = self.editing_text.take() else {
            return;
        };
        let abandoned = store
            .get(id)
            .and_then(Annotation::as_text)
            .is_some_and(TextAnnotation::is_empty);
        if abandoned {
            store.remove(id);
            tracing::debug!(%id, "abandoned empty text annotation removed");
        }
    }
}
