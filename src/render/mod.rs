//! Read-only frame handed to whatever draws the canvas. Nothing here
//! mutates the store or the controller.

use crate::annotation::{
    Annotation, AnnotationId, CanvasPoint, CanvasRect, Color, OVAL_STROKE_WIDTH,
};
use crate::interaction::InteractionController;
use crate::store::AnnotationStore;

/// Drawing backend supplied by the embedding UI.
pub trait Renderer {
    fn draw(&mut self, frame: &RenderFrame<'_>);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RubberBandPreview {
    pub bounds: CanvasRect,
    pub color: Color,
}

/// Decoration for the selected annotation: ovals get their resize grips,
/// text gets an outline of its measured box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionOverlay {
    Handles {
        id: AnnotationId,
        bounds: CanvasRect,
        handles: [CanvasRect; 8],
    },
    Outline {
        id: AnnotationId,
        bounds: CanvasRect,
    },
}

impl SelectionOverlay {
    pub const fn id(&self) -> AnnotationId {
        match self {
            Self::Handles { id, .. } | Self::Outline { id, .. } => *id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand<'a> {
    StrokeOval {
        bounds: CanvasRect,
        color: Color,
        stroke_width: f64,
    },
    Text {
        anchor: CanvasPoint,
        content: &'a str,
        font_size: f64,
        color: Color,
    },
    RubberBand {
        bounds: CanvasRect,
        color: Color,
        stroke_width: f64,
    },
    SelectionOutline(CanvasRect),
    Handle(CanvasRect),
}

#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    /// Back to front.
    pub annotations: &'a [Annotation],
    pub rubber_band: Option<RubberBandPreview>,
    pub selection: Option<SelectionOverlay>,
    pub editing_text: Option<AnnotationId>,
}

impl<'a> RenderFrame<'a> {
    pub fn capture(store: &'a AnnotationStore, controller: &InteractionController) -> Self {
        let rubber_band = controller.rubber_band().map(|bounds| RubberBandPreview {
            bounds,
            color: controller.color(),
        });
        let selection = controller
            .selected()
            .and_then(|id| selection_overlay(store, id));

        Self {
            annotations: store.annotations(),
            rubber_band,
            selection,
            editing_text: controller.editing_text(),
        }
    }

    /// Flattens the frame into paint order: annotations, then the rubber
    /// band, then selection chrome. Empty text labels draw nothing.
    pub fn draw_list(&self) -> Vec<DrawCommand<'a>> {
        let mut commands = Vec::with_capacity(self.annotations.len() + 9);

        for annotation in self.annotations {
            match annotation {
                Annotation::Oval(oval) => commands.push(DrawCommand::StrokeOval {
                    bounds: oval.bounds,
                    color: oval.color,
                    stroke_width: oval.stroke_width(),
                }),
                Annotation::Text(text) if text.is_empty() => {}
                Annotation::Text(text) => commands.push(DrawCommand::Text {
                    anchor: text.anchor,
                    content: &text.content,
                    font_size: text.font_size,
                    color: text.color,
                }),
            }
        }

        if let Some(preview) = self.rubber_band {
            commands.push(DrawCommand::RubberBand {
                bounds: preview.bounds,
                color: preview.color,
                stroke_width: OVAL_STROKE_WIDTH,
            });
        }

        match self.selection {
            Some(SelectionOverlay::Handles { handles, .. }) => {
                commands.extend(handles.into_iter().map(DrawCommand::Handle));
            }
            Some(SelectionOverlay::Outline { bounds, .. }) => {
                commands.push(DrawCommand::SelectionOutline(bounds));
            }
            None => {}
        }

        commands
    }
}

fn selection_overlay(store: &AnnotationStore, id: AnnotationId) -> Option<SelectionOverlay> {
    match store.get(id)? {
        Annotation::Oval(oval) => Some(SelectionOverlay::Handles {
            id,
            bounds: oval.bounds,
            handles: oval.resize_handles(),
        }),
        Annotation::Text(_) => Some(SelectionOverlay::Outline {
            id,
            bounds: store.bounding_box(id)?,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{OvalAnnotation, TextAnnotation, DEFAULT_TEXT_FONT_SIZE};
    use crate::interaction::{PointerOutcome, ToolMode};

    fn black() -> Color {
        Color::new(0, 0, 0)
    }

    #[derive(Default)]
    struct CountingRenderer {
        commands: usize,
    }

    impl Renderer for CountingRenderer {
        fn draw(&mut self, frame: &RenderFrame<'_>) {
            self.commands += frame.draw_list().len();
        }
    }

    #[test]
    fn selected_oval_exposes_eight_handles() {
        let mut store = AnnotationStore::new();
        let mut controller = InteractionController::new();
        let id = store.allocate_id();
        store.add(OvalAnnotation::new(id, CanvasRect::new(0.0, 0.0, 40.0, 20.0), black()).into());
        controller.pointer_down(&mut store, CanvasPoint::new(20.0, 10.0), 1);

        let frame = RenderFrame::capture(&store, &controller);
        let Some(SelectionOverlay::Handles { handles, bounds, .. }) = frame.selection else {
            panic!("oval selection should draw handles");
        };
        assert_eq!(bounds, CanvasRect::new(0.0, 0.0, 40.0, 20.0));
        assert_eq!(handles[4], CanvasRect::new(36.0, 16.0, 8.0, 8.0));

        let commands = frame.draw_list();
        assert_eq!(commands.len(), 9);
        assert!(matches!(commands[0], DrawCommand::StrokeOval { .. }));
        assert!(commands[1..]
            .iter()
            .all(|command| matches!(command, DrawCommand::Handle(_))));
    }

    #[test]
    fn selected_text_is_outlined_and_empty_text_is_not_drawn() {
        let mut store = AnnotationStore::new();
        let mut controller = InteractionController::new();
        let label = store.allocate_id();
        store.add(
            TextAnnotation::with_text(
                label,
                CanvasPoint::new(10.0, 10.0),
                "note",
                DEFAULT_TEXT_FONT_SIZE,
                black(),
            )
            .into(),
        );
        let blank = store.allocate_id();
        store.add(
            TextAnnotation::new(
                blank,
                CanvasPoint::new(200.0, 200.0),
                DEFAULT_TEXT_FONT_SIZE,
                black(),
            )
            .into(),
        );
        controller.pointer_down(&mut store, CanvasPoint::new(12.0, 12.0), 1);

        let frame = RenderFrame::capture(&store, &controller);
        assert_eq!(
            frame.selection,
            Some(SelectionOverlay::Outline {
                id: label,
                bounds: store.bounding_box(label).expect("label bounds"),
            })
        );
        let commands = frame.draw_list();
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], DrawCommand::Text { content: "note", .. }));
        assert!(matches!(commands[1], DrawCommand::SelectionOutline(_)));
    }

    #[test]
    fn rubber_band_preview_uses_current_color() {
        let mut store = AnnotationStore::new();
        let mut controller = InteractionController::new();
        controller.set_color(Color::new(0, 217, 255));
        controller.set_tool_mode(ToolMode::CreateOval);
        controller.pointer_down(&mut store, CanvasPoint::new(0.0, 0.0), 1);
        let outcome = controller.pointer_drag(&mut store, CanvasPoint::new(30.0, 40.0));
        assert!(matches!(outcome, PointerOutcome::RubberBandUpdated(_)));

        let frame = RenderFrame::capture(&store, &controller);
        assert_eq!(
            frame.rubber_band,
            Some(RubberBandPreview {
                bounds: CanvasRect::new(0.0, 0.0, 30.0, 40.0),
                color: Color::new(0, 217, 255),
            })
        );
        assert_eq!(frame.selection, None);

        let mut renderer = CountingRenderer::default();
        renderer.draw(&frame);
        assert_eq!(renderer.commands, 1);
    }
}
