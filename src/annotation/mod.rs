//! Annotation data model: ovals and text labels drawn over the source image.

mod handle;
mod metrics;
mod oval;
mod text;

use std::fmt;

pub use crate::geometry::{CanvasPoint, CanvasRect, Color};
pub use handle::{ResizeHandle, HANDLE_SIZE};
pub use metrics::{ApproximateTextMetrics, TextMetrics};
pub use oval::{OvalAnnotation, OVAL_MIN_SIZE, OVAL_STROKE_WIDTH};
pub use text::{TextAnnotation, DEFAULT_TEXT_FONT_SIZE};

/// Stable identity of an annotation. Allocated by the store and never reused
/// within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnnotationId(u64);

impl AnnotationId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Oval,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    Oval(OvalAnnotation),
    Text(TextAnnotation),
}

impl Annotation {
    pub const fn id(&self) -> AnnotationId {
        match self {
            Self::Oval(oval) => oval.id,
            Self::Text(text) => text.id,
        }
    }

    pub const fn kind(&self) -> AnnotationKind {
        match self {
            Self::Oval(_) => AnnotationKind::Oval,
            Self::Text(_) => AnnotationKind::Text,
        }
    }

    pub const fn color(&self) -> Color {
        match self {
            Self::Oval(oval) => oval.color,
            Self::Text(text) => text.color,
        }
    }

    pub fn set_color(&mut self, color: Color) {
        match self {
            Self::Oval(oval) => oval.color = color,
            Self::Text(text) => text.color = color,
        }
    }

    /// Hit test using the built-in text estimate.
    pub fn contains_point(&self, point: CanvasPoint) -> bool {
        self.contains_point_with(point, &ApproximateTextMetrics)
    }

    pub fn contains_point_with(&self, point: CanvasPoint, metrics: &dyn TextMetrics) -> bool {
        match self {
            Self::Oval(oval) => oval.contains_point(point),
            Self::Text(text) => text.contains_point_with(point, metrics),
        }
    }

    pub fn bounding_box(&self) -> CanvasRect {
        self.bounding_box_with(&ApproximateTextMetrics)
    }

    pub fn bounding_box_with(&self, metrics: &dyn TextMetrics) -> CanvasRect {
        match self {
            Self::Oval(oval) => oval.visual_bounds(),
            Self::Text(text) => text.bounds_with(metrics),
        }
    }

    pub fn translate(&mut self, delta_x: f64, delta_y: f64) {
        match self {
            Self::Oval(oval) => oval.translate(delta_x, delta_y),
            Self::Text(text) => text.translate(delta_x, delta_y),
        }
    }

    pub fn as_oval(&self) -> Option<&OvalAnnotation> {
        match self {
            Self::Oval(oval) => Some(oval),
            _ => None,
        }
    }

    pub fn as_oval_mut(&mut self) -> Option<&mut OvalAnnotation> {
        match self {
            Self::Oval(oval) => Some(oval),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextAnnotation> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextAnnotation> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<OvalAnnotation> for Annotation {
    fn from(oval: OvalAnnotation) -> Self {
        Self::Oval(oval)
    }
}

impl From<TextAnnotation> for Annotation {
    fn from(text: TextAnnotation) -> Self {
        Self::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::new(255, 0, 0)
    }

    #[test]
    fn shared_accessors_dispatch_per_variant() {
        let mut oval: Annotation =
            OvalAnnotation::new(AnnotationId::new(1), CanvasRect::new(0.0, 0.0, 20.0, 20.0), red())
                .into();
        let mut text: Annotation = TextAnnotation::with_text(
            AnnotationId::new(2),
            CanvasPoint::new(5.0, 5.0),
            "hi",
            DEFAULT_TEXT_FONT_SIZE,
            red(),
        )
        .into();

        assert_eq!(oval.id(), AnnotationId::new(1));
        assert_eq!(text.id(), AnnotationId::new(2));
        assert_eq!(oval.kind(), AnnotationKind::Oval);
        assert_eq!(text.kind(), AnnotationKind::Text);

        oval.set_color(Color::new(0, 0, 255));
        text.set_color(Color::new(0, 255, 0));
        assert_eq!(oval.color(), Color::new(0, 0, 255));
        assert_eq!(text.color(), Color::new(0, 255, 0));
    }

    #[test]
    fn translate_keeps_size_for_both_variants() {
        let mut oval: Annotation =
            OvalAnnotation::new(AnnotationId::new(1), CanvasRect::new(0.0, 0.0, 20.0, 30.0), red())
                .into();
        oval.translate(10.0, -5.0);
        let moved = oval.as_oval().expect("oval variant");
        assert_eq!(moved.bounds, CanvasRect::new(10.0, -5.0, 20.0, 30.0));

        let mut text: Annotation = TextAnnotation::with_text(
            AnnotationId::new(2),
            CanvasPoint::new(5.0, 5.0),
            "label",
            DEFAULT_TEXT_FONT_SIZE,
            red(),
        )
        .into();
        let before = text.bounding_box();
        text.translate(3.0, 4.0);
        let after = text.bounding_box();
        assert_eq!(after.width, before.width);
        assert_eq!(after.height, before.height);
        assert_eq!(after.x, before.x + 3.0);
    }

    #[test]
    fn projections_return_only_matching_variant() {
        let text: Annotation = TextAnnotation::new(
            AnnotationId::new(9),
            CanvasPoint::default(),
            DEFAULT_TEXT_FONT_SIZE,
            red(),
        )
        .into();
        assert!(text.as_text().is_some());
        assert!(text.as_oval().is_none());
        assert_eq!(AnnotationId::new(9).to_string(), "#9");
    }
}
