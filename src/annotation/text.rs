use crate::geometry::{CanvasPoint, CanvasRect, Color};

use super::metrics::TextMetrics;
use super::AnnotationId;

pub const DEFAULT_TEXT_FONT_SIZE: f64 = 12.0;

const TEXT_BOX_PADDING: f64 = 2.0;
const EMPTY_TEXT_BOX_WIDTH: f64 = 100.0;
const EMPTY_TEXT_BOX_EXTRA_HEIGHT: f64 = 4.0;

/// Text label anchored at a point. Content is only empty while the label is
/// being typed into.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnnotation {
    pub id: AnnotationId,
    pub anchor: CanvasPoint,
    pub content: String,
    pub font_size: f64,
    pub color: Color,
}

impl TextAnnotation {
    pub fn new(id: AnnotationId, anchor: CanvasPoint, font_size: f64, color: Color) -> Self {
        Self::with_text(id, anchor, String::new(), font_size, color)
    }

    pub fn with_text(
        id: AnnotationId,
        anchor: CanvasPoint,
        text: impl Into<String>,
        font_size: f64,
        color: Color,
    ) -> Self {
        Self {
            id,
            anchor,
            content: text.into(),
            font_size: clamp_font_size(font_size),
            color,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Tight box around the measured text, or a fixed placeholder box while
    /// the content is still empty.
    pub fn bounds_with(&self, metrics: &dyn TextMetrics) -> CanvasRect {
        if self.content.is_empty() {
            return CanvasRect::new(
                self.anchor.x,
                self.anchor.y,
                EMPTY_TEXT_BOX_WIDTH,
                self.font_size + EMPTY_TEXT_BOX_EXTRA_HEIGHT,
            );
        }

        let (width, height) = metrics.measure(&self.content, self.font_size);
        CanvasRect::new(
            self.anchor.x - TEXT_BOX_PADDING,
            self.anchor.y - TEXT_BOX_PADDING,
            width + TEXT_BOX_PADDING * 2.0,
            height + TEXT_BOX_PADDING * 2.0,
        )
    }

    pub fn contains_point_with(&self, point: CanvasPoint, metrics: &dyn TextMetrics) -> bool {
        self.bounds_with(metrics).contains(point)
    }

    pub fn translate(&mut self, delta_x: f64, delta_y: f64) {
        self.anchor = CanvasPoint::new(self.anchor.x + delta_x, self.anchor.y + delta_y);
    }
}

fn clamp_font_size(font_size: f64) -> f64 {
    if font_size.is_finite() && font_size >= 1.0 {
        font_size
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::ApproximateTextMetrics;

    #[derive(Debug)]
    struct FixedMetrics(f64, f64);

    impl TextMetrics for FixedMetrics {
        fn measure(&self, _text: &str, _font_size: f64) -> (f64, f64) {
            (self.0, self.1)
        }
    }

    fn text(content: &str) -> TextAnnotation {
        TextAnnotation::with_text(
            AnnotationId::new(7),
            CanvasPoint::new(100.0, 100.0),
            content,
            DEFAULT_TEXT_FONT_SIZE,
            Color::new(0, 0, 0),
        )
    }

    #[test]
    fn empty_text_uses_placeholder_box() {
        let text = text("");
        let bounds = text.bounds_with(&ApproximateTextMetrics);
        assert_eq!(bounds, CanvasRect::new(100.0, 100.0, 100.0, 16.0));
        assert!(text.contains_point_with(CanvasPoint::new(199.0, 115.0), &ApproximateTextMetrics));
        assert!(!text.contains_point_with(CanvasPoint::new(201.0, 105.0), &ApproximateTextMetrics));
    }

    #[test]
    fn measured_text_box_is_padded() {
        let text = text("hi");
        let bounds = text.bounds_with(&FixedMetrics(30.0, 14.0));
        assert_eq!(bounds, CanvasRect::new(98.0, 98.0, 34.0, 18.0));
        let metrics = FixedMetrics(30.0, 14.0);
        assert!(text.contains_point_with(CanvasPoint::new(98.5, 98.5), &metrics));
        assert!(!text.contains_point_with(CanvasPoint::new(133.0, 105.0), &metrics));
    }

    #[test]
    fn translate_moves_anchor_only() {
        let mut text = text("hello");
        text.translate(-10.0, 4.0);
        assert_eq!(text.anchor, CanvasPoint::new(90.0, 104.0));
        assert_eq!(text.content, "hello");
        assert_eq!(text.font_size, DEFAULT_TEXT_FONT_SIZE);
    }

    #[test]
    fn font_size_is_clamped_to_positive() {
        let text = TextAnnotation::new(
            AnnotationId::new(1),
            CanvasPoint::default(),
            0.0,
            Color::new(0, 0, 0),
        );
        assert_eq!(text.font_size, 1.0);
        assert!(text.is_empty());
    }
}
