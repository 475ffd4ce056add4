/// Measures rendered text so hit-testing can use the real glyph extent.
///
/// The core never touches fonts; an embedding UI can pass its own metrics to
/// [`crate::store::AnnotationStore::with_metrics`].
pub trait TextMetrics: std::fmt::Debug {
    /// Returns `(width, height)` of `text` laid out at `font_size`.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// Font-free estimate used when no real metrics are available.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ApproximateTextMetrics;

const APPROXIMATE_CHAR_WIDTH_RATIO: f64 = 0.62;
const APPROXIMATE_LINE_HEIGHT_RATIO: f64 = 1.3;

impl TextMetrics for ApproximateTextMetrics {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let font_size = font_size.max(1.0);
        let char_width = font_size * APPROXIMATE_CHAR_WIDTH_RATIO;
        let line_height = font_size * APPROXIMATE_LINE_HEIGHT_RATIO;
        let lines = text.split('\n').collect::<Vec<_>>();
        let widest = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        (
            widest as f64 * char_width,
            lines.len() as f64 * line_height,
        )
    }
}
