use crate::geometry::{CanvasPoint, CanvasRect, Color};

use super::handle::ResizeHandle;
use super::AnnotationId;

pub const OVAL_STROKE_WIDTH: f64 = 3.5;
pub const OVAL_MIN_SIZE: f64 = 10.0;

/// Stroke-only ellipse inscribed in an axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct OvalAnnotation {
    pub id: AnnotationId,
    pub bounds: CanvasRect,
    pub color: Color,
}

impl OvalAnnotation {
    pub fn new(id: AnnotationId, bounds: CanvasRect, color: Color) -> Self {
        Self {
            id,
            bounds: CanvasRect::new(
                bounds.x,
                bounds.y,
                bounds.width.max(0.0),
                bounds.height.max(0.0),
            ),
            color,
        }
    }

    /// Circle of `radius` around `center`; the rectangle model covers it as
    /// a square bounding box.
    pub fn from_center_radius(
        id: AnnotationId,
        center: CanvasPoint,
        radius: f64,
        color: Color,
    ) -> Self {
        let radius = radius.max(0.0);
        Self::new(
            id,
            CanvasRect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0),
            color,
        )
    }

    pub const fn stroke_width(&self) -> f64 {
        OVAL_STROKE_WIDTH
    }

    /// Extent covered by the rendered stroke.
    pub fn visual_bounds(&self) -> CanvasRect {
        self.bounds.expanded_by(OVAL_STROKE_WIDTH)
    }

    /// Hits anywhere inside the rectangle grown by twice the stroke width,
    /// so clicks just outside the visible outline still select it.
    pub fn contains_point(&self, point: CanvasPoint) -> bool {
        self.bounds
            .expanded_by(OVAL_STROKE_WIDTH * 2.0)
            .contains(point)
    }

    pub fn translate(&mut self, delta_x: f64, delta_y: f64) {
        self.bounds = self.bounds.translated(delta_x, delta_y);
    }

    /// Applies user-driven bounds, flooring each dimension at
    /// [`OVAL_MIN_SIZE`] while keeping the origin.
    pub fn resize(&mut self, bounds: CanvasRect) {
        self.bounds = CanvasRect::new(
            bounds.x,
            bounds.y,
            bounds.width.max(OVAL_MIN_SIZE),
            bounds.height.max(OVAL_MIN_SIZE),
        );
    }

    pub fn resize_handles(&self) -> [CanvasRect; 8] {
        ResizeHandle::ALL.map(|handle| handle.hit_region(&self.bounds))
    }

    /// First handle (in index order) whose hit region contains `point`.
    pub fn handle_at(&self, point: CanvasPoint) -> Option<ResizeHandle> {
        ResizeHandle::ALL
            .into_iter()
            .find(|handle| handle.hit_region(&self.bounds).contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oval(x: f64, y: f64, width: f64, height: f64) -> OvalAnnotation {
        OvalAnnotation::new(
            AnnotationId::new(1),
            CanvasRect::new(x, y, width, height),
            Color::new(255, 0, 0),
        )
    }

    #[test]
    fn hit_test_accepts_tolerance_band_outside_the_stroke() {
        let oval = oval(10.0, 10.0, 50.0, 50.0);
        assert!(oval.contains_point(CanvasPoint::new(35.0, 35.0)));
        assert!(oval.contains_point(CanvasPoint::new(3.0, 3.0)));
        assert!(oval.contains_point(CanvasPoint::new(67.0, 35.0)));
        assert!(!oval.contains_point(CanvasPoint::new(2.9, 35.0)));
        assert!(!oval.contains_point(CanvasPoint::new(35.0, 67.1)));
    }

    #[test]
    fn translate_moves_origin_without_resizing() {
        let mut oval = oval(10.0, 10.0, 50.0, 30.0);
        oval.translate(5.0, -2.5);
        assert_eq!(oval.bounds, CanvasRect::new(15.0, 7.5, 50.0, 30.0));
    }

    #[test]
    fn resize_floors_dimensions_at_minimum() {
        let mut oval = oval(10.0, 10.0, 50.0, 30.0);
        oval.resize(CanvasRect::new(20.0, 20.0, 3.0, -8.0));
        assert_eq!(oval.bounds, CanvasRect::new(20.0, 20.0, 10.0, 10.0));
    }

    #[test]
    fn new_never_stores_negative_dimensions() {
        let oval = oval(0.0, 0.0, -5.0, 12.0);
        assert_eq!(oval.bounds.width, 0.0);
        assert_eq!(oval.bounds.height, 12.0);
    }

    #[test]
    fn center_radius_is_a_square_bounding_box() {
        let oval = OvalAnnotation::from_center_radius(
            AnnotationId::new(3),
            CanvasPoint::new(50.0, 50.0),
            20.0,
            Color::new(0, 0, 0),
        );
        assert_eq!(oval.bounds, CanvasRect::new(30.0, 30.0, 40.0, 40.0));
    }

    #[test]
    fn resize_handles_are_eight_centered_squares() {
        let oval = oval(0.0, 0.0, 40.0, 20.0);
        let handles = oval.resize_handles();
        assert_eq!(handles.len(), 8);
        assert_eq!(handles[0], CanvasRect::new(-4.0, -4.0, 8.0, 8.0));
        assert_eq!(handles[3], CanvasRect::new(36.0, 6.0, 8.0, 8.0));
        assert_eq!(handles[7], CanvasRect::new(-4.0, 6.0, 8.0, 8.0));
    }

    #[test]
    fn handle_at_reports_the_grabbed_handle() {
        let oval = oval(0.0, 0.0, 40.0, 20.0);
        assert_eq!(oval.handle_at(CanvasPoint::new(41.0, 21.0)), Some(ResizeHandle::BottomRight));
        assert_eq!(oval.handle_at(CanvasPoint::new(20.0, -3.0)), Some(ResizeHandle::Top));
        assert_eq!(oval.handle_at(CanvasPoint::new(20.0, 10.0)), None);
    }

    #[test]
    fn visual_bounds_include_the_stroke() {
        let oval = oval(10.0, 10.0, 20.0, 20.0);
        assert_eq!(oval.visual_bounds(), CanvasRect::new(6.5, 6.5, 27.0, 27.0));
    }
}
