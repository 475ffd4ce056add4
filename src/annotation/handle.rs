use crate::geometry::{CanvasPoint, CanvasRect};

use super::oval::OVAL_MIN_SIZE;

/// Side length of the square hit region drawn around each handle point.
pub const HANDLE_SIZE: f64 = 8.0;

/// One of the eight resize grips around an oval's bounding rectangle.
///
/// The index order is stable: it starts at the `(min x, min y)` corner and
/// walks the rectangle clockwise (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeHandle {
    pub const ALL: [Self; 8] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Right,
        Self::BottomRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::Left,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::Top => 1,
            Self::TopRight => 2,
            Self::Right => 3,
            Self::BottomRight => 4,
            Self::Bottom => 5,
            Self::BottomLeft => 6,
            Self::Left => 7,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn point_on(self, bounds: &CanvasRect) -> CanvasPoint {
        match self {
            Self::TopLeft => CanvasPoint::new(bounds.min_x(), bounds.min_y()),
            Self::Top => CanvasPoint::new(bounds.mid_x(), bounds.min_y()),
            Self::TopRight => CanvasPoint::new(bounds.max_x(), bounds.min_y()),
            Self::Right => CanvasPoint::new(bounds.max_x(), bounds.mid_y()),
            Self::BottomRight => CanvasPoint::new(bounds.max_x(), bounds.max_y()),
            Self::Bottom => CanvasPoint::new(bounds.mid_x(), bounds.max_y()),
            Self::BottomLeft => CanvasPoint::new(bounds.min_x(), bounds.max_y()),
            Self::Left => CanvasPoint::new(bounds.min_x(), bounds.mid_y()),
        }
    }

    pub fn hit_region(self, bounds: &CanvasRect) -> CanvasRect {
        CanvasRect::centered_square(self.point_on(bounds), HANDLE_SIZE)
    }

    const fn moves_left_edge(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft | Self::Left)
    }

    const fn moves_right_edge(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight | Self::Right)
    }

    const fn moves_top_edge(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::Top)
    }

    const fn moves_bottom_edge(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight | Self::Bottom)
    }

    /// Anchored resize: only the edges owned by this handle follow the
    /// pointer, the opposite edges stay put. A moving edge stops
    /// `OVAL_MIN_SIZE` short of its opposite edge, so dragging past it never
    /// flips or collapses the rectangle.
    pub fn resize_bounds(self, bounds: &CanvasRect, pointer: CanvasPoint) -> CanvasRect {
        let mut left = bounds.min_x();
        let mut right = bounds.max_x();
        let mut top = bounds.min_y();
        let mut bottom = bounds.max_y();

        if self.moves_left_edge() {
            left = pointer.x.min(right - OVAL_MIN_SIZE);
        }
        if self.moves_right_edge() {
            right = pointer.x.max(left + OVAL_MIN_SIZE);
        }
        if self.moves_top_edge() {
            top = pointer.y.min(bottom - OVAL_MIN_SIZE);
        }
        if self.moves_bottom_edge() {
            bottom = pointer.y.max(top + OVAL_MIN_SIZE);
        }

        CanvasRect::new(left, top, right - left, bottom - top)
    }
}
