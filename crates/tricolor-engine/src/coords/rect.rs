use super::Point2;

/// Placement of the drawing surface in window coordinates (logical pixels).
///
/// Window coordinates use the platform convention: origin top-left, +Y down.
/// [`CanvasRect::to_canvas_space`] flips them into the bottom-up space used by
/// the interpolator.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    #[inline]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Canvas covering a whole window client area.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.top + self.height
    }

    /// Converts a window-space event position to canvas space.
    ///
    /// `x` is measured from the left edge, `y` upward from the bottom edge.
    /// Points outside the canvas are converted all the same; callers decide
    /// what "outside" means.
    #[inline]
    pub fn to_canvas_space(self, event_x: f32, event_y: f32) -> Point2 {
        Point2::new(event_x - self.left, self.bottom() - event_y)
    }
}
