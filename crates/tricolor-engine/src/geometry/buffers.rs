use crate::coords::Point2;
use crate::paint::Color;

/// Triangle positions in NDC: lower-left, lower-right, apex.
pub const TRIANGLE_VERTICES: [Point2; 3] = [
    Point2::new(-0.5, -0.75),
    Point2::new(0.5, -0.75),
    Point2::new(0.0, 0.75),
];

/// Square positions in NDC, two triangles.
pub const SQUARE_VERTICES: [Point2; 6] = [
    Point2::new(-0.5, -0.5),
    Point2::new(0.5, -0.5),
    Point2::new(0.5, 0.5),
    Point2::new(-0.5, -0.5),
    Point2::new(0.5, 0.5),
    Point2::new(-0.5, 0.5),
];

/// Per-vertex colors, index-aligned with [`TRIANGLE_VERTICES`].
///
/// Also the interpolator's corner colors.
pub const TRIANGLE_COLORS: [Color; 3] = [Color::RED, Color::GREEN, Color::BLUE];

/// Static geometry for the color-picker scene.
///
/// Built once at startup; only read access is exposed.
#[derive(Debug, Clone)]
pub struct GeometryBuffers {
    triangle: [Point2; 3],
    square: [Point2; 6],
    colors: [Color; 3],
}

impl GeometryBuffers {
    pub fn new() -> Self {
        Self {
            triangle: TRIANGLE_VERTICES,
            square: SQUARE_VERTICES,
            colors: TRIANGLE_COLORS,
        }
    }

    #[inline]
    pub fn triangle_vertices(&self) -> &[Point2] {
        &self.triangle
    }

    #[inline]
    pub fn square_vertices(&self) -> &[Point2] {
        &self.square
    }

    #[inline]
    pub fn triangle_colors(&self) -> &[Color; 3] {
        &self.colors
    }

    /// Triangle positions packed as `[x0, y0, x1, y1, ...]`.
    pub fn triangle_data(&self) -> Vec<f32> {
        flatten_points(&self.triangle)
    }

    /// Square positions packed as `[x0, y0, x1, y1, ...]`.
    pub fn square_data(&self) -> Vec<f32> {
        flatten_points(&self.square)
    }

    /// Triangle colors packed as `[r0, g0, b0, a0, ...]`.
    pub fn color_data(&self) -> Vec<f32> {
        self.colors.iter().flat_map(|c| c.to_array()).collect()
    }
}

impl Default for GeometryBuffers {
    fn default() -> Self {
        Self::new()
    }
}

/// Packs points into a flat `f32` array, two floats per vertex.
pub fn flatten_points(points: &[Point2]) -> Vec<f32> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_match_vertex_counts() {
        let g = GeometryBuffers::new();
        assert_eq!(g.triangle_data().len(), 3 * 2);
        assert_eq!(g.square_data().len(), 6 * 2);
        assert_eq!(g.color_data().len(), 3 * 4);
    }

    #[test]
    fn colors_align_with_triangle_vertices() {
        let g = GeometryBuffers::new();
        assert_eq!(g.triangle_colors().len(), g.triangle_vertices().len());
        assert_eq!(&g.color_data()[..4], &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(&g.color_data()[8..], &[0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn triangle_is_isosceles_with_flat_base() {
        let [ll, lr, apex] = TRIANGLE_VERTICES;
        assert_eq!(ll.y, lr.y);
        assert_eq!(apex.x, (ll.x + lr.x) / 2.0);
        assert!(apex.y > ll.y);
    }

    #[test]
    fn flatten_preserves_order() {
        let pts = [Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)];
        assert_eq!(flatten_points(&pts), vec![1.0, 2.0, 3.0, 4.0]);
    }
}
