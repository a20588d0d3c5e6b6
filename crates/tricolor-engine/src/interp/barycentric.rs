use std::fmt;

use crate::coords::Point2;
use crate::paint::Color;

/// The point does not lie inside the interpolation triangle.
///
/// This is an expected outcome of arbitrary clicks, not a failure.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct OutOfBounds;

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("point lies outside the interpolation triangle")
    }
}

impl std::error::Error for OutOfBounds {}

/// Barycentric weights of a point, one per triangle corner.
///
/// `right` is derived as `1 - top - left`, so the three always sum to 1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Weights {
    pub left: f32,
    pub right: f32,
    pub top: f32,
}

impl Weights {
    /// True when every weight is `>= 0`. NaN weights are never inside.
    #[inline]
    pub fn is_inside(self) -> bool {
        self.left >= 0.0 && self.right >= 0.0 && self.top >= 0.0
    }

    /// Blends the corner colors (lower-left, lower-right, apex). Alpha is always 1.
    pub fn blend(self, corners: &[Color; 3]) -> Color {
        let l = corners[0].scaled_rgb(self.left);
        let r = corners[1].scaled_rgb(self.right);
        let t = corners[2].scaled_rgb(self.top);
        Color::new(l[0] + r[0] + t[0], l[1] + r[1] + t[1], l[2] + r[2] + t[2], 1.0)
    }
}

/// Computes the unchecked weights of `(x, y)` in the triangle of the given base and height.
///
/// The triangle's base lies on `y = 0` from `x = 0` to `x = width`; the apex is at
/// `(width / 2, height)`.
#[inline]
fn raw_weights(x: f32, y: f32, width: f32, height: f32) -> Weights {
    let area = width * height;
    let top = y / height;
    let left = (area - y * width / 2.0 - x * height) / area;
    let right = 1.0 - top - left;
    Weights { left, right, top }
}

/// Returns the barycentric weights of `(x, y)`, or `OutOfBounds` if any is negative.
///
/// Non-positive or non-finite `width`/`height` describe an empty region and
/// always yield `OutOfBounds`.
pub fn barycentric_weights(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> Result<Weights, OutOfBounds> {
    if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
        return Err(OutOfBounds);
    }

    let w = raw_weights(x, y, width, height);
    if w.is_inside() { Ok(w) } else { Err(OutOfBounds) }
}

/// Interpolates the corner colors at `(x, y)`.
///
/// `corners` are ordered lower-left, lower-right, apex. Weights are not clamped,
/// so a point on an edge gets exactly zero weight from the opposite corner.
pub fn interpolate(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    corners: &[Color; 3],
) -> Result<Color, OutOfBounds> {
    barycentric_weights(x, y, width, height).map(|w| w.blend(corners))
}

/// Isosceles triangle with its base on the canvas bottom.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TriangleRegion {
    pub width: f32,
    pub height: f32,
}

impl TriangleRegion {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Region sized as a fraction of a canvas.
    #[inline]
    pub fn fraction_of(canvas_width: f32, canvas_height: f32, fx: f32, fy: f32) -> Self {
        Self::new(canvas_width * fx, canvas_height * fy)
    }

    /// Corner positions: lower-left, lower-right, apex.
    pub fn corners(self) -> [Point2; 3] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(self.width, 0.0),
            Point2::new(self.width / 2.0, self.height),
        ]
    }

    #[inline]
    pub fn weights(self, p: Point2) -> Result<Weights, OutOfBounds> {
        barycentric_weights(p.x, p.y, self.width, self.height)
    }

    #[inline]
    pub fn contains(self, p: Point2) -> bool {
        self.weights(p).is_ok()
    }

    #[inline]
    pub fn interpolate(self, p: Point2, corners: &[Color; 3]) -> Result<Color, OutOfBounds> {
        interpolate(p.x, p.y, self.width, self.height, corners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    const RGB: [Color; 3] = [Color::RED, Color::GREEN, Color::BLUE];

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= EPS
    }

    // ── corners ───────────────────────────────────────────────────────────

    #[test]
    fn lower_left_corner_returns_first_color() {
        assert_eq!(interpolate(0.0, 0.0, 100.0, 100.0, &RGB), Ok(Color::RED));
    }

    #[test]
    fn lower_right_corner_returns_second_color() {
        assert_eq!(interpolate(100.0, 0.0, 100.0, 100.0, &RGB), Ok(Color::GREEN));
    }

    #[test]
    fn apex_returns_third_color() {
        assert_eq!(interpolate(50.0, 100.0, 100.0, 100.0, &RGB), Ok(Color::BLUE));
    }

    #[test]
    fn corner_weights_are_unit() {
        let w = barycentric_weights(0.0, 0.0, 100.0, 100.0).unwrap();
        assert_eq!((w.left, w.right, w.top), (1.0, 0.0, 0.0));

        let w = barycentric_weights(100.0, 0.0, 100.0, 100.0).unwrap();
        assert_eq!((w.left, w.right, w.top), (0.0, 1.0, 0.0));

        let w = barycentric_weights(50.0, 100.0, 100.0, 100.0).unwrap();
        assert_eq!((w.left, w.right, w.top), (0.0, 0.0, 1.0));
    }

    #[test]
    fn corners_with_custom_colors_pass_through() {
        let corners = [
            Color::rgb(0.2, 0.4, 0.6),
            Color::rgb(0.9, 0.1, 0.3),
            Color::rgb(0.5, 0.5, 0.5),
        ];
        let region = TriangleRegion::new(100.0, 100.0);
        for (p, c) in region.corners().into_iter().zip(corners) {
            assert_eq!(region.interpolate(p, &corners), Ok(c));
        }
    }

    // ── interior ──────────────────────────────────────────────────────────

    #[test]
    fn interior_weights_are_positive_and_sum_to_one() {
        let samples = [(50.0, 30.0), (30.0, 10.0), (70.0, 20.0), (50.0, 90.0), (20.0, 5.0)];
        for (x, y) in samples {
            let w = barycentric_weights(x, y, 100.0, 100.0).unwrap();
            assert!(w.left > 0.0 && w.right > 0.0 && w.top > 0.0, "{x},{y}: {w:?}");
            assert!(approx(w.left + w.right + w.top, 1.0), "{x},{y}: {w:?}");
        }
    }

    #[test]
    fn centroid_blends_evenly() {
        let c = interpolate(50.0, 100.0 / 3.0, 100.0, 100.0, &RGB).unwrap();
        for channel in [c.r, c.g, c.b] {
            assert!(approx(channel, 1.0 / 3.0), "{c:?}");
        }
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn alpha_is_fixed_regardless_of_corners() {
        let translucent = [
            Color::new(1.0, 0.0, 0.0, 0.2),
            Color::new(0.0, 1.0, 0.0, 0.0),
            Color::new(0.0, 0.0, 1.0, 0.5),
        ];
        let c = interpolate(40.0, 20.0, 100.0, 100.0, &translucent).unwrap();
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn non_square_region() {
        // Midpoint of the base of a 200x50 triangle.
        let w = barycentric_weights(100.0, 0.0, 200.0, 50.0).unwrap();
        assert!(approx(w.left, 0.5) && approx(w.right, 0.5) && approx(w.top, 0.0), "{w:?}");
    }

    #[test]
    fn edge_point_has_zero_opposite_weight() {
        // Base edge: apex weight is exactly zero.
        let w = barycentric_weights(25.0, 0.0, 100.0, 100.0).unwrap();
        assert_eq!(w.top, 0.0);
    }

    #[test]
    fn interpolation_is_pure() {
        let a = interpolate(33.0, 21.0, 100.0, 100.0, &RGB);
        let b = interpolate(33.0, 21.0, 100.0, 100.0, &RGB);
        assert_eq!(a, b);
    }

    // ── outside ───────────────────────────────────────────────────────────

    #[test]
    fn left_of_base_is_out_of_bounds() {
        let w = raw_weights(-5.0, 0.0, 100.0, 100.0);
        assert!(w.left > 1.0 && w.right < 0.0);
        assert_eq!(interpolate(-5.0, 0.0, 100.0, 100.0, &RGB), Err(OutOfBounds));
    }

    #[test]
    fn below_base_is_out_of_bounds() {
        assert_eq!(interpolate(50.0, -1.0, 100.0, 100.0, &RGB), Err(OutOfBounds));
    }

    #[test]
    fn above_apex_is_out_of_bounds() {
        assert_eq!(interpolate(50.0, 101.0, 100.0, 100.0, &RGB), Err(OutOfBounds));
    }

    #[test]
    fn outside_slanted_edges_is_out_of_bounds() {
        // Inside the bounding box, outside the triangle.
        assert_eq!(interpolate(5.0, 90.0, 100.0, 100.0, &RGB), Err(OutOfBounds));
        assert_eq!(interpolate(95.0, 90.0, 100.0, 100.0, &RGB), Err(OutOfBounds));
    }

    #[test]
    fn negative_weight_always_means_out_of_bounds() {
        for x in (-20..=120).step_by(7) {
            for y in (-20..=120).step_by(7) {
                let (x, y) = (x as f32, y as f32);
                let w = raw_weights(x, y, 100.0, 100.0);
                let res = barycentric_weights(x, y, 100.0, 100.0);
                if w.left < 0.0 || w.right < 0.0 || w.top < 0.0 {
                    assert_eq!(res, Err(OutOfBounds), "{x},{y}");
                } else {
                    assert!(res.is_ok(), "{x},{y}");
                }
            }
        }
    }

    // ── degenerate input ──────────────────────────────────────────────────

    #[test]
    fn empty_region_is_out_of_bounds() {
        assert_eq!(barycentric_weights(0.0, 0.0, 0.0, 100.0), Err(OutOfBounds));
        assert_eq!(barycentric_weights(0.0, 0.0, 100.0, -1.0), Err(OutOfBounds));
        assert_eq!(barycentric_weights(0.0, 0.0, f32::INFINITY, 1.0), Err(OutOfBounds));
    }

    #[test]
    fn nan_point_is_out_of_bounds() {
        assert_eq!(barycentric_weights(f32::NAN, 10.0, 100.0, 100.0), Err(OutOfBounds));
    }

    #[test]
    fn region_from_canvas_fraction() {
        let r = TriangleRegion::fraction_of(800.0, 600.0, 0.5, 0.75);
        assert_eq!(r, TriangleRegion::new(400.0, 450.0));
        assert!(r.contains(Point2::new(200.0, 200.0)));
        assert!(!r.contains(Point2::new(500.0, 10.0)));
    }
}
