/// Straight-alpha RGBA color.
///
/// Components are conventionally in `[0, 1]` but are never clamped here; clamping
/// (if any) is the job of whoever feeds the value to the GPU.
///
/// Default is opaque black `(0, 0, 0, 1)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from three channels.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Builds a color from up to four leading components.
    ///
    /// Missing channels fall back to `(0, 0, 0, 1)`; extra entries are ignored.
    pub fn from_components(components: &[f32]) -> Self {
        let mut out = [0.0, 0.0, 0.0, 1.0];
        for (dst, src) in out.iter_mut().zip(components) {
            *dst = *src;
        }
        Self::from(out)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Scales the color channels by `w`, leaving alpha untouched.
    #[inline]
    pub(crate) fn scaled_rgb(self, w: f32) -> [f32; 3] {
        [self.r * w, self.g * w, self.b * w]
    }

    /// Converts to the f64 clear color wgpu expects.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Color> for [f32; 4] {
    #[inline]
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_opaque_black() {
        assert_eq!(Color::default(), Color::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn from_components_fills_missing_channels() {
        assert_eq!(Color::from_components(&[]), Color::BLACK);
        assert_eq!(Color::from_components(&[0.5]), Color::new(0.5, 0.0, 0.0, 1.0));
        assert_eq!(Color::from_components(&[0.1, 0.2, 0.3]), Color::rgb(0.1, 0.2, 0.3));
    }

    #[test]
    fn from_components_ignores_extra_entries() {
        let c = Color::from_components(&[0.1, 0.2, 0.3, 0.4, 0.9]);
        assert_eq!(c, Color::new(0.1, 0.2, 0.3, 0.4));
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let c = Color::new(-1.0, 2.5, 0.0, 7.0);
        assert_eq!(c.to_array(), [-1.0, 2.5, 0.0, 7.0]);
    }

    #[test]
    fn wgpu_conversion_widens() {
        let c = Color::rgb(0.25, 0.5, 1.0).to_wgpu();
        assert_eq!((c.r, c.g, c.b, c.a), (0.25, 0.5, 1.0, 1.0));
    }
}
