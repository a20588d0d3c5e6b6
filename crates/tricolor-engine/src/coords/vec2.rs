/// 2D point in canvas space (origin bottom-left, +Y up) or NDC, depending on use.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
