use crate::coords::CanvasRect;
use crate::render::GraphicsBackend;

/// Context passed to `App::on_input`.
pub struct InputCtx<'a> {
    pub gfx: &'a mut dyn GraphicsBackend,
    /// Drawing surface placement in window coordinates (logical pixels).
    pub canvas: CanvasRect,
}

/// Context passed to `App::on_frame`.
pub struct FrameCtx<'a> {
    pub gfx: &'a mut dyn GraphicsBackend,
    pub canvas: CanvasRect,
    /// Index of this frame since the loop started.
    pub frame_index: u64,
}
