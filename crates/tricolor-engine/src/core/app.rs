use anyhow::Result;

use super::ctx::{FrameCtx, InputCtx};
use crate::input::InputEvent;
use crate::render::GraphicsBackend;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by the window runtime.
///
/// Call order: `on_start` once, then any interleaving of `on_input` and
/// `on_frame`. Input handlers run synchronously, so state they change is
/// visible to the next frame.
pub trait App {
    /// Creates programs and uploads static buffers. An error aborts startup.
    fn on_start(&mut self, gfx: &mut dyn GraphicsBackend) -> Result<()>;

    fn on_input(&mut self, ctx: &mut InputCtx<'_>, event: &InputEvent) -> AppControl {
        let _ = (ctx, event);
        AppControl::Continue
    }

    /// Draws one frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
