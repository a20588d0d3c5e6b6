//! Frame scheduling.
//!
//! The render loop is a cooperative task: each invocation draws one frame and
//! asks the host for exactly one more. No clock drives it; the host's display
//! refresh does.

mod render_loop;

pub use render_loop::{FrameScheduler, LoopHandle, LoopState, RenderLoop};
