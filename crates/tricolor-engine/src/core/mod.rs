//! Core engine-facing contracts.
//!
//! Defines the interface between the window runtime and applications. The
//! runtime owns the window, GPU and render loop; applications only see a
//! `GraphicsBackend` and the canvas placement.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, InputCtx};
