//! Tricolor engine crate.
//!
//! Barycentric color picking and minimal wgpu rendering: value types, the
//! interpolator, static geometry, a GL-style binding layer over wgpu, the
//! winit runtime with its cooperative render loop, and the demo scenes.

pub mod coords;
pub mod core;
pub mod device;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod interp;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod window;
