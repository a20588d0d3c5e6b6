//! Demo scenes.
//!
//! Each scene is an [`App`](crate::core::App) the window runtime can drive:
//! - [`ColorPickerScene`]: colored triangle plus a square recolored by clicks
//! - [`PolygonScene`]: regular N-gon with a typed side count

mod picker;
mod polygon;

pub use picker::{ColorPickerScene, PickerConfig, RenderState};
pub use polygon::{PolygonConfig, PolygonScene, SideCountField};
