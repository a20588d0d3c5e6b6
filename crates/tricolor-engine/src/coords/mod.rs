//! Coordinate types shared by the interpolator, the geometry module and input handling.
//!
//! Canvas space:
//! - Logical pixels (DPI-aware)
//! - Origin bottom-left
//! - +X right, +Y up
//!
//! Window events arrive top-left based; `CanvasRect` converts them.
//! Vertex data is authored directly in NDC and needs no conversion.

mod rect;
mod vec2;

pub use rect::CanvasRect;
pub use vec2::Point2;
