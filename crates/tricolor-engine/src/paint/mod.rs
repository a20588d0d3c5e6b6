//! Paint model.
//!
//! Only flat colors exist; per-vertex variation is expressed by color buffers
//! (see `geometry`), not by paint sources.

pub mod color;

pub use color::Color;
