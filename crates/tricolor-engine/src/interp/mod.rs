//! Barycentric color interpolation inside a fixed isosceles triangle.
//!
//! The triangle's base sits on the bottom edge of canvas space and its apex is
//! centered above it. Points are in canvas space (origin bottom-left, +Y up).

mod barycentric;

pub use barycentric::{OutOfBounds, TriangleRegion, Weights, barycentric_weights, interpolate};
