//! Vertex data for the demo scenes.
//!
//! Static triangle/square/color arrays plus the regular-polygon generator.
//! All positions are normalized device coordinates.

mod buffers;
mod polygon;

pub use buffers::{
    GeometryBuffers, SQUARE_VERTICES, TRIANGLE_COLORS, TRIANGLE_VERTICES, flatten_points,
};
pub use polygon::{
    InvalidSideCount, MAX_SIDES, MIN_SIDES, SideCountInputError, parse_side_count,
    regular_polygon_vertices,
};
