//! Render pipeline binding.
//!
//! Shapes are drawn through the [`GraphicsBackend`] trait with a classic
//! bind/enable/draw/disable protocol ([`draw_shape`]). [`WgpuBackend`] is the
//! real implementation; tests use a recording double.
//!
//! Convention:
//! - vertex positions are NDC, 2 floats per vertex
//! - vertex colors are straight RGBA, 4 floats per vertex

mod backend;
mod binder;
mod error;
mod program;
mod wgpu_backend;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{BufferId, GraphicsBackend, ProgramId, Topology, UniformLocation};
pub use binder::{DrawSpec, draw_shape};
pub use error::BindError;
pub use program::{
    AttributeDesc, COLOR_ATTRIB, COLOR_COMPONENTS, COLOR_UNIFORM, POSITION_ATTRIB,
    POSITION_COMPONENTS, ProgramDesc, UniformDesc, flat_color_program, varying_color_program,
};
pub use wgpu_backend::WgpuBackend;
