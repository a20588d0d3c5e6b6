use anyhow::Result;

use crate::paint::Color;

use super::program::ProgramDesc;

/// Handle to a linked shader program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ProgramId(pub(crate) u32);

/// Handle to a vertex buffer in GPU memory.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct BufferId(pub(crate) u32);

/// Resolved uniform slot inside a specific program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformLocation {
    pub(crate) program: ProgramId,
    pub(crate) binding: u32,
}

/// How a vertex sequence is assembled into triangles.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    TriangleList,
    /// First vertex is shared by every triangle.
    TriangleFan,
}

/// Immediate-mode graphics API the binder drives.
///
/// Method names follow the classic bind/enable/draw/disable protocol: state set
/// through these calls stays in effect until changed. GPU calls are treated as
/// always succeeding; only lookups (`attrib_location`, `uniform_location`) can
/// miss, and they report it by returning `None`.
///
/// Implementations: [`super::WgpuBackend`] for real rendering, a recording
/// double in tests.
pub trait GraphicsBackend {
    /// Compiles and links a program from its description.
    fn create_program(&mut self, desc: &ProgramDesc) -> Result<ProgramId>;

    /// Uploads `data` into a new vertex buffer.
    fn create_buffer(&mut self, label: &str, data: &[f32]) -> BufferId;

    /// Frees a buffer. Unknown ids are ignored.
    fn release_buffer(&mut self, buffer: BufferId);

    /// Color used by subsequent [`clear`](Self::clear) calls.
    fn set_clear_color(&mut self, color: Color);

    /// Clears the current framebuffer to the clear color.
    fn clear(&mut self);

    /// Binds a program, or unbinds with `None`.
    fn use_program(&mut self, program: Option<ProgramId>);

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32>;

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    fn enable_attrib(&mut self, location: u32);

    fn disable_attrib(&mut self, location: u32);

    /// Sources attribute `location` from `buffer`, `components` floats per vertex, tightly packed.
    fn attrib_pointer(&mut self, location: u32, buffer: BufferId, components: u32);

    fn uniform4f(&mut self, location: UniformLocation, value: Color);

    /// Draws `count` vertices starting at `first` with the bound program and attributes.
    fn draw_arrays(&mut self, topology: Topology, first: u32, count: u32);
}
