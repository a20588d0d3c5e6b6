use crate::paint::Color;

use super::backend::{BufferId, GraphicsBackend, ProgramId, Topology};
use super::error::BindError;
use super::program::{
    COLOR_ATTRIB, COLOR_COMPONENTS, COLOR_UNIFORM, POSITION_ATTRIB, POSITION_COMPONENTS,
};

/// Everything needed to draw one shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawSpec {
    /// Name used in diagnostics.
    pub shape: &'static str,
    pub program: ProgramId,
    /// Two floats per vertex, bound to `a_Position`.
    pub positions: BufferId,
    /// Four floats per vertex, bound to `a_Color`.
    pub colors: Option<BufferId>,
    /// Written to the `color` uniform.
    pub fill: Option<Color>,
    pub topology: Topology,
    pub vertex_count: u32,
}

impl DrawSpec {
    pub fn new(shape: &'static str, program: ProgramId, positions: BufferId) -> Self {
        Self {
            shape,
            program,
            positions,
            colors: None,
            fill: None,
            topology: Topology::TriangleList,
            vertex_count: 0,
        }
    }

    pub fn with_colors(mut self, colors: BufferId) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_vertex_count(mut self, count: u32) -> Self {
        self.vertex_count = count;
        self
    }
}

/// Draws one shape: bind program and attributes, set the uniform, draw, release.
///
/// On a lookup miss the draw is abandoned and the error returned; every
/// attribute enabled before the miss is disabled again and the program is
/// unbound, so the backend is left as it was found.
pub fn draw_shape<G>(gfx: &mut G, spec: &DrawSpec) -> Result<(), BindError>
where
    G: GraphicsBackend + ?Sized,
{
    gfx.use_program(Some(spec.program));

    let mut bound = AttribGuard::default();
    let result = bind_and_draw(gfx, spec, &mut bound);

    bound.release(gfx);
    gfx.use_program(None);

    result
}

fn bind_and_draw<G>(gfx: &mut G, spec: &DrawSpec, bound: &mut AttribGuard) -> Result<(), BindError>
where
    G: GraphicsBackend + ?Sized,
{
    let position = gfx
        .attrib_location(spec.program, POSITION_ATTRIB)
        .ok_or(BindError::AttributeNotFound { shape: spec.shape, attribute: POSITION_ATTRIB })?;
    bound.enable(gfx, position);
    gfx.attrib_pointer(position, spec.positions, POSITION_COMPONENTS);

    if let Some(colors) = spec.colors {
        let color = gfx
            .attrib_location(spec.program, COLOR_ATTRIB)
            .ok_or(BindError::AttributeNotFound { shape: spec.shape, attribute: COLOR_ATTRIB })?;
        bound.enable(gfx, color);
        gfx.attrib_pointer(color, colors, COLOR_COMPONENTS);
    }

    if let Some(fill) = spec.fill {
        let loc = gfx
            .uniform_location(spec.program, COLOR_UNIFORM)
            .ok_or(BindError::UniformNotFound { shape: spec.shape, uniform: COLOR_UNIFORM })?;
        gfx.uniform4f(loc, fill);
    }

    gfx.draw_arrays(spec.topology, 0, spec.vertex_count);
    Ok(())
}

/// Attribute locations enabled during one draw, disabled in reverse order.
#[derive(Default)]
struct AttribGuard {
    enabled: Vec<u32>,
}

impl AttribGuard {
    fn enable<G: GraphicsBackend + ?Sized>(&mut self, gfx: &mut G, location: u32) {
        gfx.enable_attrib(location);
        self.enabled.push(location);
    }

    fn release<G: GraphicsBackend + ?Sized>(&mut self, gfx: &mut G) {
        while let Some(location) = self.enabled.pop() {
            gfx.disable_attrib(location);
        }
    }
}
