use anyhow::{Context, Result};

use crate::core::{App, AppControl, FrameCtx, InputCtx};
use crate::geometry::{
    InvalidSideCount, SideCountInputError, flatten_points, parse_side_count,
    regular_polygon_vertices,
};
use crate::input::{InputEvent, Key};
use crate::paint::Color;
use crate::render::{
    BufferId, DrawSpec, GraphicsBackend, ProgramId, Topology, draw_shape, flat_color_program,
};

/// Tunables for [`PolygonScene`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PolygonConfig {
    pub initial_sides: u32,
    pub fill: Color,
    pub clear_color: Color,
}

impl Default for PolygonConfig {
    fn default() -> Self {
        Self {
            initial_sides: 6,
            fill: Color::RED,
            clear_color: Color::rgb(0.0, 0.8, 0.8),
        }
    }
}

/// Line-edit buffer for the side count.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SideCountField {
    text: String,
}

impl SideCountField {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Removes the last character, if any.
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn parse(&self) -> Result<u32, SideCountInputError> {
        parse_side_count(&self.text)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct PolygonMesh {
    buffer: BufferId,
    sides: u32,
}

/// Regular N-gon drawn as a triangle fan; N is typed by the user and
/// committed with Enter.
pub struct PolygonScene {
    config: PolygonConfig,
    field: SideCountField,
    program: Option<ProgramId>,
    mesh: Option<PolygonMesh>,
}

impl PolygonScene {
    pub fn new(config: PolygonConfig) -> Self {
        Self {
            field: SideCountField::new(config.initial_sides.to_string()),
            config,
            program: None,
            mesh: None,
        }
    }

    /// Side count of the geometry currently on the GPU.
    pub fn sides(&self) -> Option<u32> {
        self.mesh.map(|m| m.sides)
    }

    pub fn field(&self) -> &SideCountField {
        &self.field
    }

    /// Parses the field and rebuilds the polygon from it.
    ///
    /// On error the previous geometry stays in place.
    pub fn commit(&mut self, gfx: &mut dyn GraphicsBackend) -> Result<u32, SideCountInputError> {
        let sides = self.field.parse()?;
        self.rebuild(gfx, sides)?;
        Ok(sides)
    }

    /// Uploads an `n`-gon and releases the buffer it replaces.
    pub fn rebuild(
        &mut self,
        gfx: &mut dyn GraphicsBackend,
        sides: u32,
    ) -> Result<(), InvalidSideCount> {
        let vertices = regular_polygon_vertices(sides)?;
        let buffer = gfx.create_buffer("polygon positions", &flatten_points(&vertices));

        if let Some(old) = self.mesh.replace(PolygonMesh { buffer, sides }) {
            gfx.release_buffer(old.buffer);
        }
        log::debug!("polygon rebuilt with {sides} sides");
        Ok(())
    }

    fn draw(&self, gfx: &mut dyn GraphicsBackend) {
        gfx.clear();

        let (Some(program), Some(mesh)) = (self.program, self.mesh) else {
            return;
        };

        let spec = DrawSpec::new("polygon", program, mesh.buffer)
            .with_fill(self.config.fill)
            .with_topology(Topology::TriangleFan)
            .with_vertex_count(mesh.sides);

        if let Err(e) = draw_shape(gfx, &spec) {
            log::warn!("{e}");
        }
    }
}

impl Default for PolygonScene {
    fn default() -> Self {
        Self::new(PolygonConfig::default())
    }
}

impl App for PolygonScene {
    fn on_start(&mut self, gfx: &mut dyn GraphicsBackend) -> Result<()> {
        let program = gfx
            .create_program(&flat_color_program())
            .context("flat color program")?;
        self.program = Some(program);

        gfx.set_clear_color(self.config.clear_color);

        if let Err(e) = self.commit(gfx) {
            log::warn!("initial side count rejected: {e}");
        }
        Ok(())
    }

    fn on_input(&mut self, ctx: &mut InputCtx<'_>, event: &InputEvent) -> AppControl {
        if event.is_key_press(Key::Escape) {
            return AppControl::Exit;
        }

        if event.is_key_press(Key::Enter) {
            if let Err(e) = self.commit(ctx.gfx) {
                log::warn!("{e}; keeping {:?} sides", self.sides());
            }
        } else if event.is_key_press(Key::Backspace) {
            self.field.backspace();
        } else if let Some(text) = event.text() {
            self.field.push_str(text);
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        self.draw(ctx.gfx);
        AppControl::Continue
    }
}
