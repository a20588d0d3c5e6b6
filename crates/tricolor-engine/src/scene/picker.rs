use anyhow::{Context, Result};

use crate::coords::CanvasRect;
use crate::core::{App, AppControl, FrameCtx, InputCtx};
use crate::geometry::GeometryBuffers;
use crate::input::{InputEvent, Key};
use crate::interp::{OutOfBounds, TriangleRegion};
use crate::paint::Color;
use crate::render::{
    BufferId, DrawSpec, GraphicsBackend, ProgramId, draw_shape, flat_color_program,
    varying_color_program,
};

/// Tunables for [`ColorPickerScene`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickerConfig {
    /// Triangle base as a fraction of the canvas width.
    pub width_fraction: f32,
    /// Triangle height as a fraction of the canvas height.
    pub height_fraction: f32,
    pub initial_fill: Color,
    pub clear_color: Color,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            width_fraction: 0.5,
            height_fraction: 0.75,
            initial_fill: Color::YELLOW,
            clear_color: Color::WHITE,
        }
    }
}

/// Mutable per-session render state: the square's fill color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderState {
    fill: Color,
}

impl RenderState {
    pub fn new(fill: Color) -> Self {
        Self { fill }
    }

    pub fn fill_color(&self) -> Color {
        self.fill
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }
}

/// GPU handles created in `on_start`.
#[derive(Debug, Copy, Clone)]
struct PickerResources {
    flat: ProgramId,
    varying: ProgramId,
    triangle: BufferId,
    square: BufferId,
    colors: BufferId,
}

/// Triangle with per-vertex colors next to a square; clicking inside the
/// triangle's canvas region recolors the square with the interpolated color.
pub struct ColorPickerScene {
    config: PickerConfig,
    geometry: GeometryBuffers,
    state: RenderState,
    resources: Option<PickerResources>,
}

impl ColorPickerScene {
    pub fn new(config: PickerConfig) -> Self {
        Self {
            state: RenderState::new(config.initial_fill),
            config,
            geometry: GeometryBuffers::new(),
            resources: None,
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Interpolates the color under a click and makes it the fill color.
    ///
    /// `event_x`/`event_y` are window coordinates (top-left origin). The
    /// x offset is taken from the canvas' left edge, not from the drawn
    /// triangle. On `OutOfBounds` the fill color is left untouched.
    pub fn handle_click(
        &mut self,
        canvas: CanvasRect,
        event_x: f32,
        event_y: f32,
    ) -> Result<Color, OutOfBounds> {
        let p = canvas.to_canvas_space(event_x, event_y);
        let region = TriangleRegion::fraction_of(
            canvas.width,
            canvas.height,
            self.config.width_fraction,
            self.config.height_fraction,
        );

        let color = region.interpolate(p, self.geometry.triangle_colors())?;
        self.state.set_fill_color(color);
        Ok(color)
    }

    fn draw(&self, gfx: &mut dyn GraphicsBackend) {
        gfx.clear();

        let Some(res) = self.resources else {
            return;
        };

        let triangle = DrawSpec::new("triangle", res.varying, res.triangle)
            .with_colors(res.colors)
            .with_vertex_count(self.geometry.triangle_vertices().len() as u32);

        let square = DrawSpec::new("square", res.flat, res.square)
            .with_fill(self.state.fill_color())
            .with_vertex_count(self.geometry.square_vertices().len() as u32);

        for spec in [triangle, square] {
            if let Err(e) = draw_shape(&mut *gfx, &spec) {
                log::warn!("{e}");
            }
        }
    }
}

impl Default for ColorPickerScene {
    fn default() -> Self {
        Self::new(PickerConfig::default())
    }
}

impl App for ColorPickerScene {
    fn on_start(&mut self, gfx: &mut dyn GraphicsBackend) -> Result<()> {
        let flat = gfx
            .create_program(&flat_color_program())
            .context("flat color program")?;
        let varying = gfx
            .create_program(&varying_color_program())
            .context("varying color program")?;

        let triangle = gfx.create_buffer("triangle positions", &self.geometry.triangle_data());
        let square = gfx.create_buffer("square positions", &self.geometry.square_data());
        let colors = gfx.create_buffer("triangle colors", &self.geometry.color_data());

        gfx.set_clear_color(self.config.clear_color);

        self.resources = Some(PickerResources { flat, varying, triangle, square, colors });
        Ok(())
    }

    fn on_input(&mut self, ctx: &mut InputCtx<'_>, event: &InputEvent) -> AppControl {
        if event.is_key_press(Key::Escape) {
            return AppControl::Exit;
        }

        if let Some((x, y)) = event.left_click() {
            match self.handle_click(ctx.canvas, x, y) {
                Ok(color) => log::debug!("picked {color:?}"),
                Err(e) => log::debug!("click at ({x}, {y}): {e}"),
            }
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        self.draw(ctx.gfx);
        AppControl::Continue
    }
}
