use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::CanvasRect;
use crate::core::{App, AppControl, FrameCtx, InputCtx};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::frame::{FrameScheduler, RenderLoop};
use crate::input::platform::winit::translate_window_event;
use crate::input::InputState;
use crate::render::WgpuBackend;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tricolor".to_string(),
            initial_size: LogicalSize::new(512.0, 512.0),
        }
    }
}

/// Entry point for the runtime.
///
/// Opens one window, hands its graphics backend to the app, and drives a
/// [`RenderLoop`] from winit redraw requests until the window closes or the
/// app asks to exit.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.startup_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// GPU context plus the backend drawing through it.
struct WindowGraphics<'w> {
    gpu: Gpu<'w>,
    backend: WgpuBackend,
}

impl<'w> WindowGraphics<'w> {
    fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let gpu = pollster::block_on(Gpu::new(window, init))?;
        let backend = WgpuBackend::new(
            gpu.device().clone(),
            gpu.queue().clone(),
            gpu.surface_format(),
        );
        Ok(Self { gpu, backend })
    }
}

#[self_referencing]
struct WindowEntry {
    input: InputState,

    window: Window,

    #[borrows(window)]
    #[covariant]
    graphics: WindowGraphics<'this>,
}

/// Schedules the next loop iteration as a winit redraw.
struct RedrawScheduler<'a>(&'a Window);

impl FrameScheduler for RedrawScheduler<'_> {
    fn request_frame(&mut self) {
        self.0.request_redraw();
    }
}

struct RuntimeState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    render_loop: RenderLoop,
    startup_error: Option<anyhow::Error>,
}

impl<A> RuntimeState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            render_loop: RenderLoop::new(),
            startup_error: None,
        }
    }

    fn create_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        WindowEntryTryBuilder {
            input: InputState::default(),
            window,
            graphics_builder: |w| WindowGraphics::new(w, gpu_init),
        }
        .try_build()
        .context("GPU initialization failed for window")
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut entry = self.create_entry(event_loop)?;

        let app = &mut self.app;
        entry
            .with_graphics_mut(|g| app.on_start(&mut g.backend))
            .context("application setup failed")?;

        let render_loop = &mut self.render_loop;
        entry.with_window(|w| render_loop.start(&mut RedrawScheduler(w)));

        self.entry = Some(entry);
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.render_loop.stop();
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for RuntimeState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            log::error!("startup failed: {e:#}");
            self.startup_error = Some(e);
            self.shutdown(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Frames are requested by the render loop itself; nothing to poll.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, render_loop) = (&mut self.app, &mut self.render_loop);
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let mut control = AppControl::Continue;

        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, fields.input, &event) {
                fields.input.apply_event(&ev);
                let mut ctx = InputCtx {
                    gfx: &mut fields.graphics.backend,
                    canvas: canvas_rect(fields.window),
                };
                control = app.on_input(&mut ctx, &ev);
            }
        });

        if control == AppControl::Continue {
            control = match &event {
                WindowEvent::CloseRequested => AppControl::Exit,

                WindowEvent::Resized(new_size) => {
                    entry.with_mut(|fields| {
                        fields.graphics.gpu.resize(*new_size);
                        render_loop.request_frame(&mut RedrawScheduler(fields.window));
                    });
                    AppControl::Continue
                }

                WindowEvent::ScaleFactorChanged { .. } => {
                    entry.with_mut(|fields| {
                        fields.graphics.gpu.resize(fields.window.inner_size());
                        render_loop.request_frame(&mut RedrawScheduler(fields.window));
                    });
                    AppControl::Continue
                }

                WindowEvent::RedrawRequested => entry.with_mut(|fields| {
                    let window = fields.window;
                    let graphics = fields.graphics;
                    render_loop
                        .run_frame(&mut RedrawScheduler(window), |frame_index| {
                            draw_frame(app, window, graphics, frame_index)
                        })
                        .unwrap_or(AppControl::Continue)
                }),

                _ => AppControl::Continue,
            };
        }

        if control == AppControl::Exit {
            self.shutdown(event_loop);
        }
    }
}

/// One loop iteration: acquire, let the app draw, encode, present.
fn draw_frame<A: App>(
    app: &mut A,
    window: &Window,
    graphics: &mut WindowGraphics<'_>,
    frame_index: u64,
) -> AppControl {
    let mut frame = match graphics.gpu.begin_frame() {
        Ok(f) => f,
        Err(err) => {
            return match graphics.gpu.handle_surface_error(err) {
                SurfaceErrorAction::Fatal => AppControl::Exit,
                SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                    AppControl::Continue
                }
            };
        }
    };

    let control = {
        let mut ctx = FrameCtx {
            gfx: &mut graphics.backend,
            canvas: canvas_rect(window),
            frame_index,
        };
        app.on_frame(&mut ctx)
    };

    graphics.backend.encode(&mut frame.encoder, &frame.view);
    window.pre_present_notify();
    graphics.gpu.submit(frame);

    control
}

/// The canvas is the whole client area, in logical pixels.
fn canvas_rect(window: &Window) -> CanvasRect {
    let logical: LogicalSize<f64> = window.inner_size().to_logical(window.scale_factor());
    CanvasRect::from_size(logical.width as f32, logical.height as f32)
}
