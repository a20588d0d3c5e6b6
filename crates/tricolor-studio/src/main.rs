use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use winit::dpi::LogicalSize;

use tricolor_engine::device::GpuInit;
use tricolor_engine::geometry::parse_side_count;
use tricolor_engine::logging::{LoggingConfig, init_logging};
use tricolor_engine::scene::{ColorPickerScene, PickerConfig, PolygonConfig, PolygonScene};
use tricolor_engine::window::{Runtime, RuntimeConfig};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SceneKind {
    /// Click inside the triangle to recolor the square.
    Picker,
    /// Type a side count and press Enter to redraw the polygon.
    Polygon,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Barycentric color picker and polygon demo", long_about = None)]
struct Cli {
    #[arg(value_enum, default_value_t = SceneKind::Picker)]
    scene: SceneKind,

    /// Initial side count for the polygon scene (3 to 4096).
    #[arg(long, default_value_t = 6, value_parser = parse_sides)]
    sides: u32,

    /// Triangle base as a fraction of the canvas width.
    #[arg(long, default_value_t = 0.5, value_parser = parse_fraction)]
    width_fraction: f32,

    /// Triangle height as a fraction of the canvas height.
    #[arg(long, default_value_t = 0.75, value_parser = parse_fraction)]
    height_fraction: f32,

    /// env_logger filter; overrides RUST_LOG.
    #[arg(long)]
    log: Option<String>,

    #[arg(long, default_value = "tricolor")]
    title: String,

    /// Initial window size in logical pixels, e.g. 512x512.
    #[arg(long, default_value = "512x512", value_parser = parse_size)]
    size: LogicalSize<f64>,
}

fn parse_size(s: &str) -> Result<LogicalSize<f64>, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;

    let parse = |v: &str| -> Result<f64, String> {
        let n: f64 = v.trim().parse().map_err(|_| format!("{v:?} is not a number"))?;
        if n.is_finite() && n >= 1.0 {
            Ok(n)
        } else {
            Err(format!("{v:?} must be at least 1"))
        }
    };

    Ok(LogicalSize::new(parse(w)?, parse(h)?))
}

fn parse_sides(s: &str) -> Result<u32, String> {
    parse_side_count(s).map_err(|e| e.to_string())
}

fn parse_fraction(s: &str) -> Result<f32, String> {
    let f: f32 = s.trim().parse().map_err(|_| format!("{s:?} is not a number"))?;
    if f.is_finite() && f > 0.0 && f <= 1.0 {
        Ok(f)
    } else {
        Err(format!("{s:?} must be in (0, 1]"))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..Default::default()
    });

    let runtime = RuntimeConfig {
        title: cli.title.clone(),
        initial_size: cli.size,
    };
    let gpu = GpuInit::default();

    log::info!("starting {:?} scene", cli.scene);

    match cli.scene {
        SceneKind::Picker => {
            let scene = ColorPickerScene::new(PickerConfig {
                width_fraction: cli.width_fraction,
                height_fraction: cli.height_fraction,
                ..Default::default()
            });
            Runtime::run(runtime, gpu, scene)
        }
        SceneKind::Polygon => {
            let scene = PolygonScene::new(PolygonConfig {
                initial_sides: cli.sides,
                ..Default::default()
            });
            Runtime::run(runtime, gpu, scene)
        }
    }
    .context("tricolor runtime failed")
}
