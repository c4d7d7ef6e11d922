use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use clap::{Parser, Subcommand};
use spotlit_frame_core::{
    load_texture, AppConfig, FrameLayout, FrameSceneError, FrameStats, HeadlessRenderer,
    Recorder, RecordingSettings, Renderer, SceneState, ScheduledEvent, Scheduler, Viewport,
    ViewportEvent,
};
use tracing_subscriber::EnvFilter;

fn main() -> spotlit_frame_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            image,
            config,
            frames,
            width,
            height,
            resize,
            trace,
        } => run_scene(RunArgs {
            image,
            config,
            frames,
            viewport: Viewport::new(width, height),
            resize,
            trace,
        })
        .map(|_| ()),
        Commands::Layout { image, config } => print_layout(&image, config.as_ref()),
        Commands::Config => print_default_config(),
    }
}

struct RunArgs {
    image: PathBuf,
    config: Option<PathBuf>,
    frames: u64,
    viewport: Viewport,
    resize: Vec<ResizeAt>,
    trace: Option<PathBuf>,
}

/// What the frame loop left behind, reported once it finishes.
#[derive(Debug)]
struct RunSummary {
    frames_rendered: u64,
    renderer_size: (u32, u32),
    camera_aspect: f32,
    last_stats: Option<FrameStats>,
}

fn run_scene(args: RunArgs) -> spotlit_frame_core::Result<RunSummary> {
    tracing::info!(image = ?args.image, frames = args.frames, "starting scene");

    let config = load_config(args.config.as_ref())?;
    // Nothing is assembled unless the picture decodes.
    let texture = load_texture(&args.image)?;

    let mut state = SceneState::build(texture, &config, args.viewport)?;
    let mut renderer = HeadlessRenderer::new(
        config.renderer.clone(),
        args.viewport.width,
        args.viewport.height,
    );

    let mut scheduler = Scheduler::new();
    scheduler.set_events(
        args.resize
            .iter()
            .map(|r| ScheduledEvent::new(r.frame, ViewportEvent::resize(r.viewport)))
            .collect(),
    );

    let mut recorder = args.trace.map(|output_path| {
        let mut recorder = Recorder::new(RecordingSettings {
            output_path,
            ..RecordingSettings::default()
        });
        recorder.start();
        recorder
    });

    run_frames(&mut state, &mut renderer, &mut scheduler, recorder.as_mut(), args.frames)?;

    if let Some(recorder) = recorder.as_mut() {
        recorder.finish()?;
    }

    let summary = RunSummary {
        frames_rendered: renderer.frames_rendered(),
        renderer_size: renderer.size(),
        camera_aspect: state.camera.aspect,
        last_stats: renderer.last_stats().copied(),
    };
    tracing::info!(
        frames = summary.frames_rendered,
        width = summary.renderer_size.0,
        height = summary.renderer_size.1,
        aspect = summary.camera_aspect,
        visible_meshes = summary.last_stats.map(|stats| stats.visible_meshes),
        shadow_cost = summary.last_stats.map(|stats| stats.shadow_cost),
        "render loop finished"
    );
    for (i, position) in state.scene.light_positions().iter().enumerate() {
        tracing::info!(light = i, x = position.x, y = position.y, z = position.z, "final light position");
    }
    Ok(summary)
}

/// Delivers due viewport events, samples the lights, then renders, once per
/// frame.
fn run_frames(
    state: &mut SceneState,
    renderer: &mut dyn Renderer,
    scheduler: &mut Scheduler,
    mut recorder: Option<&mut Recorder>,
    frames: u64,
) -> spotlit_frame_core::Result<()> {
    for _ in 0..frames {
        for event in scheduler.due(state.clock.frame) {
            state.handle(renderer, event);
        }
        if let Some(recorder) = recorder.as_deref_mut() {
            recorder.capture(state.clock.frame, &state.scene);
        }
        state.tick(renderer)?;
    }
    Ok(())
}

fn print_layout(image: &Path, config: Option<&PathBuf>) -> spotlit_frame_core::Result<()> {
    let config = load_config(config)?;
    let texture = load_texture(image)?;
    let layout = FrameLayout::from_pixels(texture.width, texture.height, config.frame.border_width);
    let json = serde_json::to_string_pretty(&layout)
        .map_err(FrameSceneError::serialize("frame layout"))?;
    println!("{json}");
    Ok(())
}

fn print_default_config() -> spotlit_frame_core::Result<()> {
    println!("{}", AppConfig::default().to_json_pretty()?);
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> spotlit_frame_core::Result<AppConfig> {
    match path {
        Some(path) => {
            tracing::info!(?path, "loading configuration");
            AppConfig::load(path)
        }
        None => Ok(AppConfig::default()),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// A resize applied just before the given frame, written `WIDTHxHEIGHT@FRAME`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResizeAt {
    viewport: Viewport,
    frame: u64,
}

impl FromStr for ResizeAt {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (size, frame) = s
            .split_once('@')
            .ok_or_else(|| format!("expected WIDTHxHEIGHT@FRAME, got `{s}`"))?;
        let (width, height) = size
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{size}`"))?;

        let parse = |value: &str, what: &str| {
            value
                .trim()
                .parse::<u64>()
                .map_err(|err| format!("invalid {what} `{value}`: {err}"))
        };
        let width = parse(width, "width")?;
        let height = parse(height, "height")?;
        let frame = parse(frame, "frame")?;

        Ok(Self {
            viewport: Viewport::new(
                u32::try_from(width).map_err(|_| format!("width {width} is too large"))?,
                u32::try_from(height).map_err(|_| format!("height {height} is too large"))?,
            ),
            frame,
        })
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Framed picture lit by animated spot lights", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the scene around a picture and run the frame loop headlessly.
    Run {
        /// Picture to hang on the wall (PNG or JPEG).
        #[arg(short, long)]
        image: PathBuf,
        /// Optional JSON configuration overriding the reference scene.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of frames to render.
        #[arg(short, long, default_value_t = 600)]
        frames: u64,
        /// Initial viewport width in pixels.
        #[arg(long, default_value_t = 1280)]
        width: u32,
        /// Initial viewport height in pixels.
        #[arg(long, default_value_t = 720)]
        height: u32,
        /// Resize the viewport before a frame, e.g. `1920x1080@120`. Repeatable.
        #[arg(long)]
        resize: Vec<ResizeAt>,
        /// Write per-frame light positions to this JSON file.
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Print the normalized frame size and bounding box for a picture.
    Layout {
        #[arg(short, long)]
        image: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the default configuration as JSON.
    Config,
}
