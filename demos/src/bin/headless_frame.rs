//! # Headless Frame Demo
//!
//! Demonstrates:
//! - Renderer configuration from TOML and command line overrides
//! - A producer thread compiling snapshots into command buffers
//! - A render thread replaying them against a headless backend
//! - Resource loads and unloads routed through the snapshot command lists
//!
//! ```bash
//! RUST_LOG=debug cargo run --bin headless_frame -- --frames 10 --objects 64
//! ```

use std::path::PathBuf;

use clap::Parser;

use frameline_demos::scene::DemoScene;
use frameline_graphics::{
    DummyBackend, FrameQueue, GraphicsResult, LoggingBackend, ProcessStats, RenderBackend,
    RenderCommandProcessor, Renderer, RendererConfig, Resolution, ResourceCommandQueue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
enum CliBackend {
    /// Log every backend call at trace level
    #[default]
    Logging,
    /// Record backend calls in memory
    Dummy,
}

#[derive(Parser, Debug)]
#[command(
    name = "headless_frame",
    about = "Drive the Frameline frame pipeline without a window"
)]
struct Args {
    /// Number of frames to render
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Number of lit objects in the scene
    #[arg(long, default_value_t = 256)]
    objects: usize,

    /// Surface width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Renderer configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the worker thread count from the configuration
    #[arg(long)]
    threads: Option<usize>,

    /// Frames allowed to wait for the render thread
    #[arg(long, default_value_t = frameline_graphics::queue::DEFAULT_FRAME_QUEUE_CAPACITY)]
    queue_capacity: usize,

    /// Backend to replay commands against
    #[arg(long, value_enum, default_value_t = CliBackend::default())]
    backend: CliBackend,
}

/// Totals gathered by the render thread.
#[derive(Debug, Default)]
struct RenderTotals {
    frames: u64,
    stats: ProcessStats,
}

impl RenderTotals {
    fn add(&mut self, stats: ProcessStats) {
        self.frames += 1;
        self.stats.lists += stats.lists;
        self.stats.commands += stats.commands;
        self.stats.draw_calls += stats.draw_calls;
        self.stats.skipped_draws += stats.skipped_draws;
        self.stats.failed_loads += stats.failed_loads;
    }
}

fn main() -> GraphicsResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    frameline_core::profiling::start_profiler();
    frameline_core::init();
    frameline_graphics::init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => RendererConfig::load(path)?,
        None => RendererConfig::default(),
    };
    if args.threads.is_some() {
        config.worker_threads = args.threads;
    }

    let totals = match args.backend {
        CliBackend::Logging => run(&args, config, LoggingBackend::new)?,
        CliBackend::Dummy => run(&args, config, DummyBackend::new)?,
    };

    log::info!(
        "Rendered {} frames: {} commands, {} draws, {} skipped, {} failed loads",
        totals.frames,
        totals.stats.commands,
        totals.stats.draw_calls,
        totals.stats.skipped_draws,
        totals.stats.failed_loads
    );
    Ok(())
}

fn run<B, F>(args: &Args, config: RendererConfig, create_backend: F) -> GraphicsResult<RenderTotals>
where
    B: RenderBackend,
    F: FnOnce() -> B + Send,
{
    let mut renderer = Renderer::new(config)?;
    let resolution = Resolution::new(args.width, args.height);
    let scene = DemoScene::new(args.objects);
    let resources = ResourceCommandQueue::new();
    let frames = FrameQueue::new(args.queue_capacity.max(1));

    scene.queue_loads(&resources);

    let totals = std::thread::scope(|scope| {
        let render_thread = scope.spawn(|| {
            frameline_core::set_thread_name!("render");
            let mut processor = RenderCommandProcessor::new(create_backend());
            let mut totals = RenderTotals::default();
            while let Some(buffer) = frames.pop() {
                totals.add(processor.process(buffer));
            }
            log::debug!("Render thread finished on {}", processor.backend().name());
            totals
        });

        for frame in 0..=args.frames {
            let mut snapshot = renderer.new_snapshot(resolution);
            if frame == args.frames {
                scene.queue_unloads(&resources);
            } else {
                scene.populate(&mut snapshot, frame);
            }
            resources.on_render_snapshot(&mut snapshot);

            let buffer = renderer.render_snapshot(snapshot);
            if let Err(buffer) = frames.push(buffer) {
                log::warn!("Frame {} discarded", frame);
                resources.recycle(buffer);
            }
        }
        frames.close();

        render_thread.join()
    });

    match totals {
        Ok(totals) => Ok(totals),
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
