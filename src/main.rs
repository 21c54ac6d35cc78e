//! Portfolio effects, headless
//!
//! Builds the portfolio room, replays a scripted pointer tour through the
//! frame scheduler and logs what a renderer would be asked to draw.
//!
//! Usage: `portfolio-fx [config.json] [frames]`

mod portfolio_scene;

use anyhow::Context;
use frame_scheduler::{FixedStepClock, Frame, FrameSink, FxConfig, LoopControl, Scheduler};
use particle_effects::StarfieldConfig;
use portfolio_scene::{build_scene, ScriptedInput};
use scene_picking::{Camera, Viewport};
use std::path::Path;

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 720;
const DEFAULT_FRAMES: u64 = 600;

fn load_config(path: Option<&Path>) -> anyhow::Result<FxConfig> {
    let Some(path) = path else {
        return Ok(FxConfig {
            starfield: StarfieldConfig::galaxy(),
            ..Default::default()
        });
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: FxConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

/// Logs panel openings and a summary line every second of frames
struct LogSink {
    frames: u64,
    hits: usize,
    peak_points: usize,
}

impl LogSink {
    fn new(frames: u64) -> Self {
        Self {
            frames,
            hits: 0,
            peak_points: 0,
        }
    }
}

impl FrameSink for LogSink {
    fn present(&mut self, frame: &Frame) -> LoopControl {
        for hit in &frame.hits {
            self.hits += 1;
            log::info!("[{:>4}] panel {} at {:.2}", frame.tick, hit.key, hit.point);
        }
        for id in &frame.retired_bursts {
            log::debug!("[{:>4}] release buffers for {id}", frame.tick);
        }

        self.peak_points = self.peak_points.max(frame.point_count());
        if frame.tick % 60 == 0 {
            log::info!(
                "[{:>4}] {:.0}ms  trail {:>3}  bursts {:>2}  scene rot {:.4}",
                frame.tick,
                frame.now_ms,
                frame.trail.len(),
                frame.bursts.len(),
                frame.scene_rotation_y
            );
        }

        if frame.tick >= self.frames {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next();
    let frames = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid frame count {n:?}"))?,
        None => DEFAULT_FRAMES,
    };

    let config = load_config(config_path.as_deref().map(Path::new))?;
    let camera = Camera::scene(WIDTH, HEIGHT);
    let viewport = Viewport::new(WIDTH as f32, HEIGHT as f32)?;
    let scene = build_scene(&config.tags);
    let mut input = ScriptedInput::tour(&camera, &viewport);

    let mut scheduler = Scheduler::new(config, WIDTH, HEIGHT, camera, scene)?;
    let mut sink = LogSink::new(frames);
    let presented = scheduler.run(&mut FixedStepClock::default(), &mut input, &mut sink);

    log::info!(
        "done: {presented} frames, {} panel hits, peak {} points, {} bursts still live",
        sink.hits,
        sink.peak_points,
        scheduler.context().bursts.active_count()
    );
    Ok(())
}
