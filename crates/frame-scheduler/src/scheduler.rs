//! Per-frame driver
//!
//! One tick, in order:
//! 1. drain queued input (trail points, clicks, camera interaction)
//! 2. auto-rotate the scene root unless an interaction is cooling down
//! 3. advance bursts and collect the ones that retired
//! 4. fade the trail, spin the starfield
//! 5. publish a [`Frame`] for the renderer
//!
//! Retired bursts are reported before the frame is published, so a
//! renderer never sees a draw for a burst it has already been told to free.

use crate::context::AnimationContext;
use crate::error::FxError;
use crate::frame::{Frame, LoopControl};
use crate::input::{EventSource, InputEvent, InputQueue};
use crate::params::FxConfig;
use scene_picking::{Camera, SceneGraph};

/// Nominal frame interval at 60 Hz
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// Source of frame timestamps
pub trait FrameClock {
    fn now_ms(&mut self) -> f64;
}

/// Deterministic clock advancing a fixed step per frame
#[derive(Clone, Debug)]
pub struct FixedStepClock {
    next_ms: f64,
    step_ms: f64,
}

impl FixedStepClock {
    pub fn new(start_ms: f64, step_ms: f64) -> Self {
        Self {
            next_ms: start_ms,
            step_ms,
        }
    }
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(0.0, FRAME_INTERVAL_MS)
    }
}

impl FrameClock for FixedStepClock {
    fn now_ms(&mut self) -> f64 {
        let now = self.next_ms;
        self.next_ms += self.step_ms;
        now
    }
}

/// Consumer of finished frames (a renderer, a recorder, a test)
pub trait FrameSink {
    fn present(&mut self, frame: &Frame) -> LoopControl;
}

pub struct Scheduler {
    context: AnimationContext,
    input: InputQueue,
    frame: Frame,
    ticks: u64,
    state: RunState,
}

impl Scheduler {
    pub fn new(
        config: FxConfig,
        width: u32,
        height: u32,
        camera: Camera,
        scene: SceneGraph,
    ) -> Result<Self, FxError> {
        let context = AnimationContext::new(config, width, height, camera, scene)?;
        Ok(Self {
            context,
            input: InputQueue::new(),
            frame: Frame::default(),
            ticks: 0,
            state: RunState::Running,
        })
    }

    /// Queue an event for the next tick
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn input_mut(&mut self) -> &mut InputQueue {
        &mut self.input
    }

    /// Run one frame at `now_ms`.
    ///
    /// After [`stop`](Self::stop) this does nothing and returns the last frame.
    pub fn tick(&mut self, now_ms: f64) -> &Frame {
        if self.state == RunState::Stopped {
            return &self.frame;
        }

        self.ticks += 1;
        self.frame.reset(self.ticks, now_ms);

        let ctx = &mut self.context;
        for event in self.input.drain() {
            ctx.handle(event, now_ms, &mut self.frame.hits);
        }

        if let Some(delta) = ctx.auto_rotate.advance(now_ms) {
            ctx.scene.rotate_root_y(delta);
        }

        self.frame.retired_bursts = ctx.bursts.tick();
        self.frame.trail.extend_from_slice(ctx.trail.tick(now_ms));
        ctx.starfield.tick();

        self.frame.scene_rotation_y = ctx.auto_rotate.angle();
        self.frame.starfield_rotation = ctx.starfield.rotation();
        self.frame.bursts = ctx.bursts.draws();

        log::trace!(
            "tick {} at {:.1}ms: {} trail, {} bursts, {} retired",
            self.ticks,
            now_ms,
            self.frame.trail.len(),
            self.frame.bursts.len(),
            self.frame.retired_bursts.len()
        );

        &self.frame
    }

    /// Drive ticks from `clock` until `sink` asks to stop or [`stop`](Self::stop)
    /// is called. Returns the number of frames presented.
    pub fn run(
        &mut self,
        clock: &mut impl FrameClock,
        events: &mut impl EventSource,
        sink: &mut impl FrameSink,
    ) -> u64 {
        let mut presented = 0;
        log::info!("frame loop started");

        while self.state == RunState::Running {
            let now = clock.now_ms();
            events.poll(now, &mut self.input);
            let frame = self.tick(now);
            presented += 1;
            if sink.present(frame) == LoopControl::Stop {
                self.stop();
            }
        }

        log::info!("frame loop stopped after {presented} frames");
        presented
    }

    /// Stop scheduling. Pending input is discarded.
    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            log::debug!("scheduler stopping at tick {}", self.ticks);
        }
        self.state = RunState::Stopped;
        self.input.clear();
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// The most recently published frame
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn context(&self) -> &AnimationContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AnimationContext {
        &mut self.context
    }
}
