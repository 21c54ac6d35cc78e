//! All mutable animation state, owned in one place
//!
//! The context lives exactly as long as the session that created it. Each
//! particle set has a single owner here: the trail pool, the burst
//! simulator and the starfield are only ever mutated through the scheduler.

use crate::auto_rotate::AutoRotate;
use crate::error::FxError;
use crate::frame::HitEvent;
use crate::input::InputEvent;
use crate::params::{FxConfig, SchedulerConfig};
use particle_effects::{BurstConfig, BurstSimulator, Starfield, TrailPool};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_picking::{project, Camera, HitTestDispatcher, SceneGraph, Viewport};

pub struct AnimationContext {
    pub camera: Camera,
    pub viewport: Viewport,
    pub scene: SceneGraph,
    pub trail: TrailPool,
    pub bursts: BurstSimulator,
    pub starfield: Starfield,
    pub auto_rotate: AutoRotate,
    dispatcher: HitTestDispatcher,
    spark: BurstConfig,
    firework: BurstConfig,
    settings: SchedulerConfig,
    rng: StdRng,
}

impl AnimationContext {
    pub fn new(
        config: FxConfig,
        width: u32,
        height: u32,
        mut camera: Camera,
        scene: SceneGraph,
    ) -> Result<Self, FxError> {
        config.validate()?;
        let viewport = Viewport::new(width as f32, height as f32)?;
        camera.resize(width, height);

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let starfield = Starfield::new(config.starfield, &mut rng);

        log::info!(
            "animation context: {}x{} viewport, {} scene nodes, trail cap {}",
            width,
            height,
            scene.len(),
            config.trail.max_trail
        );

        Ok(Self {
            camera,
            viewport,
            scene,
            trail: TrailPool::new(config.trail),
            bursts: BurstSimulator::new(),
            starfield,
            auto_rotate: AutoRotate::new(
                config.scheduler.auto_rotate_speed,
                config.scheduler.interaction_cooldown_ms,
            ),
            dispatcher: HitTestDispatcher::new(config.tags),
            spark: config.spark,
            firework: config.firework,
            settings: config.scheduler,
            rng,
        })
    }

    pub fn dispatcher(&self) -> &HitTestDispatcher {
        &self.dispatcher
    }

    /// Apply one input event. Tagged hits are appended to `hits`.
    ///
    /// Malformed events are logged and dropped; nothing here can fail the tick.
    pub fn handle(&mut self, event: InputEvent, now_ms: f64, hits: &mut Vec<HitEvent>) {
        match event {
            InputEvent::PointerMove { x, y } => {
                match project(x, y, &self.viewport, &self.camera) {
                    Ok(position) => self.trail.record(position, now_ms),
                    Err(err) => log::debug!("pointer move dropped: {err}"),
                }
            }
            InputEvent::Click { x, y } => self.click(x, y, hits),
            InputEvent::Resize { width, height } => {
                match Viewport::new(width as f32, height as f32) {
                    Ok(viewport) => {
                        self.viewport = viewport;
                        self.camera.resize(width, height);
                    }
                    Err(err) => log::warn!("resize ignored: {err}"),
                }
            }
            InputEvent::CameraDragStart => self.auto_rotate.interact(now_ms),
            InputEvent::CameraDrag { dx, dy } => {
                if dx.is_finite() && dy.is_finite() {
                    self.camera.rotate(dx, dy);
                } else {
                    log::warn!("camera drag ignored: ({dx}, {dy})");
                }
            }
            InputEvent::Zoom { delta } => {
                if delta.is_finite() {
                    self.auto_rotate.interact(now_ms);
                    self.camera.zoom(delta);
                } else {
                    log::warn!("zoom ignored: {delta}");
                }
            }
        }
    }

    fn click(&mut self, x: f32, y: f32, hits: &mut Vec<HitEvent>) {
        if self.settings.hit_fireworks {
            let hit = self
                .dispatcher
                .dispatch(x, y, &self.viewport, &self.camera, &self.scene);
            if let Some(hit) = hit {
                log::info!("opened panel {}", hit.key);
                self.bursts.spawn(hit.point, &self.firework, &mut self.rng);
                hits.push(HitEvent {
                    key: hit.key,
                    point: hit.point,
                });
            }
        }

        if self.settings.click_sparks {
            match project(x, y, &self.viewport, &self.camera) {
                Ok(origin) => {
                    self.bursts.spawn(origin, &self.spark, &mut self.rng);
                }
                Err(err) => log::debug!("click spark dropped: {err}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use particle_effects::BurstVariant;
    use scene_picking::{SceneNode, Shape, Transform};

    fn seeded() -> FxConfig {
        FxConfig {
            seed: Some(5),
            ..Default::default()
        }
    }

    fn context_with(config: FxConfig, scene: SceneGraph) -> AnimationContext {
        AnimationContext::new(config, 800, 600, Camera::new(800, 600), scene).unwrap()
    }

    #[test]
    fn test_rejects_invalid_setup() {
        let mut config = seeded();
        config.trail.max_trail = 0;
        assert!(matches!(
            AnimationContext::new(config, 800, 600, Camera::new(1, 1), SceneGraph::new()),
            Err(FxError::Config(_))
        ));
        assert!(matches!(
            AnimationContext::new(seeded(), 0, 600, Camera::new(1, 1), SceneGraph::new()),
            Err(FxError::Viewport(_))
        ));
    }

    #[test]
    fn test_pointer_move_records_trail() {
        let mut ctx = context_with(seeded(), SceneGraph::new());
        let mut hits = Vec::new();
        ctx.handle(InputEvent::PointerMove { x: 400.0, y: 300.0 }, 10.0, &mut hits);
        ctx.handle(InputEvent::PointerMove { x: f32::NAN, y: 0.0 }, 11.0, &mut hits);

        assert_eq!(ctx.trail.len(), 1);
        let p = ctx.trail.particles().next().unwrap();
        assert!(p.position.length() < 1e-4);
        assert_eq!(p.created_at, 10.0);
    }

    #[test]
    fn test_click_on_tag_spawns_firework_and_reports_hit() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        scene.add(
            root,
            SceneNode::new()
                .with_name("info_cv")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, -2.0)))
                .with_shape(Shape::Sphere { radius: 1.0 }),
        );

        let mut config = seeded();
        config.scheduler.click_sparks = false;
        let mut ctx = context_with(config, scene);
        let mut hits = Vec::new();
        ctx.handle(InputEvent::Click { x: 400.0, y: 300.0 }, 0.0, &mut hits);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key.as_str(), "cv");
        assert_eq!(ctx.bursts.active_count(), 1);
        assert_eq!(ctx.bursts.bursts()[0].variant(), BurstVariant::Firework);
        let origin = ctx.bursts.bursts()[0].particles()[0].position;
        assert!((origin - hits[0].point).length() < 1e-6);
    }

    #[test]
    fn test_click_on_nothing_still_sparks() {
        let mut ctx = context_with(seeded(), SceneGraph::new());
        let mut hits = Vec::new();
        ctx.handle(InputEvent::Click { x: 100.0, y: 100.0 }, 0.0, &mut hits);

        assert!(hits.is_empty());
        assert_eq!(ctx.bursts.active_count(), 1);
        let burst = &ctx.bursts.bursts()[0];
        assert_eq!(burst.variant(), BurstVariant::Spark);
        assert_eq!(burst.particles().len(), 40);
        assert!(burst.particles()[0].position.z.abs() < 1e-4);
    }

    #[test]
    fn test_resize_and_camera_events() {
        let mut ctx = context_with(seeded(), SceneGraph::new());
        let mut hits = Vec::new();

        ctx.handle(InputEvent::Resize { width: 1000, height: 500 }, 0.0, &mut hits);
        assert_eq!(ctx.viewport.width, 1000.0);
        assert_eq!(ctx.camera.aspect, 2.0);

        ctx.handle(InputEvent::Resize { width: 0, height: 0 }, 0.0, &mut hits);
        assert_eq!(ctx.viewport.width, 1000.0);

        ctx.handle(InputEvent::CameraDragStart, 100.0, &mut hits);
        assert!(ctx.auto_rotate.is_suspended(4000.0));

        let before = ctx.camera.position();
        ctx.handle(InputEvent::CameraDrag { dx: 0.3, dy: 0.0 }, 120.0, &mut hits);
        assert!((ctx.camera.position() - before).length() > 0.1);

        ctx.handle(InputEvent::Zoom { delta: 2.0 }, 130.0, &mut hits);
        assert_eq!(ctx.camera.distance, 7.0);
    }
}
