//! Kinematic bursts: batches of particles spawned together that move and
//! fade as one effect
//!
//! Each burst is integrated with one explicit Euler step per tick (velocities
//! are already in world units per tick). The particle count of a burst is
//! fixed at spawn; only positions, velocities and the shared opacity change.

use crate::color::Color;
use crate::config::{BurstConfig, BurstVariant, Decay};
use crate::vertex::PointVertex;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;
use std::fmt;

/// Handle of a spawned burst, unique for the simulator's lifetime
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BurstId(pub u64);

impl fmt::Display for BurstId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "burst#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstParticle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Color,
}

#[derive(Clone, Debug)]
pub struct Burst {
    id: BurstId,
    config: BurstConfig,
    particles: Vec<BurstParticle>,
    age: u32,
    opacity: f32,
}

impl Burst {
    fn spawn<R: Rng + ?Sized>(id: BurstId, origin: Vec3, config: BurstConfig, rng: &mut R) -> Self {
        let particles = (0..config.count)
            .map(|_| BurstParticle {
                position: origin,
                velocity: sample_velocity(&config, rng),
                color: config.color.sample(rng),
            })
            .collect();

        Self {
            id,
            config,
            particles,
            age: 0,
            opacity: 1.0,
        }
    }

    /// Advance one tick. Returns `false` once the burst is spent.
    fn step(&mut self) -> bool {
        self.age += 1;

        let gravity = self.config.gravity;
        for p in &mut self.particles {
            p.position += p.velocity;
            p.velocity.y -= gravity;
        }

        self.opacity = match self.config.decay {
            Decay::Linear { max_age } => 1.0 - self.age as f32 / max_age as f32,
            Decay::Constant { decrement } => self.opacity - decrement,
        };

        self.opacity > 0.0 && self.age < self.config.decay.tick_budget()
    }

    pub fn id(&self) -> BurstId {
        self.id
    }

    pub fn variant(&self) -> BurstVariant {
        self.config.variant
    }

    pub fn particles(&self) -> &[BurstParticle] {
        &self.particles
    }

    /// Ticks survived so far
    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn draw(&self) -> BurstDraw {
        let size = self.config.point_size;
        let vertices = self
            .particles
            .iter()
            .map(|p| PointVertex::new(p.position, size, p.color.with_alpha(self.opacity).to_array()))
            .collect();

        BurstDraw {
            id: self.id,
            variant: self.config.variant,
            opacity: self.opacity,
            vertices,
        }
    }
}

fn sample_velocity<R: Rng + ?Sized>(config: &BurstConfig, rng: &mut R) -> Vec3 {
    match config.variant {
        BurstVariant::Spark => {
            let half = config.speed.max;
            Vec3::new(
                (rng.random::<f32>() * 2.0 - 1.0) * half,
                (rng.random::<f32>() * 2.0 - 1.0) * half,
                (rng.random::<f32>() * 2.0 - 1.0) * half,
            )
        }
        BurstVariant::Firework => {
            let angle = rng.random::<f32>() * TAU;
            let speed = config.speed.sample(rng);
            Vec3::new(
                angle.cos() * speed,
                angle.sin() * speed,
                (rng.random::<f32>() - 0.5) * speed,
            )
        }
    }
}

/// Everything a renderer needs to draw one burst this frame
#[derive(Clone, Debug, PartialEq)]
pub struct BurstDraw {
    pub id: BurstId,
    pub variant: BurstVariant,
    pub opacity: f32,
    pub vertices: Vec<PointVertex>,
}

/// Owns all active bursts
#[derive(Debug, Default)]
pub struct BurstSimulator {
    bursts: Vec<Burst>,
    next_id: u64,
}

impl BurstSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a burst at `origin`. Non-finite origins are dropped.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        origin: Vec3,
        config: &BurstConfig,
        rng: &mut R,
    ) -> Option<BurstId> {
        if !origin.is_finite() {
            log::warn!("refusing to spawn {:?} burst at {origin}", config.variant);
            return None;
        }

        let id = BurstId(self.next_id);
        self.next_id += 1;
        self.bursts.push(Burst::spawn(id, origin, *config, rng));
        log::debug!("spawned {id} ({:?}, {} particles) at {origin}", config.variant, config.count);
        Some(id)
    }

    /// Advance every burst by one tick and return the ids retired by it.
    pub fn tick(&mut self) -> Vec<BurstId> {
        let mut retired = Vec::new();
        self.bursts.retain_mut(|burst| {
            let alive = burst.step();
            if !alive {
                log::debug!("retired {} after {} ticks", burst.id, burst.age);
                retired.push(burst.id);
            }
            alive
        });
        retired
    }

    pub fn draws(&self) -> Vec<BurstDraw> {
        self.bursts.iter().map(Burst::draw).collect()
    }

    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    pub fn get(&self, id: BurstId) -> Option<&Burst> {
        self.bursts.iter().find(|b| b.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.bursts.len()
    }
}
