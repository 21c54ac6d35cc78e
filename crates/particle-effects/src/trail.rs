//! Mouse trail: a bounded pool of points that fade out by age

use crate::config::TrailConfig;
use crate::constants::MAX_POOL_SIZE;
use crate::vertex::TrailVertex;
use glam::Vec3;
use std::collections::VecDeque;

/// A short-lived point following the pointer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailParticle {
    pub position: Vec3,
    /// Creation time in milliseconds
    pub created_at: f64,
    pub alpha: f32,
}

/// Owns every live trail point, oldest first.
///
/// Timestamps must be non-decreasing across calls; feeding time backwards
/// produces alphas above 1 rather than an error.
#[derive(Debug)]
pub struct TrailPool {
    config: TrailConfig,
    particles: VecDeque<TrailParticle>,
    vertices: Vec<TrailVertex>,
}

impl TrailPool {
    pub fn new(config: TrailConfig) -> Self {
        let reserve = config.max_trail.min(MAX_POOL_SIZE);
        Self {
            config,
            particles: VecDeque::with_capacity(reserve + 1),
            vertices: Vec::with_capacity(reserve),
        }
    }

    /// Append a point at full alpha, evicting the oldest one past `max_trail`.
    pub fn record(&mut self, position: Vec3, now_ms: f64) {
        if !position.is_finite() {
            log::warn!("dropping non-finite trail point {position}");
            return;
        }

        self.particles.push_back(TrailParticle {
            position,
            created_at: now_ms,
            alpha: 1.0,
        });

        while self.particles.len() > self.config.max_trail {
            self.particles.pop_front();
        }
    }

    /// Recompute alphas, drop expired points and rebuild the vertex buffer.
    pub fn tick(&mut self, now_ms: f64) -> &[TrailVertex] {
        let lifetime = self.config.lifetime_ms;

        self.particles.retain_mut(|p| {
            let age = now_ms - p.created_at;
            p.alpha = (1.0 - age / lifetime) as f32;
            p.alpha > 0.0
        });

        self.vertices.clear();
        self.vertices
            .extend(self.particles.iter().map(|p| TrailVertex {
                position: p.position.to_array(),
                alpha: p.alpha,
            }));

        &self.vertices
    }

    /// Vertex buffer produced by the last `tick`
    pub fn vertices(&self) -> &[TrailVertex] {
        &self.vertices
    }

    /// Live points, oldest first
    pub fn particles(&self) -> impl Iterator<Item = &TrailParticle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }
}

impl Default for TrailPool {
    fn default() -> Self {
        Self::new(TrailConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_eviction_keeps_newest() {
        let mut pool = TrailPool::new(TrailConfig {
            max_trail: 150,
            lifetime_ms: 500.0,
        });

        for i in 0..151 {
            pool.record(Vec3::new(i as f32, 0.0, 0.0), i as f64 * 0.1);
        }

        assert_eq!(pool.len(), 150);
        assert!(pool.particles().all(|p| p.position.x != 0.0));
        assert_eq!(pool.particles().next().map(|p| p.position.x), Some(1.0));
    }

    #[test]
    fn test_trail_bound_never_exceeded() {
        let mut pool = TrailPool::new(TrailConfig {
            max_trail: 8,
            lifetime_ms: 1_000.0,
        });

        for i in 0..100 {
            pool.record(Vec3::splat(i as f32), i as f64);
            assert!(pool.len() <= 8);
        }

        // the survivors are the latest 8 by creation time
        let created: Vec<f64> = pool.particles().map(|p| p.created_at).collect();
        assert_eq!(created, (92..100).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_alpha_decays_monotonically_then_expires() {
        let mut pool = TrailPool::default();
        pool.record(Vec3::ZERO, 0.0);

        let mut last = f32::INFINITY;
        for step in 0..=10 {
            let now = step as f64 * 49.0;
            let verts = pool.tick(now);
            assert_eq!(verts.len(), 1);
            assert!(verts[0].alpha <= last);
            last = verts[0].alpha;
        }

        assert_eq!(pool.tick(499.0).len(), 1);
        assert!(pool.tick(500.0).is_empty());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_tick_buffer_matches_pool() {
        let mut pool = TrailPool::default();
        pool.record(Vec3::new(1.0, 2.0, 3.0), 0.0);
        pool.record(Vec3::new(4.0, 5.0, 6.0), 250.0);

        let verts = pool.tick(250.0).to_vec();
        assert_eq!(verts.len(), 2);
        assert_eq!(verts[0].position, [1.0, 2.0, 3.0]);
        assert!((verts[0].alpha - 0.5).abs() < 1e-6);
        assert_eq!(verts[1].alpha, 1.0);
        assert_eq!(pool.vertices(), verts.as_slice());
    }

    #[test]
    fn test_rejects_non_finite_points() {
        let mut pool = TrailPool::default();
        pool.record(Vec3::new(f32::NAN, 0.0, 0.0), 0.0);
        pool.record(Vec3::new(0.0, f32::INFINITY, 0.0), 0.0);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_unbounded_cap_is_rejected_and_does_not_overallocate() {
        let config = TrailConfig {
            max_trail: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(crate::ConfigError::TooLarge { name: "trail.max_trail", .. })
        ));

        let mut pool = TrailPool::new(config);
        pool.record(Vec3::ZERO, 0.0);
        assert_eq!(pool.len(), 1);
    }
}
