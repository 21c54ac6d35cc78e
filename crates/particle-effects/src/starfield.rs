//! Backdrop starfield: a fixed point cloud that slowly tumbles

use crate::config::StarfieldConfig;
use crate::vertex::PointVertex;
use glam::{EulerRot, Quat, Vec3};
use rand::Rng;

pub struct Starfield {
    config: StarfieldConfig,
    /// Model-space vertices; never change after creation
    vertices: Vec<PointVertex>,
    /// Accumulated Euler rotation (x, y) in radians
    rotation: (f32, f32),
}

impl Starfield {
    pub fn new<R: Rng + ?Sized>(config: StarfieldConfig, rng: &mut R) -> Self {
        let vertices = (0..config.count)
            .map(|_| {
                let position = Vec3::new(
                    (rng.random::<f32>() - 0.5) * config.extent,
                    (rng.random::<f32>() - 0.5) * config.extent,
                    (rng.random::<f32>() - 0.5) * config.extent,
                );
                let color = config.color.sample(rng).with_alpha(config.opacity);
                PointVertex::new(position, config.point_size, color.to_array())
            })
            .collect();

        log::info!(
            "starfield: {} stars in a {:.0}-unit cube",
            config.count,
            config.extent
        );

        Self {
            config,
            vertices,
            rotation: (0.0, 0.0),
        }
    }

    pub fn tick(&mut self) {
        self.rotation.0 += self.config.spin.0;
        self.rotation.1 += self.config.spin.1;
    }

    /// Current `(x, y)` Euler rotation in radians
    pub fn rotation(&self) -> (f32, f32) {
        self.rotation
    }

    /// Model rotation for the renderer, X applied before Y
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.0, self.rotation.1, 0.0)
    }

    pub fn vertices(&self) -> &[PointVertex] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_stars_fill_the_cube() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = Starfield::new(StarfieldConfig::landing(), &mut rng);

        assert_eq!(field.vertices().len(), 1500);
        for v in field.vertices() {
            assert!(v.position.iter().all(|c| c.abs() <= 10.0));
            assert_eq!(v.color[3], 0.7);
        }
        let expected = Color::from_hex(0x7D5DFC);
        assert_eq!(field.vertices()[0].color[0], expected.r);
    }

    #[test]
    fn test_galaxy_colors_sit_in_violet_band() {
        let mut rng = StdRng::seed_from_u64(2);
        let field = Starfield::new(StarfieldConfig::galaxy(), &mut rng);

        for v in field.vertices() {
            let [r, g, b, _] = v.color;
            // hue 0.70..0.85 is blue-violet: blue dominates green
            assert!(b >= g);
            assert!(r.max(g).max(b) > 0.99);
        }
    }

    #[test]
    fn test_spin_accumulates_without_moving_stars() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = Starfield::new(StarfieldConfig::landing(), &mut rng);
        let before = field.vertices()[10];

        for _ in 0..1000 {
            field.tick();
        }

        let (x, y) = field.rotation();
        assert!((x - 0.2).abs() < 1e-4);
        assert!((y - 0.6).abs() < 1e-4);
        assert_eq!(field.vertices()[10], before);
        assert!(field.orientation().is_normalized());
    }
}
