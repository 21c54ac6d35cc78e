//! Effect constants
//!
//! Tuned for a ~60 Hz frame cadence: velocities are world units per tick,
//! lifetimes of trail points are wall-clock milliseconds.

/// Maximum number of live trail points
pub const MAX_TRAIL: usize = 150;

/// Lifetime of a trail point in milliseconds
pub const TRAIL_LIFETIME_MS: f64 = 500.0;

/// Upper bound on trail length, burst size and star count
pub const MAX_POOL_SIZE: usize = 1 << 20;

/// Smallest accepted per-tick opacity decrement; bounds a burst to a million ticks
pub const MIN_OPACITY_DECREMENT: f32 = 1e-6;

/// Trail gradient color at the point center (linear RGB)
pub const TRAIL_INNER_COLOR: [f32; 3] = [0.2, 0.7, 1.0];

/// Trail gradient color at the point rim (linear RGB)
pub const TRAIL_OUTER_COLOR: [f32; 3] = [0.6, 0.3, 1.0];

// Spark bursts (click feedback on the landing page)
pub const SPARK_COUNT: usize = 40;
/// Each velocity component is uniform over `[-SPARK_SPEED, SPARK_SPEED)`
pub const SPARK_SPEED: f32 = 0.25;
/// Lifetime of a spark burst in ticks
pub const SPARK_MAX_AGE: u32 = 60;
pub const SPARK_COLOR_HEX: u32 = 0x51D1F6;
pub const SPARK_POINT_SIZE: f32 = 0.06;

// Firework bursts (celebration on a tagged hit)
pub const FIREWORK_COUNT: usize = 150;
pub const FIREWORK_MIN_SPEED: f32 = 0.2;
pub const FIREWORK_MAX_SPEED: f32 = 0.6;
/// Downward velocity change per tick
pub const FIREWORK_GRAVITY: f32 = 0.01;
/// Opacity lost per tick
pub const FIREWORK_OPACITY_DECREMENT: f32 = 0.02;
pub const FIREWORK_SATURATION: f32 = 1.0;
pub const FIREWORK_LIGHTNESS: f32 = 0.6;
pub const FIREWORK_POINT_SIZE: f32 = 0.8;

// Landing backdrop
pub const LANDING_STAR_COUNT: usize = 1500;
pub const LANDING_STAR_EXTENT: f32 = 20.0;
pub const LANDING_STAR_COLOR_HEX: u32 = 0x7D5DFC;

// Galaxy backdrop around the 3D scene
pub const GALAXY_STAR_COUNT: usize = 1000;
pub const GALAXY_STAR_EXTENT: f32 = 250.0;
