//! Effect parameters for runtime tuning
//!
//! Every struct carries the landing-page values in its `Default` impl and
//! can be loaded from JSON with any subset of fields present.

use crate::color::Color;
use crate::constants::*;
use crate::error::{ConfigError, Result};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

/// Mouse trail parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Pool bound; the oldest point is evicted past this
    pub max_trail: usize,
    pub lifetime_ms: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_trail: MAX_TRAIL,
            lifetime_ms: TRAIL_LIFETIME_MS,
        }
    }
}

impl TrailConfig {
    pub fn validate(&self) -> Result<()> {
        pool_size("trail.max_trail", self.max_trail)?;
        positive_f64("trail.lifetime_ms", self.lifetime_ms)
    }
}

/// How initial velocities are sampled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurstVariant {
    /// Each axis uniform over `[-speed.max, speed.max)`
    Spark,
    /// Random angle in the XY plane with speed in `[speed.min, speed.max)`,
    /// plus Z jitter uniform over `[-speed/2, speed/2)`
    Firework,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        lerp_sample(rng, self.min, self.max)
    }
}

/// Opacity decay of a burst
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decay {
    /// `opacity = 1 - age / max_age`, retired at `age >= max_age`
    Linear { max_age: u32 },
    /// `opacity -= decrement` every tick, retired at `opacity <= 0`
    Constant { decrement: f32 },
}

impl Decay {
    /// Upper bound on the number of ticks a burst with this decay can live
    pub fn tick_budget(&self) -> u32 {
        match *self {
            Decay::Linear { max_age } => max_age,
            // float to int casts saturate
            Decay::Constant { decrement } => ((1.0 / decrement).ceil() as u32).saturating_add(1),
        }
    }
}

/// Per-particle color selection
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorMode {
    Uniform {
        color: Color,
    },
    /// HSL color with hue and lightness drawn from the given bands
    Hsl {
        hue: (f32, f32),
        saturation: f32,
        lightness: (f32, f32),
    },
}

impl ColorMode {
    /// Any hue at fixed saturation and lightness
    pub const fn random_hue(saturation: f32, lightness: f32) -> Self {
        ColorMode::Hsl {
            hue: (0.0, 1.0),
            saturation,
            lightness: (lightness, lightness),
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        match *self {
            ColorMode::Uniform { color } => color,
            ColorMode::Hsl {
                hue,
                saturation,
                lightness,
            } => Color::from_hsl(
                lerp_sample(rng, hue.0, hue.1),
                saturation,
                lerp_sample(rng, lightness.0, lightness.1),
            ),
        }
    }

    fn validate(&self, name: &'static str) -> Result<()> {
        match *self {
            ColorMode::Uniform { color } => {
                for c in color.to_array() {
                    finite(name, c)?;
                }
                Ok(())
            }
            ColorMode::Hsl {
                hue,
                saturation,
                lightness,
            } => {
                ordered(name, hue.0, hue.1)?;
                ordered(name, lightness.0, lightness.1)?;
                finite(name, saturation)
            }
        }
    }
}

/// Complete description of one burst effect
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BurstConfig {
    pub variant: BurstVariant,
    pub count: usize,
    pub speed: SpeedRange,
    /// Subtracted from every particle's `velocity.y` after each step
    pub gravity: f32,
    pub decay: Decay,
    pub color: ColorMode,
    pub point_size: f32,
}

impl BurstConfig {
    /// Click feedback: small cyan burst fading linearly over 60 ticks
    pub fn spark() -> Self {
        Self {
            variant: BurstVariant::Spark,
            count: SPARK_COUNT,
            speed: SpeedRange::new(0.0, SPARK_SPEED),
            gravity: 0.0,
            decay: Decay::Linear {
                max_age: SPARK_MAX_AGE,
            },
            color: ColorMode::Uniform {
                color: Color::from_hex(SPARK_COLOR_HEX),
            },
            point_size: SPARK_POINT_SIZE,
        }
    }

    /// Celebration burst: multicolored, falling under gravity
    pub fn firework() -> Self {
        Self {
            variant: BurstVariant::Firework,
            count: FIREWORK_COUNT,
            speed: SpeedRange::new(FIREWORK_MIN_SPEED, FIREWORK_MAX_SPEED),
            gravity: FIREWORK_GRAVITY,
            decay: Decay::Constant {
                decrement: FIREWORK_OPACITY_DECREMENT,
            },
            color: ColorMode::random_hue(FIREWORK_SATURATION, FIREWORK_LIGHTNESS),
            point_size: FIREWORK_POINT_SIZE,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_decay(mut self, decay: Decay) -> Self {
        self.decay = decay;
        self
    }

    pub fn validate(&self) -> Result<()> {
        pool_size("burst.count", self.count)?;
        finite("burst.speed", self.speed.min)?;
        finite("burst.speed", self.speed.max)?;
        ordered("burst.speed", self.speed.min, self.speed.max)?;
        finite("burst.gravity", self.gravity)?;
        positive_f32("burst.point_size", self.point_size)?;
        match self.decay {
            Decay::Linear { max_age: 0 } => return Err(ConfigError::ZeroCount("burst.max_age")),
            Decay::Linear { .. } => {}
            Decay::Constant { decrement } => {
                positive_f32("burst.decrement", decrement)?;
                if decrement < MIN_OPACITY_DECREMENT {
                    return Err(ConfigError::OutOfRange {
                        name: "burst.decrement",
                        value: decrement,
                    });
                }
            }
        }
        self.color.validate("burst.color")
    }
}

/// Any subset of [`BurstConfig`] fields, laid over a preset
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct BurstOverrides {
    variant: Option<BurstVariant>,
    count: Option<usize>,
    speed: Option<SpeedRange>,
    gravity: Option<f32>,
    decay: Option<Decay>,
    color: Option<ColorMode>,
    point_size: Option<f32>,
}

impl BurstOverrides {
    fn over(self, base: BurstConfig) -> BurstConfig {
        BurstConfig {
            variant: self.variant.unwrap_or(base.variant),
            count: self.count.unwrap_or(base.count),
            speed: self.speed.unwrap_or(base.speed),
            gravity: self.gravity.unwrap_or(base.gravity),
            decay: self.decay.unwrap_or(base.decay),
            color: self.color.unwrap_or(base.color),
            point_size: self.point_size.unwrap_or(base.point_size),
        }
    }
}

/// Deserialize a partial burst config on top of [`BurstConfig::spark`].
///
/// For use with `#[serde(deserialize_with = "...")]`.
pub fn spark_with_overrides<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<BurstConfig, D::Error> {
    BurstOverrides::deserialize(deserializer).map(|o| o.over(BurstConfig::spark()))
}

/// Deserialize a partial burst config on top of [`BurstConfig::firework`].
pub fn firework_with_overrides<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<BurstConfig, D::Error> {
    BurstOverrides::deserialize(deserializer).map(|o| o.over(BurstConfig::firework()))
}

/// Static point cloud drifting behind everything else
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Edge length of the cube the stars are scattered in
    pub extent: f32,
    /// Rotation per tick about X and Y, in radians
    pub spin: (f32, f32),
    pub color: ColorMode,
    pub opacity: f32,
    pub point_size: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self::landing()
    }
}

impl StarfieldConfig {
    pub fn landing() -> Self {
        Self {
            count: LANDING_STAR_COUNT,
            extent: LANDING_STAR_EXTENT,
            spin: (0.0002, 0.0006),
            color: ColorMode::Uniform {
                color: Color::from_hex(LANDING_STAR_COLOR_HEX),
            },
            opacity: 0.7,
            point_size: 0.04,
        }
    }

    pub fn galaxy() -> Self {
        Self {
            count: GALAXY_STAR_COUNT,
            extent: GALAXY_STAR_EXTENT,
            spin: (0.00015, 0.0004),
            color: ColorMode::Hsl {
                hue: (0.7, 0.85),
                saturation: 1.0,
                lightness: (0.6, 0.8),
            },
            opacity: 0.9,
            point_size: 1.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.count > MAX_POOL_SIZE {
            return Err(ConfigError::TooLarge {
                name: "starfield.count",
                value: self.count,
                max: MAX_POOL_SIZE,
            });
        }
        positive_f32("starfield.extent", self.extent)?;
        finite("starfield.spin", self.spin.0)?;
        finite("starfield.spin", self.spin.1)?;
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::OutOfRange {
                name: "starfield.opacity",
                value: self.opacity,
            });
        }
        positive_f32("starfield.point_size", self.point_size)?;
        self.color.validate("starfield.color")
    }
}

/// Uniform sample in `[lo, hi)`, collapsing to `lo` for an empty band
fn lerp_sample<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + (hi - lo) * rng.random::<f32>()
}

fn pool_size(name: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(ConfigError::ZeroCount(name));
    }
    if value > MAX_POOL_SIZE {
        return Err(ConfigError::TooLarge {
            name,
            value,
            max: MAX_POOL_SIZE,
        });
    }
    Ok(())
}

fn finite(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite(name))
    }
}

fn ordered(name: &'static str, min: f32, max: f32) -> Result<()> {
    finite(name, min)?;
    finite(name, max)?;
    if min > max {
        return Err(ConfigError::InvertedRange(name));
    }
    Ok(())
}

fn positive_f32(name: &'static str, value: f32) -> Result<()> {
    finite(name, value)?;
    if value <= 0.0 {
        return Err(ConfigError::OutOfRange { name, value });
    }
    Ok(())
}

fn positive_f64(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite(name));
    }
    if value <= 0.0 {
        return Err(ConfigError::OutOfRange {
            name,
            value: value as f32,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_presets_are_valid() {
        assert!(TrailConfig::default().validate().is_ok());
        assert!(BurstConfig::spark().validate().is_ok());
        assert!(BurstConfig::firework().validate().is_ok());
        assert!(StarfieldConfig::landing().validate().is_ok());
        assert!(StarfieldConfig::galaxy().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_bursts() {
        assert_eq!(
            BurstConfig::spark().with_count(0).validate(),
            Err(ConfigError::ZeroCount("burst.count"))
        );
        assert_eq!(
            BurstConfig::spark()
                .with_decay(Decay::Linear { max_age: 0 })
                .validate(),
            Err(ConfigError::ZeroCount("burst.max_age"))
        );
        assert!(BurstConfig::firework()
            .with_decay(Decay::Constant { decrement: 0.0 })
            .validate()
            .is_err());

        let mut inverted = BurstConfig::firework();
        inverted.speed = SpeedRange::new(1.0, 0.5);
        assert_eq!(
            inverted.validate(),
            Err(ConfigError::InvertedRange("burst.speed"))
        );
    }

    #[test]
    fn test_rejects_bad_trail() {
        let trail = TrailConfig {
            max_trail: 0,
            ..Default::default()
        };
        assert!(trail.validate().is_err());

        let trail = TrailConfig {
            lifetime_ms: f64::NAN,
            ..Default::default()
        };
        assert_eq!(
            trail.validate(),
            Err(ConfigError::NotFinite("trail.lifetime_ms"))
        );
    }

    #[test]
    fn test_tick_budget() {
        assert_eq!(Decay::Linear { max_age: 60 }.tick_budget(), 60);
        assert_eq!(Decay::Constant { decrement: 0.02 }.tick_budget(), 51);
    }

    #[test]
    fn test_tiny_decrement_saturates_budget() {
        assert_eq!(Decay::Constant { decrement: 1e-10 }.tick_budget(), u32::MAX);
        assert_eq!(Decay::Constant { decrement: f32::MIN_POSITIVE }.tick_budget(), u32::MAX);

        let tiny = BurstConfig::firework().with_decay(Decay::Constant { decrement: 1e-10 });
        assert_eq!(
            tiny.validate(),
            Err(ConfigError::OutOfRange {
                name: "burst.decrement",
                value: 1e-10
            })
        );
        assert!(BurstConfig::firework()
            .with_decay(Decay::Constant {
                decrement: MIN_OPACITY_DECREMENT
            })
            .validate()
            .is_ok());
    }

    #[test]
    fn test_rejects_oversized_pools() {
        assert_eq!(
            BurstConfig::spark().with_count(MAX_POOL_SIZE + 1).validate(),
            Err(ConfigError::TooLarge {
                name: "burst.count",
                value: MAX_POOL_SIZE + 1,
                max: MAX_POOL_SIZE
            })
        );
        let stars = StarfieldConfig {
            count: usize::MAX,
            ..StarfieldConfig::landing()
        };
        assert!(matches!(
            stars.validate(),
            Err(ConfigError::TooLarge { name: "starfield.count", .. })
        ));
    }

    #[test]
    fn test_color_mode_sampling_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        let mode = ColorMode::random_hue(1.0, 0.6);
        for _ in 0..100 {
            let c = mode.sample(&mut rng);
            for v in [c.r, c.g, c.b] {
                assert!((0.0..=1.0).contains(&v));
            }
            // l = 0.6, s = 1: the brightest channel is always fully lit
            assert!(c.r.max(c.g).max(c.b) > 0.99);
        }
    }

    #[test]
    fn test_burst_config_from_json() {
        let json = r#"{
            "variant": "firework",
            "count": 12,
            "speed": { "min": 0.1, "max": 0.2 },
            "gravity": 0.0,
            "decay": { "kind": "linear", "max_age": 5 },
            "color": { "kind": "uniform", "color": { "r": 1.0, "g": 0.0, "b": 0.0, "a": 1.0 } },
            "point_size": 0.5
        }"#;
        let cfg: BurstConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.variant, BurstVariant::Firework);
        assert_eq!(cfg.count, 12);
        assert_eq!(cfg.decay, Decay::Linear { max_age: 5 });
        assert!(cfg.validate().is_ok());
    }

    #[derive(Deserialize)]
    struct Presets {
        #[serde(default = "BurstConfig::spark", deserialize_with = "spark_with_overrides")]
        spark: BurstConfig,
        #[serde(default = "BurstConfig::firework", deserialize_with = "firework_with_overrides")]
        firework: BurstConfig,
    }

    #[test]
    fn test_partial_burst_keeps_preset_fields() {
        let presets: Presets = serde_json::from_str(
            r#"{ "spark": { "count": 10 }, "firework": { "decay": { "kind": "constant", "decrement": 0.05 } } }"#,
        )
        .unwrap();

        assert_eq!(presets.spark, BurstConfig::spark().with_count(10));
        assert_eq!(
            presets.firework,
            BurstConfig::firework().with_decay(Decay::Constant { decrement: 0.05 })
        );

        let presets: Presets = serde_json::from_str("{}").unwrap();
        assert_eq!(presets.firework, BurstConfig::firework());

        assert!(serde_json::from_str::<Presets>(r#"{ "spark": { "cuont": 10 } }"#).is_err());
    }
}
