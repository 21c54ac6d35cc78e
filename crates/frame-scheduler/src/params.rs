//! Runtime parameters for the whole effect stack

use particle_effects::{
    firework_with_overrides, spark_with_overrides, BurstConfig, ConfigError, StarfieldConfig,
    TrailConfig,
};
use scene_picking::TagRegistry;
use serde::{Deserialize, Serialize};

/// Per-tick scene rotation while nobody touches the camera (radians)
pub const AUTO_ROTATE_SPEED: f32 = 0.0015;

/// How long a camera interaction suspends auto-rotation
pub const INTERACTION_COOLDOWN_MS: f64 = 4000.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub auto_rotate_speed: f32,
    pub interaction_cooldown_ms: f64,
    /// Every click drops a spark burst on the z = 0 plane
    pub click_sparks: bool,
    /// A click on a tagged node launches a firework at the hit point
    pub hit_fireworks: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            interaction_cooldown_ms: INTERACTION_COOLDOWN_MS,
            click_sparks: true,
            hit_fireworks: true,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.auto_rotate_speed.is_finite() {
            return Err(ConfigError::NotFinite("scheduler.auto_rotate_speed"));
        }
        if !self.interaction_cooldown_ms.is_finite() || self.interaction_cooldown_ms < 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "scheduler.interaction_cooldown_ms",
                value: self.interaction_cooldown_ms as f32,
            });
        }
        Ok(())
    }
}

/// Everything needed to build an [`AnimationContext`](crate::AnimationContext)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    pub trail: TrailConfig,
    /// Partial objects are laid over the spark preset
    #[serde(deserialize_with = "spark_with_overrides")]
    pub spark: BurstConfig,
    /// Partial objects are laid over the firework preset
    #[serde(deserialize_with = "firework_with_overrides")]
    pub firework: BurstConfig,
    pub starfield: StarfieldConfig,
    pub scheduler: SchedulerConfig,
    pub tags: TagRegistry,
    /// Fixed RNG seed for reproducible runs; OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            trail: TrailConfig::default(),
            spark: BurstConfig::spark(),
            firework: BurstConfig::firework(),
            starfield: StarfieldConfig::default(),
            scheduler: SchedulerConfig::default(),
            tags: TagRegistry::default(),
            seed: None,
        }
    }
}

impl FxConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.trail.validate()?;
        self.spark.validate()?;
        self.firework.validate()?;
        self.starfield.validate()?;
        self.scheduler.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(FxConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg: FxConfig = serde_json::from_str(
            r#"{ "seed": 9, "trail": { "max_trail": 20 }, "scheduler": { "click_sparks": false } }"#,
        )
        .unwrap();

        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.trail.max_trail, 20);
        assert_eq!(cfg.trail.lifetime_ms, 500.0);
        assert!(!cfg.scheduler.click_sparks);
        assert!(cfg.scheduler.hit_fireworks);
        assert_eq!(cfg.firework, BurstConfig::firework());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validation_reaches_nested_configs() {
        let mut cfg = FxConfig::default();
        cfg.spark.count = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroCount("burst.count")));

        let mut cfg = FxConfig::default();
        cfg.scheduler.interaction_cooldown_ms = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_burst_overrides_keep_preset() {
        let cfg: FxConfig =
            serde_json::from_str(r#"{ "spark": { "count": 10 }, "firework": { "gravity": 0.0 } }"#)
                .unwrap();

        assert_eq!(cfg.spark, BurstConfig::spark().with_count(10));
        assert_eq!(cfg.firework.gravity, 0.0);
        assert_eq!(cfg.firework.count, BurstConfig::firework().count);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_oversized_trail_fails_validation() {
        let cfg: FxConfig =
            serde_json::from_str(r#"{ "trail": { "max_trail": 18446744073709551615 } }"#).unwrap();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::TooLarge { name: "trail.max_trail", .. })
        ));
    }
}
