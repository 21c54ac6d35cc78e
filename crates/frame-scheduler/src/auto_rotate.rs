//! Idle auto-rotation with an interaction cooldown

#[derive(Clone, Debug)]
pub struct AutoRotate {
    speed: f32,
    cooldown_ms: f64,
    last_interaction_ms: Option<f64>,
    angle: f32,
}

impl AutoRotate {
    pub fn new(speed: f32, cooldown_ms: f64) -> Self {
        Self {
            speed,
            cooldown_ms,
            last_interaction_ms: None,
            angle: 0.0,
        }
    }

    /// Restart the cooldown; the latest interaction wins.
    pub fn interact(&mut self, now_ms: f64) {
        self.last_interaction_ms = Some(now_ms);
    }

    pub fn is_suspended(&self, now_ms: f64) -> bool {
        self.last_interaction_ms
            .is_some_and(|last| now_ms - last < self.cooldown_ms)
    }

    /// Rotation to apply this tick, or `None` while suspended
    pub fn advance(&mut self, now_ms: f64) -> Option<f32> {
        if self.is_suspended(now_ms) {
            return None;
        }
        self.angle += self.speed;
        Some(self.speed)
    }

    /// Total rotation applied so far
    pub fn angle(&self) -> f32 {
        self.angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotates_when_idle() {
        let mut rot = AutoRotate::new(0.5, 4000.0);
        assert_eq!(rot.advance(0.0), Some(0.5));
        assert_eq!(rot.advance(16.0), Some(0.5));
        assert_eq!(rot.angle(), 1.0);
    }

    #[test]
    fn test_interaction_suspends_for_cooldown() {
        let mut rot = AutoRotate::new(0.5, 4000.0);
        rot.interact(1000.0);
        assert_eq!(rot.advance(1000.0), None);
        assert_eq!(rot.advance(4999.0), None);
        assert_eq!(rot.advance(5000.0), Some(0.5));
    }

    #[test]
    fn test_last_interaction_wins() {
        let mut rot = AutoRotate::new(0.5, 4000.0);
        rot.interact(0.0);
        rot.interact(3000.0);
        assert!(rot.is_suspended(4500.0));
        assert!(!rot.is_suspended(7000.0));
        assert_eq!(rot.angle(), 0.0);
    }
}
