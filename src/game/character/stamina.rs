// Stamina pool for air actions
//
// Per tick, in priority order: gliding drains, standing regenerates, free
// fall does neither. Air jumps spend a fixed cost; the first jump off the
// ground is free.

/// Stamina tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaminaConfig {
    /// When false every stamina check passes and the pool never changes
    pub enabled: bool,
    /// Pool capacity
    pub max: f32,
    /// Cost of each air jump
    pub jump_cost: f32,
    /// Drain per second while gliding
    pub glide_drain: f32,
    /// Regeneration per second while grounded
    pub regen_rate: f32,
}

/// Bounded stamina scalar, `0 <= current <= max`
#[derive(Debug, Clone)]
pub struct StaminaPool {
    current: f32,
    config: StaminaConfig,
}

impl StaminaPool {
    /// A full pool
    pub fn new(config: StaminaConfig) -> Self {
        Self {
            current: config.max.max(0.0),
            config,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.config.max
    }

    /// Fill level in `[0, 1]`; 0 when the pool has no capacity
    pub fn percent(&self) -> f32 {
        if self.config.max > 0.0 {
            self.current / self.config.max
        } else {
            0.0
        }
    }

    /// Whether the jump that would become jump number `jump_number` is affordable
    pub fn can_jump(&self, jump_number: u32) -> bool {
        !self.config.enabled || jump_number <= 1 || self.current >= self.config.jump_cost
    }

    /// Charge the jump that just became jump number `jump_number`
    pub fn spend_jump(&mut self, jump_number: u32) {
        if self.config.enabled && jump_number > 1 {
            self.current = (self.current - self.config.jump_cost).max(0.0);
        }
    }

    /// Whether a glide may start or continue
    pub fn can_glide(&self) -> bool {
        !self.config.enabled || self.current > 0.0
    }

    /// Advance the pool by `dt` seconds
    pub fn tick(&mut self, dt: f32, grounded: bool, gliding: bool) {
        if !self.config.enabled {
            return;
        }

        if gliding {
            self.current = (self.current - self.config.glide_drain * dt).max(0.0);
        } else if grounded {
            self.current = (self.current + self.config.regen_rate * dt).min(self.config.max);
        }
        // Free fall: no regen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config() -> StaminaConfig {
        StaminaConfig {
            enabled: true,
            max: 100.0,
            jump_cost: 20.0,
            glide_drain: 10.0,
            regen_rate: 25.0,
        }
    }

    #[test]
    fn test_starts_full() {
        let pool = StaminaPool::new(config());
        assert_eq!(pool.current(), 100.0);
        assert_eq!(pool.max(), 100.0);
        assert_eq!(pool.percent(), 1.0);
    }

    #[test]
    fn test_first_jump_free_air_jump_costs() {
        let mut pool = StaminaPool::new(config());
        assert!(pool.can_jump(1));
        pool.spend_jump(1);
        assert_eq!(pool.current(), 100.0);

        assert!(pool.can_jump(2));
        pool.spend_jump(2);
        assert_eq!(pool.current(), 80.0);
    }

    #[test]
    fn test_first_jump_free_even_when_empty() {
        let mut pool = StaminaPool::new(config());
        pool.tick(20.0, false, true);
        assert_eq!(pool.current(), 0.0);
        assert!(pool.can_jump(1));
        assert!(!pool.can_jump(2));
    }

    #[test]
    fn test_glide_drains_and_clamps() {
        let mut pool = StaminaPool::new(config());
        pool.tick(1.0, false, true);
        assert_relative_eq!(pool.current(), 90.0);

        pool.tick(100.0, false, true);
        assert_eq!(pool.current(), 0.0);
        assert!(!pool.can_glide());
    }

    #[test]
    fn test_no_regen_in_free_fall() {
        let mut pool = StaminaPool::new(config());
        pool.spend_jump(2);
        pool.tick(1.0, false, false);
        assert_eq!(pool.current(), 80.0);
    }

    #[test]
    fn test_regen_when_grounded_clamps_to_max() {
        let mut pool = StaminaPool::new(config());
        pool.spend_jump(2);
        pool.tick(0.4, true, false);
        assert_relative_eq!(pool.current(), 90.0, epsilon = 1e-4);

        pool.tick(10.0, true, false);
        assert_eq!(pool.current(), 100.0);
    }

    #[test]
    fn test_glide_takes_priority_over_regen() {
        let mut pool = StaminaPool::new(config());
        pool.tick(1.0, true, true);
        assert_relative_eq!(pool.current(), 90.0);
    }

    #[test]
    fn test_disabled_pool_passes_every_check() {
        let mut pool = StaminaPool::new(StaminaConfig {
            enabled: false,
            ..config()
        });
        pool.tick(100.0, false, true);
        assert_eq!(pool.current(), 100.0);
        assert!(pool.can_jump(5));
        pool.spend_jump(5);
        assert_eq!(pool.current(), 100.0);
        assert!(pool.can_glide());
    }

    #[test]
    fn test_percent_with_zero_capacity() {
        let pool = StaminaPool::new(StaminaConfig { max: 0.0, ..config() });
        assert_eq!(pool.percent(), 0.0);
    }
}
