//! Combat session configuration with documented constants
//!
//! All tunable values are collected here with explanations of their purpose.
//! Each combat session owns its own config; there is no global instance, so
//! multiple concurrent sessions (e.g. in tests) never interfere.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    DEFAULT_UNIT_HP, ENEMY_TURN_DELAY_MS, TIMER_TICK_MS, TURN_TIMER_DURATION,
};
use crate::core::error::{GridfallError, Result};

/// Configuration for a combat session
///
/// The defaults reproduce the shipped game's pacing. Changing them affects
/// how pressured turns feel, not correctness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Seconds a player has before the turn is forfeited automatically
    ///
    /// Enemy turns are not timed (they auto-pass).
    pub turn_timer_duration: u32,

    /// Hit points every unit starts combat with
    ///
    /// A flat value for all units: the `health` bonus stat is not wired
    /// into max HP yet, and that behavior is preserved deliberately.
    pub default_unit_hp: u32,

    /// Delay in milliseconds before an enemy unit auto-passes its turn
    ///
    /// Purely visual pacing so the turn banner is readable.
    pub enemy_turn_delay_ms: u64,

    /// Period in milliseconds between turn-timer countdown ticks
    pub timer_tick_ms: u64,

    /// Seed for the session's damage-roll RNG
    ///
    /// `None` seeds from OS entropy. Tests pin a seed to assert exact
    /// damage outcomes.
    pub rng_seed: Option<u64>,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            turn_timer_duration: TURN_TIMER_DURATION,
            default_unit_hp: DEFAULT_UNIT_HP,
            enemy_turn_delay_ms: ENEMY_TURN_DELAY_MS,
            timer_tick_ms: TIMER_TICK_MS,
            rng_seed: None,
        }
    }
}

impl CombatConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with a pinned RNG seed (deterministic damage rolls)
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng_seed: Some(seed),
            ..Self::default()
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.turn_timer_duration == 0 {
            return Err(GridfallError::InvalidConfig(
                "turn_timer_duration must be at least 1 second".into(),
            ));
        }
        if self.default_unit_hp == 0 {
            return Err(GridfallError::InvalidConfig(
                "default_unit_hp must be positive".into(),
            ));
        }
        if self.timer_tick_ms == 0 {
            return Err(GridfallError::InvalidConfig(
                "timer_tick_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CombatConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timer_rejected() {
        let config = CombatConfig {
            turn_timer_duration: 0,
            ..CombatConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_seeded_config() {
        let config = CombatConfig::seeded(42);
        assert_eq!(config.rng_seed, Some(42));
        assert!(config.validate().is_ok());
    }
}
