//! Combat engine constants - all tunable values in one place
//!
//! `CombatConfig` defaults pull from these; sessions never read them
//! directly.

/// Seconds before a player turn is forfeited
pub const TURN_TIMER_DURATION: u32 = 30;

/// Flat starting HP for every unit (health stat not wired into HP yet)
pub const DEFAULT_UNIT_HP: u32 = 50;

/// Milliseconds before an enemy unit auto-passes, for visual pacing
pub const ENEMY_TURN_DELAY_MS: u64 = 500;

/// Milliseconds between turn-timer countdown ticks
pub const TIMER_TICK_MS: u64 = 1000;
