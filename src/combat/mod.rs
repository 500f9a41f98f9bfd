//! Combat engine - the turn-based battle state machine
//!
//! A session is initialized from a declarative encounter setup, owns its
//! units, timer, and RNG, and is mutated only through its command surface.
//! External consumers (rendering, UI) read state through the query methods
//! and drain feedback events; they never mutate directly.

pub mod constants;
pub mod events;
pub mod scheduler;
pub mod session;
pub mod setup;
pub mod unit;

pub use constants::*;
pub use events::FeedbackEvent;
pub use scheduler::{ScheduledAction, TimerHandle, TurnScheduler};
pub use session::{CombatSession, CombatStatus, InteractionMode, TurnPhase};
pub use setup::{CombatSetup, EnemySpawn};
pub use unit::{CombatUnit, UnitTeam};
