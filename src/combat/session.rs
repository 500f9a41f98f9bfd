//! The combat state machine
//!
//! One `CombatSession` per active battle. All mutation goes through the
//! command surface; rendering and UI hold read-only views via the query
//! methods. Illegal commands (wrong turn, insufficient resources, invalid
//! target, wrong mode, combat over) are silent no-ops that leave the state
//! unchanged.
//!
//! Transient caches (reachable tiles, preview path, spell range) are
//! derived data and are recomputed whenever position, AP/MP, or the active
//! unit changes; they are never the source of truth.

use ahash::AHashSet;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combat::events::FeedbackEvent;
use crate::combat::scheduler::{ScheduledAction, TimerHandle, TurnScheduler};
use crate::combat::setup::CombatSetup;
use crate::combat::unit::{CombatUnit, UnitTeam};
use crate::core::config::CombatConfig;
use crate::grid::coord::TileCoord;
use crate::grid::map::{GridConfig, TileData};
use crate::grid::pathfinding::{
    bfs_reachable, build_walkable_set, reachable_coords, reconstruct_path, ReachableMap,
};
use crate::player::profile::Player;
use crate::spell::damage::{
    compute_damage_preview, roll_spell_damage, spell_range_tiles, SpellDamagePreview,
};
use crate::spell::definitions::SpellDefinition;

/// Phase within a single turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnPhase {
    #[default]
    Movement,
    Action,
    End,
}

/// Session-level battle outcome; terminal once it leaves `Active`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatStatus {
    #[default]
    Active,
    Victory,
    Defeat,
}

/// Mutually exclusive hover/click interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    #[default]
    Movement,
    Spell,
}

/// Complete state of one battle
#[derive(Debug)]
pub struct CombatSession {
    config: CombatConfig,
    rng: ChaCha8Rng,

    // Units and turn tracking
    units: Vec<CombatUnit>,
    active_unit_index: usize,
    turn_phase: TurnPhase,
    turn_number: u32,
    combat_status: CombatStatus,

    // Turn timer
    turn_time_remaining: u32,
    turn_timer: Option<TimerHandle>,
    enemy_pass: Option<TimerHandle>,
    scheduler: TurnScheduler,

    // Map tiles, fixed at init
    tiles: Vec<TileData>,
    grid: GridConfig,

    // Reachable tiles for the active unit
    reachable_tiles: Vec<TileCoord>,
    reachable_keys: AHashSet<TileCoord>,

    // Hover/preview state
    hovered_tile: Option<TileCoord>,
    preview_path: Vec<TileCoord>,

    // Movement animation state
    movement_path: Vec<TileCoord>,
    is_moving: bool,

    // Spell targeting state
    selected_spell: Option<SpellDefinition>,
    spell_range_tiles: Vec<TileCoord>,
    spell_range_keys: AHashSet<TileCoord>,
    spell_hovered_target: Option<TileCoord>,
    interaction_mode: InteractionMode,

    // Feedback channel for the floating-number display
    feedback: Vec<FeedbackEvent>,
}

impl CombatSession {
    /// Initialize a battle from an encounter description and player roster
    ///
    /// Player units are placed 1:1 by index on the start positions (extra
    /// players or positions are ignored) and always precede enemy units in
    /// turn order. The turn timer starts only when unit 0 is player-
    /// controlled. A new session supersedes any previous one: the old
    /// session's scheduler dies with it, so stale timers cannot fire.
    pub fn new(setup: &CombatSetup, players: Vec<Player>, config: CombatConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let hp = config.default_unit_hp;
        let mut units: Vec<CombatUnit> = players
            .into_iter()
            .zip(setup.player_start_positions.iter())
            .map(|(player, pos)| CombatUnit::from_player(player, *pos, UnitTeam::Player, hp))
            .collect();
        units.extend(setup.enemies.iter().map(|spawn| {
            CombatUnit::from_player(
                Player::enemy(spawn.id.clone(), spawn.name.clone()),
                spawn.position,
                UnitTeam::Enemy,
                hp,
            )
        }));

        let mut session = Self {
            config,
            rng,
            units,
            active_unit_index: 0,
            turn_phase: TurnPhase::Movement,
            turn_number: 1,
            combat_status: CombatStatus::Active,
            turn_time_remaining: 0,
            turn_timer: None,
            enemy_pass: None,
            scheduler: TurnScheduler::new(),
            tiles: setup.map.parse_layout(),
            grid: setup.map.grid_config(),
            reachable_tiles: Vec::new(),
            reachable_keys: AHashSet::new(),
            hovered_tile: None,
            preview_path: Vec::new(),
            movement_path: Vec::new(),
            is_moving: false,
            selected_spell: None,
            spell_range_tiles: Vec::new(),
            spell_range_keys: AHashSet::new(),
            spell_hovered_target: None,
            interaction_mode: InteractionMode::Movement,
            feedback: Vec::new(),
        };

        session.turn_time_remaining = session.config.turn_timer_duration;
        session.compute_reachable();
        if session.units.first().map(|u| u.team) == Some(UnitTeam::Player) {
            session.start_turn_timer();
        }

        info!(
            units = session.units.len(),
            map = %setup.map.name,
            "combat initialized"
        );
        session
    }

    // ---- Queries ----

    pub fn units(&self) -> &[CombatUnit] {
        &self.units
    }

    pub fn active_unit_index(&self) -> usize {
        self.active_unit_index
    }

    pub fn active_unit(&self) -> Option<&CombatUnit> {
        self.units.get(self.active_unit_index)
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn turn_phase(&self) -> TurnPhase {
        self.turn_phase
    }

    pub fn combat_status(&self) -> CombatStatus {
        self.combat_status
    }

    pub fn turn_time_remaining(&self) -> u32 {
        self.turn_time_remaining
    }

    pub fn tiles(&self) -> &[TileData] {
        &self.tiles
    }

    pub fn grid_config(&self) -> &GridConfig {
        &self.grid
    }

    pub fn reachable_tiles(&self) -> &[TileCoord] {
        &self.reachable_tiles
    }

    pub fn hovered_tile(&self) -> Option<TileCoord> {
        self.hovered_tile
    }

    pub fn preview_path(&self) -> &[TileCoord] {
        &self.preview_path
    }

    pub fn movement_path(&self) -> &[TileCoord] {
        &self.movement_path
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn selected_spell(&self) -> Option<&SpellDefinition> {
        self.selected_spell.as_ref()
    }

    pub fn spell_range_tiles(&self) -> &[TileCoord] {
        &self.spell_range_tiles
    }

    pub fn spell_hovered_target(&self) -> Option<TileCoord> {
        self.spell_hovered_target
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction_mode
    }

    /// Stat-scaled damage preview for the hovered spell target, if any
    pub fn spell_hover_preview(&self) -> Option<SpellDamagePreview> {
        self.spell_hovered_target?;
        let spell = self.selected_spell.as_ref()?;
        let caster = self.active_unit()?;
        Some(compute_damage_preview(spell, &caster.player.bonus_stats))
    }

    /// Victory/defeat recomputed from the roster, never cached
    pub fn check_combat_end(&self) -> CombatStatus {
        let alive_enemies = self
            .units
            .iter()
            .filter(|u| u.team == UnitTeam::Enemy && u.is_alive())
            .count();
        let alive_players = self
            .units
            .iter()
            .filter(|u| u.team == UnitTeam::Player && u.is_alive())
            .count();

        if alive_enemies == 0 {
            CombatStatus::Victory
        } else if alive_players == 0 {
            CombatStatus::Defeat
        } else {
            CombatStatus::Active
        }
    }

    /// Drain accumulated feedback events (floating-number feed)
    pub fn drain_feedback(&mut self) -> Vec<FeedbackEvent> {
        std::mem::take(&mut self.feedback)
    }

    // ---- Time ----

    /// Feed elapsed wall-clock milliseconds to the session
    ///
    /// Drives the per-second turn countdown and the delayed enemy
    /// auto-pass. Fires from timers superseded mid-batch (e.g. countdown
    /// ticks queued behind the timeout that ended the turn) are ignored
    /// via their stale handles.
    pub fn advance_time(&mut self, elapsed_ms: u64) {
        for (handle, action) in self.scheduler.advance(elapsed_ms) {
            match action {
                ScheduledAction::TimerTick => {
                    if self.turn_timer == Some(handle) {
                        self.handle_timer_tick();
                    }
                }
                ScheduledAction::EnemyAutoPass => {
                    if self.enemy_pass == Some(handle) {
                        self.enemy_pass = None;
                        if self.combat_status == CombatStatus::Active {
                            self.end_turn();
                        }
                    }
                }
            }
        }
    }

    fn handle_timer_tick(&mut self) {
        if self.combat_status != CombatStatus::Active {
            self.clear_turn_timer();
            return;
        }
        if self.turn_time_remaining <= 1 {
            // Timeout forfeits the rest of the turn
            self.end_turn();
        } else {
            self.turn_time_remaining -= 1;
        }
    }

    // ---- Commands ----

    /// Recompute the reachable-tile cache for the active unit
    ///
    /// Walkability excludes every other living unit's position; the active
    /// unit's own tile is re-added as the BFS origin. The budget is the
    /// unit's *current* MP. Clears hover/preview as a side effect (the old
    /// hover target may no longer be valid).
    pub fn compute_reachable(&mut self) {
        if self.combat_status != CombatStatus::Active {
            return;
        }
        let Some(active) = self.units.get(self.active_unit_index) else {
            return;
        };
        if active.defeated {
            return;
        }

        let origin = active.position;
        let map = self.build_reachable_map();
        self.reachable_tiles = reachable_coords(&map, origin);
        self.reachable_keys = self.reachable_tiles.iter().copied().collect();
        self.hovered_tile = None;
        self.preview_path.clear();
    }

    /// BFS spanning tree from the active unit under current occupancy
    fn build_reachable_map(&self) -> ReachableMap {
        let active = &self.units[self.active_unit_index];
        let occupied: Vec<TileCoord> = self
            .units
            .iter()
            .enumerate()
            .filter(|(i, u)| *i != self.active_unit_index && u.is_alive())
            .map(|(_, u)| u.position)
            .collect();

        let mut walkable = build_walkable_set(&self.tiles, &occupied);
        walkable.insert(active.position);
        bfs_reachable(active.position, active.current_mp, &walkable)
    }

    fn is_player_turn(&self) -> bool {
        self.units
            .get(self.active_unit_index)
            .map(|u| u.team == UnitTeam::Player)
            .unwrap_or(false)
    }

    /// Hover a tile (or clear with `None`) in the current interaction mode
    ///
    /// Ignored while a move animation is in flight, when combat is over,
    /// or on enemy turns. In spell mode this delegates to spell hovering.
    pub fn set_hovered_tile(&mut self, coord: Option<TileCoord>) {
        if self.is_moving || self.combat_status != CombatStatus::Active {
            return;
        }
        if !self.is_player_turn() {
            return;
        }
        if self.interaction_mode == InteractionMode::Spell {
            self.set_spell_hovered_target(coord);
            return;
        }

        let Some(coord) = coord else {
            self.hovered_tile = None;
            self.preview_path.clear();
            return;
        };
        let Some(active) = self.units.get(self.active_unit_index) else {
            return;
        };

        // Hovering the unit's own tile reveals the zone without a path
        if coord == active.position {
            self.hovered_tile = Some(coord);
            self.preview_path.clear();
            return;
        }
        if !self.reachable_keys.contains(&coord) {
            self.hovered_tile = None;
            self.preview_path.clear();
            return;
        }

        let map = self.build_reachable_map();
        self.preview_path = reconstruct_path(&map, coord);
        self.hovered_tile = Some(coord);
    }

    /// Move the active unit to `target` along the shortest path
    ///
    /// The logical position updates immediately; only the visual traversal
    /// is animation, acknowledged later via `set_is_moving(false)`. Spends
    /// one MP per step. Rejects self-targets and unreachable tiles.
    pub fn execute_move(&mut self, target: TileCoord) {
        if self.is_moving || self.combat_status != CombatStatus::Active {
            return;
        }
        if self.interaction_mode == InteractionMode::Spell {
            return;
        }
        if !self.is_player_turn() {
            return;
        }
        if self.units.get(self.active_unit_index).is_none() {
            return;
        }

        let map = self.build_reachable_map();
        let path = reconstruct_path(&map, target);
        if path.len() < 2 {
            return;
        }
        let steps = (path.len() - 1) as u32;

        let unit = &mut self.units[self.active_unit_index];
        unit.position = target;
        unit.current_mp -= steps;
        debug!(unit = %unit.player.name, steps, "move executed");

        self.movement_path = path;
        self.is_moving = true;
        self.hovered_tile = None;
        self.preview_path.clear();
        self.reachable_tiles.clear();
        self.reachable_keys.clear();
        self.feedback.push(FeedbackEvent::MovementPointsSpent { amount: steps, tile: target });
    }

    /// Animation-complete signal from the presentation layer
    ///
    /// The falling edge is the sole trigger that refreshes the reachable
    /// cache after a move; the core assumes nothing about animation timing.
    pub fn set_is_moving(&mut self, moving: bool) {
        self.is_moving = moving;
        if !moving {
            self.compute_reachable();
        }
    }

    /// Advance to the next living unit's turn
    ///
    /// Resets the incoming unit's AP/MP, bumps the turn number, restores
    /// the timer budget, clears every transient cache, and either starts
    /// the player timer or schedules the enemy auto-pass.
    pub fn end_turn(&mut self) {
        if self.combat_status != CombatStatus::Active {
            return;
        }
        self.clear_turn_timer();
        self.cancel_enemy_pass();

        let next = self.find_next_alive_unit();
        if let Some(unit) = self.units.get_mut(next) {
            unit.refresh_resources();
        }
        self.active_unit_index = next;
        self.turn_phase = TurnPhase::Movement;
        self.turn_number += 1;
        self.turn_time_remaining = self.config.turn_timer_duration;

        self.movement_path.clear();
        self.hovered_tile = None;
        self.preview_path.clear();
        self.clear_spell_state();

        self.compute_reachable();
        debug!(
            turn = self.turn_number,
            active = self.active_unit_index,
            "turn advanced"
        );
        self.process_next_unit();
    }

    /// Player-facing "skip my turn"
    pub fn pass_turn(&mut self) {
        if self.combat_status != CombatStatus::Active {
            return;
        }
        self.end_turn();
    }

    /// Next non-defeated unit, cyclically; degenerates to the current
    /// index when everyone else is down (combat should already be over)
    fn find_next_alive_unit(&self) -> usize {
        let count = self.units.len();
        if count == 0 {
            return self.active_unit_index;
        }
        for i in 1..=count {
            let idx = (self.active_unit_index + i) % count;
            if self.units[idx].is_alive() {
                return idx;
            }
        }
        self.active_unit_index
    }

    fn process_next_unit(&mut self) {
        if self.combat_status != CombatStatus::Active {
            return;
        }
        match self.units.get(self.active_unit_index).map(|u| u.team) {
            Some(UnitTeam::Enemy) => {
                // Enemies auto-pass after a short delay for visual pacing
                let handle = self
                    .scheduler
                    .schedule_once(self.config.enemy_turn_delay_ms, ScheduledAction::EnemyAutoPass);
                self.enemy_pass = Some(handle);
            }
            Some(UnitTeam::Player) => self.start_turn_timer(),
            None => {}
        }
    }

    fn start_turn_timer(&mut self) {
        self.clear_turn_timer();
        self.turn_time_remaining = self.config.turn_timer_duration;
        let handle = self
            .scheduler
            .schedule_repeating(self.config.timer_tick_ms, ScheduledAction::TimerTick);
        self.turn_timer = Some(handle);
    }

    fn clear_turn_timer(&mut self) {
        if let Some(handle) = self.turn_timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn cancel_enemy_pass(&mut self) {
        if let Some(handle) = self.enemy_pass.take() {
            self.scheduler.cancel(handle);
        }
    }

    // ---- Spells ----

    /// Enter spell-targeting mode with the given spell
    ///
    /// Requires an active player turn and enough current AP; otherwise the
    /// selection silently does not happen. Computes the legal range tiles
    /// from the caster's current position and clears movement hover state.
    pub fn select_spell(&mut self, spell: &SpellDefinition) {
        if self.combat_status != CombatStatus::Active {
            return;
        }
        if !self.is_player_turn() {
            return;
        }
        let Some(active) = self.units.get(self.active_unit_index) else {
            return;
        };
        if active.current_ap < spell.ap_cost {
            return;
        }

        self.spell_range_tiles = spell_range_tiles(spell, active.position, &self.tiles);
        self.spell_range_keys = self.spell_range_tiles.iter().copied().collect();
        self.selected_spell = Some(spell.clone());
        self.spell_hovered_target = None;
        self.interaction_mode = InteractionMode::Spell;
        self.hovered_tile = None;
        self.preview_path.clear();
        debug!(spell = %spell.id, "spell selected");
    }

    /// Leave spell mode and restore the movement highlight
    pub fn cancel_spell(&mut self) {
        self.clear_spell_state();
        self.compute_reachable();
    }

    fn clear_spell_state(&mut self) {
        self.selected_spell = None;
        self.spell_range_tiles.clear();
        self.spell_range_keys.clear();
        self.spell_hovered_target = None;
        self.interaction_mode = InteractionMode::Movement;
    }

    /// Hover a spell target for preview; only legal range tiles stick
    pub fn set_spell_hovered_target(&mut self, coord: Option<TileCoord>) {
        if self.interaction_mode != InteractionMode::Spell || self.selected_spell.is_none() {
            return;
        }
        self.spell_hovered_target = match coord {
            Some(c) if self.spell_range_keys.contains(&c) => Some(c),
            _ => None,
        };
    }

    /// Cast the selected spell at `target`
    ///
    /// AP is deducted unconditionally once the guards pass; casting on an
    /// empty legal tile costs the same as a hit and deals no damage. A
    /// living unit on the target tile takes a randomized stat-scaled roll,
    /// floored at zero HP. Resolution re-checks combat end and recomputes
    /// movement reachability.
    pub fn cast_spell(&mut self, target: TileCoord) {
        let Some(spell) = self.selected_spell.clone() else {
            return;
        };
        if self.interaction_mode != InteractionMode::Spell {
            return;
        }
        if self.combat_status != CombatStatus::Active {
            return;
        }
        if !self.is_player_turn() {
            return;
        }
        if !self.spell_range_keys.contains(&target) {
            return;
        }
        let Some(active) = self.units.get(self.active_unit_index) else {
            return;
        };
        // AP is re-validated at cast time even though selection checked it
        if active.current_ap < spell.ap_cost {
            return;
        }

        let caster_tile = active.position;
        let caster_stats = active.player.bonus_stats;
        self.units[self.active_unit_index].current_ap -= spell.ap_cost;
        self.feedback
            .push(FeedbackEvent::ActionPointsSpent { amount: spell.ap_cost, tile: caster_tile });

        if let Some(target_index) = self
            .units
            .iter()
            .position(|u| u.is_alive() && u.position == target)
        {
            let damage = roll_spell_damage(&spell, &caster_stats, &mut self.rng);
            self.units[target_index].apply_damage(damage);
            self.feedback.push(FeedbackEvent::DamageDealt { amount: damage, tile: target });
            debug!(
                spell = %spell.id,
                damage,
                target = %self.units[target_index].player.name,
                "spell hit"
            );
        } else {
            debug!(spell = %spell.id, "spell cast on empty tile");
        }

        self.clear_spell_state();
        self.resolve_combat_end();
        self.compute_reachable();
    }

    /// Apply a terminal status if the roster says the battle is over
    fn resolve_combat_end(&mut self) {
        let result = self.check_combat_end();
        if result != CombatStatus::Active {
            self.combat_status = result;
            self.clear_turn_timer();
            self.cancel_enemy_pass();
            info!(outcome = ?result, turns = self.turn_number, "combat ended");
        }
    }
}
