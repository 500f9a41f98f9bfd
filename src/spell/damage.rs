//! Spell targeting and damage math
//!
//! The preview is pure and deterministic (UI shows it before commit); the
//! roll draws from an injected RNG so tests can pin outcomes.

use rand::Rng;

use crate::grid::coord::TileCoord;
use crate::grid::map::{TileData, TileKind};
use crate::player::stats::BonusStats;
use crate::spell::definitions::{DamageElement, SpellDefinition};

/// All ground tiles whose Manhattan distance from the caster lies within
/// the spell's `[min_range, max_range]` band
///
/// Obstacles are excluded. The caster's own tile appears only when
/// `min_range == 0`.
pub fn spell_range_tiles(
    spell: &SpellDefinition,
    caster_position: TileCoord,
    tiles: &[TileData],
) -> Vec<TileCoord> {
    tiles
        .iter()
        .filter(|tile| tile.kind == TileKind::Ground)
        .filter(|tile| {
            let dist = caster_position.manhattan_distance(&tile.coord);
            dist >= spell.min_range && dist <= spell.max_range
        })
        .map(|tile| tile.coord)
        .collect()
}

/// Is a specific tile within the spell's range band?
pub fn is_tile_in_spell_range(
    spell: &SpellDefinition,
    caster_position: TileCoord,
    target: TileCoord,
) -> bool {
    let dist = caster_position.manhattan_distance(&target);
    dist >= spell.min_range && dist <= spell.max_range
}

/// One row of a damage preview, bounds already stat-scaled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamagePreview {
    pub element: DamageElement,
    pub min_damage: u32,
    pub max_damage: u32,
}

/// Full preview for display: per-element rows plus totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellDamagePreview {
    pub spell_name: String,
    pub damages: Vec<DamagePreview>,
    pub total_min_damage: u32,
    pub total_max_damage: u32,
}

/// Compute the stat-scaled damage preview
///
/// Each component's bounds shift up by the caster's bonus for the
/// component's scaling stat; totals sum across components.
pub fn compute_damage_preview(
    spell: &SpellDefinition,
    caster_stats: &BonusStats,
) -> SpellDamagePreview {
    let damages: Vec<DamagePreview> = spell
        .damages
        .iter()
        .map(|dmg| {
            let bonus = caster_stats.get(dmg.element.scaling_stat());
            DamagePreview {
                element: dmg.element,
                min_damage: dmg.min_damage + bonus,
                max_damage: dmg.max_damage + bonus,
            }
        })
        .collect();

    SpellDamagePreview {
        spell_name: spell.name.clone(),
        total_min_damage: damages.iter().map(|d| d.min_damage).sum(),
        total_max_damage: damages.iter().map(|d| d.max_damage).sum(),
        damages,
    }
}

/// Roll actual damage: a uniform integer per component, summed
pub fn roll_spell_damage<R: Rng>(
    spell: &SpellDefinition,
    caster_stats: &BonusStats,
    rng: &mut R,
) -> u32 {
    spell
        .damages
        .iter()
        .map(|dmg| {
            let bonus = caster_stats.get(dmg.element.scaling_stat());
            rng.gen_range(dmg.min_damage + bonus..=dmg.max_damage + bonus)
        })
        .sum()
}
