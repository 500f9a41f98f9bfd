//! Persistent player profiles: identity, class, progression, gear
//!
//! A `Player` is immutable during combat (combat units wrap one and track
//! live HP/AP/MP separately). Outside combat it owns the equipment loadout
//! and inventory, and those are mutated only through the methods here.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::player::equipment::{EquipmentLoadout, EquipmentSlot};
use crate::player::inventory::Inventory;
use crate::player::item::EquipKind;
use crate::player::stats::BonusStats;

/// Player class; determines visuals today, abilities later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerClass {
    Bomberman,
    Archer,
    Knight,
    Mage,
}

/// XP and level tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    pub current_xp: u32,
    pub xp_to_next_level: u32,
}

/// XP required to clear a given level
pub fn xp_for_level(level: u32) -> u32 {
    level * 100
}

impl LevelProgress {
    /// Fresh level-1 progress
    pub fn start() -> Self {
        Self { level: 1, current_xp: 0, xp_to_next_level: xp_for_level(1) }
    }
}

/// A persistent player profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub class: PlayerClass,
    pub level_progress: LevelProgress,
    pub base_ap: u32,
    pub base_mp: u32,
    pub bonus_stats: BonusStats,
    pub equipment: EquipmentLoadout,
    pub inventory: Inventory,
}

impl Player {
    /// Create a fresh level-1 player (6 AP, 3 MP, zeroed stats)
    pub fn new(id: impl Into<String>, name: impl Into<String>, class: PlayerClass) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            class,
            level_progress: LevelProgress::start(),
            base_ap: 6,
            base_mp: 3,
            bonus_stats: BonusStats::default(),
            equipment: EquipmentLoadout::default(),
            inventory: Inventory::new(),
        }
    }

    /// Minimal enemy shell generated at combat init
    pub fn enemy(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, PlayerClass::Knight)
    }

    /// Add XP, leveling up as many times as the overflow allows
    pub fn add_xp(&mut self, amount: u32) {
        let p = &mut self.level_progress;
        p.current_xp += amount;
        while p.current_xp >= p.xp_to_next_level {
            p.current_xp -= p.xp_to_next_level;
            p.level += 1;
            p.xp_to_next_level = xp_for_level(p.level);
        }
    }

    /// Equip an item from the inventory into its slot
    ///
    /// Rings fill `ring1` first, then `ring2`; with both full the new ring
    /// swaps into `ring1`. Any displaced item returns to the inventory.
    /// Non-equipment items and unknown ids are no-ops.
    pub fn equip(&mut self, item_id: &str) {
        let Some(slot_entry) = self.inventory.find(item_id) else {
            return;
        };
        if !slot_entry.item.is_equipment() {
            return;
        }
        let Some(affinity) = slot_entry.item.affinity else {
            return;
        };
        let slot = self.resolve_slot(affinity);

        let Some(item) = self.inventory.take_one(item_id) else {
            return;
        };
        if let Some(displaced) = self.equipment.slot_mut(slot).replace(item) {
            self.inventory.add(displaced, 1);
        }
    }

    /// Move an equipped item back to the inventory; empty slot is a no-op
    pub fn unequip(&mut self, slot: EquipmentSlot) {
        if let Some(item) = self.equipment.slot_mut(slot).take() {
            self.inventory.add(item, 1);
        }
    }

    fn resolve_slot(&self, affinity: EquipKind) -> EquipmentSlot {
        match affinity {
            EquipKind::Head => EquipmentSlot::Head,
            EquipKind::Cape => EquipmentSlot::Cape,
            EquipKind::Belt => EquipmentSlot::Belt,
            EquipKind::Boots => EquipmentSlot::Boots,
            EquipKind::Ring => {
                if self.equipment.ring1.is_none() {
                    EquipmentSlot::Ring1
                } else if self.equipment.ring2.is_none() {
                    EquipmentSlot::Ring2
                } else {
                    EquipmentSlot::Ring1
                }
            }
        }
    }

    /// Stat deltas from equipped gear only
    pub fn equipment_bonus(&self) -> BonusStats {
        self.equipment.bonus_total()
    }

    /// Base bonus stats plus equipment deltas, for character-sheet display
    ///
    /// Combat damage scaling reads `bonus_stats` directly; gear is not
    /// wired into combat math yet.
    pub fn effective_stats(&self) -> BonusStats {
        self.bonus_stats.plus(&self.equipment_bonus())
    }

    /// Serialize the profile as the externally-persisted blob
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a profile from its persisted blob
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
