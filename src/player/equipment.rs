//! Equipment loadout: six fixed slots, each holding at most one item

use serde::{Deserialize, Serialize};

use crate::player::item::Item;
use crate::player::stats::BonusStats;

/// The named equipment slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Head,
    Cape,
    Belt,
    Boots,
    Ring1,
    Ring2,
}

impl EquipmentSlot {
    /// All slots in display order
    pub fn all() -> [EquipmentSlot; 6] {
        [
            EquipmentSlot::Head,
            EquipmentSlot::Cape,
            EquipmentSlot::Belt,
            EquipmentSlot::Boots,
            EquipmentSlot::Ring1,
            EquipmentSlot::Ring2,
        ]
    }
}

/// One optional item per slot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentLoadout {
    pub head: Option<Item>,
    pub cape: Option<Item>,
    pub belt: Option<Item>,
    pub boots: Option<Item>,
    pub ring1: Option<Item>,
    pub ring2: Option<Item>,
}

impl EquipmentLoadout {
    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.slot_ref(slot).as_ref()
    }

    pub fn slot_ref(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Head => &self.head,
            EquipmentSlot::Cape => &self.cape,
            EquipmentSlot::Belt => &self.belt,
            EquipmentSlot::Boots => &self.boots,
            EquipmentSlot::Ring1 => &self.ring1,
            EquipmentSlot::Ring2 => &self.ring2,
        }
    }

    pub fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Head => &mut self.head,
            EquipmentSlot::Cape => &mut self.cape,
            EquipmentSlot::Belt => &mut self.belt,
            EquipmentSlot::Boots => &mut self.boots,
            EquipmentSlot::Ring1 => &mut self.ring1,
            EquipmentSlot::Ring2 => &mut self.ring2,
        }
    }

    pub fn is_empty(&self) -> bool {
        EquipmentSlot::all().iter().all(|s| self.get(*s).is_none())
    }

    /// Sum of stat deltas across all equipped items
    pub fn bonus_total(&self) -> BonusStats {
        EquipmentSlot::all()
            .iter()
            .filter_map(|s| self.get(*s))
            .fold(BonusStats::default(), |acc, item| acc.plus(&item.bonus_stats))
    }
}
