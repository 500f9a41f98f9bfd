//! Item definitions and the built-in catalog
//!
//! Items are static data: identity, category, optional equipment affinity,
//! optional stat deltas, and a stackable flag. Equipment items are
//! non-stackable by convention, not by type.

use serde::{Deserialize, Serialize};

use crate::player::stats::BonusStats;

/// Broad item grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Equipment,
    Consumable,
    Resource,
    Key,
}

/// Which kind of equipment slot an item fits
///
/// Rings resolve to a concrete slot (`ring1` or `ring2`) only at equip
/// time; everything else maps to exactly one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipKind {
    Head,
    Cape,
    Belt,
    Boots,
    Ring,
}

/// A static item definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: ItemCategory,
    /// Present iff the item is equippable
    pub affinity: Option<EquipKind>,
    #[serde(default)]
    pub bonus_stats: BonusStats,
    pub stackable: bool,
}

impl Item {
    pub fn is_equipment(&self) -> bool {
        self.category == ItemCategory::Equipment && self.affinity.is_some()
    }

    // ---- Equipment ----

    pub fn iron_helm() -> Self {
        Self {
            id: "iron-helm".into(),
            name: "Iron Helm".into(),
            description: "A sturdy iron helmet that protects the head.".into(),
            category: ItemCategory::Equipment,
            affinity: Some(EquipKind::Head),
            bonus_stats: BonusStats { health: 5, ..Default::default() },
            stackable: false,
        }
    }

    pub fn travelers_cape() -> Self {
        Self {
            id: "travelers-cape".into(),
            name: "Traveler's Cape".into(),
            description: "A light cape worn by wanderers, fluttering in the wind.".into(),
            category: ItemCategory::Equipment,
            affinity: Some(EquipKind::Cape),
            bonus_stats: BonusStats { agility: 2, ..Default::default() },
            stackable: false,
        }
    }

    pub fn leather_belt() -> Self {
        Self {
            id: "leather-belt".into(),
            name: "Leather Belt".into(),
            description: "A thick leather belt that bolsters raw strength.".into(),
            category: ItemCategory::Equipment,
            affinity: Some(EquipKind::Belt),
            bonus_stats: BonusStats { power: 3, ..Default::default() },
            stackable: false,
        }
    }

    pub fn swift_boots() -> Self {
        Self {
            id: "swift-boots".into(),
            name: "Swift Boots".into(),
            description: "Lightweight boots enchanted for quick movement.".into(),
            category: ItemCategory::Equipment,
            affinity: Some(EquipKind::Boots),
            bonus_stats: BonusStats { agility: 4, ..Default::default() },
            stackable: false,
        }
    }

    pub fn ruby_ring() -> Self {
        Self {
            id: "ruby-ring".into(),
            name: "Ruby Ring".into(),
            description: "A ring set with a fiery ruby that sharpens the mind.".into(),
            category: ItemCategory::Equipment,
            affinity: Some(EquipKind::Ring),
            bonus_stats: BonusStats { intelligence: 3, ..Default::default() },
            stackable: false,
        }
    }

    pub fn emerald_ring() -> Self {
        Self {
            id: "emerald-ring".into(),
            name: "Emerald Ring".into(),
            description: "A ring with a gleaming emerald that brings good fortune.".into(),
            category: ItemCategory::Equipment,
            affinity: Some(EquipKind::Ring),
            bonus_stats: BonusStats { luck: 3, ..Default::default() },
            stackable: false,
        }
    }

    // ---- Consumables ----

    pub fn health_potion() -> Self {
        Self {
            id: "health-potion".into(),
            name: "Health Potion".into(),
            description: "A vial of crimson liquid that restores vitality.".into(),
            category: ItemCategory::Consumable,
            affinity: None,
            bonus_stats: BonusStats::default(),
            stackable: true,
        }
    }

    pub fn teleport_potion() -> Self {
        Self {
            id: "teleport-potion".into(),
            name: "Teleport Potion".into(),
            description: "A swirling blue potion that warps you to another place.".into(),
            category: ItemCategory::Consumable,
            affinity: None,
            bonus_stats: BonusStats::default(),
            stackable: true,
        }
    }

    // ---- Resources ----

    pub fn pebble() -> Self {
        Self {
            id: "pebble".into(),
            name: "Pebble".into(),
            description: "A smooth, unremarkable pebble. Completely useless.".into(),
            category: ItemCategory::Resource,
            affinity: None,
            bonus_stats: BonusStats::default(),
            stackable: true,
        }
    }

    // ---- Key items ----

    pub fn key_chain() -> Self {
        Self {
            id: "key-chain".into(),
            name: "Key Chain".into(),
            description: "A jangling key chain with multiple rusty keys. Opens... something."
                .into(),
            category: ItemCategory::Key,
            affinity: None,
            bonus_stats: BonusStats::default(),
            stackable: false,
        }
    }
}

/// Every item in the game
pub fn item_catalog() -> Vec<Item> {
    vec![
        Item::iron_helm(),
        Item::travelers_cape(),
        Item::leather_belt(),
        Item::swift_boots(),
        Item::ruby_ring(),
        Item::emerald_ring(),
        Item::health_potion(),
        Item::teleport_potion(),
        Item::pebble(),
        Item::key_chain(),
    ]
}
