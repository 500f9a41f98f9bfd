//! Static spell definitions and the built-in spell book
//!
//! Range bands are Manhattan distances, inclusive on both ends. Each damage
//! element is statically mapped to exactly one scaling stat.

use serde::{Deserialize, Serialize};

use crate::core::error::{GridfallError, Result};
use crate::player::stats::StatKey;

/// Damage element; decides which stat scales the component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageElement {
    Earth,
    Fire,
    Air,
    Water,
}

impl DamageElement {
    /// earth→power, fire→intelligence, air→agility, water→luck
    pub fn scaling_stat(self) -> StatKey {
        match self {
            DamageElement::Earth => StatKey::Power,
            DamageElement::Fire => StatKey::Intelligence,
            DamageElement::Air => StatKey::Agility,
            DamageElement::Water => StatKey::Luck,
        }
    }
}

/// A single damage component with its element and unscaled range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellDamage {
    pub element: DamageElement,
    pub min_damage: u32,
    pub max_damage: u32,
}

/// Full spell definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ap_cost: u32,
    /// 0 means the caster's own tile is a legal target
    pub min_range: u32,
    pub max_range: u32,
    pub damages: Vec<SpellDamage>,
}

impl SpellDefinition {
    /// Melee strike: 1-range, low AP, earth element
    pub fn strike() -> Self {
        Self {
            id: "melee-strike".into(),
            name: "Strike".into(),
            description: "A powerful close-range blow.".into(),
            ap_cost: 3,
            min_range: 1,
            max_range: 1,
            damages: vec![SpellDamage { element: DamageElement::Earth, min_damage: 8, max_damage: 12 }],
        }
    }

    /// Ranged attack: 1-3 range, higher AP, fire + earth
    pub fn fireball() -> Self {
        Self {
            id: "fireball".into(),
            name: "Fireball".into(),
            description: "Hurl a ball of fire at a distant foe.".into(),
            ap_cost: 4,
            min_range: 1,
            max_range: 3,
            damages: vec![
                SpellDamage { element: DamageElement::Fire, min_damage: 5, max_damage: 10 },
                SpellDamage { element: DamageElement::Earth, min_damage: 1, max_damage: 3 },
            ],
        }
    }

    fn validate(&self) -> Result<()> {
        if self.min_range > self.max_range {
            return Err(GridfallError::InvalidDefinition(format!(
                "spell '{}': min_range {} exceeds max_range {}",
                self.id, self.min_range, self.max_range
            )));
        }
        if self.damages.is_empty() {
            return Err(GridfallError::InvalidDefinition(format!(
                "spell '{}': needs at least one damage component",
                self.id
            )));
        }
        for dmg in &self.damages {
            if dmg.min_damage > dmg.max_damage {
                return Err(GridfallError::InvalidDefinition(format!(
                    "spell '{}': damage min {} exceeds max {}",
                    self.id, dmg.min_damage, dmg.max_damage
                )));
            }
        }
        Ok(())
    }
}

/// Default spell loadout for all classes (for now)
pub fn default_spells() -> Vec<SpellDefinition> {
    vec![SpellDefinition::strike(), SpellDefinition::fireball()]
}

/// A validated collection of spell definitions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpellBook {
    spells: Vec<SpellDefinition>,
}

impl SpellBook {
    /// The built-in spells
    pub fn builtin() -> Self {
        Self { spells: default_spells() }
    }

    /// Parse a spell book from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let book: SpellBook = toml::from_str(content)?;
        for spell in &book.spells {
            spell.validate()?;
        }
        Ok(book)
    }

    /// Load a spell book from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    pub fn get(&self, id: &str) -> Option<&SpellDefinition> {
        self.spells.iter().find(|s| s.id == id)
    }

    pub fn all(&self) -> &[SpellDefinition] {
        &self.spells
    }
}
