//! Bonus stat channels
//!
//! Five independent, non-negative channels. All modifiers are additive.

use serde::{Deserialize, Serialize};

/// The stat channels a player or item can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    Health,
    Power,
    Intelligence,
    Agility,
    Luck,
}

/// Bonus stat values, all defaulting to zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusStats {
    pub health: u32,
    pub power: u32,
    pub intelligence: u32,
    pub agility: u32,
    pub luck: u32,
}

impl BonusStats {
    /// Read a channel by key
    pub fn get(&self, key: StatKey) -> u32 {
        match key {
            StatKey::Health => self.health,
            StatKey::Power => self.power,
            StatKey::Intelligence => self.intelligence,
            StatKey::Agility => self.agility,
            StatKey::Luck => self.luck,
        }
    }

    /// Channel-wise sum
    pub fn plus(&self, other: &BonusStats) -> BonusStats {
        BonusStats {
            health: self.health + other.health,
            power: self.power + other.power,
            intelligence: self.intelligence + other.intelligence,
            agility: self.agility + other.agility,
            luck: self.luck + other.luck,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == BonusStats::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let stats = BonusStats::default();
        assert!(stats.is_zero());
        assert_eq!(stats.get(StatKey::Power), 0);
    }

    #[test]
    fn test_plus_is_channel_wise() {
        let a = BonusStats { power: 3, luck: 1, ..Default::default() };
        let b = BonusStats { power: 2, agility: 4, ..Default::default() };
        let sum = a.plus(&b);
        assert_eq!(sum.get(StatKey::Power), 5);
        assert_eq!(sum.get(StatKey::Agility), 4);
        assert_eq!(sum.get(StatKey::Luck), 1);
        assert_eq!(sum.get(StatKey::Health), 0);
    }
}
