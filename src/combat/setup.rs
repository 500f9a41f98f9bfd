//! Declarative encounter descriptions
//!
//! A `CombatSetup` is the immutable input to combat initialization: the
//! map, where player units start, and which enemies spawn where.

use serde::{Deserialize, Serialize};

use crate::core::error::{GridfallError, Result};
use crate::grid::coord::TileCoord;
use crate::grid::map::MapDefinition;

/// One enemy to spawn; a minimal player shell is generated from id/name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub id: String,
    pub name: String,
    pub position: TileCoord,
}

/// Declarative encounter description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatSetup {
    pub map: MapDefinition,
    pub player_start_positions: Vec<TileCoord>,
    pub enemies: Vec<EnemySpawn>,
}

impl CombatSetup {
    /// The encounter behind the portal: Arena Small, one player, two dummies
    pub fn portal_encounter() -> Self {
        Self {
            map: MapDefinition::arena_small(),
            player_start_positions: vec![TileCoord::new(3, 6)],
            enemies: vec![
                EnemySpawn { id: "enemy1".into(), name: "Dummy A".into(), position: TileCoord::new(3, 1) },
                EnemySpawn { id: "enemy2".into(), name: "Dummy B".into(), position: TileCoord::new(5, 3) },
            ],
        }
    }

    /// Parse an encounter from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let setup: CombatSetup = toml::from_str(content)?;
        setup.validate()?;
        Ok(setup)
    }

    /// Load an encounter from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.player_start_positions.is_empty() {
            return Err(GridfallError::InvalidDefinition(
                "encounter needs at least one player start position".into(),
            ));
        }
        Ok(())
    }
}
