//! Battle map definitions and layout parsing
//!
//! Maps are authored as strings, one character per cell: `.` is ground,
//! `X` is an obstacle, space is a hole (no tile at all). Rows may have
//! unequal length, so ragged and cross-shaped maps are valid.

use serde::{Deserialize, Serialize};

use crate::core::error::{GridfallError, Result};
use crate::grid::coord::TileCoord;

/// Terrain of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Ground,
    Obstacle,
}

/// One emitted tile of a parsed layout
///
/// `index` is sequential over emitted tiles only; holes consume no index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileData {
    pub coord: TileCoord,
    pub kind: TileKind,
    pub index: usize,
}

/// Authoring-time description of a battle map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDefinition {
    pub name: String,
    pub layout: Vec<String>,
    pub tile_size: f32,
    pub tile_gap: f32,
}

/// Grid geometry derived from a map definition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Length of the longest layout row
    pub width: usize,
    /// Number of layout rows
    pub height: usize,
    pub tile_size: f32,
    pub tile_gap: f32,
}

/// World-space position of a tile center
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldPos {
    pub x: f32,
    pub z: f32,
}

impl MapDefinition {
    /// Derive grid geometry (width = longest row, height = row count)
    pub fn grid_config(&self) -> GridConfig {
        GridConfig {
            width: self.layout.iter().map(|row| row.chars().count()).max().unwrap_or(0),
            height: self.layout.len(),
            tile_size: self.tile_size,
            tile_gap: self.tile_gap,
        }
    }

    /// Parse the layout into tile data, skipping holes
    ///
    /// A layout of nothing but spaces yields zero tiles; callers must cope
    /// with an empty walkable set.
    pub fn parse_layout(&self) -> Vec<TileData> {
        let mut tiles = Vec::new();
        let mut index = 0;

        for (row, line) in self.layout.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let kind = if ch == 'X' { TileKind::Obstacle } else { TileKind::Ground };
                tiles.push(TileData {
                    coord: TileCoord::new(col as i32, row as i32),
                    kind,
                    index,
                });
                index += 1;
            }
        }

        tiles
    }

    /// Parse a map definition from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let map: MapDefinition = toml::from_str(content)?;
        map.validate()?;
        Ok(map)
    }

    /// Load a map definition from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.tile_size <= 0.0 {
            return Err(GridfallError::InvalidDefinition(format!(
                "map '{}': tile_size must be positive",
                self.name
            )));
        }
        if self.tile_gap < 0.0 {
            return Err(GridfallError::InvalidDefinition(format!(
                "map '{}': tile_gap must not be negative",
                self.name
            )));
        }
        Ok(())
    }

    // ---- Built-in maps ----

    /// 8x8 all-ground map
    pub fn open_field() -> Self {
        Self {
            name: "Default".into(),
            layout: vec!["........".into(); 8],
            tile_size: 1.2,
            tile_gap: 0.06,
        }
    }

    /// 8x8 arena with obstacle clusters in each corner
    pub fn arena_small() -> Self {
        Self {
            name: "Arena Small".into(),
            layout: vec![
                "XX....XX".into(),
                "X......X".into(),
                "........".into(),
                "........".into(),
                "........".into(),
                "........".into(),
                "X......X".into(),
                "XX....XX".into(),
            ],
            tile_size: 1.2,
            tile_gap: 0.06,
        }
    }

    /// L-shaped corridor using spaces for missing tiles
    pub fn l_corridor() -> Self {
        Self {
            name: "L Corridor".into(),
            layout: vec![
                "...     ".into(),
                "...     ".into(),
                "...     ".into(),
                "........".into(),
                "........".into(),
                "........".into(),
            ],
            tile_size: 1.2,
            tile_gap: 0.06,
        }
    }

    /// Cross-shaped map using spaces for empty corners
    pub fn cross() -> Self {
        Self {
            name: "Cross".into(),
            layout: vec![
                "  ...  ".into(),
                "  ...  ".into(),
                ".......".into(),
                ".......".into(),
                ".......".into(),
                "  ...  ".into(),
                "  ...  ".into(),
            ],
            tile_size: 1.2,
            tile_gap: 0.06,
        }
    }
}

/// Convert a grid coordinate to a world position
///
/// The grid is centered on the world origin regardless of width/height
/// parity: `offset = (extent-1) * step / 2` for each axis.
pub fn grid_to_world(coord: TileCoord, config: &GridConfig) -> WorldPos {
    let step = config.tile_size + config.tile_gap;
    let offset_x = (config.width.saturating_sub(1)) as f32 * step / 2.0;
    let offset_z = (config.height.saturating_sub(1)) as f32 * step / 2.0;

    WorldPos {
        x: coord.col as f32 * step - offset_x,
        z: coord.row as f32 * step - offset_z,
    }
}
