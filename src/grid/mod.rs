//! Grid layer: tile coordinates, map definitions, and reachability
//!
//! Static tile data feeds the pathfinder and the combat engine's target
//! computation; nothing in here mutates combat state.

pub mod coord;
pub mod map;
pub mod pathfinding;

pub use coord::TileCoord;
pub use map::{grid_to_world, GridConfig, MapDefinition, TileData, TileKind, WorldPos};
pub use pathfinding::{
    bfs_reachable, build_walkable_set, reachable_coords, reconstruct_path, BfsNode, ReachableMap,
};
