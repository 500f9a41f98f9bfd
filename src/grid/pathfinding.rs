//! Breadth-first reachability and path reconstruction
//!
//! The grid is unweighted and 4-connected, so plain BFS gives canonical
//! shortest step counts: the first discovery of a tile is final.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};

use crate::grid::coord::TileCoord;
use crate::grid::map::{TileData, TileKind};

/// Node in the BFS spanning tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BfsNode {
    /// Whole steps from the origin
    pub distance: u32,
    /// Predecessor toward the origin; `None` only for the origin itself
    pub parent: Option<TileCoord>,
}

/// Result of a reachability query: doubles as a spanning tree for path
/// reconstruction via the parent pointers
pub type ReachableMap = AHashMap<TileCoord, BfsNode>;

/// Build the set of walkable coordinates: ground tiles minus occupied ones
///
/// Obstacle tiles are never walkable regardless of occupancy.
pub fn build_walkable_set(tiles: &[TileData], occupied: &[TileCoord]) -> AHashSet<TileCoord> {
    let occupied: AHashSet<TileCoord> = occupied.iter().copied().collect();

    tiles
        .iter()
        .filter(|tile| tile.kind == TileKind::Ground)
        .map(|tile| tile.coord)
        .filter(|coord| !occupied.contains(coord))
        .collect()
}

/// BFS from `origin` up to `max_steps`, over the given walkable set
///
/// The origin is inserted unconditionally (callers normally exclude it from
/// the walkable set because the moving unit occupies it, then add it back
/// before calling). Expansion visits neighbors in a fixed order (up, down,
/// left, right); which equal-length path wins is an implementation detail.
pub fn bfs_reachable(
    origin: TileCoord,
    max_steps: u32,
    walkable: &AHashSet<TileCoord>,
) -> ReachableMap {
    let mut result = ReachableMap::new();
    result.insert(origin, BfsNode { distance: 0, parent: None });

    let mut queue = VecDeque::new();
    queue.push_back(origin);

    while let Some(current) = queue.pop_front() {
        let distance = result[&current].distance;
        if distance >= max_steps {
            continue;
        }

        for neighbor in current.neighbors() {
            if result.contains_key(&neighbor) || !walkable.contains(&neighbor) {
                continue;
            }
            result.insert(
                neighbor,
                BfsNode { distance: distance + 1, parent: Some(current) },
            );
            queue.push_back(neighbor);
        }
    }

    result
}

/// All discovered coordinates except the origin itself
///
/// Sorted row-major purely for stable iteration; the set contents are the
/// contract, the order is not.
pub fn reachable_coords(map: &ReachableMap, origin: TileCoord) -> Vec<TileCoord> {
    let mut coords: Vec<TileCoord> =
        map.keys().copied().filter(|coord| *coord != origin).collect();
    coords.sort_by_key(|c| (c.row, c.col));
    coords
}

/// Reconstruct the path from origin to `target` via parent pointers
///
/// Returns an empty path when the target was never discovered. A non-empty
/// path starts at the origin and ends at the target.
pub fn reconstruct_path(map: &ReachableMap, target: TileCoord) -> Vec<TileCoord> {
    if !map.contains_key(&target) {
        return Vec::new();
    }

    let mut path = Vec::new();
    let mut current = Some(target);
    while let Some(coord) = current {
        path.push(coord);
        current = map[&coord].parent;
    }
    path.reverse();
    path
}
