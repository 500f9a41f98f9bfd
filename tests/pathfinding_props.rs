//! Property tests for BFS reachability and damage rolls

use ahash::AHashSet;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gridfall::grid::{bfs_reachable, reachable_coords, reconstruct_path, TileCoord};
use gridfall::player::BonusStats;
use gridfall::spell::{
    compute_damage_preview, roll_spell_damage, DamageElement, SpellDamage, SpellDefinition,
};

/// Arbitrary walkable subset of an 8x8 grid, as a bitmask
fn walkable_from_mask(mask: u64) -> AHashSet<TileCoord> {
    let mut set = AHashSet::new();
    for bit in 0..64u32 {
        if mask & (1u64 << bit) != 0 {
            set.insert(TileCoord::new((bit % 8) as i32, (bit / 8) as i32));
        }
    }
    set
}

/// Reference distances by exhaustive unbounded BFS
fn true_distances(origin: TileCoord, walkable: &AHashSet<TileCoord>) -> Vec<(TileCoord, u32)> {
    let full = bfs_reachable(origin, u32::MAX, walkable);
    full.iter().map(|(c, n)| (*c, n.distance)).collect()
}

proptest! {
    #[test]
    fn bfs_respects_budget_and_is_complete(mask: u64, origin_bit in 0u32..64, max_steps in 0u32..12) {
        let mut walkable = walkable_from_mask(mask);
        let origin = TileCoord::new((origin_bit % 8) as i32, (origin_bit / 8) as i32);
        walkable.insert(origin);

        let bounded = bfs_reachable(origin, max_steps, &walkable);

        // Soundness: every reported distance is within budget and correct
        let reference = true_distances(origin, &walkable);
        for (coord, node) in bounded.iter() {
            prop_assert!(node.distance <= max_steps);
            let truth = reference.iter().find(|(c, _)| c == coord).map(|(_, d)| *d);
            prop_assert_eq!(truth, Some(node.distance));
        }

        // Completeness: every walkable tile within the true budget appears
        for (coord, dist) in &reference {
            if *dist <= max_steps {
                prop_assert!(bounded.contains_key(coord));
            }
        }
    }

    #[test]
    fn bfs_paths_round_trip(mask: u64, origin_bit in 0u32..64, max_steps in 0u32..12) {
        let mut walkable = walkable_from_mask(mask);
        let origin = TileCoord::new((origin_bit % 8) as i32, (origin_bit / 8) as i32);
        walkable.insert(origin);

        let map = bfs_reachable(origin, max_steps, &walkable);
        for target in reachable_coords(&map, origin) {
            let path = reconstruct_path(&map, target);
            prop_assert_eq!(path.first(), Some(&origin));
            prop_assert_eq!(path.last(), Some(&target));
            prop_assert_eq!(path.len() as u32, map[&target].distance + 1);
            for pair in path.windows(2) {
                prop_assert!(pair[0].is_adjacent(&pair[1]));
            }
        }
    }

    #[test]
    fn unreachable_targets_yield_empty_paths(mask: u64, origin_bit in 0u32..64) {
        let mut walkable = walkable_from_mask(mask);
        let origin = TileCoord::new((origin_bit % 8) as i32, (origin_bit / 8) as i32);
        walkable.insert(origin);

        let map = bfs_reachable(origin, 2, &walkable);
        for row in 0..8 {
            for col in 0..8 {
                let coord = TileCoord::new(col, row);
                if !map.contains_key(&coord) {
                    prop_assert!(reconstruct_path(&map, coord).is_empty());
                }
            }
        }
    }

    #[test]
    fn damage_rolls_stay_within_preview_bounds(
        seed: u64,
        min_a in 0u32..20, spread_a in 0u32..15,
        min_b in 0u32..20, spread_b in 0u32..15,
        power in 0u32..30, luck in 0u32..30,
    ) {
        let spell = SpellDefinition {
            id: "prop-spell".into(),
            name: "Prop Spell".into(),
            description: String::new(),
            ap_cost: 1,
            min_range: 1,
            max_range: 3,
            damages: vec![
                SpellDamage { element: DamageElement::Earth, min_damage: min_a, max_damage: min_a + spread_a },
                SpellDamage { element: DamageElement::Water, min_damage: min_b, max_damage: min_b + spread_b },
            ],
        };
        let stats = BonusStats { power, luck, ..Default::default() };
        let preview = compute_damage_preview(&spell, &stats);

        // Preview bounds shift by exactly the element-mapped stat
        prop_assert_eq!(preview.total_min_damage, min_a + power + min_b + luck);
        prop_assert_eq!(preview.total_max_damage, min_a + spread_a + power + min_b + spread_b + luck);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..32 {
            let roll = roll_spell_damage(&spell, &stats, &mut rng);
            prop_assert!(roll >= preview.total_min_damage);
            prop_assert!(roll <= preview.total_max_damage);
        }
    }
}
