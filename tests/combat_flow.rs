//! Combat engine integration tests
//!
//! Full scenarios through the public command surface, the way the
//! presentation layer drives a battle.

use gridfall::combat::{
    CombatSession, CombatSetup, CombatStatus, EnemySpawn, FeedbackEvent, InteractionMode, UnitTeam,
};
use gridfall::core::CombatConfig;
use gridfall::grid::{MapDefinition, TileCoord};
use gridfall::player::{Player, PlayerClass};
use gridfall::spell::SpellDefinition;

fn five_by_five() -> MapDefinition {
    MapDefinition {
        name: "Test 5x5".into(),
        layout: vec![".....".into(); 5],
        tile_size: 1.0,
        tile_gap: 0.0,
    }
}

fn setup_on(map: MapDefinition, player_at: (i32, i32), enemies: &[(i32, i32)]) -> CombatSetup {
    CombatSetup {
        map,
        player_start_positions: vec![TileCoord::new(player_at.0, player_at.1)],
        enemies: enemies
            .iter()
            .enumerate()
            .map(|(i, (col, row))| EnemySpawn {
                id: format!("enemy{}", i + 1),
                name: format!("Dummy {}", i + 1),
                position: TileCoord::new(*col, *row),
            })
            .collect(),
    }
}

fn hero() -> Player {
    Player::new("player1", "xAlban", PlayerClass::Bomberman)
}

#[test]
fn test_movement_scenario_on_open_map() {
    // 5x5 open map, one player at (2,2) with 3 MP
    let setup = setup_on(five_by_five(), (2, 2), &[(4, 4)]);
    let mut session = CombatSession::new(&setup, vec![hero()], CombatConfig::seeded(3));

    // Move two tiles up: succeeds, costs 2 MP
    session.execute_move(TileCoord::new(2, 0));
    assert_eq!(session.units()[0].position, TileCoord::new(2, 0));
    assert_eq!(session.units()[0].current_mp, 1);

    // A second move before animation-complete is a no-op
    session.execute_move(TileCoord::new(1, 0));
    assert_eq!(session.units()[0].position, TileCoord::new(2, 0));
    assert_eq!(session.units()[0].current_mp, 1);

    // After the animation completes the remaining MP is spendable
    session.set_is_moving(false);
    session.execute_move(TileCoord::new(1, 0));
    assert_eq!(session.units()[0].position, TileCoord::new(1, 0));
    assert_eq!(session.units()[0].current_mp, 0);
}

#[test]
fn test_underfunded_spell_selection_is_rejected() {
    // Melee spell costs 3 AP; a caster with 2 AP cannot even select it
    let setup = setup_on(five_by_five(), (2, 2), &[(2, 3)]);
    let mut session = CombatSession::new(&setup, vec![hero()], CombatConfig::seeded(3));

    // Burn AP down to 2 with two strikes (6 -> 3 -> 0 would overshoot, so
    // drop AP directly through the fireball once and check the boundary)
    session.select_spell(&SpellDefinition::fireball());
    session.cast_spell(TileCoord::new(2, 4)); // empty tile, 4 AP spent
    assert_eq!(session.units()[0].current_ap, 2);

    session.select_spell(&SpellDefinition::strike());
    assert!(session.selected_spell().is_none());
    assert_eq!(session.interaction_mode(), InteractionMode::Movement);
}

#[test]
fn test_lethal_strike_wins_combat() {
    let setup = setup_on(five_by_five(), (2, 2), &[(2, 3)]);
    let mut session = CombatSession::new(&setup, vec![hero()], CombatConfig::seeded(3));

    // Strike every turn until the blow lands lethal
    while !session.units()[1].defeated {
        session.select_spell(&SpellDefinition::strike());
        session.cast_spell(TileCoord::new(2, 3));
        if session.units()[1].defeated {
            break;
        }
        session.pass_turn(); // enemy turn
        session.advance_time(500); // enemy auto-passes back
        assert_eq!(session.active_unit_index(), 0);
    }

    let enemy = &session.units()[1];
    assert_eq!(enemy.current_hp, 0);
    assert!(enemy.defeated);
    assert_eq!(session.combat_status(), CombatStatus::Victory);
}

#[test]
fn test_cast_on_empty_tile_spends_ap_only() {
    let setup = setup_on(five_by_five(), (2, 2), &[(4, 4)]);
    let mut session = CombatSession::new(&setup, vec![hero()], CombatConfig::seeded(3));

    session.select_spell(&SpellDefinition::strike());
    session.cast_spell(TileCoord::new(2, 3));

    assert_eq!(session.units()[0].current_ap, 3);
    assert!(session.units().iter().all(|u| u.current_hp == 50));
    assert_eq!(session.combat_status(), CombatStatus::Active);

    let feedback = session.drain_feedback();
    assert_eq!(
        feedback,
        vec![FeedbackEvent::ActionPointsSpent { amount: 3, tile: TileCoord::new(2, 2) }]
    );
}

#[test]
fn test_turn_timer_timeout_forfeits_turn() {
    let setup = setup_on(five_by_five(), (2, 2), &[(4, 4)]);
    let mut session = CombatSession::new(&setup, vec![hero()], CombatConfig::seeded(3));

    assert_eq!(session.turn_time_remaining(), 30);
    for _ in 0..29 {
        session.advance_time(1000);
    }
    assert_eq!(session.turn_time_remaining(), 1);
    assert_eq!(session.turn_number(), 1);

    // The thirtieth second times the turn out
    session.advance_time(1000);
    assert_eq!(session.turn_number(), 2);
    assert_eq!(session.active_unit_index(), 1);
}

#[test]
fn test_enemy_round_trip_returns_to_player() {
    let setup = setup_on(five_by_five(), (2, 2), &[(4, 4), (0, 4)]);
    let mut session = CombatSession::new(&setup, vec![hero()], CombatConfig::seeded(3));

    session.pass_turn();
    assert_eq!(session.active_unit_index(), 1);

    // Each enemy waits out its delay and passes without player input
    session.advance_time(500);
    assert_eq!(session.active_unit_index(), 2);
    session.advance_time(500);
    assert_eq!(session.active_unit_index(), 0);
    assert_eq!(session.turn_number(), 4);
    // Player resources reset for the new turn
    assert_eq!(session.units()[0].current_ap, 6);
    assert_eq!(session.units()[0].current_mp, 3);
}

#[test]
fn test_turn_order_skips_defeated_units() {
    let setup = setup_on(five_by_five(), (0, 0), &[(2, 1), (4, 4)]);
    let mut session = CombatSession::new(&setup, vec![hero()], CombatConfig::seeded(42));

    // Kill the first enemy (distance 3, inside fireball range)
    loop {
        session.select_spell(&SpellDefinition::fireball());
        session.cast_spell(TileCoord::new(2, 1));
        if session.units()[1].defeated {
            break;
        }
        session.pass_turn();
        session.advance_time(500); // enemy 1
        session.advance_time(500); // enemy 2
        assert_eq!(session.active_unit_index(), 0);
    }
    assert_eq!(session.combat_status(), CombatStatus::Active);

    // Ending the player turn now lands on enemy 2, skipping the corpse
    session.pass_turn();
    assert_eq!(session.active_unit_index(), 2);
}

#[test]
fn test_full_battle_on_portal_encounter() {
    // The shipped encounter: two dummies on the small arena
    let setup = CombatSetup::portal_encounter();
    let mut session = CombatSession::new(&setup, vec![hero()], CombatConfig::seeded(11));
    let strike = SpellDefinition::strike();

    let mut guard = 0;
    while session.combat_status() == CombatStatus::Active {
        guard += 1;
        assert!(guard < 200, "battle should resolve");

        let active_is_player = session
            .active_unit()
            .map(|u| u.team == UnitTeam::Player)
            .unwrap_or(false);
        if !active_is_player {
            session.advance_time(500);
            continue;
        }

        let my_pos = session.active_unit().unwrap().position;
        let target = session
            .units()
            .iter()
            .filter(|u| u.team == UnitTeam::Enemy && u.is_alive())
            .map(|u| u.position)
            .find(|p| my_pos.is_adjacent(p));

        match target {
            Some(enemy_pos) if session.active_unit().unwrap().current_ap >= strike.ap_cost => {
                session.select_spell(&strike);
                session.cast_spell(enemy_pos);
            }
            _ => {
                // Walk toward the nearest living enemy
                let enemies: Vec<TileCoord> = session
                    .units()
                    .iter()
                    .filter(|u| u.team == UnitTeam::Enemy && u.is_alive())
                    .map(|u| u.position)
                    .collect();
                let step = session.reachable_tiles().iter().copied().min_by_key(|t| {
                    enemies.iter().map(|e| t.manhattan_distance(e)).min().unwrap_or(u32::MAX)
                });
                match step {
                    Some(step) => {
                        session.execute_move(step);
                        session.set_is_moving(false);
                    }
                    None => {}
                }
                session.pass_turn();
            }
        }
    }

    assert_eq!(session.combat_status(), CombatStatus::Victory);
    assert!(session
        .units()
        .iter()
        .filter(|u| u.team == UnitTeam::Enemy)
        .all(|u| u.defeated));
    // Terminal state: further input changes nothing
    let turns = session.turn_number();
    session.pass_turn();
    session.advance_time(60_000);
    assert_eq!(session.turn_number(), turns);
}

#[test]
fn test_feedback_stream_for_move_and_strike() {
    let setup = setup_on(five_by_five(), (2, 2), &[(2, 4)]);
    let mut session = CombatSession::new(&setup, vec![hero()], CombatConfig::seeded(9));

    session.execute_move(TileCoord::new(2, 3));
    session.set_is_moving(false);
    session.select_spell(&SpellDefinition::strike());
    session.cast_spell(TileCoord::new(2, 4));

    let feedback = session.drain_feedback();
    assert_eq!(feedback.len(), 3);
    assert_eq!(
        feedback[0],
        FeedbackEvent::MovementPointsSpent { amount: 1, tile: TileCoord::new(2, 3) }
    );
    assert_eq!(
        feedback[1],
        FeedbackEvent::ActionPointsSpent { amount: 3, tile: TileCoord::new(2, 3) }
    );
    match feedback[2] {
        FeedbackEvent::DamageDealt { amount, tile } => {
            assert!((8..=12).contains(&amount));
            assert_eq!(tile, TileCoord::new(2, 4));
        }
        _ => panic!("expected a damage event"),
    }

    // Draining empties the channel
    assert!(session.drain_feedback().is_empty());
}

#[test]
fn test_ragged_map_battle_stays_on_tiles() {
    let setup = setup_on(MapDefinition::cross(), (3, 0), &[(3, 6)]);
    let mut session = CombatSession::new(&setup, vec![hero()], CombatConfig::seeded(5));

    // Hole corners are never reachable
    for coord in session.reachable_tiles() {
        assert!(
            session.tiles().iter().any(|t| t.coord == *coord),
            "{coord:?} is not a tile"
        );
    }
    // Moving into a hole is rejected
    session.execute_move(TileCoord::new(0, 0));
    assert_eq!(session.units()[0].position, TileCoord::new(3, 0));
}

#[test]
fn test_two_player_roster_turn_order() {
    let setup = CombatSetup {
        map: five_by_five(),
        player_start_positions: vec![TileCoord::new(0, 0), TileCoord::new(4, 0)],
        enemies: vec![EnemySpawn {
            id: "enemy1".into(),
            name: "Dummy".into(),
            position: TileCoord::new(2, 4),
        }],
    };
    let players = vec![hero(), Player::new("player2", "Mirael", PlayerClass::Mage)];
    let mut session = CombatSession::new(&setup, players, CombatConfig::seeded(2));

    assert_eq!(session.units().len(), 3);
    assert_eq!(session.units()[1].team, UnitTeam::Player);

    session.pass_turn();
    assert_eq!(session.active_unit_index(), 1);
    // Second player is human-controlled: the timer restarts, no auto-pass
    assert_eq!(session.turn_time_remaining(), 30);
    session.advance_time(500);
    assert_eq!(session.active_unit_index(), 1);
}
