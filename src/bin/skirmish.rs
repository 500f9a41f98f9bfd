//! Headless skirmish runner
//!
//! Drives a scripted battle through the public command surface (the player
//! walks toward the nearest enemy and strikes, enemies auto-pass) and
//! prints a JSON summary. Useful for smoke-testing pacing and balance
//! without the renderer.

use clap::Parser;
use serde::Serialize;

use gridfall::combat::{CombatSession, CombatSetup, CombatStatus, EnemySpawn, UnitTeam};
use gridfall::core::CombatConfig;
use gridfall::grid::{MapDefinition, TileCoord, TileKind};
use gridfall::player::{Player, PlayerClass};
use gridfall::spell::SpellDefinition;

/// Headless skirmish runner - scripted battles without a renderer
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Run a scripted battle and output a JSON summary")]
struct Args {
    /// Map to fight on: arena, open, corridor, cross
    #[arg(long, default_value = "arena")]
    map: String,

    /// Random seed for deterministic damage rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum turns before giving up
    #[arg(long, default_value_t = 60)]
    max_turns: u32,

    /// Enable verbose combat logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct UnitSummary {
    name: String,
    team: String,
    hp: u32,
    defeated: bool,
}

#[derive(Serialize)]
struct SkirmishSummary {
    outcome: String,
    turns: u32,
    units: Vec<UnitSummary>,
}

fn pick_map(name: &str) -> MapDefinition {
    match name {
        "open" => MapDefinition::open_field(),
        "corridor" => MapDefinition::l_corridor(),
        "cross" => MapDefinition::cross(),
        _ => MapDefinition::arena_small(),
    }
}

/// Portal encounter on the arena, derived spawns elsewhere
fn build_setup(map: MapDefinition) -> CombatSetup {
    if map.name == "Arena Small" {
        return CombatSetup::portal_encounter();
    }

    let ground: Vec<TileCoord> = map
        .parse_layout()
        .iter()
        .filter(|t| t.kind == TileKind::Ground)
        .map(|t| t.coord)
        .collect();
    let player_start = *ground.first().expect("map has no ground tiles");
    let far = *ground.last().expect("map has no ground tiles");
    let mid = ground[ground.len() / 2];

    CombatSetup {
        map,
        player_start_positions: vec![player_start],
        enemies: vec![
            EnemySpawn { id: "enemy1".into(), name: "Dummy A".into(), position: far },
            EnemySpawn { id: "enemy2".into(), name: "Dummy B".into(), position: mid },
        ],
    }
}

/// One player turn: close in on the nearest enemy, strike while AP lasts
fn play_player_turn(session: &mut CombatSession) {
    let strike = SpellDefinition::strike();

    let Some(active) = session.active_unit() else {
        session.pass_turn();
        return;
    };
    let my_pos = active.position;
    let enemy_positions: Vec<TileCoord> = session
        .units()
        .iter()
        .filter(|u| u.team == UnitTeam::Enemy && u.is_alive())
        .map(|u| u.position)
        .collect();
    if enemy_positions.is_empty() {
        session.pass_turn();
        return;
    }

    let adjacent = enemy_positions.iter().any(|e| my_pos.is_adjacent(e));
    if !adjacent {
        let target = session.reachable_tiles().iter().copied().min_by_key(|tile| {
            enemy_positions
                .iter()
                .map(|e| tile.manhattan_distance(e))
                .min()
                .unwrap_or(u32::MAX)
        });
        if let Some(target) = target {
            session.execute_move(target);
            session.set_is_moving(false);
        }
    }

    loop {
        let Some(active) = session.active_unit() else { break };
        if active.current_ap < strike.ap_cost {
            break;
        }
        let pos = active.position;
        let Some(target) = session
            .units()
            .iter()
            .filter(|u| u.team == UnitTeam::Enemy && u.is_alive())
            .map(|u| u.position)
            .find(|e| pos.is_adjacent(e))
        else {
            break;
        };

        session.select_spell(&strike);
        session.cast_spell(target);
        if session.combat_status() != CombatStatus::Active {
            return;
        }
    }

    session.pass_turn();
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose { "gridfall=debug" } else { "gridfall=info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let setup = build_setup(pick_map(&args.map));
    let config = match args.seed {
        Some(seed) => CombatConfig::seeded(seed),
        None => CombatConfig::new(),
    };
    let enemy_delay = config.enemy_turn_delay_ms;

    let hero = Player::new("player1", "xAlban", PlayerClass::Bomberman);
    let mut session = CombatSession::new(&setup, vec![hero], config);

    while session.combat_status() == CombatStatus::Active && session.turn_number() <= args.max_turns
    {
        let is_player = session
            .active_unit()
            .map(|u| u.team == UnitTeam::Player)
            .unwrap_or(false);
        if is_player {
            play_player_turn(&mut session);
        } else {
            session.advance_time(enemy_delay);
        }
    }

    for event in session.drain_feedback() {
        tracing::debug!(?event, "feedback");
    }

    let summary = SkirmishSummary {
        outcome: format!("{:?}", session.combat_status()).to_lowercase(),
        turns: session.turn_number(),
        units: session
            .units()
            .iter()
            .map(|u| UnitSummary {
                name: u.player.name.clone(),
                team: format!("{:?}", u.team).to_lowercase(),
                hp: u.current_hp,
                defeated: u.defeated,
            })
            .collect(),
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&summary).expect("summary serializes")
    );
}
