use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use rampart_core::commands::PlayerCommand;
use rampart_core::config::GameConfig;
use rampart_core::enums::{EnemyKind, GamePhase};
use rampart_core::errors::Rejection;
use rampart_core::events::GameEvent;
use rampart_core::state::GameStateSnapshot;
use rampart_core::types::Position;
use rampart_sim::systems::wave_spawner::select_enemy_kind;
use rampart_sim::{SimConfig, SimulationEngine};

const FRAME: f64 = 1.0 / 60.0;

fn engine_with(configure: impl FnOnce(&mut GameConfig)) -> SimulationEngine {
    let mut game = GameConfig::default();
    configure(&mut game);
    SimulationEngine::new(SimConfig {
        game,
        ..Default::default()
    })
    .unwrap()
}

fn default_engine() -> SimulationEngine {
    engine_with(|_| {})
}

fn rejections(snap: &GameStateSnapshot) -> Vec<Rejection> {
    snap.events
        .iter()
        .filter_map(|e| match e {
            GameEvent::CommandRejected { reason } => Some(*reason),
            _ => None,
        })
        .collect()
}

/// Registries serialized for exact comparison.
fn registries(snap: &GameStateSnapshot) -> String {
    serde_json::to_string(&(&snap.enemies, &snap.towers, &snap.projectiles)).unwrap()
}

/// Tick at 60 Hz until `done` or `max_ticks`, returning the last snapshot.
fn run_until(
    engine: &mut SimulationEngine,
    max_ticks: usize,
    mut done: impl FnMut(&GameStateSnapshot) -> bool,
) -> GameStateSnapshot {
    let mut snap = engine.tick(FRAME);
    for _ in 1..max_ticks {
        if done(&snap) {
            break;
        }
        snap = engine.tick(FRAME);
    }
    snap
}

#[test]
fn wave_one_is_seven_basic_enemies() {
    let mut engine = default_engine();
    engine.queue_command(PlayerCommand::StartWave);
    let first = engine.tick(FRAME);
    assert!(first.events.contains(&GameEvent::WaveStarted {
        wave: 1,
        spawn_count: 7
    }));

    let mut spawned = Vec::new();
    for snap in std::iter::once(first).chain((0..300).map(|_| engine.tick(FRAME))) {
        for event in &snap.events {
            if let GameEvent::EnemySpawned { kind, .. } = event {
                spawned.push(*kind);
            }
        }
    }
    assert_eq!(spawned, vec![EnemyKind::Basic; 7]);
    assert!(engine.director().is_idle());
}

#[test]
fn late_waves_mix_variants() {
    assert_eq!(select_enemy_kind(7, 9), EnemyKind::Boss);

    let mut engine = default_engine();
    engine.queue_commands(std::iter::repeat(PlayerCommand::StartWave).take(7));
    engine.queue_command(PlayerCommand::Pause);
    let snap = engine.tick(FRAME);
    assert_eq!(snap.economy.wave, 7);

    let wave_seven: Vec<EnemyKind> = engine
        .director()
        .pending()
        .iter()
        .filter(|s| s.wave == 7)
        .map(|s| s.kind)
        .collect();
    assert_eq!(wave_seven.len(), 19);
    assert_eq!(wave_seven[3], EnemyKind::Fast);
    assert_eq!(wave_seven[4], EnemyKind::Heavy);
    assert_eq!(wave_seven[9], EnemyKind::Boss);
    assert_eq!(wave_seven[14], EnemyKind::Heavy);
    assert_eq!(wave_seven[18], EnemyKind::Basic);
}

#[test]
fn money_limits_tower_count() {
    let mut engine = default_engine();
    engine.on_pointer_down(100.0, 220.0);
    engine.on_pointer_down(100.0, 180.0);
    let snap = engine.tick(FRAME);
    assert_eq!(snap.towers.len(), 2);
    assert_eq!(snap.economy.money, 0);

    engine.on_pointer_down(20.0, 220.0);
    let snap = engine.tick(FRAME);
    assert_eq!(snap.towers.len(), 2);
    assert_eq!(snap.economy.money, 0);
    assert_eq!(
        rejections(&snap),
        vec![Rejection::InsufficientFunds {
            cost: 50,
            available: 0
        }]
    );
}

#[test]
fn reset_clears_everything() {
    let mut engine = default_engine();
    engine.on_pointer_down(740.0, 20.0);
    engine.on_pointer_down(700.0, 20.0);
    engine.queue_command(PlayerCommand::StartWave);
    let mut snap = engine.tick(0.5);
    for _ in 0..2 {
        snap = engine.tick(0.5);
    }
    assert_eq!(snap.enemies.len(), 3);
    assert_eq!(snap.towers.len(), 2);
    assert_eq!(snap.pending_spawns, 4);

    engine.queue_command(PlayerCommand::Reset);
    let snap = engine.tick(FRAME);
    assert!(snap.events.contains(&GameEvent::GameReset));
    assert!(snap.enemies.is_empty());
    assert!(snap.towers.is_empty());
    assert!(snap.projectiles.is_empty());
    assert_eq!(snap.pending_spawns, 0);
    assert_eq!(snap.economy.money, 100);
    assert_eq!(snap.economy.lives, 10);
    assert_eq!(snap.economy.wave, 0);
    assert_eq!(snap.time.tick, 1);

    // Spawns scheduled before the reset never arrive.
    let snap = run_until(&mut engine, 600, |_| false);
    assert!(snap.enemies.is_empty());
    assert_eq!(snap.economy.lives, 10);
}

#[test]
fn reset_restarts_ids() {
    let mut engine = default_engine();
    engine.on_pointer_down(740.0, 20.0);
    engine.tick(FRAME);
    engine.queue_command(PlayerCommand::Reset);
    engine.on_pointer_down(700.0, 20.0);
    let snap = engine.tick(FRAME);
    assert_eq!(snap.towers.len(), 1);
    assert_eq!(snap.towers[0].tower_id, 0);
}

#[test]
fn game_over_freezes_the_field() {
    let mut engine = engine_with(|c| c.economy.starting_lives = 1);
    engine.on_pointer_down(100.0, 260.0);
    engine.queue_command(PlayerCommand::StartWave);

    let over = run_until(&mut engine, 3_000, |s| s.game_over());
    assert_eq!(over.phase, GamePhase::GameOver);
    assert_eq!(over.economy.lives, 0);
    assert!(over.events.contains(&GameEvent::GameOver { wave: 1 }));
    assert_eq!(over.pending_spawns, 0);

    let frozen = registries(&over);
    let snap = (0..30).map(|_| engine.tick(FRAME)).last().unwrap();
    assert_eq!(registries(&snap), frozen);
    assert_eq!(snap.time.tick, over.time.tick);

    engine.queue_command(PlayerCommand::StartWave);
    let snap = engine.tick(FRAME);
    assert_eq!(rejections(&snap), vec![Rejection::GameOver]);
    assert_eq!(snap.economy.wave, 1);
}

#[test]
fn lives_never_go_negative() {
    let mut engine = engine_with(|c| c.economy.starting_lives = 2);
    engine.queue_commands([
        PlayerCommand::StartWave,
        PlayerCommand::StartWave,
        PlayerCommand::StartWave,
    ]);
    // One huge step lands three enemies at once; the third finds the game over.
    engine.tick(0.1);
    let snap = engine.tick(60.0);
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.economy.lives, 0);

    let leaks = snap
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemyLeaked { .. }))
        .count();
    assert_eq!(leaks, 2);
}

#[test]
fn oversized_step_still_counts_arrival() {
    let mut engine = default_engine();
    engine.queue_command(PlayerCommand::StartWave);
    engine.tick(0.01);

    let snap = engine.tick(30.0);
    assert_eq!(snap.economy.lives, 9);
    assert!(snap.events.contains(&GameEvent::EnemyLeaked {
        enemy_id: 0,
        lives_remaining: 9
    }));
}

#[test]
fn clearing_the_last_wave_is_victory() {
    let mut engine = engine_with(|c| c.waves.max_waves = 1);
    engine.queue_commands([PlayerCommand::StartWave, PlayerCommand::StartWave]);
    let first = engine.tick(FRAME);
    assert_eq!(rejections(&first), vec![Rejection::NoWavesRemaining]);

    let snap = run_until(&mut engine, 1_200, |s| s.phase != GamePhase::Active);
    assert_eq!(snap.phase, GamePhase::Victory);
    assert!(snap.events.contains(&GameEvent::Victory { wave: 1 }));
    assert_eq!(snap.economy.lives, 3);
    assert!(snap.enemies.is_empty());

    engine.on_pointer_down(100.0, 220.0);
    let snap = engine.tick(FRAME);
    assert_eq!(rejections(&snap), vec![Rejection::GameOver]);
}

#[test]
fn endless_mode_never_declares_victory() {
    let mut engine = engine_with(|c| c.waves.max_waves = 0);
    engine.queue_command(PlayerCommand::StartWave);
    let snap = run_until(&mut engine, 1_200, |_| false);
    assert_eq!(snap.phase, GamePhase::Active);
    assert!(snap.enemies.is_empty());
    assert_eq!(snap.economy.lives, 3);
}

fn scripted_run() -> Vec<String> {
    let mut engine = default_engine();
    let mut frames = Vec::new();
    for tick in 0..1_200 {
        match tick {
            0 => {
                engine.on_pointer_down(100.0, 260.0);
                engine.on_pointer_down(260.0, 180.0);
                engine.queue_command(PlayerCommand::StartWave);
            }
            300 => engine.queue_command(PlayerCommand::StartWave),
            600 => engine.queue_command(PlayerCommand::UpgradeTower { tower_id: 0 }),
            _ => {}
        }
        let snap = engine.tick(FRAME);
        frames.push(serde_json::to_string(&snap).unwrap());
    }
    frames
}

#[test]
fn identical_inputs_give_identical_runs() {
    let a = scripted_run();
    let b = scripted_run();
    assert_eq!(a.len(), b.len());
    for (i, (fa, fb)) in a.iter().zip(&b).enumerate() {
        assert_eq!(fa, fb, "runs diverged at tick {i}");
    }
}

#[test]
fn random_clicks_respect_clearances() {
    let mut engine = engine_with(|c| c.economy.starting_money = 1_000_000);
    let field = engine.config().field.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..400 {
        let click = Position::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
        let cell = field.snap_to_cell(&click);
        let before = engine.tower_count();
        let near_path = engine.path().distance_to(&cell) < field.path_clearance;

        engine.on_pointer_down(click.x, click.y);
        let snap = engine.tick(FRAME);
        let placed = snap.towers.len() > before;
        if near_path {
            assert!(!placed, "tower placed on the path at {cell:?}");
        }
        if placed {
            assert_eq!(snap.towers.last().unwrap().position, cell);
        }
    }

    let snap = engine.tick(FRAME);
    assert!(!snap.towers.is_empty());
    for (i, a) in snap.towers.iter().enumerate() {
        assert!(engine.path().distance_to(&a.position) >= field.path_clearance);
        for b in &snap.towers[i + 1..] {
            assert!(a.position.distance_to(&b.position) >= field.tower_clearance);
        }
    }
}
