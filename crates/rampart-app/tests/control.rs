use std::time::{Duration, Instant};

use rampart_app::control;
use rampart_app::state::AppState;
use rampart_app::AppError;
use rampart_core::commands::PlayerCommand;
use rampart_core::config::GameConfig;
use rampart_core::state::GameStateSnapshot;
use rampart_sim::engine::SimConfig;

/// Poll the shared snapshot until `ready` or a two second timeout.
fn wait_for(
    state: &AppState,
    ready: impl Fn(&GameStateSnapshot) -> bool,
) -> Option<GameStateSnapshot> {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if let Some(snap) = control::get_snapshot(state).unwrap() {
            if ready(&snap) {
                return Some(snap);
            }
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    None
}

#[test]
fn commands_reach_the_running_loop() {
    let state = AppState::new();
    control::start_simulation(&state, SimConfig::default(), 120).unwrap();

    control::pointer_down(&state, 101.0, 219.0).unwrap();
    control::send_command(&state, PlayerCommand::StartWave).unwrap();

    let snap = wait_for(&state, |s| s.economy.wave == 1 && !s.enemies.is_empty())
        .expect("game loop never applied the commands");
    assert_eq!(snap.towers.len(), 1);
    assert_eq!(snap.economy.money, 50);

    let json = control::snapshot_json(&state).unwrap().unwrap();
    assert!(json.contains("\"economy\""));

    control::stop_simulation(&state).unwrap();
    assert!(matches!(
        control::send_command(&state, PlayerCommand::Pause),
        Err(AppError::NotStarted)
    ));
}

#[test]
fn loop_time_advances() {
    let state = AppState::new();
    control::start_simulation(&state, SimConfig::default(), 120).unwrap();

    let snap = wait_for(&state, |s| s.time.tick >= 5).expect("no frames ran");
    assert!(snap.time.elapsed_secs > 0.0);

    control::stop_simulation(&state).unwrap();
}

#[test]
fn second_start_is_rejected() {
    let state = AppState::new();
    control::start_simulation(&state, SimConfig::default(), 60).unwrap();
    assert!(matches!(
        control::start_simulation(&state, SimConfig::default(), 60),
        Err(AppError::AlreadyRunning)
    ));
    control::stop_simulation(&state).unwrap();

    // Restart after a clean stop.
    control::start_simulation(&state, SimConfig::default(), 60).unwrap();
    control::stop_simulation(&state).unwrap();
}

#[test]
fn calls_before_start_fail() {
    let state = AppState::new();
    assert!(control::get_snapshot(&state).unwrap().is_none());
    assert!(matches!(
        control::pointer_down(&state, 10.0, 10.0),
        Err(AppError::NotStarted)
    ));
    assert!(matches!(
        control::stop_simulation(&state),
        Err(AppError::NotStarted)
    ));
}

#[test]
fn invalid_config_is_reported() {
    let mut game = GameConfig::default();
    game.path.waypoints.truncate(1);
    let state = AppState::new();

    let err = control::start_simulation(
        &state,
        SimConfig {
            game,
            ..Default::default()
        },
        60,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
    assert!(err.to_string().contains("at least 2 waypoints"));
    assert!(state.game_loop.lock().unwrap().is_none());
}
