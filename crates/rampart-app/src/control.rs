//! Control surface for hosts (renderers, input routers, the headless runner).
//!
//! These functions bridge host requests to the game loop thread via channels.

use rampart_core::commands::PlayerCommand;
use rampart_core::state::GameStateSnapshot;
use rampart_sim::engine::SimConfig;

use crate::error::AppError;
use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(state: &AppState, config: SimConfig, fps: u32) -> Result<(), AppError> {
    let mut slot = state.game_loop.lock()?;
    if slot.is_some() {
        return Err(AppError::AlreadyRunning);
    }

    *state.latest_snapshot.lock()? = None;
    *slot = Some(game_loop::spawn_game_loop(
        config,
        fps,
        state.latest_snapshot.clone(),
    )?);
    Ok(())
}

fn send(state: &AppState, message: GameLoopCommand) -> Result<(), AppError> {
    let slot = state.game_loop.lock()?;
    match slot.as_ref() {
        Some(handle) => handle
            .command_tx
            .send(message)
            .map_err(|_| AppError::Disconnected),
        None => Err(AppError::NotStarted),
    }
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), AppError> {
    send(state, GameLoopCommand::Player(command))
}

/// Forward a click at screen coordinates.
pub fn pointer_down(state: &AppState, x: f64, y: f64) -> Result<(), AppError> {
    send(state, GameLoopCommand::PointerDown { x, y })
}

/// Get the latest snapshot (`None` before the first frame).
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, AppError> {
    Ok(state.latest_snapshot.lock()?.clone())
}

/// Latest snapshot as JSON, for renderers outside the process.
pub fn snapshot_json(state: &AppState) -> Result<Option<String>, AppError> {
    let lock = state.latest_snapshot.lock()?;
    lock.as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(AppError::Serialize)
}

/// Stop the game loop and wait for its thread to exit.
pub fn stop_simulation(state: &AppState) -> Result<(), AppError> {
    let handle = state.game_loop.lock()?.take().ok_or(AppError::NotStarted)?;
    // A loop that already exited has dropped its receiver.
    let _ = handle.command_tx.send(GameLoopCommand::Shutdown);
    handle.thread.join().map_err(|_| AppError::Disconnected)
}
