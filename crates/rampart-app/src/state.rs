//! State shared between the control layer and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use rampart_core::commands::PlayerCommand;
use rampart_core::state::GameStateSnapshot;

/// Messages sent from the control layer to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// A click on the field at screen coordinates.
    PointerDown { x: f64, y: f64 },
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle to a running game loop.
pub struct GameLoopHandle {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub thread: JoinHandle<()>,
}

/// Shared application state.
///
/// `mpsc::Sender` is not `Sync`, so the handle sits behind a `Mutex`. The
/// latest snapshot is shared with the game loop thread through an `Arc`.
#[derive(Default)]
pub struct AppState {
    /// `None` until `start_simulation` succeeds.
    pub game_loop: Mutex<Option<GameLoopHandle>>,
    /// Updated by the game loop thread after each frame.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
