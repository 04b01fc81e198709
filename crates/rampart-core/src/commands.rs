//! Player commands sent from the input router to the simulation.
//!
//! Commands are validated and queued for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Building ---
    /// Place a tower in the grid cell containing (x, y).
    PlaceTower { x: f64, y: f64 },
    /// Upgrade a tower from level 1 to level 2.
    UpgradeTower { tower_id: u32 },

    // --- Waves ---
    /// Start the next wave.
    StartWave,

    // --- Simulation control ---
    /// Reinitialize registries, counters and pending spawns.
    Reset,
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = frozen clock).
    SetTimeScale { scale: f64 },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
