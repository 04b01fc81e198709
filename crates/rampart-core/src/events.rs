//! Events emitted by the simulation for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::errors::Rejection;

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A wave was started and its spawns scheduled.
    WaveStarted { wave: u32, spawn_count: u32 },
    /// An enemy entered the path.
    EnemySpawned { enemy_id: u32, kind: EnemyKind },
    /// An enemy was destroyed by a projectile.
    EnemyKilled {
        enemy_id: u32,
        kind: EnemyKind,
        reward: u32,
    },
    /// An enemy reached the base.
    EnemyLeaked { enemy_id: u32, lives_remaining: u32 },
    /// A tower was built.
    TowerPlaced {
        tower_id: u32,
        x: f64,
        y: f64,
        cost: u32,
    },
    /// A tower was upgraded.
    TowerUpgraded {
        tower_id: u32,
        level: TowerLevel,
        cost: u32,
    },
    /// A tower fired at an enemy.
    ProjectileFired { tower_id: u32, target_id: u32 },
    /// A command had no effect.
    CommandRejected { reason: Rejection },
    /// Lives reached zero.
    GameOver { wave: u32 },
    /// The final wave was cleared.
    Victory { wave: u32 },
    /// The game was reset to its starting state.
    GameReset,
}
