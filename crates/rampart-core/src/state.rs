//! Game state snapshot: the complete visible state handed to the renderer each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime, Velocity};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub paused: bool,
    pub time_scale: f64,
    pub economy: EconomyView,
    /// Spawns scheduled but not yet fired.
    pub pending_spawns: u32,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    /// Events emitted since the previous snapshot.
    pub events: Vec<GameEvent>,
}

impl GameStateSnapshot {
    /// Convenience for renderers and tests.
    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Money, lives and wave counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyView {
    pub money: u32,
    pub lives: u32,
    pub wave: u32,
    pub max_waves: u32,
}

/// An enemy on the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub enemy_id: u32,
    pub kind: EnemyKind,
    pub position: Position,
    pub hit_points: i32,
    pub max_hit_points: i32,
    /// Normalized progress along the path (0.0 - 1.0).
    pub progress: f64,
    pub wave: u32,
}

/// A placed tower.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub tower_id: u32,
    pub position: Position,
    pub level: TowerLevel,
    pub range: f64,
    pub damage: i32,
    pub fire_rate: f64,
    pub cooldown: f64,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub projectile_id: u32,
    pub tower_id: u32,
    pub position: Position,
    pub velocity: Velocity,
    pub lifetime: f64,
}
