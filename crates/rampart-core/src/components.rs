//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Insertion sequence number. Systems iterate registries in ascending `seq`
/// so tie-breaks follow insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Spawned {
    pub seq: u64,
}

/// An enemy walking the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub hit_points: i32,
    pub max_hit_points: i32,
    pub reward: u32,
    /// Seconds to walk the whole path.
    pub traverse_secs: f64,
    /// Cleared when killed or when the enemy reaches the base.
    pub alive: bool,
    /// Wave that spawned this enemy.
    pub wave: u32,
}

/// Normalized distance along the path, 0.0 at spawn and 1.0 at the base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PathProgress(pub f64);

/// A player-built tower.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub id: u32,
    pub level: TowerLevel,
    pub range: f64,
    /// Cooldown duration after a shot (seconds).
    pub fire_rate: f64,
    /// Time remaining before the tower may fire again (seconds).
    pub cooldown: f64,
    pub damage: i32,
}

/// A shot in flight. Velocity is fixed at fire time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Tower that fired this projectile.
    pub tower_id: u32,
    pub damage: i32,
    /// Remaining lifetime (seconds).
    pub lifetime: f64,
    /// Set on hit or expiry; cleanup removes spent projectiles.
    pub spent: bool,
}
