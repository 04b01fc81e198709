//! Entity spawn factories.
//!
//! Creates enemy, tower and projectile entities with the component bundles
//! the systems expect. Every entity gets a `Spawned` sequence number.

use hecs::{Entity, World};

use rampart_core::components::*;
use rampart_core::config::TowerConfig;
use rampart_core::enums::*;
use rampart_core::path::PathModel;
use rampart_core::types::{Position, Velocity};

/// Id and sequence allocator, reset together with the world.
#[derive(Debug, Clone, Default)]
pub struct EntityIds {
    next_seq: u64,
    next_enemy: u32,
    next_tower: u32,
    next_projectile: u32,
}

impl EntityIds {
    fn spawned(&mut self) -> Spawned {
        let seq = self.next_seq;
        self.next_seq += 1;
        Spawned { seq }
    }

    fn enemy(&mut self) -> u32 {
        let id = self.next_enemy;
        self.next_enemy += 1;
        id
    }

    fn tower(&mut self) -> u32 {
        let id = self.next_tower;
        self.next_tower += 1;
        id
    }

    fn projectile(&mut self) -> u32 {
        let id = self.next_projectile;
        self.next_projectile += 1;
        id
    }
}

/// Spawn an enemy of `kind` at the start of the path.
pub fn spawn_enemy(
    world: &mut World,
    ids: &mut EntityIds,
    path: &PathModel,
    kind: EnemyKind,
    wave: u32,
) -> (Entity, u32) {
    let stats = kind.stats();
    let id = ids.enemy();
    let enemy = Enemy {
        id,
        kind,
        hit_points: stats.hit_points,
        max_hit_points: stats.hit_points,
        reward: stats.reward,
        traverse_secs: stats.traverse_secs,
        alive: true,
        wave,
    };

    let entity = world.spawn((ids.spawned(), enemy, PathProgress(0.0), path.start()));
    (entity, id)
}

/// Spawn a level-1 tower at `position`.
pub fn spawn_tower(
    world: &mut World,
    ids: &mut EntityIds,
    position: Position,
    config: &TowerConfig,
) -> (Entity, u32) {
    let id = ids.tower();
    let tower = Tower {
        id,
        level: TowerLevel::One,
        range: config.range,
        fire_rate: config.fire_rate,
        cooldown: 0.0,
        damage: config.damage,
    };

    let entity = world.spawn((ids.spawned(), tower, position));
    (entity, id)
}

/// Spawn a projectile at `origin` heading for `aim_at` at the configured speed.
pub fn spawn_projectile(
    world: &mut World,
    ids: &mut EntityIds,
    origin: Position,
    aim_at: Position,
    tower_id: u32,
    damage: i32,
    config: &TowerConfig,
) -> (Entity, u32) {
    let id = ids.projectile();
    let projectile = Projectile {
        id,
        tower_id,
        damage,
        lifetime: config.projectile_lifetime,
        spent: false,
    };
    let velocity = Velocity::toward(&origin, &aim_at, config.projectile_speed);

    let entity = world.spawn((ids.spawned(), projectile, origin, velocity));
    (entity, id)
}
