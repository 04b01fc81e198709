//! Tower targeting: cools towers down and fires at the nearest enemy in range.

use hecs::{Entity, World};

use rampart_core::components::{Enemy, Tower};
use rampart_core::config::TowerConfig;
use rampart_core::events::GameEvent;
use rampart_core::types::Position;

use super::in_spawn_order;
use crate::world_setup::{self, EntityIds};

/// A live enemy as seen by targeting and collision checks this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyTarget {
    pub entity: Entity,
    pub enemy_id: u32,
    pub position: Position,
    pub alive: bool,
}

/// Live enemies in insertion order.
pub fn live_enemies(world: &World) -> Vec<EnemyTarget> {
    in_spawn_order::<Enemy>(world)
        .into_iter()
        .filter_map(|entity| {
            let mut query = world.query_one::<(&Enemy, &Position)>(entity).ok()?;
            let (enemy, pos) = query.get()?;
            enemy.alive.then(|| EnemyTarget {
                entity,
                enemy_id: enemy.id,
                position: *pos,
                alive: true,
            })
        })
        .collect()
}

/// Nearest live enemy within `range` of `origin` (distance <= range).
/// Equal distances go to the earliest in `enemies`.
pub fn nearest_in_range<'a>(
    origin: &Position,
    range: f64,
    enemies: &'a [EnemyTarget],
) -> Option<&'a EnemyTarget> {
    let range_sq = range * range;
    let mut best: Option<(&EnemyTarget, f64)> = None;
    for enemy in enemies.iter().filter(|e| e.alive) {
        let d_sq = origin.distance_sq_to(&enemy.position);
        if d_sq > range_sq {
            continue;
        }
        match best {
            Some((_, best_sq)) if d_sq >= best_sq => {}
            _ => best = Some((enemy, d_sq)),
        }
    }
    best.map(|(enemy, _)| enemy)
}

/// A shot decided this tick, spawned after the tower loop.
struct Shot {
    tower_id: u32,
    origin: Position,
    aim_at: Position,
    target_id: u32,
    damage: i32,
}

/// Run tower targeting for one tick. Returns the number of shots fired.
pub fn run(
    world: &mut World,
    ids: &mut EntityIds,
    config: &TowerConfig,
    dt: f64,
    events: &mut Vec<GameEvent>,
) -> usize {
    let enemies = live_enemies(world);
    let mut shots = Vec::new();

    for entity in in_spawn_order::<Tower>(world) {
        let Ok((tower, pos)) = world.query_one_mut::<(&mut Tower, &Position)>(entity) else {
            continue;
        };

        tower.cooldown -= dt;
        if tower.cooldown > 0.0 {
            continue;
        }

        match nearest_in_range(pos, tower.range, &enemies) {
            Some(target) => {
                shots.push(Shot {
                    tower_id: tower.id,
                    origin: *pos,
                    aim_at: target.position,
                    target_id: target.enemy_id,
                    damage: tower.damage,
                });
                tower.cooldown = tower.fire_rate;
            }
            // Ready, holding fire.
            None => tower.cooldown = 0.0,
        }
    }

    for shot in &shots {
        world_setup::spawn_projectile(
            world,
            ids,
            shot.origin,
            shot.aim_at,
            shot.tower_id,
            shot.damage,
            config,
        );
        tracing::debug!(
            tower_id = shot.tower_id,
            target_id = shot.target_id,
            "projectile fired"
        );
        events.push(GameEvent::ProjectileFired {
            tower_id: shot.tower_id,
            target_id: shot.target_id,
        });
    }

    shots.len()
}
