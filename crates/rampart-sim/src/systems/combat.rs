//! Projectile resolution: moves projectiles, applies hits, reports kills.
//!
//! Projectiles are resolved in insertion order. Each projectile hits the
//! first live enemy (insertion order, not nearest) within the hit radius and
//! is spent whether or not the enemy dies. An enemy killed by one projectile
//! is invisible to every later projectile in the same tick, so a kill is
//! reported exactly once.

use hecs::World;

use rampart_core::components::{Enemy, Projectile};
use rampart_core::config::TowerConfig;
use rampart_core::enums::EnemyKind;
use rampart_core::types::{Position, Velocity};

use super::in_spawn_order;
use super::targeting::live_enemies;

/// An enemy destroyed this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kill {
    pub enemy_id: u32,
    pub kind: EnemyKind,
    pub reward: u32,
}

/// Run projectile movement and collision for one tick.
pub fn run(world: &mut World, config: &TowerConfig, dt: f64) -> Vec<Kill> {
    let mut enemies = live_enemies(world);
    let mut kills = Vec::new();

    for entity in in_spawn_order::<Projectile>(world) {
        let (position, damage) = {
            let Ok((projectile, pos, vel)) =
                world.query_one_mut::<(&mut Projectile, &mut Position, &Velocity)>(entity)
            else {
                continue;
            };
            if projectile.spent {
                continue;
            }
            pos.advance(vel, dt);
            projectile.lifetime -= dt;
            (*pos, projectile.damage)
        };

        let hit = enemies
            .iter_mut()
            .find(|e| e.alive && e.position.distance_to(&position) < config.hit_radius);

        let mut spent = false;
        if let Some(target) = hit {
            spent = true;
            if let Ok(mut enemy) = world.get::<&mut Enemy>(target.entity) {
                enemy.hit_points -= damage;
                if enemy.hit_points <= 0 && enemy.alive {
                    enemy.alive = false;
                    target.alive = false;
                    kills.push(Kill {
                        enemy_id: enemy.id,
                        kind: enemy.kind,
                        reward: enemy.reward,
                    });
                }
            }
        }

        if let Ok(mut projectile) = world.get::<&mut Projectile>(entity) {
            if spent || projectile.lifetime <= 0.0 {
                projectile.spent = true;
            }
        }
    }

    kills
}
