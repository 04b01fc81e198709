//! Enemy movement along the path.
//!
//! Each enemy advances its normalized progress by `dt / traverse_secs` and
//! takes the matching point on the path. Progress reaching 1.0 is arrival at
//! the base.

use hecs::{Entity, World};

use rampart_core::components::{Enemy, PathProgress};
use rampart_core::path::PathModel;
use rampart_core::types::Position;

use super::in_spawn_order;

/// An enemy that reached the base this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub entity: Entity,
    pub enemy_id: u32,
}

/// Move every live enemy. Arrived enemies are marked dead and returned in
/// insertion order.
pub fn run(world: &mut World, path: &PathModel, dt: f64) -> Vec<Arrival> {
    let mut arrivals = Vec::new();

    for entity in in_spawn_order::<Enemy>(world) {
        let Ok((enemy, progress, pos)) =
            world.query_one_mut::<(&mut Enemy, &mut PathProgress, &mut Position)>(entity)
        else {
            continue;
        };
        if !enemy.alive {
            continue;
        }

        progress.0 = (progress.0 + dt / enemy.traverse_secs).min(1.0);
        *pos = path.point_at(progress.0);

        if progress.0 >= 1.0 {
            enemy.alive = false;
            arrivals.push(Arrival {
                entity,
                enemy_id: enemy.id,
            });
        }
    }

    arrivals
}
