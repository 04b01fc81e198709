//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components, the economy, or
//! the wave director.

pub mod cleanup;
pub mod combat;
pub mod movement;
pub mod snapshot;
pub mod targeting;
pub mod wave_spawner;

use hecs::{Entity, World};

use rampart_core::components::Spawned;

/// Entities carrying component `T`, in insertion order.
pub(crate) fn in_spawn_order<T: hecs::Component>(world: &World) -> Vec<Entity> {
    let mut entities: Vec<(Spawned, Entity)> = world
        .query::<(&Spawned, &T)>()
        .iter()
        .map(|(entity, (spawned, _))| (*spawned, entity))
        .collect();
    entities.sort_unstable_by_key(|(spawned, _)| *spawned);
    entities.into_iter().map(|(_, entity)| entity).collect()
}
