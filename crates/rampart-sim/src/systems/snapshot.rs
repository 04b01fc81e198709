//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! Read-only: never modifies the world.

use hecs::World;

use rampart_core::components::*;
use rampart_core::enums::GamePhase;
use rampart_core::events::GameEvent;
use rampart_core::state::*;
use rampart_core::types::{Position, SimTime, Velocity};

/// Engine-level values that live outside the world.
pub struct SnapshotContext {
    pub time: SimTime,
    pub phase: GamePhase,
    pub paused: bool,
    pub time_scale: f64,
    pub economy: EconomyView,
    pub pending_spawns: u32,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    context: SnapshotContext,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: context.time,
        phase: context.phase,
        paused: context.paused,
        time_scale: context.time_scale,
        economy: context.economy,
        pending_spawns: context.pending_spawns,
        enemies: build_enemies(world),
        towers: build_towers(world),
        projectiles: build_projectiles(world),
        events,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &PathProgress, &Position)>()
        .iter()
        .filter(|(_, (enemy, _, _))| enemy.alive)
        .map(|(_, (enemy, progress, pos))| EnemyView {
            enemy_id: enemy.id,
            kind: enemy.kind,
            position: *pos,
            hit_points: enemy.hit_points,
            max_hit_points: enemy.max_hit_points,
            progress: progress.0,
            wave: enemy.wave,
        })
        .collect();
    enemies.sort_by_key(|e| e.enemy_id);
    enemies
}

fn build_towers(world: &World) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&Tower, &Position)>()
        .iter()
        .map(|(_, (tower, pos))| TowerView {
            tower_id: tower.id,
            position: *pos,
            level: tower.level,
            range: tower.range,
            damage: tower.damage,
            fire_rate: tower.fire_rate,
            cooldown: tower.cooldown,
        })
        .collect();
    towers.sort_by_key(|t| t.tower_id);
    towers
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .map(|(_, (projectile, pos, vel))| ProjectileView {
            projectile_id: projectile.id,
            tower_id: projectile.tower_id,
            position: *pos,
            velocity: *vel,
            lifetime: projectile.lifetime,
        })
        .collect();
    projectiles.sort_by_key(|p| p.projectile_id);
    projectiles
}
