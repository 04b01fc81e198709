//! Tower placement validation.
//!
//! Pure queries: nothing here mutates the world or the economy.

use hecs::World;

use rampart_core::components::Tower;
use rampart_core::config::GameConfig;
use rampart_core::errors::Rejection;
use rampart_core::path::{distance_to_segment, PathModel};
use rampart_core::types::Position;

/// Why `point` cannot take a new tower, checked in order: playfield bounds,
/// path clearance, tower clearance, funds. Stops at the first violation.
pub fn check_placement(
    point: &Position,
    path: &PathModel,
    towers: &[Position],
    money: u32,
    config: &GameConfig,
) -> Result<(), Rejection> {
    if !config.field.contains(point) {
        return Err(Rejection::OutOfBounds);
    }

    let path_clearance = config.field.path_clearance;
    if path
        .segments()
        .any(|(a, b)| distance_to_segment(point, &a, &b) < path_clearance)
    {
        return Err(Rejection::TooCloseToPath);
    }

    let tower_clearance = config.field.tower_clearance;
    if towers
        .iter()
        .any(|t| t.distance_to(point) < tower_clearance)
    {
        return Err(Rejection::TooCloseToTower);
    }

    let cost = config.economy.tower_cost;
    if money < cost {
        return Err(Rejection::InsufficientFunds {
            cost,
            available: money,
        });
    }

    Ok(())
}

/// Whether a tower may be built at `point`.
pub fn is_placement_valid(
    point: &Position,
    path: &PathModel,
    towers: &[Position],
    money: u32,
    config: &GameConfig,
) -> bool {
    check_placement(point, path, towers, money, config).is_ok()
}

/// Positions of every tower in the world.
pub fn tower_positions(world: &World) -> Vec<Position> {
    world
        .query::<(&Tower, &Position)>()
        .iter()
        .map(|(_, (_, pos))| *pos)
        .collect()
}
