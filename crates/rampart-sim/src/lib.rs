//! Simulation engine for RAMPART.
//!
//! Owns the hecs ECS world holding the enemy, tower and projectile
//! registries, runs systems once per frame, and produces
//! `GameStateSnapshot`s for renderers.

pub mod economy;
pub mod engine;
pub mod placement;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use rampart_core as core;
