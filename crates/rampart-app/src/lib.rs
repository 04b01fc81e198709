//! RAMPART frame driver.
//!
//! This crate runs the simulation engine on its own thread at a fixed frame
//! cadence and exposes it to hosts through a small control surface.

pub mod control;
pub mod error;
pub mod game_loop;
pub mod state;

pub use error::AppError;
pub use rampart_core as core;
