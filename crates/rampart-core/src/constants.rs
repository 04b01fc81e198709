//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind [`crate::config::GameConfig`]; anything a
//! level designer may want to change is also exposed there.

/// Nominal frame rate of the frame driver (Hz).
pub const TICK_RATE: u32 = 60;

/// Largest frame step accepted by the real-time driver (seconds).
pub const MAX_FRAME_DT: f64 = 0.1;

// --- Playfield ---

/// Playfield width in pixels.
pub const FIELD_WIDTH: f64 = 800.0;

/// Playfield height in pixels.
pub const FIELD_HEIGHT: f64 = 600.0;

/// Side length of one placement cell in pixels.
pub const GRID_SIZE: f64 = 40.0;

/// Default enemy route, spawn to base.
pub const DEFAULT_PATH: [(f64, f64); 6] = [
    (0.0, 300.0),
    (200.0, 300.0),
    (200.0, 100.0),
    (600.0, 100.0),
    (600.0, 450.0),
    (800.0, 450.0),
];

// --- Placement ---

/// Minimum distance between a tower and any path segment.
pub const PATH_CLEARANCE: f64 = 20.0;

/// Minimum distance between two towers.
pub const TOWER_CLEARANCE: f64 = 20.0;

// --- Economy ---

pub const STARTING_MONEY: u32 = 100;
pub const STARTING_LIVES: u32 = 10;

/// Cost to place a level-1 tower.
pub const TOWER_COST: u32 = 50;

/// Cost to upgrade a tower from level 1 to level 2.
pub const UPGRADE_COST: u32 = 75;

// --- Towers ---

/// Targeting range in pixels.
pub const TOWER_RANGE: f64 = 120.0;

/// Seconds between shots at level 1.
pub const TOWER_FIRE_RATE: f64 = 0.6;

/// Damage per projectile at level 1.
pub const TOWER_DAMAGE: i32 = 10;

/// Seconds between shots at level 2.
pub const UPGRADED_FIRE_RATE: f64 = 0.4;

/// Damage per projectile at level 2.
pub const UPGRADED_DAMAGE: i32 = 18;

// --- Projectiles ---

/// Projectile speed (pixels/s).
pub const PROJECTILE_SPEED: f64 = 300.0;

/// Projectile lifetime in seconds.
pub const PROJECTILE_LIFETIME: f64 = 2.0;

/// A projectile hits an enemy closer than this (strict).
pub const HIT_RADIUS: f64 = 12.0;

// --- Waves ---

/// Enemies in wave 0; each wave adds `WAVE_GROWTH` more.
pub const WAVE_BASE_COUNT: u32 = 5;

/// Extra enemies per wave number.
pub const WAVE_GROWTH: u32 = 2;

/// Seconds between consecutive spawns within a wave.
pub const SPAWN_STAGGER: f64 = 0.6;

/// Waves in a full game.
pub const MAX_WAVES: u32 = 10;

/// Upper bound on spawns scheduled by a single wave.
pub const MAX_WAVE_SPAWNS: u32 = 1_000;

// Composition rules, evaluated in this order. A rule applies when the wave
// number satisfies its threshold and `index % modulus == offset`.

/// Boss: wave >= threshold.
pub const BOSS_MIN_WAVE: u32 = 5;
pub const BOSS_MODULUS: u32 = 10;
pub const BOSS_OFFSET: u32 = 9;

/// Heavy: wave > threshold.
pub const HEAVY_AFTER_WAVE: u32 = 3;
pub const HEAVY_MODULUS: u32 = 5;
pub const HEAVY_OFFSET: u32 = 4;

/// Fast: wave >= threshold.
pub const FAST_MIN_WAVE: u32 = 2;
pub const FAST_MODULUS: u32 = 4;
pub const FAST_OFFSET: u32 = 3;

// --- Time scale ---

pub const MIN_TIME_SCALE: f64 = 0.0;
pub const MAX_TIME_SCALE: f64 = 4.0;
