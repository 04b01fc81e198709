//! Game configuration.
//!
//! Every section is `#[serde(default)]`, so a TOML file only needs to name the
//! values it overrides:
//!
//! ```toml
//! [economy]
//! starting_money = 250
//!
//! [waves]
//! max_waves = 5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::errors::ConfigError;
use crate::path::PathModel;
use crate::types::Position;

/// Complete tuning for one game session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub economy: EconomyConfig,
    pub waves: WaveConfig,
    pub tower: TowerConfig,
    pub field: FieldConfig,
    pub path: PathConfig,
}

/// Starting counters and prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_money: u32,
    pub starting_lives: u32,
    pub tower_cost: u32,
    pub upgrade_cost: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_money: STARTING_MONEY,
            starting_lives: STARTING_LIVES,
            tower_cost: TOWER_COST,
            upgrade_cost: UPGRADE_COST,
        }
    }
}

/// Wave size and pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub base_count: u32,
    pub growth: u32,
    /// Seconds between spawns within a wave.
    pub stagger_secs: f64,
    pub max_waves: u32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            base_count: WAVE_BASE_COUNT,
            growth: WAVE_GROWTH,
            stagger_secs: SPAWN_STAGGER,
            max_waves: MAX_WAVES,
        }
    }
}

impl WaveConfig {
    /// Number of spawns scheduled by wave `wave`, capped at `MAX_WAVE_SPAWNS`.
    pub fn spawn_count(&self, wave: u32) -> u32 {
        self.base_count
            .saturating_add(self.growth.saturating_mul(wave))
            .min(MAX_WAVE_SPAWNS)
    }
}

/// Tower and projectile stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerConfig {
    pub range: f64,
    pub fire_rate: f64,
    pub damage: i32,
    pub upgraded_fire_rate: f64,
    pub upgraded_damage: i32,
    pub projectile_speed: f64,
    pub projectile_lifetime: f64,
    pub hit_radius: f64,
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            range: TOWER_RANGE,
            fire_rate: TOWER_FIRE_RATE,
            damage: TOWER_DAMAGE,
            upgraded_fire_rate: UPGRADED_FIRE_RATE,
            upgraded_damage: UPGRADED_DAMAGE,
            projectile_speed: PROJECTILE_SPEED,
            projectile_lifetime: PROJECTILE_LIFETIME,
            hit_radius: HIT_RADIUS,
        }
    }
}

/// Playfield geometry and placement clearances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f64,
    pub height: f64,
    pub grid_size: f64,
    pub path_clearance: f64,
    pub tower_clearance: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            grid_size: GRID_SIZE,
            path_clearance: PATH_CLEARANCE,
            tower_clearance: TOWER_CLEARANCE,
        }
    }
}

impl FieldConfig {
    /// Whether `point` lies on the playfield.
    pub fn contains(&self, point: &Position) -> bool {
        (0.0..self.width).contains(&point.x) && (0.0..self.height).contains(&point.y)
    }

    /// Centre of the grid cell containing `point`.
    pub fn snap_to_cell(&self, point: &Position) -> Position {
        let half = self.grid_size / 2.0;
        Position::new(
            (point.x / self.grid_size).floor() * self.grid_size + half,
            (point.y / self.grid_size).floor() * self.grid_size + half,
        )
    }
}

/// Enemy route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub waypoints: Vec<Position>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            waypoints: DEFAULT_PATH
                .iter()
                .map(|&(x, y)| Position::new(x, y))
                .collect(),
        }
    }
}

impl GameConfig {
    /// Parse a TOML document. Missing values fall back to defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Build the path model described by this config.
    pub fn path_model(&self) -> Result<PathModel, ConfigError> {
        Ok(PathModel::new(self.path.waypoints.clone())?)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )))
            }
        }

        if self.waves.base_count == 0 {
            return Err(ConfigError::Invalid(
                "waves.base_count must be at least 1".into(),
            ));
        }
        // Endless games rely on the cap in `spawn_count`; finite games must fit under it.
        let final_wave = u64::from(self.waves.base_count)
            + u64::from(self.waves.growth) * u64::from(self.waves.max_waves);
        if final_wave > u64::from(MAX_WAVE_SPAWNS) {
            return Err(ConfigError::Invalid(format!(
                "wave {} would schedule {final_wave} spawns, limit is {MAX_WAVE_SPAWNS}",
                self.waves.max_waves
            )));
        }
        positive("waves.stagger_secs", self.waves.stagger_secs)?;
        positive("tower.range", self.tower.range)?;
        positive("tower.fire_rate", self.tower.fire_rate)?;
        positive("tower.upgraded_fire_rate", self.tower.upgraded_fire_rate)?;
        positive("tower.projectile_speed", self.tower.projectile_speed)?;
        positive("tower.projectile_lifetime", self.tower.projectile_lifetime)?;
        positive("tower.hit_radius", self.tower.hit_radius)?;
        if self.tower.damage <= 0 {
            return Err(ConfigError::Invalid(format!(
                "tower.damage must be positive, got {}",
                self.tower.damage
            )));
        }
        if self.tower.upgraded_damage <= self.tower.damage {
            return Err(ConfigError::Invalid(format!(
                "tower.upgraded_damage ({}) must exceed tower.damage ({})",
                self.tower.upgraded_damage, self.tower.damage
            )));
        }
        if self.tower.upgraded_fire_rate >= self.tower.fire_rate {
            return Err(ConfigError::Invalid(format!(
                "tower.upgraded_fire_rate ({}) must be below tower.fire_rate ({})",
                self.tower.upgraded_fire_rate, self.tower.fire_rate
            )));
        }
        positive("field.width", self.field.width)?;
        positive("field.height", self.field.height)?;
        positive("field.grid_size", self.field.grid_size)?;
        if self.economy.starting_lives == 0 {
            return Err(ConfigError::Invalid(
                "economy.starting_lives must be at least 1".into(),
            ));
        }
        self.path_model()?;
        Ok(())
    }
}
