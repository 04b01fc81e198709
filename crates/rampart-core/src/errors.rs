//! Error and rejection types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a player command was turned into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Rejection {
    /// Not enough money for the action.
    InsufficientFunds { cost: u32, available: u32 },
    /// Placement point is within clearance of a path segment.
    TooCloseToPath,
    /// Placement point is within clearance of an existing tower.
    TooCloseToTower,
    /// Placement point lies outside the playfield.
    OutOfBounds,
    /// No tower with this id exists.
    UnknownTower { tower_id: u32 },
    /// Tower is already at its highest level.
    MaxLevel { tower_id: u32 },
    /// The game has ended; only reset is accepted.
    GameOver,
    /// All configured waves have been started.
    NoWavesRemaining,
    /// Time scale was NaN or infinite.
    InvalidTimeScale,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::InsufficientFunds { cost, available } => {
                write!(f, "insufficient funds: need {cost}, have {available}")
            }
            Rejection::TooCloseToPath => write!(f, "too close to the path"),
            Rejection::TooCloseToTower => write!(f, "too close to another tower"),
            Rejection::OutOfBounds => write!(f, "outside the playfield"),
            Rejection::UnknownTower { tower_id } => write!(f, "no tower with id {tower_id}"),
            Rejection::MaxLevel { tower_id } => {
                write!(f, "tower {tower_id} is already fully upgraded")
            }
            Rejection::GameOver => write!(f, "game has ended"),
            Rejection::NoWavesRemaining => write!(f, "no waves remaining"),
            Rejection::InvalidTimeScale => write!(f, "time scale must be a finite number"),
        }
    }
}

impl std::error::Error for Rejection {}

/// Error building a path from waypoints.
#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    /// Fewer than two waypoints.
    TooFewWaypoints { count: usize },
    /// All waypoints coincide, so the path has no length.
    ZeroLength,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::TooFewWaypoints { count } => {
                write!(f, "path needs at least 2 waypoints, got {count}")
            }
            PathError::ZeroLength => write!(f, "path has zero length"),
        }
    }
}

impl std::error::Error for PathError {}

/// Error loading or validating a game configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    Io(std::io::Error),
    /// Config file is not valid TOML for `GameConfig`.
    Parse(toml::de::Error),
    /// A value is out of range.
    Invalid(String),
    /// The configured path is unusable.
    Path(PathError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
            ConfigError::Path(e) => write!(f, "invalid path: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Path(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<PathError> for ConfigError {
    fn from(e: PathError) -> Self {
        ConfigError::Path(e)
    }
}
