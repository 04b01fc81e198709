//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy variant. Variants differ only in stats and visual tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Basic,
    Fast,
    Heavy,
    Boss,
}

/// Per-variant enemy stats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub hit_points: i32,
    /// Seconds to walk the whole path.
    pub traverse_secs: f64,
    pub reward: u32,
}

impl EnemyKind {
    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Basic => EnemyStats {
                hit_points: 30,
                traverse_secs: 8.0,
                reward: 10,
            },
            EnemyKind::Fast => EnemyStats {
                hit_points: 20,
                traverse_secs: 5.0,
                reward: 12,
            },
            EnemyKind::Heavy => EnemyStats {
                hit_points: 80,
                traverse_secs: 12.0,
                reward: 20,
            },
            EnemyKind::Boss => EnemyStats {
                hit_points: 250,
                traverse_secs: 16.0,
                reward: 75,
            },
        }
    }

    /// Short tag for renderers and logs.
    pub fn tag(self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Fast => "fast",
            EnemyKind::Heavy => "heavy",
            EnemyKind::Boss => "boss",
        }
    }
}

/// Tower upgrade level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerLevel {
    #[default]
    One,
    Two,
}

impl TowerLevel {
    /// Next level, if any.
    pub fn next(self) -> Option<TowerLevel> {
        match self {
            TowerLevel::One => Some(TowerLevel::Two),
            TowerLevel::Two => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            TowerLevel::One => 1,
            TowerLevel::Two => 2,
        }
    }
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation running (possibly between waves).
    #[default]
    Active,
    /// Lives reached zero. Only a reset leaves this phase.
    GameOver,
    /// Final wave cleared. Only a reset leaves this phase.
    Victory,
}

impl GamePhase {
    /// Whether the phase accepts no commands other than reset.
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}
