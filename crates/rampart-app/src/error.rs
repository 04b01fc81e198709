//! Errors surfaced by the control layer.

use std::fmt;

use rampart_core::errors::ConfigError;

#[derive(Debug)]
pub enum AppError {
    /// `start_simulation` called while a game loop is live.
    AlreadyRunning,
    /// No game loop has been started.
    NotStarted,
    /// The game loop thread has exited.
    Disconnected,
    /// A shared lock was poisoned by a panicking thread.
    LockPoisoned,
    /// The engine rejected its configuration.
    Config(ConfigError),
    /// The game loop thread could not be spawned.
    Spawn(std::io::Error),
    /// Snapshot serialization failed.
    Serialize(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::AlreadyRunning => write!(f, "simulation already running"),
            AppError::NotStarted => write!(f, "simulation not started"),
            AppError::Disconnected => write!(f, "game loop has stopped"),
            AppError::LockPoisoned => write!(f, "shared state lock poisoned"),
            AppError::Config(e) => write!(f, "{e}"),
            AppError::Spawn(e) => write!(f, "failed to spawn game loop thread: {e}"),
            AppError::Serialize(e) => write!(f, "failed to serialize snapshot: {e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::Spawn(e) => Some(e),
            AppError::Serialize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl<T> From<std::sync::PoisonError<T>> for AppError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        AppError::LockPoisoned
    }
}
