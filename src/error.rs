//! Errors raised while building the room sequence

use thiserror::Error;

/// Configuration problems detected when a session starts.
///
/// Unreadable level files are not reported here directly: they load as
/// degenerate rooms and surface as [`LevelError::DegenerateRoom`] once the
/// session tries to use them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("room count must be at least 3 (start, key and end rooms), got {count}")]
    InvalidRoomCount { count: usize },

    #[error("level pool exhausted: {needed} filler rooms needed, {available} available")]
    PoolExhausted { needed: usize, available: usize },

    #[error("room '{name}' has no tiles (missing or empty level file?)")]
    DegenerateRoom { name: String },

    #[error("room '{name}' has no player spawn point")]
    MissingSpawn { name: String },

    #[error("room '{name}' has no key")]
    MissingKey { name: String },

    #[error("room '{name}' has no exit")]
    MissingExit { name: String },
}
