//! Session configuration
//!
//! Loaded from a JSON file at startup. Every field has a default, so a
//! partial file only overrides what it names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LevelError;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "LARIO_CONFIG";
/// Config file used when the environment variable is unset
pub const DEFAULT_CONFIG_PATH: &str = "lario.json";

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of rooms in the sequence (start + key + end + fillers)
    pub room_count: usize,
    /// Countdown length in seconds
    pub initial_time_secs: u32,
    /// Coins spent to pick up the key
    pub key_required_coins: u32,

    // === Level files ===
    /// Directory holding the `*.txt` level definitions
    pub levels_dir: PathBuf,
    /// Reserved file name of the first room
    pub start_room: String,
    /// Reserved file name of the room holding the key
    pub key_room: String,
    /// Reserved file name of the last room
    pub end_room: String,

    /// Fixed RNG seed; a random seed is drawn when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            room_count: 6,
            initial_time_secs: 120,
            key_required_coins: 5,

            levels_dir: PathBuf::from("levels"),
            start_room: "playerRoom.txt".to_string(),
            key_room: "keyRoom.txt".to_string(),
            end_room: "endRoom.txt".to_string(),

            seed: None,
        }
    }
}

impl GameConfig {
    /// Load config from the path in `LARIO_CONFIG` (or `lario.json`)
    pub fn load() -> Self {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load config from a file, falling back to defaults if it is missing or
    /// unparseable
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Invalid config {}: {err}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Whether `file_name` is one of the three reserved room names
    pub fn is_reserved(&self, file_name: &str) -> bool {
        file_name == self.start_room || file_name == self.key_room || file_name == self.end_room
    }

    /// Check settings that would make level generation impossible
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.room_count < 3 {
            return Err(LevelError::InvalidRoomCount {
                count: self.room_count,
            });
        }
        Ok(())
    }
}
