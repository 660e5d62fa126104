//! Lario - a tile-based platformer simulation core
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (physics, collisions, rooms, game state)
//! - `config`: Session configuration loaded from JSON
//! - `error`: Level loading and generation errors

pub mod config;
pub mod error;
pub mod sim;

pub use config::GameConfig;
pub use error::LevelError;

/// Game configuration constants
pub mod consts {
    /// Edge length of one grid cell in pixels
    pub const TILE_SIZE: f32 = 30.0;

    /// Reference frame rate the physics constants were tuned for.
    /// Per-frame quantities are multiplied by `dt * FRAME_RATE_SCALE`.
    pub const FRAME_RATE_SCALE: f32 = 60.0;

    /// Fixed simulation timestep (seconds)
    pub const SIM_DT: f32 = 1.0 / FRAME_RATE_SCALE;

    /// Player defaults
    pub const GRAVITY: f32 = 0.8;
    pub const MAX_VELOCITY: f32 = 10.0;
    pub const JUMP_FORCE: f32 = -17.0; // Clears four tiles
    pub const MOVE_SPEED: f32 = 3.5; // Clears four-wide gaps
    pub const PLAYER_MAX_HEALTH: u32 = 100;

    /// Seconds between two damage applications from the same source
    pub const DAMAGE_COOLDOWN: f32 = 1.0;
    /// Seconds a moving spike ignores turn markers after turning
    pub const TURN_COOLDOWN: f32 = 1.0;

    /// Trap defaults
    pub const SPIKE_DAMAGE: u32 = 15;
    pub const MOVING_SPIKE_DAMAGE: u32 = 10;
    pub const MOVING_SPIKE_SPEED: f32 = 1.0;
    /// Base angle of the modeled isosceles triangle (2:1 base to height)
    pub const SPIKE_BASE_ANGLE_DEG: f32 = 63.44;

    /// Enemy defaults
    pub const ENEMY_DAMAGE: u32 = 10;
    pub const ENEMY_SPEED: f32 = 1.0;

    /// Score weights
    pub const SCORE_PER_SECOND: u64 = 10;
    pub const SCORE_PER_COIN: u64 = 50;
    pub const SCORE_PER_HEALTH: u64 = 5;
}

/// Convert a grid coordinate to its pixel offset
#[inline]
pub fn grid_to_pixel(index: usize) -> f32 {
    index as f32 * consts::TILE_SIZE
}

/// Convert a pixel coordinate to the grid cell containing it.
/// Negative coordinates return `None`.
#[inline]
pub fn pixel_to_grid(pixel: f32) -> Option<usize> {
    if pixel < 0.0 || !pixel.is_finite() {
        None
    } else {
        Some((pixel / consts::TILE_SIZE).floor() as usize)
    }
}
