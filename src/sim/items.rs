//! Collectibles and the exit door

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::player::Player;
use crate::consts::TILE_SIZE;

/// A coin, collected by touching it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub center: Vec2,
    pub radius: f32,
    pub collected: bool,
}

impl Coin {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            radius: TILE_SIZE / 3.0,
            collected: false,
        }
    }

    /// Whether the player is close enough to pick this coin up
    pub fn check_collection(&self, player: &Player) -> bool {
        if self.collected {
            return false;
        }
        self.center.distance(player.pos) < player.radius + self.radius
    }

    pub fn collect(&mut self) {
        self.collected = true;
    }
}

/// The key that unlocks the exit. Picking it up costs coins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Key {
    pub bounds: Bounds,
    pub required_coins: u32,
    pub collected: bool,
}

impl Key {
    /// Key centred on `center`, half a tile wide and one and a half times as tall
    pub fn new(center: Vec2, required_coins: u32) -> Self {
        let width = TILE_SIZE / 2.0;
        let size = Vec2::new(width, width * 1.5);
        Self {
            bounds: Bounds::from_center(center, size / 2.0),
            required_coins,
            collected: false,
        }
    }

    /// Proximity only; the coin requirement is checked by the caller
    pub fn check_collection(&self, player: &Player) -> bool {
        if self.collected {
            return false;
        }
        let reach = self.bounds.width().max(self.bounds.height()) / 2.0;
        self.bounds.center().distance(player.pos) < player.radius + reach
    }

    pub fn collect(&mut self) {
        self.collected = true;
    }
}

/// The exit door. It never gets collected; it ends the run once the key is held.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exit {
    pub bounds: Bounds,
}

impl Exit {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }

    pub fn check_interaction(&self, player: &Player, has_key: bool) -> bool {
        has_key && player.edges().intersects(&self.bounds)
    }
}
