//! Grid cells of a room

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use crate::consts::TILE_SIZE;
use crate::grid_to_pixel;

/// What a cell is drawn as / collides as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    Terrain,
    #[default]
    Background,
    Key,
    Exit,
    Turn,
}

/// Entity spawned from a cell when the room loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Spawn {
    Player,
    Coin,
    Key,
    Spike,
    MovingSpike,
    Enemy,
}

/// A single immutable grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub passable: bool,
    pub spawn: Option<Spawn>,
}

impl Tile {
    pub fn new(kind: TileKind, spawn: Option<Spawn>) -> Self {
        Self {
            kind,
            passable: kind != TileKind::Terrain,
            spawn,
        }
    }

    pub fn background() -> Self {
        Self::new(TileKind::Background, None)
    }

    /// Decode one character of a level definition
    pub fn from_char(c: char) -> Self {
        match c {
            'X' => Self::new(TileKind::Terrain, None),
            'P' => Self::new(TileKind::Background, Some(Spawn::Player)),
            'C' => Self::new(TileKind::Background, Some(Spawn::Coin)),
            'K' => Self::new(TileKind::Key, Some(Spawn::Key)),
            'A' => Self::new(TileKind::Exit, None),
            'S' => Self::new(TileKind::Background, Some(Spawn::Spike)),
            'M' => Self::new(TileKind::Background, Some(Spawn::MovingSpike)),
            'T' => Self::new(TileKind::Turn, None),
            'E' => Self::new(TileKind::Background, Some(Spawn::Enemy)),
            _ => Self::background(),
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::background()
    }
}

/// Pixel bounds of grid cell `(x, y)`
pub fn tile_bounds(x: usize, y: usize) -> Bounds {
    Bounds::from_top_left(
        Vec2::new(grid_to_pixel(x), grid_to_pixel(y)),
        Vec2::splat(TILE_SIZE),
    )
}

/// Pixel centre of grid cell `(x, y)`
pub fn tile_center(x: usize, y: usize) -> Vec2 {
    Vec2::new(
        grid_to_pixel(x) + TILE_SIZE / 2.0,
        grid_to_pixel(y) + TILE_SIZE / 2.0,
    )
}
