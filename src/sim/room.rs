//! Rooms: a tile grid plus the entities spawned in it
//!
//! Level definitions are text grids, one character per tile (see
//! `Tile::from_char`). A room is built once from its definition; afterwards
//! only entity state (collected flags, trap and enemy positions) changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::enemy::Enemy;
use super::items::{Coin, Exit, Key};
use super::player::Player;
use super::tile::{Spawn, Tile, TileKind, tile_bounds, tile_center};
use super::trap::Trap;
use crate::consts::TILE_SIZE;
use crate::grid_to_pixel;

/// Row-major grid of tiles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TileGrid {
    pub width: usize,
    pub height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Decode a level definition. Blank lines are skipped and short rows are
    /// padded with background up to the widest row.
    pub fn parse(source: &str) -> Self {
        let rows: Vec<&str> = source
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::trim_end)
            .collect();

        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let height = rows.len();

        let mut tiles = Vec::with_capacity(width * height);
        for row in &rows {
            let mut count = 0;
            for c in row.chars() {
                tiles.push(Tile::from_char(c));
                count += 1;
            }
            tiles.extend(std::iter::repeat_n(Tile::background(), width - count));
        }

        Self {
            width,
            height,
            tiles,
        }
    }

    /// Tile at grid `(x, y)`, or `None` outside the grid
    pub fn tile_at(&self, x: usize, y: usize) -> Option<&Tile> {
        if x < self.width && y < self.height {
            self.tiles.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Iterate `(x, y, tile)` in row order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Tile)> {
        let width = self.width.max(1);
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, t)| (i % width, i / width, t))
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Where and how big the player starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpawn {
    pub pos: Vec2,
    pub radius: f32,
}

/// One screen of the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub grid: TileGrid,
    /// Impassable tiles, cached for collision passes
    pub terrain: Vec<Bounds>,
    pub turn_markers: Vec<Bounds>,
    pub coins: Vec<Coin>,
    pub traps: Vec<Trap>,
    pub enemies: Vec<Enemy>,
    pub key: Option<Key>,
    pub exit: Option<Exit>,
    pub spawn: Option<PlayerSpawn>,
}

impl Room {
    /// A room with no tiles, standing in for a level that failed to load
    pub fn empty(name: &str) -> Self {
        Self::from_grid(name, TileGrid::default(), 0)
    }

    /// Build a room from level-definition text
    pub fn parse(name: &str, source: &str, key_required_coins: u32) -> Self {
        Self::from_grid(name, TileGrid::parse(source), key_required_coins)
    }

    fn from_grid(name: &str, grid: TileGrid, key_required_coins: u32) -> Self {
        let mut room = Self {
            name: name.to_string(),
            grid: TileGrid::default(),
            terrain: Vec::new(),
            turn_markers: Vec::new(),
            coins: Vec::new(),
            traps: Vec::new(),
            enemies: Vec::new(),
            key: None,
            exit: None,
            spawn: None,
        };

        for (x, y, tile) in grid.iter() {
            match tile.kind {
                TileKind::Terrain => room.terrain.push(tile_bounds(x, y)),
                TileKind::Turn => room.turn_markers.push(tile_bounds(x, y)),
                TileKind::Exit => room.exit = Some(Exit::new(tile_bounds(x, y))),
                TileKind::Background | TileKind::Key => {}
            }

            let center = tile_center(x, y);
            match tile.spawn {
                Some(Spawn::Player) => {
                    room.spawn = Some(PlayerSpawn {
                        pos: center,
                        radius: TILE_SIZE / 2.0,
                    })
                }
                Some(Spawn::Coin) => room.coins.push(Coin::new(center)),
                Some(Spawn::Key) => room.key = Some(Key::new(center, key_required_coins)),
                Some(Spawn::Spike) => room.traps.push(Trap::spike(center, TILE_SIZE)),
                Some(Spawn::MovingSpike) => room.traps.push(Trap::moving(center, TILE_SIZE)),
                Some(Spawn::Enemy) => room
                    .enemies
                    .push(Enemy::new(Vec2::new(grid_to_pixel(x), grid_to_pixel(y)))),
                None => {}
            }
        }

        room.grid = grid;
        room
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height
    }

    pub fn width_px(&self) -> f32 {
        grid_to_pixel(self.grid.width)
    }

    pub fn height_px(&self) -> f32 {
        grid_to_pixel(self.grid.height)
    }

    pub fn tile_at(&self, x: usize, y: usize) -> Option<&Tile> {
        self.grid.tile_at(x, y)
    }

    /// No tiles at all (missing or empty definition)
    pub fn is_degenerate(&self) -> bool {
        self.grid.is_empty()
    }

    /// Update traps and enemies against the player for one frame.
    /// Returns the total damage dealt.
    pub fn update_hazards(&mut self, player: &mut Player, dt: f32) -> u32 {
        let before = player.health;

        for trap in &mut self.traps {
            trap.turn_if_marked(&self.turn_markers);
            if player.alive {
                trap.update(player, dt);
            }
        }

        for enemy in &mut self.enemies {
            enemy.update(&self.grid, dt);
            if player.alive {
                enemy.check_interaction(player);
            }
        }

        before - player.health
    }
}
