//! Read-only view of a session for presentation
//!
//! Everything a renderer or HUD needs, flattened into plain data that
//! serializes to JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::state::{GamePhase, GameState, Outcome};
use super::tile::TileKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub health: u32,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomView {
    pub name: String,
    pub width: usize,
    pub height: usize,
    /// Row-major tile kinds
    pub tiles: Vec<TileKind>,
    /// Centres and radii of uncollected coins
    pub coins: Vec<(Vec2, f32)>,
    /// Present until picked up
    pub key: Option<Bounds>,
    pub exit: Option<Bounds>,
    /// Trap triangles: bottom-left, bottom-right, apex
    pub traps: Vec<[Vec2; 3]>,
    pub enemies: Vec<Bounds>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub coin_count: u32,
    pub key_collected: bool,
    pub time_remaining: u32,
    pub paused: bool,
    pub room_index: usize,
    pub room_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub player: PlayerView,
    pub room: RoomView,
    pub hud: Hud,
    pub outcome: Option<Outcome>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let room = state.active_room();
        let player = &state.player;

        Self {
            phase: state.phase,
            player: PlayerView {
                pos: player.pos,
                radius: player.radius,
                health: player.health,
                alive: player.alive,
            },
            room: RoomView {
                name: room.name.clone(),
                width: room.width(),
                height: room.height(),
                tiles: room.grid.iter().map(|(_, _, tile)| tile.kind).collect(),
                coins: room
                    .coins
                    .iter()
                    .filter(|c| !c.collected)
                    .map(|c| (c.center, c.radius))
                    .collect(),
                key: room
                    .key
                    .as_ref()
                    .filter(|k| !k.collected)
                    .map(|k| k.bounds),
                exit: room.exit.as_ref().map(|e| e.bounds),
                traps: room.traps.iter().map(|t| t.vertices()).collect(),
                enemies: room.enemies.iter().map(|e| e.bounds).collect(),
            },
            hud: Hud {
                coin_count: state.coin_count,
                key_collected: state.key_collected,
                time_remaining: state.time_remaining,
                paused: state.is_paused(),
                room_index: state.active_index,
                room_count: state.rooms.len(),
            },
            outcome: state.outcome(),
        }
    }
}
