//! Collision detection and response
//!
//! Terrain uses the player's bounding square and resolves along the side of
//! least penetration. Spike traps are triangles, where a bounding box would
//! trigger in the empty corners, so they get a geometric test instead.

use glam::Vec2;

use super::bounds::Bounds;
use super::player::Player;
use crate::consts::SPIKE_BASE_ANGLE_DEG;

/// Which tile side a resolution pushed the player out of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Summary of one terrain pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerrainContact {
    /// Landed on at least one tile top
    pub grounded: bool,
    /// Hit a tile from below
    pub hit_ceiling: bool,
    /// Pushed out of a tile side
    pub hit_wall: bool,
}

/// Penetration depth of `player` into each side of `tile`
#[derive(Debug, Clone, Copy)]
pub(crate) struct Overlaps {
    top: f32,
    bottom: f32,
    left: f32,
    right: f32,
}

impl Overlaps {
    pub(crate) fn between(player: &Bounds, tile: &Bounds) -> Self {
        Self {
            top: player.bottom() - tile.top(),
            bottom: tile.bottom() - player.top(),
            left: player.right() - tile.left(),
            right: tile.right() - player.left(),
        }
    }

    /// Smallest of the four depths
    pub(crate) fn min(&self) -> f32 {
        self.top.min(self.bottom).min(self.left.min(self.right))
    }
}

/// Resolve one tile against the player. Returns the side the player was
/// pushed out of, or `None` when the shallowest side is not one the player is
/// moving into.
pub fn resolve_tile(player: &mut Player, tile: &Bounds) -> Option<Side> {
    let edges = player.edges();
    if !edges.intersects(tile) {
        return None;
    }

    let overlaps = Overlaps::between(&edges, tile);
    let min = overlaps.min();
    let r = player.radius;

    if min == overlaps.top && player.vel.y >= 0.0 {
        player.pos.y = tile.top() - r;
        player.stop_vertical();
        Some(Side::Top)
    } else if min == overlaps.bottom && player.vel.y < 0.0 {
        player.pos.y = tile.bottom() + r;
        player.stop_vertical();
        Some(Side::Bottom)
    } else if min == overlaps.left && player.vel.x > 0.0 {
        player.pos.x = tile.left() - r;
        player.stop_horizontal();
        Some(Side::Left)
    } else if min == overlaps.right && player.vel.x < 0.0 {
        player.pos.x = tile.right() + r;
        player.stop_horizontal();
        Some(Side::Right)
    } else {
        None
    }
}

/// Resolve the player against every impassable tile of a room.
///
/// Edges are recomputed after each resolution. Grounded state is rebuilt
/// from scratch: it is true only if some tile top was landed on this pass.
pub fn resolve_terrain(player: &mut Player, terrain: &[Bounds]) -> TerrainContact {
    let mut contact = TerrainContact::default();

    for tile in terrain {
        match resolve_tile(player, tile) {
            Some(Side::Top) => contact.grounded = true,
            Some(Side::Bottom) => contact.hit_ceiling = true,
            Some(Side::Left | Side::Right) => contact.hit_wall = true,
            None => {}
        }
    }

    player.on_ground = contact.grounded;
    contact
}

/// Circle versus upward spike.
///
/// Measures from the centre of the triangle's base to the circle centre,
/// then uses the law of sines to find how far the triangle's edge reaches
/// along that bearing. `trap_center` is the centre of the triangle's
/// bounding square.
pub fn circle_hits_spike(center: Vec2, radius: f32, trap_center: Vec2, size: f32) -> bool {
    let base_y = trap_center.y + size / 2.0;
    let adjacent = (center.x - trap_center.x).abs();
    let opposite = (base_y - center.y).abs();

    let theta = opposite.atan2(adjacent);
    let dist_to_circle_edge = opposite.hypot(adjacent) - radius;

    let alpha = SPIKE_BASE_ANGLE_DEG.to_radians();
    let beta = std::f32::consts::PI - (alpha + theta);
    let dist_to_triangle_edge = (size / 2.0) * (alpha.sin() / beta.sin());

    dist_to_circle_edge <= dist_to_triangle_edge
}
