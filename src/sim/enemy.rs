//! Walking enemies
//!
//! An enemy walks along its tile row and turns around at walls and ledges.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::player::Player;
use super::room::TileGrid;
use crate::consts::*;
use crate::pixel_to_grid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub bounds: Bounds,
    /// +1 right, -1 left
    pub direction: f32,
    pub move_speed: f32,
    pub damage: u32,
    /// Seconds since damage was last applied
    pub cooldown: f32,
}

impl Enemy {
    /// One-tile enemy with its top-left corner at `top_left`, walking right
    pub fn new(top_left: Vec2) -> Self {
        Self {
            bounds: Bounds::from_top_left(top_left, Vec2::splat(TILE_SIZE)),
            direction: 1.0,
            move_speed: ENEMY_SPEED,
            damage: ENEMY_DAMAGE,
            cooldown: DAMAGE_COOLDOWN,
        }
    }

    /// Distance walked in a frame of `dt` seconds
    fn step(&self, dt: f32) -> f32 {
        self.move_speed * dt * FRAME_RATE_SCALE
    }

    /// Look one step of `dt` ahead: turn if there is no floor ahead or a wall
    /// in the way. Leaving the grid counts as both.
    pub fn should_turn(&self, grid: &TileGrid, dt: f32) -> bool {
        let step = self.step(dt);
        let ahead_x = if self.direction > 0.0 {
            self.bounds.right() + step
        } else {
            self.bounds.left() - step
        };
        let Some(col) = pixel_to_grid(ahead_x) else {
            return true;
        };

        let body = pixel_to_grid(self.bounds.center().y).and_then(|row| grid.tile_at(col, row));
        let foot = pixel_to_grid(self.bounds.bottom() + TILE_SIZE / 2.0)
            .and_then(|row| grid.tile_at(col, row));

        let wall_ahead = body.is_none_or(|t| !t.passable);
        let ledge_ahead = foot.is_none_or(|t| t.passable);
        wall_ahead || ledge_ahead
    }

    /// Turn if needed, walk, recharge
    pub fn update(&mut self, grid: &TileGrid, dt: f32) {
        if self.should_turn(grid, dt) {
            self.direction = -self.direction;
        }
        let dx = self.step(dt) * self.direction;
        self.bounds = self.bounds.translate(Vec2::new(dx, 0.0));
        self.cooldown += dt;
    }

    /// Contact damage, gated by the cooldown. Returns whether damage was applied.
    pub fn check_interaction(&mut self, player: &mut Player) -> bool {
        if self.cooldown >= DAMAGE_COOLDOWN && self.bounds.intersects(&player.edges()) {
            player.apply_damage(self.damage);
            self.cooldown = 0.0;
            log::debug!("Enemy dealt {} damage", self.damage);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_to_pixel;

    const DT: f32 = 1.0 / 60.0;

    fn grid(rows: &[&str]) -> TileGrid {
        TileGrid::parse(&rows.join("\n"))
    }

    fn enemy_at(col: usize, row: usize) -> Enemy {
        Enemy::new(Vec2::new(grid_to_pixel(col), grid_to_pixel(row)))
    }

    #[test]
    fn test_walks_on_floor() {
        let g = grid(&[".....", "XXXXX"]);
        let mut e = enemy_at(1, 0);
        assert!(!e.should_turn(&g, DT));
        e.update(&g, DT);
        assert_eq!(e.direction, 1.0);
        assert!((e.bounds.left() - 31.0).abs() < 1e-4);
    }

    #[test]
    fn test_turns_at_ledge() {
        let g = grid(&[".....", "XXX.."]);
        let mut e = enemy_at(2, 0);
        e.bounds = e.bounds.translate(Vec2::new(-1.5, 0.0));
        assert!(!e.should_turn(&g, DT));

        let mut e = enemy_at(2, 0);
        assert!(e.should_turn(&g, DT));
        e.update(&g, DT);
        assert_eq!(e.direction, -1.0);
        assert!(e.bounds.left() < 60.0);
    }

    #[test]
    fn test_turns_at_wall() {
        let g = grid(&["...X.", "XXXXX"]);
        let e = enemy_at(2, 0);
        assert!(e.should_turn(&g, DT));
    }

    #[test]
    fn test_turns_at_grid_edge() {
        let g = grid(&["...", "XXX"]);
        let mut e = enemy_at(0, 0);
        e.direction = -1.0;
        assert!(e.should_turn(&g, DT));
    }

    #[test]
    fn test_contact_damage_cooldown() {
        let mut e = enemy_at(0, 0);
        let mut player = Player::new(Vec2::new(40.0, 15.0), 15.0);
        assert!(e.check_interaction(&mut player));
        assert!(!e.check_interaction(&mut player));
        assert_eq!(player.health, 100 - ENEMY_DAMAGE);

        let g = grid(&[".....", "XXXXX"]);
        e.update(&g, 1.0);
        player.pos = e.bounds.center();
        assert!(e.check_interaction(&mut player));
        assert_eq!(player.health, 100 - 2 * ENEMY_DAMAGE);
    }

    #[test]
    fn test_never_walks_into_wall_on_long_frames() {
        // 4.2 px per frame does not divide the 30 px tile
        let g = grid(&["......X.", "XXXXXXXX"]);
        let wall_left = grid_to_pixel(6);
        let mut e = enemy_at(0, 0);
        for _ in 0..200 {
            e.update(&g, 0.07);
            assert!(e.bounds.right() <= wall_left, "right edge {}", e.bounds.right());
            assert!(e.bounds.left() >= 0.0, "left edge {}", e.bounds.left());
        }
    }
}
