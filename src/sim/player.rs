//! The player-controlled circle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use crate::consts::*;

/// Discrete controls mapped from key events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Pause,
}

/// A key going down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Press(Action),
    Release(Action),
}

/// Held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputState {
    /// Record a key going down (`held = true`) or up. `Pause` is not a
    /// movement key and is ignored here.
    pub fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::MoveLeft => self.left = held,
            Action::MoveRight => self.right = held,
            Action::Jump => self.jump = held,
            Action::Pause => {}
        }
    }
}

/// The player: a circle with velocity, health and held input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub vel: Vec2,
    pub on_ground: bool,
    pub health: u32,
    pub alive: bool,
    pub input: InputState,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            vel: Vec2::ZERO,
            on_ground: true,
            health: PLAYER_MAX_HEALTH,
            alive: true,
            input: InputState::default(),
        }
    }

    /// Advance one frame of input-driven motion under gravity
    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }

        // Instantaneous horizontal velocity, left wins over right
        self.vel.x = if self.input.left {
            -MOVE_SPEED
        } else if self.input.right {
            MOVE_SPEED
        } else {
            0.0
        };

        if self.input.jump && self.on_ground {
            self.vel.y = JUMP_FORCE;
            self.on_ground = false;
        }

        let frames = dt * FRAME_RATE_SCALE;
        if !self.on_ground {
            self.vel.y = (self.vel.y + GRAVITY * frames).min(MAX_VELOCITY);
        }

        self.pos += self.vel * frames;
    }

    /// Subtract health; reaching zero kills the player for good
    pub fn apply_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.alive = false;
        }
    }

    /// Drop held keys and stop moving (pause / interrupting UI)
    pub fn reset_input_state(&mut self) {
        self.input = InputState::default();
        self.vel = Vec2::ZERO;
    }

    /// Bounding square of the circle, used for terrain and AABB tests
    pub fn edges(&self) -> Bounds {
        Bounds::from_center(self.pos, Vec2::splat(self.radius))
    }

    pub fn stop_vertical(&mut self) {
        self.vel.y = 0.0;
    }

    pub fn stop_horizontal(&mut self) {
        self.vel.x = 0.0;
    }
}
