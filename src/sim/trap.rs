//! Spike traps
//!
//! Traps are upward-pointing isosceles triangles. Damage is gated by a
//! per-trap cooldown that recharges every frame whether or not the player is
//! touching it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::collision::circle_hits_spike;
use super::player::Player;
use crate::consts::*;

/// Patrol state of a moving spike
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Patrol {
    /// +1 right, -1 left
    pub direction: f32,
    pub move_speed: f32,
    /// Seconds since the last turn
    pub turn_cooldown: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrapKind {
    Spike,
    Moving(Patrol),
}

/// A spike trap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trap {
    /// Centre of the triangle's bounding square
    pub center: Vec2,
    pub size: f32,
    pub damage: u32,
    /// Seconds since damage was last applied
    pub cooldown: f32,
    pub kind: TrapKind,
}

impl Trap {
    /// Stationary spike
    pub fn spike(center: Vec2, size: f32) -> Self {
        Self {
            center,
            size,
            damage: SPIKE_DAMAGE,
            cooldown: DAMAGE_COOLDOWN,
            kind: TrapKind::Spike,
        }
    }

    /// Spike patrolling between turn markers, starting leftward
    pub fn moving(center: Vec2, size: f32) -> Self {
        Self {
            center,
            size,
            damage: MOVING_SPIKE_DAMAGE,
            cooldown: DAMAGE_COOLDOWN,
            kind: TrapKind::Moving(Patrol {
                direction: -1.0,
                move_speed: MOVING_SPIKE_SPEED,
                turn_cooldown: TURN_COOLDOWN,
            }),
        }
    }

    /// Bounding square of the triangle
    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.center, Vec2::splat(self.size / 2.0))
    }

    /// Triangle corners: bottom-left, bottom-right, apex
    pub fn vertices(&self) -> [Vec2; 3] {
        let half = self.size / 2.0;
        [
            self.center + Vec2::new(-half, half),
            self.center + Vec2::new(half, half),
            self.center + Vec2::new(0.0, -half),
        ]
    }

    pub fn collides(&self, player: &Player) -> bool {
        circle_hits_spike(player.pos, player.radius, self.center, self.size)
    }

    /// Damage the player if touching and recharged, then advance timers and
    /// (for moving spikes) position. Returns whether damage was applied.
    pub fn update(&mut self, player: &mut Player, dt: f32) -> bool {
        let hit = self.cooldown >= DAMAGE_COOLDOWN && self.collides(player);
        if hit {
            player.apply_damage(self.damage);
            self.cooldown = 0.0;
            log::debug!("Trap at {:?} dealt {} damage", self.center, self.damage);
        }
        self.cooldown += dt;

        if let TrapKind::Moving(patrol) = &mut self.kind {
            self.center.x += patrol.move_speed * patrol.direction * dt * FRAME_RATE_SCALE;
            patrol.turn_cooldown += dt;
        }
        hit
    }

    /// Reverse a moving spike if its turn cooldown has elapsed.
    /// Stationary spikes ignore this.
    pub fn turn(&mut self) -> bool {
        match &mut self.kind {
            TrapKind::Moving(patrol) if patrol.turn_cooldown >= TURN_COOLDOWN => {
                patrol.direction = -patrol.direction;
                patrol.turn_cooldown = 0.0;
                true
            }
            _ => false,
        }
    }

    /// Turn if the trap currently overlaps any turn marker
    pub fn turn_if_marked(&mut self, markers: &[Bounds]) -> bool {
        if !matches!(self.kind, TrapKind::Moving(_)) {
            return false;
        }
        let bounds = self.bounds();
        if markers.iter().any(|m| bounds.intersects(m)) {
            self.turn()
        } else {
            false
        }
    }
}
