//! Vertical runner physics and horizontal obstacle drift.
//!
//! Screen y grows downward: gravity is positive and a jump is a negative
//! velocity. Only the runner falls; obstacles slide left at a constant speed.

use crate::animation::SpriteAnimation;
use crate::config::PhysicsConfig;

/// Vertical motion state of the runner. Grounded-ness is not stored; it is
/// derived from position every tick via [`is_airborne`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunnerBody {
    pub velocity_y: f32,
}

/// A sprite sitting exactly on the ground line still counts as airborne for
/// the tick; it sinks by one gravity step and is grounded from then on.
pub fn is_airborne(sprite: &SpriteAnimation, ground_y: f32) -> bool {
    sprite.position.y <= ground_y - sprite.height()
}

impl RunnerBody {
    /// Gravity while airborne, zero velocity on the ground, and a jump
    /// impulse that overrides the grounded snap. `jump` must already be
    /// filtered for game phase; it only takes effect from the ground.
    pub fn apply_forces(&mut self, airborne: bool, jump: bool, physics: &PhysicsConfig, dt: f32) {
        if airborne {
            self.velocity_y += physics.gravity * dt;
        } else {
            self.velocity_y = 0.0;
        }

        if jump && !airborne {
            self.velocity_y = physics.jump_velocity;
        }
    }

    pub fn integrate(&self, sprite: &mut SpriteAnimation, dt: f32) {
        sprite.position.y += self.velocity_y * dt;
    }
}

/// Slide every obstacle horizontally; they ignore gravity.
pub fn scroll_obstacles(obstacles: &mut [SpriteAnimation], velocity_x: f32, dt: f32) {
    for obstacle in obstacles {
        obstacle.position.x += velocity_x * dt;
    }
}
