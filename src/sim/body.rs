//! Point-mass rigid body
//!
//! Stones never rotate, so a body is just mass, position and velocity.
//! The disc radius lives on the stone for collision and rendering.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Speeds at or below this are treated as stopped
pub const REST_SPEED: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    /// Rink coordinates, origin at the rink corner
    pub position: Vec2,
    /// Rink units per second
    pub velocity: Vec2,
    mass: f32,
}

impl RigidBody {
    pub fn new(position: Vec2, velocity: Vec2, mass: f32) -> Self {
        debug_assert!(mass > 0.0, "body mass must be positive");
        Self {
            position,
            velocity,
            mass,
        }
    }

    /// Mass is fixed at creation
    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        1.0 / self.mass
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.speed() <= REST_SPEED
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Explicit Euler position update
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}
