//! Stones and stone kinds
//!
//! A stone kind is a row in a small parameter table rather than a type of
//! its own; physics code only ever reads `StoneParams`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::RigidBody;
use crate::error::{CurlingError, Result};

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Player whose throw it is at `turn_index`
    pub fn for_turn(turn_index: u32) -> Self {
        if turn_index % 2 == 0 {
            PlayerId::One
        } else {
            PlayerId::Two
        }
    }

    /// 0 or 1, for table lookups
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

/// Physical and display parameters of a stone kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StoneParams {
    pub mass: f32,
    pub radius: f32,
    /// Speed lost per tick along the direction of travel
    pub friction_decay: f32,
    /// Restitution in [0, 1]
    pub elasticity: f32,
    pub display_name: &'static str,
}

impl StoneParams {
    /// Reject parameter sets that would corrupt the simulation
    pub fn validate(&self) -> Result<()> {
        if !(self.mass > 0.0) {
            return Err(CurlingError::InvalidConfig(format!(
                "{}: mass must be positive, got {}",
                self.display_name, self.mass
            )));
        }
        if !(self.radius > 0.0) {
            return Err(CurlingError::InvalidConfig(format!(
                "{}: radius must be positive, got {}",
                self.display_name, self.radius
            )));
        }
        if !(self.friction_decay >= 0.0) {
            return Err(CurlingError::InvalidConfig(format!(
                "{}: friction decay must be non-negative, got {}",
                self.display_name, self.friction_decay
            )));
        }
        if !(0.0..=1.0).contains(&self.elasticity) {
            return Err(CurlingError::InvalidConfig(format!(
                "{}: elasticity must be within [0, 1], got {}",
                self.display_name, self.elasticity
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StoneKind {
    #[default]
    Normal,
    Heavy,
}

const NORMAL_PARAMS: StoneParams = StoneParams {
    mass: 1.0,
    radius: 3.0,
    friction_decay: 0.05,
    elasticity: 1.0,
    display_name: "Normal Stone",
};

const HEAVY_PARAMS: StoneParams = StoneParams {
    mass: 3.0,
    display_name: "Heavy Stone",
    ..NORMAL_PARAMS
};

impl StoneKind {
    pub const ALL: [StoneKind; 2] = [StoneKind::Normal, StoneKind::Heavy];

    pub fn params(self) -> StoneParams {
        match self {
            StoneKind::Normal => NORMAL_PARAMS,
            StoneKind::Heavy => HEAVY_PARAMS,
        }
    }

    pub fn display_name(self) -> &'static str {
        self.params().display_name
    }
}

/// A thrown stone
#[derive(Debug, Clone, Serialize)]
pub struct Stone {
    pub body: RigidBody,
    pub params: StoneParams,
    pub owner: PlayerId,
    pub kind: StoneKind,
}

impl Stone {
    pub fn new(kind: StoneKind, owner: PlayerId, position: Vec2, velocity: Vec2) -> Self {
        Self::with_params(kind, kind.params(), owner, position, velocity)
    }

    /// Build a stone with explicit parameters (tests and tuning)
    pub fn with_params(
        kind: StoneKind,
        params: StoneParams,
        owner: PlayerId,
        position: Vec2,
        velocity: Vec2,
    ) -> Self {
        Self {
            body: RigidBody::new(position, velocity, params.mass),
            params,
            owner,
            kind,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.params.radius
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        !self.body.is_at_rest()
    }

    /// Linear ice drag: lose a fixed amount of speed along the direction of
    /// travel, stopping dead rather than reversing.
    pub fn apply_friction(&mut self) {
        let speed = self.body.speed();
        if speed == 0.0 {
            return;
        }
        if speed <= self.params.friction_decay {
            self.body.velocity = Vec2::ZERO;
            return;
        }
        let direction = self.body.velocity / speed;
        self.body.velocity -= direction * self.params.friction_decay;
    }
}
