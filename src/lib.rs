//! Altimate Curling - two-player turn-based curling simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (stones, walls, collisions, turn logic, scoring)
//! - `config`: Match setup (seed, stone kinds per throw slot, tick rate)
//! - `clock`: Fixed timestep accumulator for presentation layers
//! - `error`: Error taxonomy for illegal inputs and bad setups

pub mod clock;
pub mod config;
pub mod error;
pub mod sim;

pub use clock::FixedStepClock;
pub use config::MatchConfig;
pub use error::{CurlingError, Result};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical tick rate of the physics and turn logic (Hz)
    pub const TICK_RATE_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Rink dimensions (rink units, origin at a corner)
    pub const RINK_WIDTH: f32 = 100.0;
    pub const RINK_HEIGHT: f32 = 30.0;
    /// House center sits this far in from the far wall
    pub const HOUSE_OFFSET: f32 = 15.0;
    /// House rings, innermost first (rendering only)
    pub const HOUSE_RING_RADII: [f32; 3] = [3.0, 6.0, 9.0];

    /// Stones are released at this x, at the aimed vertical offset
    pub const LAUNCH_X: f32 = 1.0;
    /// Converts the strength UI unit into rink units per second
    pub const BASE_SPEED_SCALE: f32 = 3.0;

    /// Throws per player in a standard match
    pub const THROWS_PER_PLAYER: usize = 8;
    /// Settle dwell after each throw (5 seconds at 60 Hz)
    pub const SETTLE_TICKS: u32 = 300;

    /// Aim ranges
    pub const VERTICAL_OFFSET_RANGE: (f32, f32) = (0.0, 30.0);
    pub const STRENGTH_RANGE: (f32, f32) = (1.0, 10.0);
    pub const ANGLE_RANGE: (f32, f32) = (-1.2, 1.2);

    /// Per-press aim steps used by keyboard glue
    pub const VERTICAL_OFFSET_STEP: f32 = 1.0;
    pub const STRENGTH_STEP: f32 = 0.2;
    pub const ANGLE_STEP: f32 = 0.05;

    /// Power gauge ramp: add then multiply each aiming tick
    pub const GAUGE_INCREMENT: f32 = 0.01;
    pub const GAUGE_GROWTH: f32 = 1.03;
    /// Strength multiplier is `gauge * SPAN + FLOOR`
    pub const GAUGE_STRENGTH_SPAN: f32 = 0.7;
    pub const GAUGE_STRENGTH_FLOOR: f32 = 0.3;
    /// Angle jitter at gauge 0 (radians), shrinking to 0 at gauge 1
    pub const LAUNCH_JITTER: f32 = 0.4;

    /// Distances closer than this count as ties when judging
    pub const DISTANCE_EPSILON: f32 = 1e-5;
}

/// Rotate the unit x vector by `-angle` radians.
///
/// Aim angles are clockwise-positive in rink coordinates, so a positive
/// angle tilts the shot toward smaller y.
#[inline]
pub fn rotate_unit_x(angle: f32) -> Vec2 {
    Vec2::from_angle(-angle)
}

/// Initial stone velocity for a released shot
#[inline]
pub fn launch_velocity(strength: f32, angle: f32) -> Vec2 {
    strength * consts::BASE_SPEED_SCALE * rotate_unit_x(angle)
}
