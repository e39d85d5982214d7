//! Match state and core turn types
//!
//! Everything the turn controller tracks besides the physics world lives
//! here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::stone::PlayerId;
use crate::consts::*;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Current player is adjusting the shot, gauge is running
    Aiming,
    /// Fixed dwell after a throw while stones move
    Settling,
    /// All throws made; physics frozen
    Finished,
}

/// Adjustable aim parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AimField {
    VerticalOffset,
    Strength,
    Angle,
}

impl AimField {
    /// Inclusive clamp range
    pub fn range(self) -> (f32, f32) {
        match self {
            AimField::VerticalOffset => VERTICAL_OFFSET_RANGE,
            AimField::Strength => STRENGTH_RANGE,
            AimField::Angle => ANGLE_RANGE,
        }
    }

    /// Change applied by one key press
    pub fn step(self) -> f32 {
        match self {
            AimField::VerticalOffset => VERTICAL_OFFSET_STEP,
            AimField::Strength => STRENGTH_STEP,
            AimField::Angle => ANGLE_STEP,
        }
    }
}

/// Final strength and angle after the gauge has been applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReleasedShot {
    pub vertical_offset: f32,
    pub strength: f32,
    pub angle: f32,
}

/// Shot parameters while aiming
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingShot {
    pub vertical_offset: f32,
    pub strength: f32,
    /// Radians, clockwise-positive
    pub angle: f32,
    /// Timing gauge in [0, 1]
    pub power_gauge: f32,
}

impl Default for PendingShot {
    fn default() -> Self {
        Self {
            vertical_offset: 15.0,
            strength: 5.0,
            angle: 0.0,
            power_gauge: 0.0,
        }
    }
}

impl PendingShot {
    pub fn get(&self, field: AimField) -> f32 {
        match field {
            AimField::VerticalOffset => self.vertical_offset,
            AimField::Strength => self.strength,
            AimField::Angle => self.angle,
        }
    }

    /// Add `delta` to a field, clamping into its range. Returns the new value.
    pub fn apply_delta(&mut self, field: AimField, delta: f32) -> f32 {
        let (lo, hi) = field.range();
        let current = self.get(field);
        let wanted = current + delta;
        if wanted.is_nan() {
            log::trace!("{field:?} ignored non-numeric delta {delta}");
            return current;
        }
        let value = wanted.clamp(lo, hi);
        if value != wanted {
            log::trace!("{field:?} clamped from {wanted} to {value}");
        }
        match field {
            AimField::VerticalOffset => self.vertical_offset = value,
            AimField::Strength => self.strength = value,
            AimField::Angle => self.angle = value,
        }
        value
    }

    /// One aiming tick of the sawtooth gauge: an accelerating ramp that
    /// drops back to zero once it passes 1.0.
    pub fn advance_gauge(&mut self) {
        if self.power_gauge >= 1.0 {
            self.power_gauge = 0.0;
            return;
        }
        self.power_gauge = (self.power_gauge + GAUGE_INCREMENT) * GAUGE_GROWTH;
        if self.power_gauge > 1.0 {
            self.power_gauge = 0.0;
        }
    }

    /// Strength multiplier for the current gauge (0.3 at empty, 1.0 at full)
    pub fn gauge_multiplier(&self) -> f32 {
        self.power_gauge * GAUGE_STRENGTH_SPAN + GAUGE_STRENGTH_FLOOR
    }

    /// Apply the gauge to produce the released shot. `jitter_sign` is +1 or
    /// -1; the angle error shrinks to zero as the gauge approaches 1.
    pub fn release(&self, jitter_sign: f32) -> ReleasedShot {
        ReleasedShot {
            vertical_offset: self.vertical_offset,
            strength: self.strength * self.gauge_multiplier(),
            angle: self.angle + jitter_sign * (1.0 - self.power_gauge) * LAUNCH_JITTER,
        }
    }
}

/// The scoring target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub center: Vec2,
    /// Ring radii, innermost first (rendering only)
    pub ring_radii: [f32; 3],
}

impl Default for House {
    fn default() -> Self {
        Self {
            center: Vec2::new(RINK_WIDTH - HOUSE_OFFSET, RINK_HEIGHT / 2.0),
            ring_radii: HOUSE_RING_RADII,
        }
    }
}

impl House {
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.center.distance(point)
    }

    /// Index of the innermost ring containing `point`, if any
    pub fn ring_at(&self, point: Vec2) -> Option<usize> {
        let d = self.distance_to(point);
        self.ring_radii.iter().position(|&r| d <= r)
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Turn bookkeeping for a match in progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Completed throws
    pub turn_index: u32,
    pub phase: MatchPhase,
    pub pending_shot: PendingShot,
    /// Ticks since the last throw while settling
    pub settle_timer: u32,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            turn_index: 0,
            phase: MatchPhase::Aiming,
            pending_shot: PendingShot::default(),
            settle_timer: 0,
        }
    }
}

impl MatchState {
    pub fn current_player(&self) -> PlayerId {
        PlayerId::for_turn(self.turn_index)
    }

    /// Zero-based round (each player throws once per round)
    pub fn round(&self) -> u32 {
        self.turn_index / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_shot_defaults() {
        let shot = PendingShot::default();
        assert_eq!(shot.vertical_offset, 15.0);
        assert_eq!(shot.strength, 5.0);
        assert_eq!(shot.angle, 0.0);
        assert_eq!(shot.power_gauge, 0.0);
    }

    #[test]
    fn test_apply_delta_clamps() {
        let mut shot = PendingShot::default();
        assert_eq!(shot.apply_delta(AimField::Strength, 100.0), 10.0);
        assert_eq!(shot.apply_delta(AimField::Strength, -100.0), 1.0);
        assert_eq!(shot.apply_delta(AimField::VerticalOffset, -20.0), 0.0);
        assert_eq!(shot.apply_delta(AimField::Angle, 2.0), 1.2);
        let angle = shot.apply_delta(AimField::Angle, -0.2);
        assert!((angle - 1.0).abs() < 1e-6);
        assert_eq!(shot.angle, angle);
    }

    #[test]
    fn test_apply_delta_ignores_nan() {
        let mut shot = PendingShot::default();
        assert_eq!(shot.apply_delta(AimField::VerticalOffset, f32::NAN), 15.0);
        assert_eq!(shot.vertical_offset, 15.0);
        assert_eq!(shot.apply_delta(AimField::Strength, f32::NAN), 5.0);

        // Infinite deltas still clamp to the range ends
        assert_eq!(shot.apply_delta(AimField::Angle, f32::INFINITY), 1.2);
        assert_eq!(shot.apply_delta(AimField::Angle, f32::NEG_INFINITY), -1.2);
    }

    #[test]
    fn test_gauge_ramp_accelerates_then_resets() {
        let mut shot = PendingShot::default();
        shot.advance_gauge();
        assert!((shot.power_gauge - 0.0103).abs() < 1e-6);

        let mut prev_step = 0.0;
        let mut prev = shot.power_gauge;
        let mut reset_seen = false;
        for _ in 0..200 {
            shot.advance_gauge();
            if shot.power_gauge == 0.0 {
                reset_seen = true;
                break;
            }
            let step = shot.power_gauge - prev;
            assert!(step > prev_step);
            prev_step = step;
            prev = shot.power_gauge;
        }
        assert!(reset_seen);
        assert!(prev <= 1.0);
    }

    #[test]
    fn test_gauge_at_exactly_one_resets() {
        let mut shot = PendingShot {
            power_gauge: 1.0,
            ..Default::default()
        };
        shot.advance_gauge();
        assert_eq!(shot.power_gauge, 0.0);
    }

    #[test]
    fn test_release_at_full_gauge_is_exact() {
        let shot = PendingShot {
            power_gauge: 1.0,
            ..Default::default()
        };
        let released = shot.release(-1.0);
        assert_eq!(released.strength, 5.0);
        assert_eq!(released.angle, 0.0);
    }

    #[test]
    fn test_release_at_empty_gauge() {
        let shot = PendingShot::default();
        let released = shot.release(1.0);
        assert!((released.strength - 1.5).abs() < 1e-6);
        assert!((released.angle - 0.4).abs() < 1e-6);
        let released = shot.release(-1.0);
        assert!((released.angle + 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_house_position_and_rings() {
        let house = House::default();
        assert_eq!(house.center, Vec2::new(85.0, 15.0));
        assert_eq!(house.ring_at(Vec2::new(86.0, 15.0)), Some(0));
        assert_eq!(house.ring_at(Vec2::new(85.0, 20.0)), Some(1));
        assert_eq!(house.ring_at(Vec2::new(85.0, 23.0)), Some(2));
        assert_eq!(house.ring_at(Vec2::new(70.0, 15.0)), None);
    }

    #[test]
    fn test_match_state_player_and_round() {
        let mut state = MatchState::default();
        assert_eq!(state.current_player(), PlayerId::One);
        state.turn_index = 5;
        assert_eq!(state.current_player(), PlayerId::Two);
        assert_eq!(state.round(), 2);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn gauge_stays_bounded(ticks in 0usize..2000) {
                let mut shot = PendingShot::default();
                for _ in 0..ticks {
                    shot.advance_gauge();
                    prop_assert!((0.0..=1.0).contains(&shot.power_gauge));
                }
            }

            #[test]
            fn aim_deltas_stay_in_range(
                deltas in proptest::collection::vec((0u8..3, -50.0f32..50.0), 0..64)
            ) {
                let mut shot = PendingShot::default();
                for (field, delta) in deltas {
                    let field = match field {
                        0 => AimField::VerticalOffset,
                        1 => AimField::Strength,
                        _ => AimField::Angle,
                    };
                    shot.apply_delta(field, delta);
                    let (lo, hi) = field.range();
                    prop_assert!(shot.get(field) >= lo && shot.get(field) <= hi);
                }
            }
        }
    }
}
