//! Fixed timestep accumulator
//!
//! Presentation layers run at whatever frame rate the display gives them;
//! the match only ever advances in whole logical ticks. Each frame, feed the
//! real elapsed time in and run `TurnController::tick` as many times as
//! `advance` says.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame accepted before time is dropped (tab switches, breakpoints)
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedStepClock {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            max_substeps: MAX_SUBSTEPS,
            accumulator: 0.0,
        }
    }

    /// Clock for a tick rate in Hz
    pub fn from_rate(tick_rate_hz: u32) -> Self {
        Self::new(1.0 / tick_rate_hz as f32)
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's elapsed seconds; returns how many ticks to run now.
    ///
    /// Capped at the substep limit to prevent a spiral of death; time beyond
    /// the cap is discarded rather than carried over.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_substeps && self.accumulator >= self.step {
            self.accumulator %= self.step;
        }
        ticks
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixty_hz_display_runs_one_tick_per_frame() {
        let mut clock = FixedStepClock::from_rate(60);
        let mut total = 0;
        for _ in 0..120 {
            total += clock.advance(1.0 / 60.0);
        }
        assert!((119..=120).contains(&total));
    }

    #[test]
    fn test_thirty_hz_display_runs_two_ticks_per_frame() {
        let mut clock = FixedStepClock::from_rate(60);
        let mut total = 0;
        for _ in 0..30 {
            total += clock.advance(1.0 / 30.0);
        }
        assert!((59..=60).contains(&total));
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut clock = FixedStepClock::from_rate(60);
        // Clamped to 0.1s
        assert!((5..=6).contains(&clock.advance(5.0)));

        let mut clock = FixedStepClock::from_rate(240);
        assert_eq!(clock.advance(5.0), MAX_SUBSTEPS);
        assert!(clock.alpha() < 1.0);
    }

    #[test]
    fn test_negative_frame_time_ignored() {
        let mut clock = FixedStepClock::default();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.alpha(), 0.0);
    }
}
