//! Turn controller: the match state machine
//!
//! Phases run `Aiming -> Settling -> (Aiming | Finished)`. One call to
//! `tick` is one fixed logical step: physics first, then the settle timer,
//! then the power gauge.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::judge::{MatchResult, judge_match};
use super::state::{AimField, House, MatchPhase, MatchState, PendingShot, ReleasedShot, RngState};
use super::stone::{PlayerId, Stone, StoneKind};
use super::world::{CollisionWorld, Contact};
use crate::config::MatchConfig;
use crate::consts::LAUNCH_X;
use crate::error::{CurlingError, Result};
use crate::launch_velocity;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Aim changes, applied in order before the launch
    pub aim: Vec<(AimField, f32)>,
    /// Launch action (space)
    pub launch: bool,
}

/// Something presentation may want to react to (sounds, effects)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MatchEvent {
    StoneLaunched {
        index: usize,
        owner: PlayerId,
        kind: StoneKind,
        shot: ReleasedShot,
    },
    StoneCollision {
        first: usize,
        second: usize,
    },
    WallBounce {
        stone: usize,
    },
    TurnAdvanced {
        turn_index: u32,
        player: PlayerId,
    },
    MatchFinished {
        result: Option<MatchResult>,
    },
}

/// Render view of one stone
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StoneView {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub owner: PlayerId,
    pub kind: StoneKind,
}

/// Read-only view of a match for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub phase: MatchPhase,
    pub turn_index: u32,
    pub total_throws: u32,
    pub current_player: PlayerId,
    /// Zero-based round
    pub round: u32,
    /// Kind of the stone about to be thrown (None once finished)
    pub current_kind: Option<StoneKind>,
    pub pending_shot: PendingShot,
    /// Seconds left in the settle dwell (0 outside `Settling`)
    pub settle_seconds_remaining: f32,
    pub house: House,
    pub stones: Vec<StoneView>,
}

pub struct TurnController<R = Pcg32> {
    config: MatchConfig,
    world: CollisionWorld,
    state: MatchState,
    house: House,
    rng: R,
    events: Vec<MatchEvent>,
    time_ticks: u64,
}

impl TurnController<Pcg32> {
    /// Controller with a seeded PCG jitter source
    pub fn new(config: MatchConfig) -> Result<Self> {
        let rng = RngState::new(config.seed).to_rng();
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> TurnController<R> {
    /// Controller with an injected jitter source
    pub fn with_rng(config: MatchConfig, rng: R) -> Result<Self> {
        config.validate()?;
        log::info!(
            "New match: {} throws per player, seed {}",
            config.throws_per_player(),
            config.seed
        );
        Ok(Self {
            config,
            world: CollisionWorld::new(),
            state: MatchState::default(),
            house: House::default(),
            rng,
            events: Vec::new(),
            time_ticks: 0,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    pub fn house(&self) -> &House {
        &self.house
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    /// Logical ticks advanced since the match started
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Stone kind for the throw about to be made
    pub fn current_kind(&self) -> Option<StoneKind> {
        if self.state.phase == MatchPhase::Finished {
            return None;
        }
        let slot = self.state.round() as usize;
        self.config.kind_for(self.state.current_player(), slot)
    }

    /// Adjust one aim field, clamping into range. Ignored (returns `None`)
    /// outside `Aiming`.
    pub fn apply_aim_delta(&mut self, field: AimField, delta: f32) -> Option<f32> {
        if self.state.phase != MatchPhase::Aiming {
            return None;
        }
        Some(self.state.pending_shot.apply_delta(field, delta))
    }

    /// One key press worth of aim change in the sign of `direction`
    pub fn step_aim(&mut self, field: AimField, direction: f32) -> Option<f32> {
        self.apply_aim_delta(field, direction.signum() * field.step())
    }

    /// Release the pending shot. Returns the new stone's index in throw order.
    pub fn launch(&mut self) -> Result<usize> {
        if self.state.phase != MatchPhase::Aiming {
            return Err(CurlingError::IllegalLaunch {
                phase: self.state.phase,
            });
        }

        let owner = self.state.current_player();
        let kind = self.current_kind().ok_or_else(|| {
            CurlingError::InvalidConfig(format!(
                "no stone kind for {owner:?} in round {}",
                self.state.round()
            ))
        })?;

        let jitter_sign = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let shot = self.state.pending_shot.release(jitter_sign);
        let stone = Stone::new(
            kind,
            owner,
            Vec2::new(LAUNCH_X, shot.vertical_offset),
            launch_velocity(shot.strength, shot.angle),
        );
        let index = self.world.add_stone(stone);

        log::debug!(
            "{owner:?} threw {} (round {}): strength {:.2}, angle {:.3}",
            kind.display_name(),
            self.state.round() + 1,
            shot.strength,
            shot.angle
        );

        self.state.phase = MatchPhase::Settling;
        self.state.settle_timer = 0;
        self.events.push(MatchEvent::StoneLaunched {
            index,
            owner,
            kind,
            shot,
        });
        Ok(index)
    }

    /// Advance one fixed logical step. No-op once finished.
    pub fn tick(&mut self) {
        if self.state.phase == MatchPhase::Finished {
            return;
        }
        self.time_ticks += 1;

        let contacts = self.world.step(self.config.dt());
        self.record_contacts(&contacts);

        if self.state.phase == MatchPhase::Settling {
            self.state.settle_timer += 1;
            if self.state.settle_timer > self.config.settle_ticks {
                self.end_turn();
            }
        }

        if self.state.phase == MatchPhase::Aiming {
            self.state.pending_shot.advance_gauge();
        }
    }

    /// Apply a tick's worth of input, then advance. A launch outside
    /// `Aiming` is dropped.
    pub fn advance(&mut self, input: &TickInput) {
        for &(field, delta) in &input.aim {
            self.apply_aim_delta(field, delta);
        }
        if input.launch {
            if let Err(err) = self.launch() {
                log::trace!("Ignored input: {err}");
            }
        }
        self.tick();
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let settle_seconds_remaining = if self.state.phase == MatchPhase::Settling {
            self.config.settle_ticks.saturating_sub(self.state.settle_timer) as f32
                / self.config.tick_rate_hz as f32
        } else {
            0.0
        };

        MatchSnapshot {
            phase: self.state.phase,
            turn_index: self.state.turn_index,
            total_throws: self.config.total_throws(),
            current_player: self.state.current_player(),
            round: self.state.round(),
            current_kind: self.current_kind(),
            pending_shot: self.state.pending_shot,
            settle_seconds_remaining,
            house: self.house,
            stones: self
                .world
                .stones()
                .iter()
                .map(|s| StoneView {
                    position: s.position(),
                    velocity: s.velocity(),
                    radius: s.radius(),
                    owner: s.owner,
                    kind: s.kind,
                })
                .collect(),
        }
    }

    /// Match outcome, available once finished
    pub fn result(&self) -> Option<MatchResult> {
        if self.state.phase != MatchPhase::Finished {
            return None;
        }
        judge_match(self.world.stones(), &self.house)
    }

    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start over with a fresh world and the given jitter source
    pub fn reset_with_rng(&mut self, rng: R) {
        self.world.clear();
        self.state = MatchState::default();
        self.rng = rng;
        self.events.clear();
        self.time_ticks = 0;
        log::info!("Match reset");
    }

    fn record_contacts(&mut self, contacts: &[Contact]) {
        let stones = self.world.stones();
        for contact in contacts {
            match *contact {
                Contact::Stones { first, second } => {
                    if stones[first].is_moving() || stones[second].is_moving() {
                        self.events.push(MatchEvent::StoneCollision { first, second });
                    }
                }
                Contact::Wall { stone, .. } => {
                    if stones[stone].is_moving() {
                        self.events.push(MatchEvent::WallBounce { stone });
                    }
                }
            }
        }
    }

    fn end_turn(&mut self) {
        self.state.settle_timer = 0;
        self.state.turn_index += 1;
        self.state.pending_shot = PendingShot::default();

        if self.state.turn_index >= self.config.total_throws() {
            self.state.phase = MatchPhase::Finished;
            let result = self.result();
            match result {
                Some(r) => log::info!(
                    "Match finished: {:?} wins with {} point(s)",
                    r.winner,
                    r.points
                ),
                None => log::info!("Match finished without a result"),
            }
            self.events.push(MatchEvent::MatchFinished { result });
        } else {
            self.state.phase = MatchPhase::Aiming;
            let player = self.state.current_player();
            log::info!(
                "Turn {} of {}: {player:?} to throw",
                self.state.turn_index + 1,
                self.config.total_throws()
            );
            self.events.push(MatchEvent::TurnAdvanced {
                turn_index: self.state.turn_index,
                player,
            });
        }
    }
}

impl<R: Rng + SeedableRng> TurnController<R> {
    /// Start over, reseeding the jitter source from the config
    pub fn reset(&mut self) {
        let rng = R::seed_from_u64(self.config.seed);
        self.reset_with_rng(rng);
    }
}
