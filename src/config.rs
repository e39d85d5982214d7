//! Match configuration
//!
//! Passed explicitly into the turn controller. Can be loaded from JSON so a
//! front end can offer stone selection without touching the core.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{SETTLE_TICKS, THROWS_PER_PLAYER, TICK_RATE_HZ};
use crate::error::{CurlingError, Result};
use crate::sim::{PlayerId, StoneKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Seed for the launch jitter RNG
    pub seed: u64,
    /// Stone kind per throw slot, one table per player
    pub stone_kinds: [Vec<StoneKind>; 2],
    /// Logical ticks per second
    pub tick_rate_hz: u32,
    /// Dwell after each throw, in ticks
    pub settle_ticks: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            stone_kinds: [
                vec![StoneKind::Normal; THROWS_PER_PLAYER],
                vec![StoneKind::Normal; THROWS_PER_PLAYER],
            ],
            tick_rate_hz: TICK_RATE_HZ,
            settle_ticks: SETTLE_TICKS,
        }
    }
}

impl MatchConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded match config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Throws each player makes
    pub fn throws_per_player(&self) -> usize {
        self.stone_kinds[0].len()
    }

    /// Total throws in the match
    pub fn total_throws(&self) -> u32 {
        (self.throws_per_player() * 2) as u32
    }

    /// Stone kind for a player's throw slot
    pub fn kind_for(&self, player: PlayerId, slot: usize) -> Option<StoneKind> {
        self.stone_kinds[player.index()].get(slot).copied()
    }

    /// Fixed timestep in seconds
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate_hz as f32
    }

    pub fn validate(&self) -> Result<()> {
        let [first, second] = &self.stone_kinds;
        if first.is_empty() {
            return Err(CurlingError::InvalidConfig(
                "each player needs at least one throw".into(),
            ));
        }
        if first.len() != second.len() {
            return Err(CurlingError::InvalidConfig(format!(
                "players must throw the same number of stones ({} vs {})",
                first.len(),
                second.len()
            )));
        }
        if self.tick_rate_hz == 0 {
            return Err(CurlingError::InvalidConfig(
                "tick rate must be positive".into(),
            ));
        }
        if self.settle_ticks == 0 {
            return Err(CurlingError::InvalidConfig(
                "settle dwell must be at least one tick".into(),
            ));
        }
        for kind in first.iter().chain(second) {
            kind.params().validate()?;
        }
        Ok(())
    }
}
