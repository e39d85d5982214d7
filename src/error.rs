//! Error taxonomy
//!
//! Aim deltas never fail (they clamp), and friction never normalizes a zero
//! velocity, so only illegal launches and bad setups surface here.

use crate::sim::MatchPhase;

pub type Result<T, E = CurlingError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum CurlingError {
    #[error("cannot launch a stone while the match is {phase:?}")]
    IllegalLaunch { phase: MatchPhase },

    #[error("invalid match configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
