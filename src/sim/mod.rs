//! Deterministic simulation module
//!
//! All match logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (stones in throw order, walls in fixed order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod judge;
pub mod state;
pub mod stone;
pub mod turn;
pub mod wall;
pub mod world;

pub use body::RigidBody;
pub use collision::{
    CollisionResult, circle_circle_collision, circle_wall_collision, resolve_stone_pair,
    resolve_stone_wall,
};
pub use judge::{MatchResult, RankedStone, determine_winner, judge_match, rank_stones};
pub use state::{AimField, House, MatchPhase, MatchState, PendingShot, ReleasedShot};
pub use stone::{PlayerId, Stone, StoneKind, StoneParams};
pub use turn::{MatchEvent, MatchSnapshot, StoneView, TickInput, TurnController};
pub use wall::Wall;
pub use world::{CollisionWorld, Contact};
