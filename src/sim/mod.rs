//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick step only
//! - Stable iteration order (row-major bricks)
//! - No rendering, timing or platform dependencies

pub mod collision;
pub mod grid;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use grid::BrickGrid;
pub use state::{Ball, Brick, Direction, GameEvent, GamePhase, MatchState, Paddle};
pub use tick::{TickOutcome, tick};
