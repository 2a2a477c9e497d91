//! Brickfall - a brick breaker simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball kinematics, brick grid, match state)
//! - `game`: Match state machine driving the simulation
//! - `config`: Arena geometry and tuning, loadable from JSON
//! - `report`: Score reporter boundary (fire-and-forget)
//! - `driver`: Fixed-cadence tick driver for native hosts

pub mod config;
pub mod driver;
pub mod error;
pub mod game;
pub mod report;
pub mod sim;

pub use config::ArenaConfig;
pub use driver::{DriverHandle, SharedMatch, TickDriver};
pub use error::{ConfigError, ValidationError};
pub use game::{Match, Snapshot};
pub use report::{ChannelReporter, JsonLinesReporter, NullReporter, ScoreReport, ScoreReporter};
pub use sim::{Direction, GameEvent, GamePhase, MatchState};

/// Reference game constants (arena units, percentage of the play field)
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 100.0;
    pub const ARENA_HEIGHT: f32 = 100.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 2.0;
    pub const BALL_START_X: f32 = 50.0;
    pub const BALL_START_Y: f32 = 80.0;
    pub const BALL_START_VX: f32 = 3.0;
    pub const BALL_START_VY: f32 = -3.0;

    /// Paddle defaults - the paddle band starts at this y and extends to the floor
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_Y: f32 = 90.0;
    /// Distance moved per input command
    pub const PADDLE_STEP: f32 = 5.0;

    /// Brick grid layout
    pub const BRICK_ROWS: u32 = 5;
    pub const BRICK_COLUMNS: u32 = 7;
    pub const BRICK_WIDTH: f32 = 12.0;
    pub const BRICK_HEIGHT: f32 = 4.0;
    pub const BRICK_GUTTER: f32 = 1.0;
    pub const GRID_LEFT: f32 = 0.0;
    pub const GRID_TOP: f32 = 5.0;
    /// Upper bound on rows x columns
    pub const MAX_BRICKS: u64 = 4096;

    /// Points awarded per destroyed brick
    pub const POINTS_PER_BRICK: u64 = 10;

    /// Driver cadence (milliseconds per tick)
    pub const TICK_INTERVAL_MS: u64 = 16;
}
