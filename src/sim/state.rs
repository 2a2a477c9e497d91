//! Match state and core simulation types
//!
//! Everything that must survive a save/resume lives in [`MatchState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::grid::BrickGrid;
use crate::config::ArenaConfig;

/// Match lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a player name and a start command
    NotStarted,
    /// Active gameplay
    Playing,
    /// Ball was lost; only `restart` is accepted
    GameOver,
}

/// Paddle move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// The ball. Position is the top-left corner of its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
}

impl Ball {
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            pos: config.ball_start,
            vel: config.ball_velocity,
        }
    }
}

/// The player's paddle. Its y is fixed by the arena config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub width: f32,
}

impl Paddle {
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            x: config.paddle_start_x(),
            width: config.paddle_width,
        }
    }

    /// Shift the paddle by `step` in `direction`, clamped to `[0, arena_width - width]`.
    ///
    /// Total: out-of-range moves clamp, a non-finite step is ignored.
    pub fn shift(&mut self, direction: Direction, step: f32, arena_width: f32) {
        if !step.is_finite() {
            return;
        }
        let max_x = (arena_width - self.width).max(0.0);
        self.x = (self.x + direction.sign() * step.abs()).clamp(0.0, max_x);
    }

    /// Back to the rest position (arena center)
    pub fn reset(&mut self, config: &ArenaConfig) {
        *self = Self::new(config);
    }
}

/// A destructible brick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
}

impl Brick {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, self.y),
            Vec2::new(self.width, self.height),
        )
    }
}

/// Something that happened during a tick, for renderers and audio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Reflected off the left or right wall
    WallBounce,
    CeilingBounce,
    PaddleBounce,
    /// Brick at `index` (row-major) was destroyed
    BrickDestroyed { index: usize, points: u64 },
    /// No alive bricks remain
    GridCleared,
    /// Ball reached the floor
    BallLost,
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    /// Only increases, by a fixed amount per brick
    pub score: u64,
    pub player_name: String,
    /// Simulation ticks elapsed in the current match
    pub time_ticks: u64,
}

impl MatchState {
    /// Fresh match from a validated config
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            ball: Ball::new(config),
            paddle: Paddle::new(config),
            bricks: BrickGrid::generate(config),
            score: 0,
            player_name: String::new(),
            time_ticks: 0,
        }
    }

    /// Reset every mutable entity. The player name is kept.
    pub fn reset(&mut self, config: &ArenaConfig) {
        let player_name = std::mem::take(&mut self.player_name);
        *self = Self::new(config);
        self.player_name = player_name;
    }
}
