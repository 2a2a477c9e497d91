//! Match state machine
//!
//! Owns the config, the single [`MatchState`] and the score reporter. Every
//! command either fully applies or leaves the state untouched, and each tick
//! swaps in the next state returned by [`sim::tick`](crate::sim::tick).
//!
//! ```text
//! NotStarted --start--> Playing --ball lost--> GameOver --restart--> NotStarted
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ArenaConfig;
use crate::error::{ConfigError, ValidationError};
use crate::report::{ScoreReport, ScoreReporter};
use crate::sim::{
    self, Ball, Brick, BrickGrid, Direction, GameEvent, GamePhase, MatchState, Paddle,
};

/// Read-only projection handed to renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub ball: Ball,
    pub ball_size: f32,
    pub paddle: Paddle,
    pub paddle_y: f32,
    /// Alive bricks only, row-major
    pub bricks: Vec<Brick>,
    pub score: u64,
    pub player_name: String,
    pub tick: u64,
}

/// One player's match
pub struct Match<R: ScoreReporter> {
    config: ArenaConfig,
    state: MatchState,
    reporter: R,
    /// Events from the most recent tick
    events: Vec<GameEvent>,
}

impl<R: ScoreReporter> Match<R> {
    /// New match in `NotStarted`. Fails if the config is invalid.
    pub fn new(config: ArenaConfig, reporter: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = MatchState::new(&config);
        log::info!(
            "New match: {} bricks, arena {}x{}",
            state.bricks.len(),
            config.arena_width,
            config.arena_height
        );
        Ok(Self {
            config,
            state,
            reporter,
            events: Vec::new(),
        })
    }

    /// Continue a previously saved match state
    pub fn resume(
        config: ArenaConfig,
        state: MatchState,
        reporter: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        if state.bricks.rows != config.brick_rows
            || state.bricks.columns != config.brick_columns
            || state.bricks.len() != config.brick_count()
        {
            return Err(ConfigError::StateMismatch(format!(
                "saved grid is {}x{} ({} bricks), config expects {}x{}",
                state.bricks.rows,
                state.bricks.columns,
                state.bricks.len(),
                config.brick_rows,
                config.brick_columns
            )));
        }
        let layout = BrickGrid::generate(&config);
        if let Some(index) = state.bricks.iter().zip(layout.iter()).position(|(saved, fresh)| {
            saved.x != fresh.x
                || saved.y != fresh.y
                || saved.width != fresh.width
                || saved.height != fresh.height
        }) {
            return Err(ConfigError::StateMismatch(format!(
                "saved brick {} does not match the configured layout",
                index
            )));
        }
        let destroyed = (state.bricks.len() - state.bricks.alive_count()) as u64;
        let expected = destroyed.saturating_mul(config.points_per_brick);
        if state.score != expected {
            return Err(ConfigError::StateMismatch(format!(
                "saved score {} does not match {} destroyed bricks ({} expected)",
                state.score, destroyed, expected
            )));
        }
        if state.paddle.width != config.paddle_width
            || state.paddle.x < 0.0
            || state.paddle.x > config.paddle_max_x()
        {
            return Err(ConfigError::StateMismatch(format!(
                "saved paddle at {} (width {}) does not fit the arena",
                state.paddle.x, state.paddle.width
            )));
        }
        if !state.ball.pos.is_finite()
            || !state.ball.vel.is_finite()
            || state.ball.vel == glam::Vec2::ZERO
        {
            return Err(ConfigError::StateMismatch(format!(
                "saved ball {:?} is not in motion",
                state.ball
            )));
        }

        log::info!(
            "Resumed match for {:?} ({:?}, score {})",
            state.player_name,
            state.phase,
            state.score
        );
        Ok(Self {
            config,
            state,
            reporter,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    /// Events produced by the last tick
    pub fn last_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Set the player name (only before the match starts)
    pub fn set_player_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.require_phase("set player name", GamePhase::NotStarted)?;
        self.state.player_name = name.to_string();
        Ok(())
    }

    /// Begin play. Requires a non-blank player name.
    pub fn start(&mut self) -> Result<(), ValidationError> {
        self.require_phase("start", GamePhase::NotStarted)?;

        let trimmed = self.state.player_name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyPlayerName);
        }
        self.state.player_name = trimmed.to_string();
        self.state.phase = GamePhase::Playing;
        self.events.clear();

        log::info!("Match started for {}", self.state.player_name);
        Ok(())
    }

    /// Move the paddle. Ignored outside `Playing`.
    pub fn move_paddle(&mut self, direction: Direction, step: f32) {
        if self.state.phase != GamePhase::Playing {
            log::debug!("Ignoring paddle move while {:?}", self.state.phase);
            return;
        }
        self.state
            .paddle
            .shift(direction, step, self.config.arena_width);
    }

    /// Move the paddle by the configured step
    pub fn nudge_paddle(&mut self, direction: Direction) {
        let step = self.config.paddle_step;
        self.move_paddle(direction, step);
    }

    /// Advance one tick. Emits the score report on the transition into `GameOver`.
    pub fn tick(&mut self) -> Snapshot {
        let was = self.state.phase;
        let outcome = sim::tick(&self.state, &self.config);
        self.state = outcome.state;
        self.events = outcome.events;

        if was == GamePhase::Playing && self.state.phase == GamePhase::GameOver {
            log::info!(
                "Game over, {}! Score: {} after {} ticks",
                self.state.player_name,
                self.state.score,
                self.state.time_ticks
            );
            let report = ScoreReport::now(self.state.player_name.clone(), self.state.score);
            self.reporter.report(&report);
        }

        self.snapshot()
    }

    /// Reset every entity and return to `NotStarted` (only after game over)
    pub fn restart(&mut self) -> Result<(), ValidationError> {
        self.require_phase("restart", GamePhase::GameOver)?;
        self.state.reset(&self.config);
        self.events.clear();
        log::info!("Match reset");
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.state.phase,
            ball: self.state.ball,
            ball_size: self.config.ball_size,
            paddle: self.state.paddle,
            paddle_y: self.config.paddle_y,
            bricks: self.state.bricks.alive().copied().collect(),
            score: self.state.score,
            player_name: self.state.player_name.clone(),
            tick: self.state.time_ticks,
        }
    }

    fn require_phase(
        &self,
        command: &'static str,
        expected: GamePhase,
    ) -> Result<(), ValidationError> {
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(ValidationError::InvalidPhase {
                command,
                phase: self.state.phase,
            })
        }
    }
}
