//! Arena geometry and match tuning
//!
//! Pure configuration, validated once at construction. Can be loaded from a
//! (possibly partial) JSON document; missing fields fall back to the reference
//! constants in [`crate::consts`].

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Arena, paddle, ball and brick grid configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Ball ===
    /// Edge length of the ball's bounding box
    pub ball_size: f32,
    pub ball_start: Vec2,
    /// Per-tick displacement (no time-delta scaling)
    pub ball_velocity: Vec2,

    // === Paddle ===
    pub paddle_width: f32,
    /// Top of the paddle band
    pub paddle_y: f32,
    /// Magnitude of a single move command
    pub paddle_step: f32,

    // === Brick grid ===
    pub brick_rows: u32,
    pub brick_columns: u32,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_gutter: f32,
    pub grid_left: f32,
    pub grid_top: f32,

    // === Rules ===
    pub points_per_brick: u64,
    /// End the match once every brick is destroyed (off in the reference game)
    pub end_on_clear: bool,

    // === Driver ===
    pub tick_interval_ms: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            ball_size: BALL_SIZE,
            ball_start: Vec2::new(BALL_START_X, BALL_START_Y),
            ball_velocity: Vec2::new(BALL_START_VX, BALL_START_VY),

            paddle_width: PADDLE_WIDTH,
            paddle_y: PADDLE_Y,
            paddle_step: PADDLE_STEP,

            brick_rows: BRICK_ROWS,
            brick_columns: BRICK_COLUMNS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_gutter: BRICK_GUTTER,
            grid_left: GRID_LEFT,
            grid_top: GRID_TOP,

            points_per_brick: POINTS_PER_BRICK,
            end_on_clear: false,

            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

impl ArenaConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ArenaConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded arena config ({}x{}, {}x{} bricks)",
            config.arena_width,
            config.arena_height,
            config.brick_rows,
            config.brick_columns
        );
        Ok(config)
    }

    /// Check every geometric constraint the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.brick_rows == 0 || self.brick_columns == 0 {
            return Err(ConfigError::InvalidGrid {
                rows: self.brick_rows,
                columns: self.brick_columns,
            });
        }
        let bricks = u64::from(self.brick_rows) * u64::from(self.brick_columns);
        if bricks > MAX_BRICKS {
            return Err(ConfigError::InvalidGrid {
                rows: self.brick_rows,
                columns: self.brick_columns,
            });
        }
        if bricks.checked_mul(self.points_per_brick).is_none() {
            return Err(ConfigError::Inconsistent(format!(
                "{} bricks at {} points each overflow the score",
                bricks, self.points_per_brick
            )));
        }

        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("ball_size", self.ball_size),
            ("paddle_width", self.paddle_width),
            ("paddle_y", self.paddle_y),
            ("paddle_step", self.paddle_step),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDimension { field, value });
            }
        }

        let non_negative = [
            ("brick_gutter", self.brick_gutter),
            ("grid_left", self.grid_left),
            ("grid_top", self.grid_top),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDimension { field, value });
            }
        }

        if self.paddle_width > self.arena_width {
            return Err(ConfigError::Inconsistent(format!(
                "paddle width {} exceeds arena width {}",
                self.paddle_width, self.arena_width
            )));
        }
        if self.ball_size >= self.arena_width || self.ball_size >= self.arena_height {
            return Err(ConfigError::Inconsistent(format!(
                "ball size {} does not fit the arena",
                self.ball_size
            )));
        }
        if self.paddle_y >= self.arena_height {
            return Err(ConfigError::Inconsistent(format!(
                "paddle band {} lies below the floor {}",
                self.paddle_y, self.arena_height
            )));
        }

        let (grid_w, grid_h) = self.grid_extent();
        if self.grid_left + grid_w > self.arena_width || self.grid_top + grid_h > self.paddle_y {
            return Err(ConfigError::Inconsistent(format!(
                "brick grid {}x{} at ({}, {}) does not fit above the paddle",
                grid_w, grid_h, self.grid_left, self.grid_top
            )));
        }

        let start = self.ball_start;
        if !start.is_finite()
            || start.x < 0.0
            || start.x > self.ball_max_x()
            || start.y < 0.0
            || start.y >= self.arena_height
        {
            return Err(ConfigError::Inconsistent(format!(
                "ball start ({}, {}) lies outside the arena",
                start.x, start.y
            )));
        }

        // A stalled ball never reaches a terminal state
        if !self.ball_velocity.is_finite() || self.ball_velocity == Vec2::ZERO {
            return Err(ConfigError::Inconsistent(format!(
                "ball velocity ({}, {}) must be finite and nonzero",
                self.ball_velocity.x, self.ball_velocity.y
            )));
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Inconsistent(
                "tick interval must be at least 1 ms".to_string(),
            ));
        }

        Ok(())
    }

    /// Width and height covered by the brick grid, gutters included
    pub fn grid_extent(&self) -> (f32, f32) {
        let cols = self.brick_columns as f32;
        let rows = self.brick_rows as f32;
        (
            cols * self.brick_width + (cols - 1.0).max(0.0) * self.brick_gutter,
            rows * self.brick_height + (rows - 1.0).max(0.0) * self.brick_gutter,
        )
    }

    /// Total number of bricks in a freshly generated grid
    pub fn brick_count(&self) -> usize {
        self.brick_rows as usize * self.brick_columns as usize
    }

    /// Paddle rest position: centered in the arena
    pub fn paddle_start_x(&self) -> f32 {
        (self.arena_width - self.paddle_width) / 2.0
    }

    /// Rightmost legal paddle x
    pub fn paddle_max_x(&self) -> f32 {
        self.arena_width - self.paddle_width
    }

    /// Ball x at which the right wall reflects it
    pub fn ball_max_x(&self) -> f32 {
        self.arena_width - self.ball_size
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ArenaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.brick_count(), 35);
        assert_eq!(config.paddle_start_x(), 45.0);
        assert_eq!(config.ball_max_x(), 98.0);
    }

    #[test]
    fn test_grid_extent() {
        let config = ArenaConfig::default();
        let (w, h) = config.grid_extent();
        assert_eq!(w, 7.0 * 12.0 + 6.0);
        assert_eq!(h, 5.0 * 4.0 + 4.0);
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = ArenaConfig {
            brick_rows: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidGrid {
                rows: 0,
                columns: 7
            })
        );

        let config = ArenaConfig {
            brick_columns: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let config = ArenaConfig {
            ball_size: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimension {
                field: "ball_size",
                ..
            })
        ));

        let config = ArenaConfig {
            arena_width: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimension {
                field: "arena_width",
                ..
            })
        ));

        let config = ArenaConfig {
            brick_gutter: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimension {
                field: "brick_gutter",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_inconsistent_geometry() {
        let too_wide_paddle = ArenaConfig {
            paddle_width: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            too_wide_paddle.validate(),
            Err(ConfigError::Inconsistent(_))
        ));

        let grid_overflows = ArenaConfig {
            brick_columns: 8,
            ..Default::default()
        };
        assert!(matches!(
            grid_overflows.validate(),
            Err(ConfigError::Inconsistent(_))
        ));

        let stalled = ArenaConfig {
            ball_velocity: Vec2::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            stalled.validate(),
            Err(ConfigError::Inconsistent(_))
        ));

        let paddle_below_floor = ArenaConfig {
            paddle_y: 100.0,
            ..Default::default()
        };
        assert!(matches!(
            paddle_below_floor.validate(),
            Err(ConfigError::Inconsistent(_))
        ));

        let ball_too_big = ArenaConfig {
            ball_size: 100.0,
            ..Default::default()
        };
        assert!(matches!(
            ball_too_big.validate(),
            Err(ConfigError::Inconsistent(_))
        ));

        let ball_outside = ArenaConfig {
            ball_start: Vec2::new(99.0, 50.0),
            ..Default::default()
        };
        assert!(matches!(
            ball_outside.validate(),
            Err(ConfigError::Inconsistent(_))
        ));

        let ball_above = ArenaConfig {
            ball_start: Vec2::new(50.0, -1.0),
            ..Default::default()
        };
        assert!(matches!(
            ball_above.validate(),
            Err(ConfigError::Inconsistent(_))
        ));

        let no_cadence = ArenaConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(no_cadence.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let config = ArenaConfig {
            brick_rows: u32::MAX,
            brick_columns: u32::MAX,
            brick_width: 1e-8,
            brick_height: 1e-8,
            brick_gutter: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGrid { .. })
        ));
        assert!(crate::Match::new(config, crate::NullReporter).is_err());

        let at_cap = ArenaConfig {
            brick_rows: 64,
            brick_columns: 64,
            brick_width: 0.5,
            brick_height: 0.5,
            brick_gutter: 0.0,
            ..Default::default()
        };
        assert!(at_cap.validate().is_ok());
    }

    #[test]
    fn test_rejects_overflowing_points() {
        let config = ArenaConfig {
            points_per_brick: u64::MAX,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Inconsistent(_))
        ));

        let largest = ArenaConfig {
            points_per_brick: u64::MAX / 35,
            ..Default::default()
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ArenaConfig::from_json(r#"{ "paddle_step": 30.0, "end_on_clear": true }"#)
            .expect("valid config");
        assert_eq!(config.paddle_step, 30.0);
        assert!(config.end_on_clear);
        assert_eq!(config.brick_rows, BRICK_ROWS);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            ArenaConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ArenaConfig::from_json(r#"{ "brick_rows": 0 }"#),
            Err(ConfigError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_values() {
        let config = ArenaConfig {
            paddle_step: 30.0,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ArenaConfig::from_json(&json).unwrap(), config);
    }
}
