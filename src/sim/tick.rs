//! Fixed-step simulation tick
//!
//! One tick is a pure transition: it takes the full prior state and returns
//! the full next state. Velocity already encodes the per-tick step, so there
//! is no time-delta scaling and no substepping.
//!
//! Order within a tick, all evaluated against the same candidate position:
//! 1. side walls and ceiling
//! 2. paddle
//! 3. bricks (first alive brick in row-major order, at most one)
//! 4. floor (miss)
//!
//! Reflections compose, so a corner hit flips both axes and a paddle bounce
//! plus a brick hit in the same tick cancel out on `vy`. Position is committed
//! unclamped: the ball may overshoot a wall for one tick while already headed
//! back.

use glam::Vec2;

use super::collision::{hits_ceiling, hits_paddle, hits_side_wall, past_floor, reflect_x, reflect_y};
use super::state::{Ball, GameEvent, GamePhase, MatchState};
use crate::config::ArenaConfig;

/// Result of advancing one tick
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub state: MatchState,
    pub events: Vec<GameEvent>,
}

/// Advance the match by one tick. Outside `Playing` the state is returned unchanged.
pub fn tick(prev: &MatchState, config: &ArenaConfig) -> TickOutcome {
    let mut next = prev.clone();
    let mut events = Vec::new();

    if prev.phase != GamePhase::Playing {
        return TickOutcome {
            state: next,
            events,
        };
    }

    debug_assert!(
        prev.ball.vel.is_finite() && prev.ball.vel != Vec2::ZERO,
        "ball velocity must be finite and nonzero, got {:?}",
        prev.ball.vel
    );

    next.time_ticks += 1;

    let candidate = prev.ball.pos + prev.ball.vel;
    let mut vel = prev.ball.vel;

    // --- WALLS ---
    if hits_side_wall(candidate.x, config.ball_max_x()) {
        vel = reflect_x(vel);
        events.push(GameEvent::WallBounce);
    }
    if hits_ceiling(candidate.y) {
        vel = reflect_y(vel);
        events.push(GameEvent::CeilingBounce);
    }

    // --- PADDLE ---
    if hits_paddle(
        candidate,
        prev.paddle.x,
        prev.paddle.width,
        config.paddle_y,
    ) {
        vel = reflect_y(vel);
        events.push(GameEvent::PaddleBounce);
    }

    // --- BRICKS ---
    // Queried on the pre-tick grid at the post-tick position, so a brick a
    // little beyond exact contact still counts.
    if let Some(index) = prev.bricks.find_collision(candidate, config.ball_size) {
        vel = reflect_y(vel);
        if next.bricks.destroy(index) {
            next.score = next.score.saturating_add(config.points_per_brick);
            events.push(GameEvent::BrickDestroyed {
                index,
                points: config.points_per_brick,
            });
            log::debug!(
                "Brick {} destroyed at tick {}, score {}",
                index,
                next.time_ticks,
                next.score
            );
        }

        if next.bricks.all_destroyed() {
            events.push(GameEvent::GridCleared);
            if config.end_on_clear {
                next.phase = GamePhase::GameOver;
            }
        }
    }

    // --- FLOOR ---
    if past_floor(candidate.y, config.arena_height) {
        next.phase = GamePhase::GameOver;
        events.push(GameEvent::BallLost);
    }

    next.ball = Ball {
        pos: candidate,
        vel,
    };

    TickOutcome {
        state: next,
        events,
    }
}
