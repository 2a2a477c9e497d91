//! Brick grid: layout and alive/destroyed bookkeeping
//!
//! Bricks are stored row-major. Collision queries walk that order and stop at
//! the first alive brick that overlaps the ball, so at most one brick is ever
//! resolved per query even when the ball straddles several.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::state::Brick;
use crate::config::ArenaConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    pub rows: u32,
    pub columns: u32,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Lay out `rows x columns` alive bricks. Pure function of the config.
    pub fn generate(config: &ArenaConfig) -> Self {
        let pitch_x = config.brick_width + config.brick_gutter;
        let pitch_y = config.brick_height + config.brick_gutter;

        let mut bricks = Vec::with_capacity(config.brick_count());
        for row in 0..config.brick_rows {
            for col in 0..config.brick_columns {
                bricks.push(Brick {
                    x: config.grid_left + col as f32 * pitch_x,
                    y: config.grid_top + row as f32 * pitch_y,
                    width: config.brick_width,
                    height: config.brick_height,
                    alive: true,
                });
            }
        }

        Self {
            rows: config.brick_rows,
            columns: config.brick_columns,
            bricks,
        }
    }

    /// Index of the first alive brick (row-major) overlapping the ball's box
    pub fn find_collision(&self, ball_pos: Vec2, ball_size: f32) -> Option<usize> {
        let ball = Aabb::square(ball_pos, ball_size);
        self.bricks
            .iter()
            .position(|brick| brick.alive && brick.bounds().overlaps(&ball))
    }

    /// Mark a brick destroyed. Returns true only on the alive -> destroyed flip;
    /// destroying a dead or unknown brick is a no-op.
    pub fn destroy(&mut self, index: usize) -> bool {
        match self.bricks.get_mut(index) {
            Some(brick) if brick.alive => {
                brick.alive = false;
                true
            }
            _ => false,
        }
    }

    pub fn all_destroyed(&self) -> bool {
        self.bricks.iter().all(|b| !b.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    pub fn get(&self, index: usize) -> Option<&Brick> {
        self.bricks.get(index)
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// All bricks, row-major
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    /// Alive bricks only, row-major
    pub fn alive(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.alive)
    }
}
