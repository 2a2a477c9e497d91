//! Collision predicates for axis-aligned geometry
//!
//! Every test here is evaluated against the ball's *candidate* position for
//! the tick. Bounds are inclusive: touching counts as contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Square box of the given edge length (the ball)
    pub fn square(min: Vec2, edge: f32) -> Self {
        Self::new(min, Vec2::splat(edge))
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Inclusive overlap test
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min, self.max());
        let (b_min, b_max) = (other.min, other.max());
        a_min.x <= b_max.x && b_min.x <= a_max.x && a_min.y <= b_max.y && b_min.y <= a_max.y
    }
}

/// Ball touches or passes the left wall, or the right wall at `max_x`
#[inline]
pub fn hits_side_wall(x: f32, max_x: f32) -> bool {
    x <= 0.0 || x >= max_x
}

/// Ball touches or passes the ceiling
#[inline]
pub fn hits_ceiling(y: f32) -> bool {
    y <= 0.0
}

/// Ball is inside the paddle band and horizontally over the paddle.
///
/// The band has no lower edge: anything at or below `paddle_y` counts.
#[inline]
pub fn hits_paddle(pos: Vec2, paddle_x: f32, paddle_width: f32, paddle_y: f32) -> bool {
    pos.y >= paddle_y && pos.x >= paddle_x && pos.x <= paddle_x + paddle_width
}

/// Ball reached the floor (miss condition)
#[inline]
pub fn past_floor(y: f32, floor: f32) -> bool {
    y >= floor
}

/// Elastic bounce off a vertical surface
#[inline]
pub fn reflect_x(vel: Vec2) -> Vec2 {
    Vec2::new(-vel.x, vel.y)
}

/// Elastic bounce off a horizontal surface
#[inline]
pub fn reflect_y(vel: Vec2) -> Vec2 {
    Vec2::new(vel.x, -vel.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let brick = Aabb::new(Vec2::new(10.0, 10.0), Vec2::new(12.0, 4.0));

        // Fully inside
        assert!(Aabb::square(Vec2::new(12.0, 11.0), 2.0).overlaps(&brick));
        // Touching the right edge counts
        assert!(Aabb::square(Vec2::new(22.0, 11.0), 2.0).overlaps(&brick));
        // Ball's right edge touching brick's left edge counts
        assert!(Aabb::square(Vec2::new(8.0, 11.0), 2.0).overlaps(&brick));
        // Clear miss
        assert!(!Aabb::square(Vec2::new(30.0, 11.0), 2.0).overlaps(&brick));
        assert!(!Aabb::square(Vec2::new(12.0, 20.0), 2.0).overlaps(&brick));
    }

    #[test]
    fn test_walls() {
        assert!(hits_side_wall(0.0, 98.0));
        assert!(hits_side_wall(-1.0, 98.0));
        assert!(hits_side_wall(98.0, 98.0));
        assert!(hits_side_wall(101.0, 98.0));
        assert!(!hits_side_wall(50.0, 98.0));

        assert!(hits_ceiling(0.0));
        assert!(hits_ceiling(-2.0));
        assert!(!hits_ceiling(0.5));
    }

    #[test]
    fn test_paddle_band() {
        assert!(hits_paddle(Vec2::new(53.0, 91.0), 45.0, 10.0, 90.0));
        assert!(hits_paddle(Vec2::new(45.0, 90.0), 45.0, 10.0, 90.0));
        assert!(hits_paddle(Vec2::new(55.0, 90.0), 45.0, 10.0, 90.0));
        // Above the band
        assert!(!hits_paddle(Vec2::new(50.0, 89.0), 45.0, 10.0, 90.0));
        // Beside the paddle
        assert!(!hits_paddle(Vec2::new(60.0, 92.0), 45.0, 10.0, 90.0));
    }

    #[test]
    fn test_reflections_preserve_speed() {
        let vel = Vec2::new(3.0, -3.0);
        assert_eq!(reflect_x(vel), Vec2::new(-3.0, -3.0));
        assert_eq!(reflect_y(vel), Vec2::new(3.0, 3.0));
        assert_eq!(reflect_x(reflect_y(vel)).length(), vel.length());
    }

    #[test]
    fn test_floor() {
        assert!(past_floor(100.0, 100.0));
        assert!(past_floor(103.0, 100.0));
        assert!(!past_floor(99.9, 100.0));
    }
}
