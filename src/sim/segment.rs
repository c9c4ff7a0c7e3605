//! Straight segment geometry for walls and the hole
//!
//! Segments are plain values: the boundary is rebuilt from scratch whenever
//! the gap changes, so nothing holds on to a segment between ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A line segment from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Horizontal segment at height `y` spanning `[x0, x1]`
    pub fn horizontal(y: f32, x0: f32, x1: f32) -> Self {
        Self::new(Vec2::new(x0, y), Vec2::new(x1, y))
    }

    /// Vertical segment at `x` spanning `[y0, y1]`
    pub fn vertical(x: f32, y0: f32, y1: f32) -> Self {
        Self::new(Vec2::new(x, y0), Vec2::new(x, y1))
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.start + self.end) * 0.5
    }

    /// Closest point on the segment to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let line_vec = self.end - self.start;
        let line_len_sq = line_vec.length_squared();

        if line_len_sq < 0.0001 {
            return self.start; // Degenerate segment
        }

        let t = ((p - self.start).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
        self.start + line_vec * t
    }

    #[inline]
    pub fn distance_to(&self, p: Vec2) -> f32 {
        (p - self.closest_point(p)).length()
    }

    /// Whether a circle at `center` with `radius` touches the segment
    pub fn touches_circle(&self, center: Vec2, radius: f32, epsilon: f32) -> bool {
        self.distance_to(center) <= radius + epsilon
    }

    /// Unit perpendicular (rotated +90°), zero for degenerate segments
    pub fn perpendicular(&self) -> Vec2 {
        let d = (self.end - self.start).normalize_or_zero();
        Vec2::new(-d.y, d.x)
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
