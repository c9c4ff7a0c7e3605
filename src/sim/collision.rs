//! Collision detection and response
//!
//! Perfectly elastic, frictionless circles against straight walls, each
//! other, and (for the circle scene) an enclosing circular boundary.

use glam::Vec2;

use super::segment::{Segment, reflect_velocity};
use super::state::Ball;
use crate::consts::CONTACT_EPSILON;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Collision point (if hit)
    pub point: Vec2,
    /// Surface normal at collision (pointing toward ball center, for reflection)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a ball against a segment
///
/// `fallback_normal` is used when the ball centre lies on the segment.
pub fn ball_segment_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    segment: &Segment,
    fallback_normal: Vec2,
) -> CollisionResult {
    let closest = segment.closest_point(ball_pos);
    let dist = (ball_pos - closest).length();

    if dist > ball_radius + CONTACT_EPSILON {
        return CollisionResult::miss();
    }

    let normal = (ball_pos - closest).normalize_or_zero();
    let normal = if normal.length_squared() < 0.5 {
        fallback_normal
    } else {
        normal
    };

    CollisionResult {
        hit: true,
        point: closest,
        normal,
        penetration: (ball_radius - dist).max(0.0),
    }
}

/// Check two balls; the normal points from `b` toward `a`
pub fn ball_ball_collision(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> CollisionResult {
    let delta = a_pos - b_pos;
    let dist = delta.length();
    let reach = a_radius + b_radius;

    if dist > reach + CONTACT_EPSILON {
        return CollisionResult::miss();
    }

    // Coincident centres: pick any axis
    let normal = if dist > 1e-6 { delta / dist } else { Vec2::X };

    CollisionResult {
        hit: true,
        point: b_pos + normal * b_radius,
        normal,
        penetration: (reach - dist).max(0.0),
    }
}

/// Check a ball against the inside of a circular boundary
pub fn ball_circle_boundary_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    center: Vec2,
    boundary_radius: f32,
) -> CollisionResult {
    let offset = ball_pos - center;
    let r = offset.length();

    if r + ball_radius >= boundary_radius - CONTACT_EPSILON {
        let outward = if r > 1e-6 { offset / r } else { Vec2::X };
        return CollisionResult {
            hit: true,
            point: center + outward * boundary_radius,
            normal: -outward, // Point inward
            penetration: (r + ball_radius - boundary_radius).max(0.0),
        };
    }

    CollisionResult::miss()
}

/// Push a ball out of a static surface and reflect it if approaching
pub fn resolve_static(ball: &mut Ball, hit: &CollisionResult) {
    ball.pos += hit.normal * hit.penetration;
    if ball.vel.dot(hit.normal) < 0.0 {
        ball.vel = reflect_velocity(ball.vel, hit.normal);
    }
}

/// Separate two equal-mass balls and exchange their normal velocity components
///
/// `hit` must come from `ball_ball_collision(a, b)`.
pub fn resolve_ball_pair(a: &mut Ball, b: &mut Ball, hit: &CollisionResult) {
    let n = hit.normal;
    let half = hit.penetration / 2.0;
    a.pos += n * half;
    b.pos -= n * half;

    let closing = (a.vel - b.vel).dot(n);
    if closing < 0.0 {
        a.vel -= n * closing;
        b.vel += n * closing;
    }
}
