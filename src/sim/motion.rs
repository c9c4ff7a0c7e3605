//! Motion integrator
//!
//! Explicit Euler step followed by a hard clamp into the arena. The clamp
//! stands in for continuous collision detection: a fast ball that would
//! leave the arena between two steps is put back on the edge instead.

use super::geometry::ArenaSize;
use super::state::Ball;

/// Move every ball by `vel * dt`, then clamp into the arena
pub fn advance(balls: &mut [Ball], arena: ArenaSize, dt: f32) {
    for ball in balls.iter_mut() {
        ball.pos += ball.vel * dt;
        ball.clamp_to(arena);
    }
}

/// Split a frame delta into equal substeps no longer than `max_step`
///
/// Returns `(count, step)`; `count` is 0 for an empty frame.
pub fn substeps(frame_dt: f32, max_step: f32, max_count: u32) -> (u32, f32) {
    if frame_dt <= 0.0 {
        return (0, 0.0);
    }
    // Tolerance keeps float noise (2.0000002) from adding a substep
    let count = ((frame_dt / max_step - 1e-3).ceil() as u32).clamp(1, max_count);
    (count, frame_dt / count as f32)
}
