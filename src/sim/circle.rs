//! Circular arena: one ball bouncing inside a ring
//!
//! No gap, no scoring, no clock. The ball starts at the centre with a random
//! heading and reflects perfectly off the boundary forever.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{ball_circle_boundary_collision, resolve_static};
use super::motion;
use super::state::{Ball, BallColor};
use crate::consts::*;

pub struct CircleScene {
    center: Vec2,
    boundary_radius: f32,
    ball: Ball,
    last_time: Option<f64>,
    bounces: u64,
}

impl CircleScene {
    /// Ring of radius `(min(w, h) - 2 * ball_radius) / 2` centred in the arena
    pub fn new(width: f32, height: f32, ball_radius: f32, speed: f32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let center = Vec2::new(width / 2.0, height / 2.0);
        let boundary_radius = ((width.min(height) - ball_radius * 2.0) / 2.0).max(ball_radius);

        // Color only matters to scoring scenes
        let mut ball = Ball::new(1, BallColor::Red, ball_radius);
        ball.pos = center;
        ball.launch(&mut rng, speed);

        Self {
            center,
            boundary_radius,
            ball,
            last_time: None,
            bounces: 0,
        }
    }

    /// Standard layout: 300x300, radius 10, speed 300
    pub fn standard(seed: u64) -> Self {
        Self::new(ARENA_WIDTH, ARENA_HEIGHT, BALL_RADIUS, CIRCLE_BALL_SPEED, seed)
    }

    /// Advance to host time `current_time` (seconds)
    pub fn tick(&mut self, current_time: f64) {
        let frame_dt = match self.last_time {
            Some(last) => (current_time - last).clamp(0.0, MAX_FRAME_DT) as f32,
            None => 0.0,
        };
        self.last_time = Some(current_time);

        let (count, step) = motion::substeps(frame_dt, SIM_DT, MAX_SUBSTEPS);
        for _ in 0..count {
            self.step(step);
        }
    }

    fn step(&mut self, dt: f32) {
        self.ball.pos += self.ball.vel * dt;

        let hit = ball_circle_boundary_collision(
            self.ball.pos,
            self.ball.radius,
            self.center,
            self.boundary_radius,
        );
        if hit.hit {
            let approaching = self.ball.vel.dot(hit.normal) < 0.0;
            resolve_static(&mut self.ball, &hit);
            if approaching {
                self.bounces += 1;
            }
        }
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn boundary_radius(&self) -> f32 {
        self.boundary_radius
    }

    /// Reflections off the ring so far
    pub fn bounces(&self) -> u64 {
        self.bounces
    }
}
