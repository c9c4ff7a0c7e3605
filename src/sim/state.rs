//! Match state and core simulation types

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::ArenaSize;
use crate::{direction_from_angle, with_speed};

/// Ball identity; every ball scores for its color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallColor {
    Red,
    Green,
}

impl BallColor {
    pub const ALL: [BallColor; 2] = [BallColor::Red, BallColor::Green];

    /// Index into per-color score tables
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            BallColor::Red => 0,
            BallColor::Green => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BallColor::Red => "red",
            BallColor::Green => "green",
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub color: BallColor,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Resting ball at the arena origin corner; call `respawn` to place it
    pub fn new(id: u32, color: BallColor, radius: f32) -> Self {
        Self {
            id,
            color,
            pos: Vec2::splat(radius),
            vel: Vec2::ZERO,
            radius,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Uniformly random position inside the arena, random heading at `speed`
    pub fn respawn<R: Rng>(&mut self, rng: &mut R, arena: ArenaSize, speed: f32) {
        self.pos = random_position(rng, arena, self.radius);
        self.launch(rng, speed);
    }

    /// Random heading at `speed`, position untouched
    pub fn launch<R: Rng>(&mut self, rng: &mut R, speed: f32) {
        let angle = rng.random_range(0.0..=std::f32::consts::TAU);
        self.vel = direction_from_angle(angle) * speed;
    }

    /// Multiply speed by `factor`, capped at `max_speed`; resting balls stay put
    pub fn boost(&mut self, factor: f32, max_speed: f32) {
        let speed = self.speed();
        if speed > 0.0 {
            self.vel = with_speed(self.vel, (speed * factor).min(max_speed));
        }
    }

    /// Keep the centre within `[radius, dimension - radius]` on both axes
    pub fn clamp_to(&mut self, arena: ArenaSize) {
        self.pos.x = self.pos.x.clamp(self.radius, arena.width - self.radius);
        self.pos.y = self.pos.y.clamp(self.radius, arena.height - self.radius);
    }
}

/// Uniform point with a `radius` margin from every edge
pub fn random_position<R: Rng>(rng: &mut R, arena: ArenaSize, radius: f32) -> Vec2 {
    Vec2::new(
        rng.random_range(radius..=arena.width - radius),
        rng.random_range(radius..=arena.height - radius),
    )
}

/// Lifecycle phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Not running (never started, or stopped by the host)
    Idle,
    /// Clock running, contacts live
    Running,
    /// Clock ran out
    GameOver,
}

/// Match clock and score tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    /// Seconds played, monotonically non-decreasing while running
    pub elapsed: f64,
    pub duration: f64,
    /// Per-color scores, indexed by `BallColor::index`
    pub scores: [u32; 2],
    pub running: bool,
    pub game_over: bool,
    /// Host time of the previous running tick
    #[serde(skip)]
    pub last_time: Option<f64>,
}

impl MatchState {
    pub fn new(duration: f64) -> Self {
        Self {
            elapsed: 0.0,
            duration,
            scores: [0; 2],
            running: false,
            game_over: false,
            last_time: None,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        if self.game_over {
            MatchPhase::GameOver
        } else if self.running {
            MatchPhase::Running
        } else {
            MatchPhase::Idle
        }
    }

    /// Full reset into a fresh running match
    pub fn begin(&mut self) {
        self.elapsed = 0.0;
        self.scores = [0; 2];
        self.running = true;
        self.game_over = false;
        self.last_time = None;
    }

    pub fn halt(&mut self) {
        self.running = false;
        self.last_time = None;
    }

    /// Advance the clock to host time `now`
    ///
    /// Returns the frame delta (0 on the first tick after a start). Sets
    /// `game_over` and halts once `elapsed >= duration`.
    pub fn advance_clock(&mut self, now: f64) -> f64 {
        if !self.running || self.game_over {
            self.last_time = None;
            return 0.0;
        }

        let dt = match self.last_time {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.elapsed += dt;
        self.last_time = Some(now);

        if self.elapsed >= self.duration {
            self.game_over = true;
            self.halt();
        }
        dt
    }

    pub fn score(&self, color: BallColor) -> u32 {
        self.scores[color.index()]
    }

    pub fn add_point(&mut self, color: BallColor) {
        self.scores[color.index()] += 1;
    }

    pub fn time_left(&self) -> f64 {
        (self.duration - self.elapsed).max(0.0)
    }
}

/// Read-only view of a match for hosts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub elapsed_time: f64,
    pub red_score: u32,
    pub green_score: u32,
    pub is_moving: bool,
    pub is_game_over: bool,
    pub gap_width: f32,
}
