//! Gap Arena - two balls, one hole in the ceiling
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, contacts, gap geometry, match clock)
//! - `audio`: Fire-and-forget contact sound hook
//! - `settings`: Data-driven game configuration

pub mod audio;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, SoundEffect, SoundError, SoundSink};
pub use settings::{GameConfig, GapGrowth};

use glam::Vec2;

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    /// Fixed simulation substep ceiling (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per tick to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted from the host (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;
    /// Host cadence the per-tick gap increments were tuned for
    pub const NOMINAL_TICK_HZ: f32 = 60.0;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 300.0;
    pub const ARENA_HEIGHT: f32 = 300.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_SPEED: f32 = 600.0;
    /// Maximum ball speed
    pub const BALL_MAX_SPEED: f32 = 10_000.0;
    /// Speed boost on every wall or ball contact (multiplicative)
    pub const SPEED_INCREASE_FACTOR: f32 = 1.01;

    /// Match length in seconds
    pub const MATCH_DURATION: f64 = 30.0;

    /// Gap defaults
    pub const INITIAL_GAP_WIDTH: f32 = BALL_RADIUS * 2.5;
    pub const MAX_GAP_RATIO: f32 = 0.8; // of arena width
    pub const GAP_WIDEN_FACTOR: f32 = 1.1;
    pub const GAP_WIDENING_SPEED: f32 = 1.0;
    pub const GAP_NARROWING_SPEED: f32 = 0.5;
    /// Lower bound for both per-tick gap speeds
    pub const MIN_GAP_SPEED: f32 = 0.1;
    /// Depth of the painted strip under the hole
    pub const GAP_MARKER_DEPTH: f32 = 3.0;

    /// Circle scene defaults
    pub const CIRCLE_BALL_SPEED: f32 = 300.0;

    /// Touch tolerance for contact tests (clamped balls sit exactly on walls)
    pub const CONTACT_EPSILON: f32 = 1e-3;
}

/// Unit vector pointing at `angle` radians
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Rescale `vel` to `speed`, keeping its direction (zero stays zero)
#[inline]
pub fn with_speed(vel: Vec2, speed: f32) -> Vec2 {
    vel.normalize_or_zero() * speed
}
