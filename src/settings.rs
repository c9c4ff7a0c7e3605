//! Game configuration
//!
//! Every tunable of the arena lives here. Loaded from JSON on native hosts,
//! falls back to the built-in defaults on any failure.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::BallColor;

/// How the per-tick gap speeds are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GapGrowth {
    /// Fixed increment per host tick, regardless of frame delta
    #[default]
    PerTick,
    /// Increment scaled by `dt * NOMINAL_TICK_HZ`
    TimeScaled,
}

impl GapGrowth {
    pub fn as_str(&self) -> &'static str {
        match self {
            GapGrowth::PerTick => "per-tick",
            GapGrowth::TimeScaled => "time-scaled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "per-tick" | "tick" => Some(GapGrowth::PerTick),
            "time-scaled" | "time" | "scaled" => Some(GapGrowth::TimeScaled),
            _ => None,
        }
    }

    /// Scale applied to one tick's increment for a frame of `dt` seconds
    pub fn tick_scale(&self, dt: f32) -> f32 {
        match self {
            GapGrowth::PerTick => 1.0,
            GapGrowth::TimeScaled => dt * NOMINAL_TICK_HZ,
        }
    }
}

/// Arena and match configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Balls ===
    pub ball_radius: f32,
    /// One ball is spawned per entry
    pub ball_colors: Vec<BallColor>,
    pub initial_speed: f32,
    pub max_speed: f32,
    pub speed_increase_factor: f32,

    // === Match ===
    /// Match length in seconds
    pub match_duration: f64,

    // === Gap ===
    pub initial_gap_width: f32,
    pub max_gap_width: f32,
    pub gap_widening: bool,
    pub gap_widen_factor: f32,
    pub gap_widening_speed: f32,
    pub gap_narrowing_speed: f32,
    pub gap_growth: GapGrowth,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            ball_radius: BALL_RADIUS,
            ball_colors: BallColor::ALL.to_vec(),
            initial_speed: BALL_START_SPEED,
            max_speed: BALL_MAX_SPEED,
            speed_increase_factor: SPEED_INCREASE_FACTOR,

            match_duration: MATCH_DURATION,

            initial_gap_width: INITIAL_GAP_WIDTH,
            max_gap_width: ARENA_WIDTH * MAX_GAP_RATIO,
            gap_widening: false,
            gap_widen_factor: GAP_WIDEN_FACTOR,
            gap_widening_speed: GAP_WIDENING_SPEED,
            gap_narrowing_speed: GAP_NARROWING_SPEED,
            gap_growth: GapGrowth::PerTick,
        }
    }
}

impl GameConfig {
    /// Config for an arena of the given size, gap limits derived from it
    pub fn for_arena(width: f32, height: f32) -> Self {
        Self {
            arena_width: width,
            arena_height: height,
            max_gap_width: width * MAX_GAP_RATIO,
            ..Self::default()
        }
    }

    /// Apply the same clamps the runtime setters apply
    pub fn sanitized(mut self) -> Self {
        self.ball_radius = self.ball_radius.max(0.5);
        self.arena_width = self.arena_width.max(self.ball_radius * 2.0);
        self.arena_height = self.arena_height.max(self.ball_radius * 2.0);
        self.max_speed = self.max_speed.max(0.0);
        self.initial_speed = self.initial_speed.clamp(0.0, self.max_speed);
        self.speed_increase_factor = self.speed_increase_factor.max(1.0);
        self.match_duration = self.match_duration.max(0.0);
        self.initial_gap_width = self.initial_gap_width.clamp(0.0, self.arena_width);
        self.max_gap_width = self
            .max_gap_width
            .clamp(self.initial_gap_width, self.arena_width);
        self.gap_widen_factor = self.gap_widen_factor.max(1.0);
        self.gap_widening_speed = self.gap_widening_speed.max(MIN_GAP_SPEED);
        self.gap_narrowing_speed = self.gap_narrowing_speed.max(MIN_GAP_SPEED);
        self
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load config from a JSON file, defaults on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => log::warn!("Invalid config {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read config {}: {}", path.display(), e),
        }

        log::info!("Using default config");
        Self::default()
    }
}
