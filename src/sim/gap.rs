//! Gap width state machine
//!
//! The gap trends toward `max_width` while widening is enabled and back
//! toward `initial_width` otherwise. Every mutation keeps
//! `initial_width <= width <= max_width`.

use serde::{Deserialize, Serialize};

use crate::consts::MIN_GAP_SPEED;
use crate::settings::{GameConfig, GapGrowth};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapController {
    width: f32,
    initial_width: f32,
    max_width: f32,
    /// Upper bound for `max_width` (arena width)
    arena_width: f32,
    widening: bool,
    widen_factor: f32,
    widening_speed: f32,
    narrowing_speed: f32,
    growth: GapGrowth,
}

impl GapController {
    pub fn new(config: &GameConfig) -> Self {
        let initial_width = config.initial_gap_width.clamp(0.0, config.arena_width);
        let mut gap = Self {
            width: initial_width,
            initial_width,
            max_width: initial_width,
            arena_width: config.arena_width,
            widening: config.gap_widening,
            widen_factor: 1.0,
            widening_speed: MIN_GAP_SPEED,
            narrowing_speed: MIN_GAP_SPEED,
            growth: config.gap_growth,
        };
        gap.set_max_width(config.max_gap_width);
        gap.set_widen_factor(config.gap_widen_factor);
        gap.set_widening_speed(config.gap_widening_speed);
        gap.set_narrowing_speed(config.gap_narrowing_speed);
        gap
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn initial_width(&self) -> f32 {
        self.initial_width
    }

    pub fn max_width(&self) -> f32 {
        self.max_width
    }

    pub fn is_widening(&self) -> bool {
        self.widening
    }

    pub fn widen_factor(&self) -> f32 {
        self.widen_factor
    }

    pub fn widening_speed(&self) -> f32 {
        self.widening_speed
    }

    pub fn narrowing_speed(&self) -> f32 {
        self.narrowing_speed
    }

    /// Back to the initial width (match start)
    pub fn reset(&mut self) {
        self.width = self.initial_width;
    }

    /// A ball went through the hole: jump one factor toward the active limit
    pub fn on_score_event(&mut self) {
        self.width = if self.widening {
            (self.width * self.widen_factor).min(self.max_width)
        } else {
            (self.width / self.widen_factor).max(self.initial_width)
        };
    }

    /// Per-tick drift toward the active limit
    pub fn on_tick(&mut self, dt: f32) {
        let scale = self.growth.tick_scale(dt).max(0.0);
        self.width = if self.widening {
            (self.width + self.widening_speed * scale).min(self.max_width)
        } else {
            (self.width - self.narrowing_speed * scale).max(self.initial_width)
        };
    }

    pub fn set_widening(&mut self, enabled: bool) {
        self.widening = enabled;
    }

    pub fn set_widen_factor(&mut self, factor: f32) {
        self.widen_factor = factor.max(1.0);
    }

    /// Clamped to `[initial_width, arena_width]`; the current width follows
    pub fn set_max_width(&mut self, width: f32) {
        self.max_width = width.clamp(self.initial_width, self.arena_width);
        self.width = self.width.min(self.max_width);
    }

    pub fn set_widening_speed(&mut self, speed: f32) {
        self.widening_speed = speed.max(MIN_GAP_SPEED);
    }

    pub fn set_narrowing_speed(&mut self, speed: f32) {
        self.narrowing_speed = speed.max(MIN_GAP_SPEED);
    }

    pub fn set_growth(&mut self, growth: GapGrowth) {
        self.growth = growth;
    }
}
