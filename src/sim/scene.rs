//! The arena simulation instance
//!
//! `GameScene` exclusively owns balls, scores and gap state. The host drives
//! it with `tick(current_time)` and polls `snapshot()`; everything else
//! happens inside one tick on the caller's thread.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{
    ball_ball_collision, ball_segment_collision, resolve_ball_pair, resolve_static,
};
use super::contact::{ContactEvent, ContactKind, ContactQueue, ContactSender, ContactTracker};
use super::gap::GapController;
use super::geometry::{ArenaSize, BoundaryGeometry, BoundaryManager};
use super::motion;
use super::state::{Ball, MatchPhase, MatchSnapshot, MatchState, random_position};
use super::BallColor;
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::*;
use crate::settings::{GameConfig, GapGrowth};

pub struct GameScene {
    config: GameConfig,
    arena: ArenaSize,
    seed: u64,
    rng: Pcg32,
    /// Sorted by id for deterministic iteration
    balls: Vec<Ball>,
    gap: GapController,
    boundary: BoundaryManager,
    clock: MatchState,
    tracker: ContactTracker,
    queue: ContactQueue,
    audio: AudioManager,
    /// Running ticks since the last start
    ticks: u64,
    started: bool,
}

impl GameScene {
    /// Build an idle scene; balls are placed but at rest until `start`
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let config = config.sanitized();
        let arena = ArenaSize::new(config.arena_width, config.arena_height);
        let mut rng = Pcg32::seed_from_u64(seed);

        let balls = config
            .ball_colors
            .iter()
            .enumerate()
            .map(|(i, &color)| {
                let mut ball = Ball::new(i as u32 + 1, color, config.ball_radius);
                ball.pos = random_position(&mut rng, arena, config.ball_radius);
                ball
            })
            .collect();

        let gap = GapController::new(&config);
        let boundary = BoundaryManager::new(arena, gap.width());

        Self {
            clock: MatchState::new(config.match_duration),
            arena,
            seed,
            rng,
            balls,
            gap,
            boundary,
            tracker: ContactTracker::new(),
            queue: ContactQueue::new(),
            audio: AudioManager::silent(),
            ticks: 0,
            started: false,
            config,
        }
    }

    // === Lifecycle ===

    /// Fresh match: scores, clock and gap reset, every ball respawned
    pub fn start(&mut self) {
        self.clock.begin();
        self.gap.reset();
        self.boundary.rebuild(self.gap.width());
        self.tracker.clear();
        self.queue.discard_pending();
        self.ticks = 0;
        self.started = true;

        for ball in &mut self.balls {
            ball.respawn(&mut self.rng, self.arena, self.config.initial_speed);
        }
        log::info!(
            "Match started (seed {}, {} balls, {:.0}s)",
            self.seed,
            self.balls.len(),
            self.clock.duration
        );
    }

    /// Freeze: velocities zeroed, scores and clock kept
    pub fn stop(&mut self) {
        self.clock.halt();
        self.freeze();
        log::info!("Match stopped at {:.2}s", self.clock.elapsed);
    }

    /// Continue a stopped match without resetting it
    ///
    /// Balls relaunch from where they stand. Returns false when there is
    /// nothing to resume (running already, or the match is over).
    pub fn resume(&mut self) -> bool {
        if !self.started || self.clock.phase() != MatchPhase::Idle {
            return false;
        }
        self.clock.running = true;
        self.clock.last_time = None;
        for ball in &mut self.balls {
            ball.launch(&mut self.rng, self.config.initial_speed);
        }
        log::info!("Match resumed at {:.2}s", self.clock.elapsed);
        true
    }

    /// Advance one host frame ending at `current_time` (seconds)
    pub fn tick(&mut self, current_time: f64) {
        let was_running = self.clock.running;
        let frame_dt = self.clock.advance_clock(current_time);

        if !self.clock.running {
            if was_running && self.clock.game_over {
                self.freeze();
                self.audio.play(SoundEffect::GameOver);
                log::info!(
                    "Game over: red {} - green {}",
                    self.clock.score(BallColor::Red),
                    self.clock.score(BallColor::Green)
                );
            }
            return;
        }

        self.ticks += 1;
        let frame_dt = frame_dt.min(MAX_FRAME_DT) as f32;
        let (count, step) = motion::substeps(frame_dt, SIM_DT, MAX_SUBSTEPS);
        for _ in 0..count {
            self.step(step);
        }

        self.gap.on_tick(frame_dt);
        self.boundary.geometry_for(self.gap.width());
    }

    /// One physics substep: move, collide, then apply queued contacts
    fn step(&mut self, dt: f32) {
        motion::advance(&mut self.balls, self.arena, dt);

        let touching = self.detect_contacts();
        for contact in self.tracker.update(touching) {
            self.queue.push(contact);
        }
        self.process_pending_contacts();
    }

    /// Physical response for everything touching; returns the touching set
    fn detect_contacts(&mut self) -> BTreeSet<ContactEvent> {
        let mut touching = BTreeSet::new();
        let geometry = self.boundary.geometry_for(self.gap.width());

        for j in 1..self.balls.len() {
            let (left, right) = self.balls.split_at_mut(j);
            let b = &mut right[0];
            for a in left.iter_mut() {
                let hit = ball_ball_collision(a.pos, a.radius, b.pos, b.radius);
                if hit.hit {
                    resolve_ball_pair(a, b, &hit);
                    touching.insert(ContactEvent::pair(a.id, b.id));
                }
            }
        }

        for ball in &mut self.balls {
            for wall in &geometry.walls {
                let hit = ball_segment_collision(
                    ball.pos,
                    ball.radius,
                    &wall.segment,
                    wall.kind.inward_normal(),
                );
                if hit.hit {
                    resolve_static(ball, &hit);
                    touching.insert(ContactEvent::wall(ball.id, wall.kind));
                }
            }

            if geometry
                .hole
                .touches_circle(ball.pos, ball.radius, CONTACT_EPSILON)
            {
                touching.insert(ContactEvent::hole(ball.id));
            }

            ball.clamp_to(self.arena);
        }

        touching
    }

    /// Drain the contact queue, applying scoring and speed-up policy
    pub fn process_pending_contacts(&mut self) {
        while let Some(contact) = self.queue.pop() {
            self.apply_contact(contact);
        }
    }

    fn apply_contact(&mut self, contact: ContactEvent) {
        if !self.clock.running {
            return;
        }
        let Some(idx) = self.ball_index(contact.ball) else {
            log::debug!("Contact for unknown ball {}", contact.ball);
            return;
        };

        match contact.other {
            ContactKind::Hole => {
                let ball = &mut self.balls[idx];
                self.clock.add_point(ball.color);
                ball.respawn(&mut self.rng, self.arena, self.config.initial_speed);
                self.tracker.forget_ball(contact.ball);

                self.gap.on_score_event();
                self.boundary.geometry_for(self.gap.width());
                log::debug!(
                    "{} scored ({}), gap {:.1}",
                    self.balls[idx].color.as_str(),
                    self.clock.score(self.balls[idx].color),
                    self.gap.width()
                );
            }
            ContactKind::Wall(_) => {
                self.balls[idx].boost(self.config.speed_increase_factor, self.config.max_speed);
            }
            ContactKind::Ball(other) => {
                let Some(other_idx) = self.ball_index(other) else {
                    log::debug!("Contact for unknown ball {}", other);
                    return;
                };
                for i in [idx, other_idx] {
                    self.balls[i].boost(self.config.speed_increase_factor, self.config.max_speed);
                }
            }
        }

        self.audio.contact(contact.is_scoring());
    }

    fn freeze(&mut self) {
        for ball in &mut self.balls {
            ball.vel = Vec2::ZERO;
        }
        self.tracker.clear();
        self.queue.discard_pending();
    }

    fn ball_index(&self, id: u32) -> Option<usize> {
        self.balls.iter().position(|b| b.id == id)
    }

    // === Read-only view ===

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            elapsed_time: self.clock.elapsed,
            red_score: self.clock.score(BallColor::Red),
            green_score: self.clock.score(BallColor::Green),
            is_moving: self.clock.running,
            is_game_over: self.clock.game_over,
            gap_width: self.gap.width(),
        }
    }

    pub fn elapsed_time(&self) -> f64 {
        self.clock.elapsed
    }

    pub fn red_score(&self) -> u32 {
        self.clock.score(BallColor::Red)
    }

    pub fn green_score(&self) -> u32 {
        self.clock.score(BallColor::Green)
    }

    pub fn is_moving(&self) -> bool {
        self.clock.running
    }

    pub fn is_game_over(&self) -> bool {
        self.clock.game_over
    }

    pub fn phase(&self) -> MatchPhase {
        self.clock.phase()
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Direct ball access for hosts that script positions (replays, tests)
    pub fn balls_mut(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    pub fn arena(&self) -> ArenaSize {
        self.arena
    }

    pub fn gap(&self) -> &GapController {
        &self.gap
    }

    pub fn geometry(&self) -> &BoundaryGeometry {
        let geometry = self.boundary.current();
        debug_assert_eq!(geometry.gap_width, self.gap.width());
        geometry
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // === Hooks ===

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    /// Producer handle for contacts detected outside the scene
    ///
    /// Events are applied on the scene's own thread at the next drain.
    pub fn contact_sender(&self) -> ContactSender {
        self.queue.sender()
    }

    // === Configuration (each clamps, effective next tick/event) ===

    pub fn set_gap_widening_enabled(&mut self, enabled: bool) {
        self.gap.set_widening(enabled);
    }

    pub fn set_gap_widening_factor(&mut self, factor: f32) {
        self.gap.set_widen_factor(factor);
    }

    pub fn set_max_gap_width(&mut self, width: f32) {
        self.gap.set_max_width(width);
        self.boundary.geometry_for(self.gap.width());
    }

    pub fn set_gap_widening_speed(&mut self, speed: f32) {
        self.gap.set_widening_speed(speed);
    }

    pub fn set_gap_narrowing_speed(&mut self, speed: f32) {
        self.gap.set_narrowing_speed(speed);
    }

    pub fn set_gap_growth(&mut self, growth: GapGrowth) {
        self.gap.set_growth(growth);
    }
}
