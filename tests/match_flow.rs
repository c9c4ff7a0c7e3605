//! Match lifecycle: start, scoring, game over, restart

use std::cell::RefCell;
use std::rc::Rc;

use gap_arena::audio::{SoundEffect, SoundError, SoundSink};
use gap_arena::sim::{ContactEvent, GameScene, MatchPhase, WallKind};
use gap_arena::GameConfig;
use glam::Vec2;

const FRAME: f64 = 1.0 / 60.0;

struct Recorder(Rc<RefCell<Vec<SoundEffect>>>);

impl SoundSink for Recorder {
    fn play(&mut self, effect: SoundEffect, _volume: f32) -> Result<(), SoundError> {
        self.0.borrow_mut().push(effect);
        Ok(())
    }
}

struct Broken;

impl SoundSink for Broken {
    fn play(&mut self, _: SoundEffect, _: f32) -> Result<(), SoundError> {
        Err(SoundError("speaker on fire".into()))
    }
}

/// Run frames until `until` seconds of host time
fn run_until(scene: &mut GameScene, from: f64, until: f64) -> f64 {
    let mut now = from;
    while now <= until {
        scene.tick(now);
        now += FRAME;
    }
    now
}

#[test]
fn full_match_ends_in_game_over_exactly_once() {
    let mut scene = GameScene::new(GameConfig::default(), 2024);
    assert_eq!(scene.phase(), MatchPhase::Idle);

    scene.start();
    let now = run_until(&mut scene, 0.0, 29.9);
    assert_eq!(scene.phase(), MatchPhase::Running);

    // The tick that crosses 30s ends the match
    let mut crossed_at = None;
    let mut t = now;
    while crossed_at.is_none() {
        scene.tick(t);
        if scene.is_game_over() {
            crossed_at = Some(t);
        }
        t += FRAME;
    }
    assert!(scene.elapsed_time() >= 30.0);
    assert!(!scene.is_moving());
    assert!(scene.balls().iter().all(|b| b.vel == Vec2::ZERO));

    // Frozen afterwards: no more clock, no more points
    let frozen = scene.snapshot();
    scene.contact_sender().send(ContactEvent::hole(1));
    run_until(&mut scene, t, t + 5.0);
    scene.process_pending_contacts();
    assert_eq!(scene.snapshot(), frozen);
}

#[test]
fn restart_after_game_over_resets_like_first_start() {
    let mut scene = GameScene::new(GameConfig::default(), 7);
    scene.start();
    scene.contact_sender().send(ContactEvent::hole(1));
    scene.contact_sender().send(ContactEvent::hole(2));
    scene.process_pending_contacts();
    let now = run_until(&mut scene, 0.0, 31.0);
    assert!(scene.is_game_over());
    assert!(scene.red_score() >= 1 && scene.green_score() >= 1);

    scene.start();
    let snap = scene.snapshot();
    assert_eq!(snap.red_score, 0);
    assert_eq!(snap.green_score, 0);
    assert_eq!(snap.elapsed_time, 0.0);
    assert!(snap.is_moving);
    assert!(!snap.is_game_over);
    assert_eq!(snap.gap_width, scene.gap().initial_width());

    // Host time keeps going; the first tick only re-anchors the clock
    scene.tick(now + 100.0);
    assert_eq!(scene.elapsed_time(), 0.0);
    scene.tick(now + 100.5);
    assert!((scene.elapsed_time() - 0.5).abs() < 1e-9);
}

#[test]
fn scoring_counts_only_the_matching_color() {
    let mut scene = GameScene::new(GameConfig::default(), 31);
    scene.start();
    scene.tick(0.0);

    let sender = scene.contact_sender();
    sender.send(ContactEvent::hole(1)); // red
    sender.send(ContactEvent::hole(1));
    sender.send(ContactEvent::hole(2)); // green
    scene.process_pending_contacts();

    assert_eq!(scene.red_score(), 2);
    assert_eq!(scene.green_score(), 1);
}

#[test]
fn scoring_resets_a_fast_ball_to_initial_speed() {
    let mut scene = GameScene::new(GameConfig::default(), 37);
    scene.start();
    scene.tick(0.0);

    scene.balls_mut()[0].vel = Vec2::new(4_000.0, 3_000.0);
    scene.contact_sender().send(ContactEvent::hole(1));
    scene.process_pending_contacts();

    let red = &scene.balls()[0];
    assert!((red.speed() - scene.config().initial_speed).abs() < 0.01);
}

#[test]
fn wall_and_hole_in_one_batch_leave_initial_speed() {
    let mut scene = GameScene::new(GameConfig::default(), 41);
    scene.start();
    scene.tick(0.0);

    let sender = scene.contact_sender();
    sender.send(ContactEvent::wall(1, WallKind::TopLeft));
    sender.send(ContactEvent::hole(1));
    scene.process_pending_contacts();

    assert_eq!(scene.red_score(), 1);
    assert!((scene.balls()[0].speed() - scene.config().initial_speed).abs() < 0.01);
}

#[test]
fn repeated_wall_contacts_never_pass_max_speed() {
    let mut config = GameConfig::default();
    config.max_speed = 700.0;
    let mut scene = GameScene::new(config, 43);
    scene.start();
    scene.tick(0.0);

    let sender = scene.contact_sender();
    for _ in 0..200 {
        sender.send(ContactEvent::wall(2, WallKind::Bottom));
    }
    scene.process_pending_contacts();
    assert!((scene.balls()[1].speed() - 700.0).abs() < 0.01);
}

#[test]
fn gap_widens_on_score_example() {
    let mut config = GameConfig::default();
    config.gap_widening = true;
    let mut scene = GameScene::new(config, 47);
    scene.start();

    scene.contact_sender().send(ContactEvent::hole(1));
    scene.process_pending_contacts();
    assert!((scene.gap().width() - 27.5).abs() < 1e-4);
    assert_eq!(scene.geometry().gap_width, scene.gap().width());
}

#[test]
fn every_processed_contact_cues_a_bounce() {
    let played = Rc::new(RefCell::new(Vec::new()));
    let mut scene = GameScene::new(GameConfig::default(), 53);
    scene
        .audio_mut()
        .set_sink(Some(Box::new(Recorder(played.clone()))));
    scene.start();

    let sender = scene.contact_sender();
    sender.send(ContactEvent::wall(1, WallKind::Left));
    sender.send(ContactEvent::pair(1, 2));
    sender.send(ContactEvent::hole(2));
    scene.process_pending_contacts();

    assert_eq!(
        *played.borrow(),
        vec![SoundEffect::Bounce, SoundEffect::Bounce, SoundEffect::Bounce]
    );
}

#[test]
fn broken_sound_sink_does_not_change_the_match() {
    let mut quiet = GameScene::new(GameConfig::default(), 59);
    let mut noisy = GameScene::new(GameConfig::default(), 59);
    noisy.audio_mut().set_sink(Some(Box::new(Broken)));

    quiet.start();
    noisy.start();
    run_until(&mut quiet, 0.0, 10.0);
    run_until(&mut noisy, 0.0, 10.0);

    assert_eq!(quiet.snapshot(), noisy.snapshot());
    assert_eq!(quiet.balls(), noisy.balls());
}

#[test]
fn balls_eventually_score_in_a_long_match() {
    // Narrow gap, but speeds climb with every bounce
    let mut config = GameConfig::default();
    config.match_duration = 120.0;
    let mut scene = GameScene::new(config, 61);
    scene.start();
    run_until(&mut scene, 0.0, 121.0);

    assert!(scene.is_game_over());
    assert!(scene.red_score() + scene.green_score() > 0);
}
