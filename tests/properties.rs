//! Invariants that must hold for any seed, settings and frame cadence

use gap_arena::sim::{Ball, BallColor, GameScene, GapController, WallKind};
use gap_arena::{GameConfig, GapGrowth};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum GapOp {
    Tick(f32),
    Score,
    Widening(bool),
    Factor(f32),
    MaxWidth(f32),
    WideningSpeed(f32),
    NarrowingSpeed(f32),
}

fn gap_op() -> impl Strategy<Value = GapOp> {
    prop_oneof![
        (0.0f32..0.2).prop_map(GapOp::Tick),
        Just(GapOp::Score),
        any::<bool>().prop_map(GapOp::Widening),
        (-2.0f32..3.0).prop_map(GapOp::Factor),
        (-100.0f32..600.0).prop_map(GapOp::MaxWidth),
        (-5.0f32..20.0).prop_map(GapOp::WideningSpeed),
        (-5.0f32..20.0).prop_map(GapOp::NarrowingSpeed),
    ]
}

proptest! {
    #[test]
    fn gap_width_stays_within_limits(
        ops in prop::collection::vec(gap_op(), 1..200),
        scaled in any::<bool>(),
    ) {
        let mut gap = GapController::new(&GameConfig::default());
        if scaled {
            gap.set_growth(GapGrowth::TimeScaled);
        }
        for op in ops {
            match op {
                GapOp::Tick(dt) => gap.on_tick(dt),
                GapOp::Score => gap.on_score_event(),
                GapOp::Widening(on) => gap.set_widening(on),
                GapOp::Factor(f) => gap.set_widen_factor(f),
                GapOp::MaxWidth(w) => gap.set_max_width(w),
                GapOp::WideningSpeed(s) => gap.set_widening_speed(s),
                GapOp::NarrowingSpeed(s) => gap.set_narrowing_speed(s),
            }
            prop_assert!(gap.width() >= gap.initial_width());
            prop_assert!(gap.width() <= gap.max_width());
            prop_assert!(gap.max_width() <= 300.0);
            prop_assert!(gap.widen_factor() >= 1.0);
            prop_assert!(gap.widening_speed() >= 0.1);
            prop_assert!(gap.narrowing_speed() >= 0.1);
        }
    }

    #[test]
    fn balls_stay_inside_the_arena(
        seed in any::<u64>(),
        fps in 20.0f64..240.0,
        widen in any::<bool>(),
    ) {
        let mut config = GameConfig::default();
        config.gap_widening = widen;
        let mut scene = GameScene::new(config, seed);
        scene.start();

        let frame = 1.0 / fps;
        for i in 0..(fps as usize * 5) {
            scene.tick(i as f64 * frame);
            let arena = scene.arena();
            for ball in scene.balls() {
                prop_assert!(ball.pos.x >= ball.radius && ball.pos.x <= arena.width - ball.radius);
                prop_assert!(ball.pos.y >= ball.radius && ball.pos.y <= arena.height - ball.radius);
                prop_assert!(ball.speed() <= scene.config().max_speed + 0.5);
            }
            let gap = scene.gap();
            prop_assert!(gap.width() >= gap.initial_width() && gap.width() <= gap.max_width());
            prop_assert_eq!(scene.geometry().gap_width, gap.width());
        }
    }

    #[test]
    fn boost_never_exceeds_max_speed(
        vx in -10_000.0f32..10_000.0,
        vy in -10_000.0f32..10_000.0,
        hits in 1usize..500,
    ) {
        let mut ball = Ball::new(1, BallColor::Green, 10.0);
        ball.vel = glam::Vec2::new(vx, vy);
        let start = ball.speed();
        for _ in 0..hits {
            ball.boost(1.01, 10_000.0);
            prop_assert!(ball.speed() <= 10_000.0 + 0.5);
        }
        prop_assert!(ball.speed() + 0.5 >= start.min(10_000.0));
    }

    #[test]
    fn geometry_frames_the_gap(width in 25.0f32..300.0) {
        let mut config = GameConfig::default();
        config.gap_widening = true;
        config.max_gap_width = 300.0;
        let mut scene = GameScene::new(config, 1);
        scene.start();
        scene.set_max_gap_width(width);
        // Widen all the way to the (possibly lowered) max
        for i in 0..400 {
            scene.tick(i as f64 / 60.0);
            if scene.is_game_over() {
                break;
            }
        }
        let geo = scene.geometry();
        let half = geo.gap_width / 2.0;
        prop_assert!((geo.wall(WallKind::TopLeft).segment.end.x - (geo.gap_center - half)).abs() < 1e-3);
        prop_assert!((geo.wall(WallKind::TopRight).segment.start.x - (geo.gap_center + half)).abs() < 1e-3);
        prop_assert!((geo.hole.length() - geo.gap_width).abs() < 1e-3);
        prop_assert!(geo.gap_width <= width + 1e-3);
    }
}
