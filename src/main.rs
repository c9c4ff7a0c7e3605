//! Gap Arena headless host
//!
//! Drives a match at a fixed simulated frame rate (as fast as the CPU
//! allows), logs the scoreboard once per simulated second and prints the
//! final snapshot as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::path::PathBuf;

    use clap::{Parser, ValueEnum};

    use gap_arena::audio::LogSink;
    use gap_arena::sim::{CircleScene, GameScene};
    use gap_arena::{GameConfig, GapGrowth};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    enum SceneKind {
        /// Two balls, gap in the top wall, 30 second match
        Square,
        /// One ball inside a ring
        Circle,
    }

    #[derive(Debug, Parser)]
    #[command(name = "gap-arena", about = "Run a headless Gap Arena match")]
    struct Args {
        /// Which scene to run
        #[arg(long, value_enum, default_value_t = SceneKind::Square)]
        scene: SceneKind,

        /// RNG seed (defaults to a random one)
        #[arg(long)]
        seed: Option<u64>,

        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Simulated host frame rate
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Let the gap grow toward its maximum
        #[arg(long)]
        widen: bool,

        /// Multiplier applied to the gap on every score
        #[arg(long)]
        widen_factor: Option<f32>,

        /// Upper bound for the gap width
        #[arg(long)]
        max_gap: Option<f32>,

        /// Per-tick gap growth while widening
        #[arg(long)]
        widening_speed: Option<f32>,

        /// Per-tick gap shrink while narrowing
        #[arg(long)]
        narrowing_speed: Option<f32>,

        /// Scale gap speeds by frame time instead of per tick
        #[arg(long)]
        time_scaled_gap: bool,

        /// Seconds to run the circle scene
        #[arg(long, default_value_t = 10.0)]
        circle_seconds: f64,
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        env_logger::init();
        let args = Args::parse();
        let seed = args.seed.unwrap_or_else(rand::random);
        let frame = 1.0 / args.fps.max(1.0);

        match args.scene {
            SceneKind::Square => run_square(&args, seed, frame),
            SceneKind::Circle => run_circle(&args, seed, frame),
        }
    }

    fn run_square(args: &Args, seed: u64, frame: f64) -> Result<(), Box<dyn std::error::Error>> {
        let config = match &args.config {
            Some(path) => GameConfig::load(path),
            None => GameConfig::default(),
        };

        let mut scene = GameScene::new(config, seed);
        scene.audio_mut().set_sink(Some(Box::new(LogSink)));
        scene.set_gap_widening_enabled(args.widen || scene.config().gap_widening);
        if let Some(f) = args.widen_factor {
            scene.set_gap_widening_factor(f);
        }
        if let Some(w) = args.max_gap {
            scene.set_max_gap_width(w);
        }
        if let Some(s) = args.widening_speed {
            scene.set_gap_widening_speed(s);
        }
        if let Some(s) = args.narrowing_speed {
            scene.set_gap_narrowing_speed(s);
        }
        if args.time_scaled_gap {
            scene.set_gap_growth(GapGrowth::TimeScaled);
        }

        scene.start();
        let mut now = 0.0;
        let mut next_report = 1.0;
        while !scene.is_game_over() {
            scene.tick(now);
            if scene.elapsed_time() >= next_report {
                let snap = scene.snapshot();
                log::info!(
                    "t={:>5.1}s  red {:>3}  green {:>3}  gap {:>6.1}",
                    snap.elapsed_time,
                    snap.red_score,
                    snap.green_score,
                    snap.gap_width
                );
                next_report += 1.0;
            }
            now += frame;
        }

        println!("{}", serde_json::to_string_pretty(&scene.snapshot())?);
        Ok(())
    }

    fn run_circle(args: &Args, seed: u64, frame: f64) -> Result<(), Box<dyn std::error::Error>> {
        let mut scene = CircleScene::standard(seed);
        let mut now = 0.0;
        while now <= args.circle_seconds {
            scene.tick(now);
            now += frame;
        }

        let ball = scene.ball();
        log::info!("Circle scene: {} bounces in {:.1}s", scene.bounces(), args.circle_seconds);
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "bounces": scene.bounces(),
                "pos": [ball.pos.x, ball.pos.y],
                "vel": [ball.vel.x, ball.vel.y],
            }))?
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    host::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive GameScene directly
}
