//! Brick Breaker headless entry point
//!
//! Drives the simulation at the fixed logical tick rate with an autopilot
//! feeding the input latch, logs round events and prints the final state as
//! JSON.
//!
//! Usage: `brick-breaker [tuning.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use brick_breaker::Tuning;
    use brick_breaker::consts::*;
    use brick_breaker::sim::{GameState, InputLatch, TickOutcome, tick};

    /// Logical time limit before the run is abandoned (30 minutes of play)
    const MAX_TICKS: u64 = TICK_RATE_HZ as u64 * 60 * 30;

    /// Autopilot: keeps the paddle under the ball, aiming slightly off-center
    struct Autopilot {
        /// Preferred impact offset from paddle center, changes every level
        offset: f32,
    }

    impl Autopilot {
        fn new() -> Self {
            Self { offset: 0.0 }
        }

        fn on_level(&mut self, level: u32, paddle_width: f32) {
            // Cycle through left, center and right impacts
            let lane = (level % 3) as f32 - 1.0;
            self.offset = lane * paddle_width * 0.2;
        }

        fn steer(&self, state: &GameState, latch: &InputLatch) {
            let paddle = &state.paddle;
            let center = paddle.x + paddle.width / 2.0 + self.offset;
            let error = state.ball.pos.x - center;
            let direction = if error.abs() <= paddle.step / 2.0 {
                0
            } else if error > 0.0 {
                1
            } else {
                -1
            };
            latch.set_direction(direction);
        }
    }

    fn load_tuning(path: Option<&str>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        match Tuning::from_path(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}; using default tuning", e);
                Tuning::default()
            }
        }
    }

    fn parse_seed(arg: Option<&str>) -> u64 {
        match arg.map(str::parse::<u64>) {
            Some(Ok(seed)) => seed,
            Some(Err(e)) => {
                log::warn!("Invalid seed ({}), using 0", e);
                0
            }
            None => 0,
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Brick Breaker (headless) starting...");

        let args: Vec<String> = std::env::args().collect();
        let tuning = load_tuning(args.get(1).map(String::as_str));
        let seed = parse_seed(args.get(2).map(String::as_str));

        let mut state = GameState::new(seed, tuning);
        let latch = InputLatch::new();
        let mut autopilot = Autopilot::new();
        autopilot.on_level(state.level, state.paddle.width);

        latch.press_start();

        let mut ticks = 0u64;
        while state.is_running() && ticks < MAX_TICKS {
            autopilot.steer(&state, &latch);
            let input = latch.take();

            match tick(&mut state, &input) {
                TickOutcome::None => {}
                TickOutcome::BlockDestroyed { points } => {
                    log::debug!("+{} (score {})", points, state.score);
                }
                TickOutcome::BallLost => {
                    log::info!("Missed the ball at tick {}", state.time_ticks);
                }
                TickOutcome::LevelCleared { points } => {
                    log::info!("Level cleared with +{} (score {})", points, state.score);
                    autopilot.on_level(state.level, state.paddle.width);
                }
            }
            ticks += 1;
        }

        if state.is_running() {
            log::warn!("Stopped after {} ticks without finishing", ticks);
        }
        log::info!(
            "Finished: {:?}, level {}, score {}, {:.1}s of play",
            state.phase,
            state.level,
            state.score,
            state.time_ticks as f32 * SIM_DT
        );

        match serde_json::to_string_pretty(&state.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize final state: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation library is embedded by a web host; no headless driver here
}
