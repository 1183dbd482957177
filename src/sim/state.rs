//! Game state and core simulation types
//!
//! Entities (paddle, ball, blocks) plus the round state that owns them.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout::{BlockSpec, generate_layout};
use super::rect::Rect;
use crate::direction_from_horizontal;
use crate::tuning::Tuning;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start trigger
    Waiting,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// All lives lost
    GameOver,
    /// Final level cleared
    Victory,
}

impl GamePhase {
    /// Terminal phases accept no further ticks until a restart
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// The ball
///
/// `dir` is kept at unit length; displacement per tick is `dir * speed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, diameter: f32) -> Self {
        Self {
            pos,
            dir: Vec2::NEG_Y,
            speed: 0.0,
            radius: diameter / 2.0,
        }
    }

    pub fn diameter(&self) -> f32 {
        self.radius * 2.0
    }

    /// Displacement applied per tick
    pub fn velocity(&self) -> Vec2 {
        self.dir * self.speed
    }

    /// Bounding box of the ball (for renderers)
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x - self.radius,
            self.pos.y - self.radius,
            self.diameter(),
            self.diameter(),
        )
    }

    /// Launch from `spawn` at a random angle inside the upward cone (degrees from horizontal)
    pub fn launch<R: Rng>(
        &mut self,
        rng: &mut R,
        spawn: Vec2,
        base_speed: f32,
        cone_deg: (f32, f32),
    ) {
        let (min_deg, max_deg) = cone_deg;
        let angle = if max_deg > min_deg {
            rng.random_range(min_deg..=max_deg)
        } else {
            min_deg
        };
        self.pos = spawn;
        self.dir = direction_from_horizontal(angle.to_radians());
        self.speed = base_speed;
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Distance moved per tick while a direction is held
    pub step: f32,
    /// Held direction: -1, 0 or +1
    direction: i8,
    field_width: f32,
}

impl Paddle {
    pub fn new(tuning: &Tuning) -> Self {
        let mut paddle = Self {
            x: 0.0,
            y: tuning.field_height - tuning.paddle_bottom_offset,
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            step: tuning.paddle_step,
            direction: 0,
            field_width: tuning.field_width,
        };
        paddle.reset_position();
        paddle
    }

    /// Get the paddle as a rectangle for collision detection
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Signed velocity in units per tick
    pub fn velocity(&self) -> f32 {
        f32::from(self.direction) * self.step
    }

    pub fn direction(&self) -> i8 {
        self.direction
    }

    /// Hold a direction; anything outside -1..=1 is clamped to its sign
    pub fn set_direction(&mut self, direction: i8) {
        self.direction = direction.signum();
    }

    pub fn stop(&mut self) {
        self.direction = 0;
    }

    /// Largest valid left edge
    pub fn max_x(&self) -> f32 {
        (self.field_width - self.width).max(0.0)
    }

    /// Move by one tick of velocity, clamped to the field
    pub fn tick(&mut self) {
        self.x = (self.x + self.velocity()).clamp(0.0, self.max_x());
    }

    /// Center horizontally and stop
    pub fn reset_position(&mut self) {
        self.x = self.max_x() / 2.0;
        self.direction = 0;
    }
}

/// Block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockKind {
    #[default]
    Normal,
    /// Placed on the top row, worth more per hit point
    Tough,
    /// Rare high-value block
    Bonus,
}

impl BlockKind {
    /// Score per initial hit point
    pub fn score_weight(self) -> u32 {
        match self {
            BlockKind::Normal => 10,
            BlockKind::Tough => 20,
            BlockKind::Bonus => 50,
        }
    }
}

/// A destructible block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    pub kind: BlockKind,
    pub rect: Rect,
    hit_points: u32,
    score_value: u32,
    /// Frame in which this block was last resolved
    #[serde(skip)]
    resolved_frame: Option<u64>,
}

impl Block {
    /// Build a live block from a layout descriptor (at least one hit point)
    pub fn from_spec(id: u32, spec: &BlockSpec) -> Self {
        let hit_points = spec.hit_points.max(1);
        Self {
            id,
            kind: spec.kind,
            rect: spec.rect,
            hit_points,
            score_value: spec.score_weight.saturating_mul(hit_points),
            resolved_frame: None,
        }
    }

    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    /// Score awarded when destroyed, fixed at construction
    pub fn score_value(&self) -> u32 {
        self.score_value
    }

    pub fn is_destroyed(&self) -> bool {
        self.hit_points == 0
    }

    /// Take one hit; returns true once the block is destroyed
    pub fn register_hit(&mut self) -> bool {
        self.hit_points = self.hit_points.saturating_sub(1);
        self.hit_points == 0
    }

    pub fn resolved_in(&self, frame: u64) -> bool {
        self.resolved_frame == Some(frame)
    }

    pub fn mark_resolved(&mut self, frame: u64) {
        self.resolved_frame = Some(frame);
    }
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Sanitized tuning the run was built with
    pub tuning: Tuning,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    pub phase: GamePhase,
    /// Ball speed at the start of the current level
    pub base_speed: f32,
    /// Simulation tick counter (Playing ticks only)
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Live blocks, iteration order breaks collision ties
    pub blocks: Vec<Block>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let paddle = Paddle::new(&tuning);
        let ball = Ball::new(Vec2::ZERO, tuning.ball_diameter);

        let mut state = Self {
            seed,
            level: 1,
            lives: tuning.start_lives,
            score: 0,
            phase: GamePhase::Waiting,
            base_speed: tuning.ball_start_speed,
            time_ticks: 0,
            paddle,
            ball,
            blocks: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        };

        state.install_layout();
        state.launch_ball();
        state
    }

    /// Start over from level 1 with a new seed
    pub fn restart(&mut self, seed: u64) {
        log::info!("Restarting with seed {}", seed);
        *self = Self::new(seed, self.tuning.clone());
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whether the host should keep ticking
    pub fn is_running(&self) -> bool {
        !self.phase.is_terminal()
    }

    /// Where a freshly launched ball starts: centered, a few diameters above the paddle
    pub fn spawn_point(&self) -> Vec2 {
        let radius = self.tuning.ball_diameter / 2.0;
        let y = (self.paddle.y - self.tuning.ball_diameter * 3.0).max(radius);
        Vec2::new(self.tuning.field_width / 2.0, y)
    }

    /// Replace the ball with a new one in its launch state
    pub fn launch_ball(&mut self) {
        let spawn = self.spawn_point();
        let cone = (
            self.tuning.launch_cone_min_deg,
            self.tuning.launch_cone_max_deg,
        );
        let mut ball = Ball::new(spawn, self.tuning.ball_diameter);
        ball.launch(&mut self.rng, spawn, self.base_speed, cone);
        self.ball = ball;
    }

    /// Install the block layout for the current level
    pub fn install_layout(&mut self) {
        let specs = generate_layout(
            self.level,
            self.tuning.field_width,
            self.tuning.field_height,
        );
        self.blocks.clear();
        for spec in &specs {
            let id = self.next_entity_id();
            self.blocks.push(Block::from_spec(id, spec));
        }
        log::info!("Level {}: {} blocks", self.level, self.blocks.len());
    }

    /// Ball crossed the bottom boundary
    pub fn on_ball_lost(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            log::info!("Game over at level {} with score {}", self.level, self.score);
        } else {
            log::info!("Ball lost, {} lives left", self.lives);
            self.launch_ball();
        }
    }

    /// Score from destroyed blocks
    pub fn on_block_destroyed(&mut self, points: u32) {
        self.score = self.score.saturating_add(u64::from(points));
    }

    /// Live block collection emptied
    pub fn on_level_cleared(&mut self) {
        if self.level >= self.tuning.max_level {
            self.phase = GamePhase::Victory;
            log::info!("All {} levels cleared, final score {}", self.level, self.score);
            return;
        }

        self.level += 1;
        self.base_speed =
            (self.base_speed + self.tuning.speed_increment).min(self.tuning.ball_max_speed);
        log::info!(
            "Level {} reached, base speed {:.2}",
            self.level,
            self.base_speed
        );

        self.install_layout();
        self.paddle.reset_position();
        self.launch_ball();
    }
}
