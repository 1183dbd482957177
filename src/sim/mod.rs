//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (block collection order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod layout;
pub mod physics;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{
    Axis, CollisionResult, ball_rect_collision, circle_rect_overlap, enforce_trajectory_limits,
    reflect_velocity,
};
pub use input::InputLatch;
pub use layout::{BlockSpec, Pattern, generate_layout};
pub use physics::{BallOutcome, advance};
pub use rect::Rect;
pub use snapshot::Snapshot;
pub use state::{Ball, Block, BlockKind, GamePhase, GameState, Paddle};
pub use tick::{TickInput, TickOutcome, tick};
