//! Fixed-rate simulation tick
//!
//! Runs the round's phase machine and feeds ball outcomes back into the round state.

use super::physics::{BallOutcome, advance};
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held paddle direction: -1, 0 or +1 (other values clamp to their sign)
    pub direction: i8,
    /// Start trigger (leaves the waiting screen)
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
}

/// What a tick did, for the host and renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    None,
    BlockDestroyed { points: u32 },
    BallLost,
    /// The last block fell; `points` from this tick are already scored
    LevelCleared { points: u32 },
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if input.start && state.phase == GamePhase::Waiting {
        log::info!("Game started (seed {})", state.seed);
        state.phase = GamePhase::Playing;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return TickOutcome::None;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return TickOutcome::None;
    }

    state.time_ticks += 1;
    let frame = state.time_ticks;

    state.paddle.set_direction(input.direction);
    state.paddle.tick();

    let outcome = advance(
        &mut state.ball,
        &state.paddle,
        &mut state.blocks,
        &state.tuning,
        frame,
    );

    match outcome {
        BallOutcome::BallLost => {
            state.on_ball_lost();
            TickOutcome::BallLost
        }
        BallOutcome::Flying { points, destroyed } => {
            if destroyed > 0 {
                state.on_block_destroyed(points);
            }
            if state.blocks.is_empty() {
                state.on_level_cleared();
                TickOutcome::LevelCleared { points }
            } else if destroyed > 0 {
                TickOutcome::BlockDestroyed { points }
            } else {
                TickOutcome::None
            }
        }
    }
}
