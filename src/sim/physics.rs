//! Ball physics: integration, wall reflection, paddle and block collisions
//!
//! `advance` is a pure state transition over one tick's inputs. It returns what
//! happened instead of calling back into the round state, and it never allocates.

use glam::Vec2;

use super::collision::{
    ball_rect_collision, circle_rect_overlap, enforce_trajectory_limits, reflect_velocity,
};
use super::state::{Ball, Block, Paddle};
use crate::direction_from_vertical;
use crate::tuning::Tuning;

/// What one tick of ball motion produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallOutcome {
    /// Ball still in play; `points` from `destroyed` blocks removed this tick
    Flying { points: u32, destroyed: u32 },
    /// Ball reached the bottom boundary; nothing else was processed
    BallLost,
}

/// Advance the ball by one tick
///
/// Blocks destroyed this tick are removed from `blocks`. `frame` must be unique
/// per tick; it stamps blocks as resolved so none is hit twice in one tick.
pub fn advance(
    ball: &mut Ball,
    paddle: &Paddle,
    blocks: &mut Vec<Block>,
    tuning: &Tuning,
    frame: u64,
) -> BallOutcome {
    ball.pos += ball.velocity();

    if !reflect_off_walls(ball, tuning.field_width, tuning.field_height) {
        return BallOutcome::BallLost;
    }

    // Paddle first: it is the frame's dominant event
    if circle_rect_overlap(ball.pos, ball.radius, &paddle.rect()) {
        bounce_off_paddle(ball, paddle, tuning);
    }

    let mut points = 0u32;
    let mut destroyed = 0u32;
    let mut idx = 0;
    while idx < blocks.len() {
        let block = &mut blocks[idx];
        if block.resolved_in(frame) {
            idx += 1;
            continue;
        }

        let result = ball_rect_collision(ball.pos, ball.radius, ball.dir, &block.rect);
        if !result.hit {
            idx += 1;
            continue;
        }

        ball.dir = reflect_velocity(ball.dir, result.axis.normal());
        ball.pos += result.correction();
        block.mark_resolved(frame);

        if block.register_hit() {
            points = points.saturating_add(block.score_value());
            destroyed += 1;
            let block = blocks.remove(idx);
            log::debug!(
                "Block {} ({:?}) destroyed for {} points",
                block.id,
                block.kind,
                block.score_value()
            );
            continue;
        }
        idx += 1;
    }

    BallOutcome::Flying { points, destroyed }
}

/// Reflect off the left, right and top walls
///
/// Returns false if the ball reached the bottom boundary (ball lost).
pub fn reflect_off_walls(ball: &mut Ball, field_width: f32, field_height: f32) -> bool {
    let r = ball.radius;

    if ball.pos.x - r <= 0.0 {
        ball.pos.x = r;
        ball.dir.x = ball.dir.x.abs();
    } else if ball.pos.x + r >= field_width {
        ball.pos.x = field_width - r;
        ball.dir.x = -ball.dir.x.abs();
    }

    if ball.pos.y - r <= 0.0 {
        ball.pos.y = r;
        ball.dir.y = ball.dir.y.abs();
    } else if ball.pos.y + r >= field_height {
        return false;
    }

    true
}

/// Horizontal impact position across the paddle, 0 = left edge, 1 = right edge
#[inline]
pub fn impact_fraction(ball_x: f32, paddle: &Paddle) -> f32 {
    if paddle.width <= 0.0 {
        return 0.5;
    }
    ((ball_x - paddle.x) / paddle.width).clamp(0.0, 1.0)
}

/// Rebound direction for an impact fraction, before english and renormalization
pub fn rebound_direction(fraction: f32, max_bounce_deg: f32) -> Vec2 {
    let angle = max_bounce_deg.to_radians() * (2.0 * fraction - 1.0);
    direction_from_vertical(angle)
}

/// Paddle bounce: angle from impact position, english from paddle motion
fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle, tuning: &Tuning) {
    let fraction = impact_fraction(ball.pos.x, paddle);
    let mut dir = rebound_direction(fraction, tuning.max_bounce_deg);

    // English: paddle motion nudges x before renormalizing
    dir.x += tuning.paddle_english * paddle.velocity();

    ball.dir = enforce_trajectory_limits(dir, tuning.min_vertical);

    // Sit just above the paddle so the next tick doesn't collide again
    ball.pos.y = paddle.y - ball.radius - tuning.paddle_clearance;
}
