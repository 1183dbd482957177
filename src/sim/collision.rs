//! Collision detection and response for a circular ball against rectangles
//!
//! Detection is a true circle/rectangle test: clamp the ball center into the
//! rectangle and compare the squared distance to that point with radius².
//! Response picks the penetration axis (the face that was struck) from the
//! ball's direction of travel.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Axis along which a block hit is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Side face struck, x component reflects
    Horizontal,
    /// Top/bottom face struck, y component reflects
    Vertical,
}

impl Axis {
    /// Surface normal used for reflection on this axis
    #[inline]
    pub fn normal(self) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::X,
            Axis::Vertical => Vec2::Y,
        }
    }
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the rectangle to the ball center
    pub point: Vec2,
    /// Signed push-out distance per axis (for position correction)
    pub penetration: Vec2,
    /// Axis that registers the hit
    pub axis: Axis,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            penetration: Vec2::ZERO,
            axis: Axis::Vertical,
        }
    }

    /// Push-out offset along the registering axis only
    pub fn correction(&self) -> Vec2 {
        match self.axis {
            Axis::Horizontal => Vec2::new(self.penetration.x, 0.0),
            Axis::Vertical => Vec2::new(0.0, self.penetration.y),
        }
    }
}

/// Circle/rectangle overlap via the closest-point test
///
/// Touching exactly (distance == radius) is not an overlap.
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.clamp_point(center);
    center.distance_squared(closest) < radius * radius
}

/// Signed penetration on each axis, measured against the face the ball is travelling toward
///
/// Moving right (`dir.x > 0`) measures against the block's left face, anything
/// else against its right face; y works the same way with top/bottom. Adding
/// the value to the ball position on that axis moves it clear of the face.
pub fn penetration(center: Vec2, radius: f32, dir: Vec2, rect: &Rect) -> Vec2 {
    let x = if dir.x > 0.0 {
        rect.left() - (center.x + radius)
    } else {
        rect.right() - (center.x - radius)
    };
    let y = if dir.y > 0.0 {
        rect.top() - (center.y + radius)
    } else {
        rect.bottom() - (center.y - radius)
    };
    Vec2::new(x, y)
}

/// The axis with the smaller penetration magnitude registers the hit
///
/// Equal magnitudes (a perfectly corner-on impact) resolve vertically.
#[inline]
pub fn penetration_axis(penetration: Vec2) -> Axis {
    if penetration.x.abs() < penetration.y.abs() {
        Axis::Horizontal
    } else {
        Axis::Vertical
    }
}

/// Check collision between the ball and a rectangle
///
/// Returns the penetration and the registering axis if the ball overlaps.
pub fn ball_rect_collision(center: Vec2, radius: f32, dir: Vec2, rect: &Rect) -> CollisionResult {
    if !circle_rect_overlap(center, radius, rect) {
        return CollisionResult::miss();
    }

    let penetration = penetration(center, radius, dir, rect);
    CollisionResult {
        hit: true,
        point: rect.clamp_point(center),
        penetration,
        axis: penetration_axis(penetration),
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Renormalize passes allowed before giving up on float drift
const MAX_RENORMALIZE_PASSES: usize = 4;
const TRAJECTORY_EPSILON: f32 = 1e-4;

/// Renormalize a direction and keep it away from near-horizontal trajectories
///
/// The result is unit length with `|y| >= min_vertical` and
/// `|x| <= sqrt(1 - min_vertical²)`. A zero vertical component is treated as up.
pub fn enforce_trajectory_limits(dir: Vec2, min_vertical: f32) -> Vec2 {
    let min_vertical = min_vertical.clamp(0.0, 1.0);
    let max_horizontal = (1.0 - min_vertical * min_vertical).max(0.0).sqrt();

    let mut dir = dir.normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec2::NEG_Y;
    }

    for _ in 0..MAX_RENORMALIZE_PASSES {
        if dir.y.abs() >= min_vertical - TRAJECTORY_EPSILON {
            break;
        }
        let vertical_sign = if dir.y > 0.0 { 1.0 } else { -1.0 };
        dir.x = dir.x.clamp(-max_horizontal, max_horizontal);
        dir.y = vertical_sign * min_vertical;
        dir = dir.normalize();
    }

    dir
}
