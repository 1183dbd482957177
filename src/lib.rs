//! Brick Breaker - a ten-level paddle-and-ball arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, round state, layouts)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical tick rate driven by the host
    pub const TICK_RATE_HZ: u32 = 60;
    /// Duration of one logical tick in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;

    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Distance moved per tick while a direction is held
    pub const PADDLE_STEP: f32 = 10.0;
    /// Paddle top edge sits this far above the field bottom
    pub const PADDLE_BOTTOM_OFFSET: f32 = 50.0;

    /// Ball defaults
    pub const BALL_DIAMETER: f32 = 16.0;
    pub const BALL_START_SPEED: f32 = 7.0;
    pub const BALL_MAX_SPEED: f32 = 8.0;
    /// Added to the base speed each time a level is cleared
    pub const BALL_SPEED_INCREMENT: f32 = 0.5;

    /// Launch cone, degrees from horizontal (90 = straight up)
    pub const LAUNCH_CONE_MIN_DEG: f32 = 45.0;
    pub const LAUNCH_CONE_MAX_DEG: f32 = 135.0;

    /// Steepest paddle rebound, degrees from vertical
    pub const PADDLE_MAX_BOUNCE_DEG: f32 = 60.0;
    /// Horizontal nudge per unit of paddle velocity ("english")
    pub const PADDLE_ENGLISH: f32 = 0.02;
    /// Gap left between ball and paddle top after a bounce
    pub const PADDLE_CLEARANCE: f32 = 2.0;

    /// Minimum |y| of the unit direction after a paddle bounce
    pub const MIN_VERTICAL: f32 = 0.35;

    /// Round defaults
    pub const START_LIVES: u32 = 3;
    pub const MAX_LEVEL: u32 = 10;
}

/// Unit direction for an angle measured from horizontal, with "up" as negative y
#[inline]
pub fn direction_from_horizontal(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}

/// Unit direction for an angle measured from vertical (0 = straight up, positive = right)
#[inline]
pub fn direction_from_vertical(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// Angle of a direction from vertical (inverse of `direction_from_vertical`)
#[inline]
pub fn angle_from_vertical(dir: Vec2) -> f32 {
    dir.x.atan2(-dir.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

    #[test]
    fn test_direction_from_horizontal_points_up() {
        let dir = direction_from_horizontal(FRAC_PI_2);
        assert!(dir.x.abs() < 1e-6);
        assert!((dir.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_vertical_angle_roundtrip() {
        let dir = direction_from_vertical(-FRAC_PI_3);
        assert!(dir.x < 0.0 && dir.y < 0.0);
        assert!((angle_from_vertical(dir) + FRAC_PI_3).abs() < 1e-5);
    }
}
