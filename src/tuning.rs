//! Data-driven game balance
//!
//! Every gameplay constant can be overridden from JSON. Missing fields fall
//! back to `crate::consts`; out-of-range values are clamped by `sanitized`
//! rather than rejected, so a bad file never stops the game from running.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_step: f32,
    pub paddle_bottom_offset: f32,
    /// Steepest rebound, degrees from vertical
    pub max_bounce_deg: f32,
    pub paddle_english: f32,
    pub paddle_clearance: f32,

    // === Ball ===
    pub ball_diameter: f32,
    pub ball_start_speed: f32,
    pub ball_max_speed: f32,
    pub speed_increment: f32,
    pub launch_cone_min_deg: f32,
    pub launch_cone_max_deg: f32,
    /// Minimum |y| of the unit direction after a paddle bounce
    pub min_vertical: f32,

    // === Round ===
    pub start_lives: u32,
    pub max_level: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_step: PADDLE_STEP,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,
            max_bounce_deg: PADDLE_MAX_BOUNCE_DEG,
            paddle_english: PADDLE_ENGLISH,
            paddle_clearance: PADDLE_CLEARANCE,

            ball_diameter: BALL_DIAMETER,
            ball_start_speed: BALL_START_SPEED,
            ball_max_speed: BALL_MAX_SPEED,
            speed_increment: BALL_SPEED_INCREMENT,
            launch_cone_min_deg: LAUNCH_CONE_MIN_DEG,
            launch_cone_max_deg: LAUNCH_CONE_MAX_DEG,
            min_vertical: MIN_VERTICAL,

            start_lives: START_LIVES,
            max_level: MAX_LEVEL,
        }
    }
}

/// Replace NaN/infinite values with a fallback before clamping
fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

impl Tuning {
    /// Parse tuning from a JSON string (unknown fields ignored, missing ones defaulted)
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Clamp every value into a playable range
    pub fn sanitized(&self) -> Self {
        let d = Self::default();

        let field_width = finite_or(self.field_width, d.field_width).max(100.0);
        let field_height = finite_or(self.field_height, d.field_height).max(100.0);

        let paddle_width = finite_or(self.paddle_width, d.paddle_width).clamp(1.0, field_width);
        let paddle_height =
            finite_or(self.paddle_height, d.paddle_height).clamp(1.0, field_height / 4.0);
        let paddle_bottom_offset = finite_or(self.paddle_bottom_offset, d.paddle_bottom_offset)
            .clamp(paddle_height, field_height / 2.0);

        let ball_diameter = finite_or(self.ball_diameter, d.ball_diameter)
            .clamp(1.0, field_width.min(field_height) / 4.0);
        let ball_max_speed = finite_or(self.ball_max_speed, d.ball_max_speed).max(0.1);
        let ball_start_speed =
            finite_or(self.ball_start_speed, d.ball_start_speed).clamp(0.1, ball_max_speed);

        let launch_cone_min_deg =
            finite_or(self.launch_cone_min_deg, d.launch_cone_min_deg).clamp(1.0, 179.0);
        let launch_cone_max_deg = finite_or(self.launch_cone_max_deg, d.launch_cone_max_deg)
            .clamp(launch_cone_min_deg, 179.0);

        let sanitized = Self {
            field_width,
            field_height,
            paddle_width,
            paddle_height,
            paddle_step: finite_or(self.paddle_step, d.paddle_step).max(0.0),
            paddle_bottom_offset,
            max_bounce_deg: finite_or(self.max_bounce_deg, d.max_bounce_deg).clamp(0.0, 80.0),
            paddle_english: finite_or(self.paddle_english, d.paddle_english).clamp(0.0, 0.2),
            paddle_clearance: finite_or(self.paddle_clearance, d.paddle_clearance).max(0.0),
            ball_diameter,
            ball_start_speed,
            ball_max_speed,
            speed_increment: finite_or(self.speed_increment, d.speed_increment).max(0.0),
            launch_cone_min_deg,
            launch_cone_max_deg,
            min_vertical: finite_or(self.min_vertical, d.min_vertical).clamp(0.05, 0.95),
            start_lives: self.start_lives.max(1),
            max_level: self.max_level.clamp(1, 100),
        };

        if sanitized != *self {
            log::warn!("Tuning values out of range were clamped");
        }
        sanitized
    }
}
