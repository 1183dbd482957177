//! Read-only view of the round for renderers and HUDs

use serde::Serialize;

use super::state::{Ball, Block, GamePhase, GameState, Paddle};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    pub phase: GamePhase,
    pub time_ticks: u64,
    pub field_width: f32,
    pub field_height: f32,
    pub paddle: &'a Paddle,
    pub ball: &'a Ball,
    pub blocks: &'a [Block],
}

impl GameState {
    /// Borrow the state needed to draw a frame
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            level: self.level,
            lives: self.lives,
            score: self.score,
            phase: self.phase,
            time_ticks: self.time_ticks,
            field_width: self.tuning.field_width,
            field_height: self.tuning.field_height,
            paddle: &self.paddle,
            ball: &self.ball,
            blocks: &self.blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::state::GameState;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_serializes_hud_and_entities() {
        let state = GameState::new(4, Tuning::default());
        let json = serde_json::to_value(state.snapshot()).expect("serialize");

        assert_eq!(json["level"], 1);
        assert_eq!(json["lives"], 3);
        assert_eq!(json["phase"], "Waiting");
        assert_eq!(
            json["blocks"].as_array().map(Vec::len),
            Some(state.blocks.len())
        );
        // Internal bookkeeping stays out of the view
        assert!(json["blocks"][0].get("resolved_frame").is_none());
        assert_eq!(json["blocks"][0]["hit_points"], state.blocks[0].hit_points());
    }
}
