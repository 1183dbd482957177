//! Per-level block layouts
//!
//! Five patterns cycle every five levels; rows grow with the level and
//! toughness rises at levels 3, 6 and 9.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::BlockKind;

pub const BLOCK_WIDTH: f32 = 70.0;
pub const BLOCK_HEIGHT: f32 = 25.0;
/// Gap between blocks and before the first column
pub const BLOCK_SPACING: f32 = 5.0;
pub const TOP_MARGIN: f32 = 50.0;
pub const MAX_COLUMNS: u32 = 10;
/// Blocks never extend below this fraction of the field height
pub const LAYOUT_HEIGHT_FRACTION: f32 = 0.6;
pub const MAX_HIT_POINTS: u32 = 5;

/// Block descriptor produced by the layout generator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub rect: Rect,
    pub hit_points: u32,
    /// Score per initial hit point
    pub score_weight: u32,
    pub kind: BlockKind,
}

/// Layout pattern, chosen by `level % 5`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    AlternatingColumns,
    Frame,
    Pyramid,
    Diamond,
    Checkerboard,
}

impl Pattern {
    pub fn for_level(level: u32) -> Self {
        match level % 5 {
            1 => Pattern::AlternatingColumns,
            2 => Pattern::Frame,
            3 => Pattern::Pyramid,
            4 => Pattern::Diamond,
            _ => Pattern::Checkerboard,
        }
    }

    /// Whether the grid cell holds a block
    pub fn has_block(self, row: u32, col: u32, rows: u32, cols: u32) -> bool {
        let (row, col, rows, cols) = (row as i32, col as i32, rows as i32, cols as i32);
        match self {
            Pattern::AlternatingColumns => col % 2 == row % 2,
            Pattern::Frame => row == 0 || row == rows - 1 || col == 0 || col == cols - 1,
            Pattern::Pyramid => {
                let center = cols / 2;
                (col - center).abs() <= row && row < rows / 2 + 1
            }
            Pattern::Diamond => {
                let center_row = rows / 2;
                let center_col = cols / 2;
                (row - center_row).abs() + (col - center_col).abs()
                    <= center_row.min(center_col) + 1
            }
            Pattern::Checkerboard => (row + col) % 2 == 0,
        }
    }
}

/// Block kind by grid position
fn block_kind(level: u32, row: u32, col: u32) -> BlockKind {
    if row == 0 && col % 3 == 0 {
        return BlockKind::Tough;
    }
    if row == level.min(2) && col % 4 == 0 {
        return BlockKind::Bonus;
    }
    BlockKind::Normal
}

/// Hit points by level and grid position
fn hit_points(level: u32, row: u32, col: u32) -> u32 {
    let mut hp = 1;
    // Later levels are tougher across the board
    hp += [3, 6, 9].iter().filter(|&&threshold| level >= threshold).count() as u32;
    if row == 0 {
        hp += 1;
    }
    if col % 2 == 0 {
        hp += 1;
    }
    hp.min(MAX_HIT_POINTS)
}

/// Number of columns that fit across the field
pub fn column_count(field_width: f32) -> u32 {
    let fit = ((field_width - BLOCK_SPACING) / (BLOCK_WIDTH + BLOCK_SPACING)).floor();
    (fit.max(1.0) as u32).min(MAX_COLUMNS)
}

/// Number of rows for a level: one more than the level, capped to the upper part of the field
pub fn row_count(level: u32, field_height: f32) -> u32 {
    let usable = field_height * LAYOUT_HEIGHT_FRACTION - TOP_MARGIN;
    let max_rows = (usable / (BLOCK_HEIGHT + BLOCK_SPACING)).floor().max(1.0) as u32;
    (1 + level.max(1)).min(max_rows)
}

/// Generate the block layout for a level (1-based)
///
/// Never returns an empty layout: if a pattern selects nothing the whole top row is filled.
pub fn generate_layout(level: u32, field_width: f32, field_height: f32) -> Vec<BlockSpec> {
    let level = level.max(1);
    let cols = column_count(field_width);
    let rows = row_count(level, field_height);
    let pattern = Pattern::for_level(level);

    log::debug!(
        "Layout for level {}: {:?}, {} rows x {} cols",
        level,
        pattern,
        rows,
        cols
    );

    let mut specs = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            if pattern.has_block(row, col, rows, cols) {
                specs.push(make_spec(level, row, col));
            }
        }
    }

    if specs.is_empty() {
        specs.extend((0..cols).map(|col| make_spec(level, 0, col)));
    }

    specs
}

fn make_spec(level: u32, row: u32, col: u32) -> BlockSpec {
    let x = col as f32 * (BLOCK_WIDTH + BLOCK_SPACING) + BLOCK_SPACING;
    let y = row as f32 * (BLOCK_HEIGHT + BLOCK_SPACING) + TOP_MARGIN;
    let kind = block_kind(level, row, col);
    BlockSpec {
        rect: Rect::new(x, y, BLOCK_WIDTH, BLOCK_HEIGHT),
        hit_points: hit_points(level, row, col),
        score_weight: kind.score_weight(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_pattern_cycle() {
        assert_eq!(Pattern::for_level(1), Pattern::AlternatingColumns);
        assert_eq!(Pattern::for_level(2), Pattern::Frame);
        assert_eq!(Pattern::for_level(3), Pattern::Pyramid);
        assert_eq!(Pattern::for_level(4), Pattern::Diamond);
        assert_eq!(Pattern::for_level(5), Pattern::Checkerboard);
        assert_eq!(Pattern::for_level(6), Pattern::AlternatingColumns);
        assert_eq!(Pattern::for_level(10), Pattern::Checkerboard);
    }

    #[test]
    fn test_level_one_layout() {
        let specs = generate_layout(1, FIELD_WIDTH, FIELD_HEIGHT);
        // Two rows of ten, alternating columns: five per row
        assert_eq!(specs.len(), 10);
        let first = specs[0];
        assert_eq!(first.rect, Rect::new(5.0, 50.0, 70.0, 25.0));
        assert_eq!(first.kind, BlockKind::Tough);
        // base 1 + top row + even column
        assert_eq!(first.hit_points, 3);
    }

    #[test]
    fn test_frame_pattern_edges_only() {
        let specs = generate_layout(2, FIELD_WIDTH, FIELD_HEIGHT);
        let rows = row_count(2, FIELD_HEIGHT);
        assert_eq!(rows, 3);
        // Top and bottom rows full, middle row only the two ends
        assert_eq!(specs.len(), 10 + 10 + 2);
    }

    #[test]
    fn test_rows_capped_to_upper_field() {
        let max_y = FIELD_HEIGHT * LAYOUT_HEIGHT_FRACTION;
        for level in 1..=MAX_LEVEL {
            for spec in generate_layout(level, FIELD_WIDTH, FIELD_HEIGHT) {
                assert!(spec.rect.bottom() <= max_y, "level {} overflows", level);
                assert!(spec.rect.right() <= FIELD_WIDTH);
            }
        }
    }

    #[test]
    fn test_every_level_has_blocks() {
        for level in 1..=MAX_LEVEL {
            assert!(!generate_layout(level, FIELD_WIDTH, FIELD_HEIGHT).is_empty());
        }
        // Tiny fields still get a row
        assert!(!generate_layout(3, 80.0, 100.0).is_empty());
    }

    #[test]
    fn test_toughness_rises_and_caps() {
        assert_eq!(hit_points(1, 1, 1), 1);
        assert_eq!(hit_points(3, 1, 1), 2);
        assert_eq!(hit_points(6, 1, 1), 3);
        assert_eq!(hit_points(9, 1, 1), 4);
        assert_eq!(hit_points(9, 0, 0), MAX_HIT_POINTS);
    }

    #[test]
    fn test_block_kinds() {
        assert_eq!(block_kind(1, 0, 3), BlockKind::Tough);
        assert_eq!(block_kind(1, 1, 4), BlockKind::Bonus);
        assert_eq!(block_kind(5, 2, 8), BlockKind::Bonus);
        assert_eq!(block_kind(5, 1, 4), BlockKind::Normal);
        assert_eq!(block_kind(5, 1, 1), BlockKind::Normal);
    }

    #[test]
    fn test_column_count_fits_field() {
        assert_eq!(column_count(FIELD_WIDTH), 10);
        assert_eq!(column_count(400.0), 5);
        assert_eq!(column_count(10.0), 1);
    }
}
