//! Level generation
//!
//! Deterministic grid shape with randomized population: level 1 fills every
//! cell, later levels skip cells independently for sparser, varied layouts.
//! Difficulty parameters grow linearly per level and are capped.

use rand::Rng;
use rand_pcg::Pcg32;

use glam::Vec2;

use super::state::{Block, Color};
use crate::consts::*;

/// Background gradient palette, cycled by level number.
/// Presentation resolves the index into its own gradient stops.
pub const BACKGROUND_PALETTE: [(Color, Color); 5] = [
    (0x0b_1026, 0x2a_1a4a),
    (0x04_1f2e, 0x0d_4a5c),
    (0x26_0b1c, 0x5c_0d33),
    (0x0c_260b, 0x1a_4a2a),
    (0x26_1a04, 0x5c_3a0d),
];

/// Block colors by row, shallowest first
const ROW_COLORS: [Color; 5] = [0xff_5566, 0xff_9944, 0xff_dd33, 0x55_dd66, 0x44_99ff];

/// One level attempt's block field and difficulty parameters
#[derive(Debug, Clone)]
pub struct Level {
    pub id: u32,
    pub blocks: Vec<Block>,
    pub ball_speed: f32,
    pub powerup_chance: f64,
    /// Index into [`BACKGROUND_PALETTE`]
    pub background: usize,
}

/// Ball speed for a level, linear and capped.
pub fn ball_speed_for_level(number: u32) -> f32 {
    (LEVEL_SPEED_BASE + LEVEL_SPEED_STEP * (number - 1) as f32).min(LEVEL_SPEED_CAP)
}

/// Power-up drop chance for a level, linear and capped.
pub fn powerup_chance_for_level(number: u32) -> f64 {
    (POWERUP_CHANCE_BASE + POWERUP_CHANCE_STEP * (number - 1) as f64).min(POWERUP_CHANCE_CAP)
}

/// Generate the block layout and difficulty parameters for `number`.
pub fn generate_level(rng: &mut Pcg32, number: u32, playfield_width: f32) -> Level {
    let ball_speed = ball_speed_for_level(number);
    let powerup_chance = powerup_chance_for_level(number);
    // Blocks get tougher every third level, up to 3 hits
    let hp = (1 + number / 3).min(3);

    let grid_width = BLOCK_COLS as f32 * BLOCK_WIDTH + (BLOCK_COLS - 1) as f32 * BLOCK_GAP;
    let x0 = (playfield_width - grid_width) / 2.0;

    let mut blocks = Vec::with_capacity((BLOCK_ROWS * BLOCK_COLS) as usize);
    for row in 0..BLOCK_ROWS {
        for col in 0..BLOCK_COLS {
            if number > 1 && rng.random_bool(BLOCK_SKIP_CHANCE) {
                continue;
            }
            blocks.push(Block {
                pos: Vec2::new(
                    x0 + col as f32 * (BLOCK_WIDTH + BLOCK_GAP),
                    BLOCK_TOP_OFFSET + row as f32 * (BLOCK_HEIGHT + BLOCK_GAP),
                ),
                width: BLOCK_WIDTH,
                height: BLOCK_HEIGHT,
                color: ROW_COLORS[(row as usize) % ROW_COLORS.len()],
                hp,
                max_hp: hp,
                points: BLOCK_POINTS_PER_ROW * (row as u64 + 1),
                powerup_chance,
                destroyed: false,
            });
        }
    }

    // A fully skipped field would clear instantly; guarantee one block
    if blocks.is_empty() {
        blocks.push(Block {
            pos: Vec2::new(x0 + grid_width / 2.0 - BLOCK_WIDTH / 2.0, BLOCK_TOP_OFFSET),
            width: BLOCK_WIDTH,
            height: BLOCK_HEIGHT,
            color: ROW_COLORS[0],
            hp,
            max_hp: hp,
            points: BLOCK_POINTS_PER_ROW,
            powerup_chance,
            destroyed: false,
        });
    }

    log::info!(
        "Level {}: {} blocks, hp {}, ball speed {:.0}, drop chance {:.2}",
        number,
        blocks.len(),
        hp,
        ball_speed,
        powerup_chance
    );

    Level {
        id: number,
        blocks,
        ball_speed,
        powerup_chance,
        background: ((number - 1) as usize) % BACKGROUND_PALETTE.len(),
    }
}
