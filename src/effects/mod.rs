//! Effect Engine — transient glyph corruption.
//!
//! Every frame starts by restoring each cell to its original glyph, so a
//! glitch lasts exactly one frame and switching the effect off heals the grid
//! on the next frame. Only then, if the pet is idle, a few random cells may be
//! overwritten.

use rand::Rng;

use crate::types::Grid;

pub const CORRUPTION_GLYPHS: [char; 7] = ['?', '#', '$', '&', '0', '1', '!'];

/// Chance out of 100 that a glitch fires on an idle frame.
const GLITCH_PERCENT: u32 = 10;
const MIN_GLITCHES: usize = 5;
const EXTRA_GLITCHES: usize = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct EffectEngine;

impl EffectEngine {
    pub fn new() -> Self {
        EffectEngine
    }

    /// Put every cell back to its original glyph.
    pub fn reset(&self, grid: &mut Grid) {
        for row in grid.rows_mut() {
            for cell in row {
                cell.restore();
            }
        }
    }

    /// Reset, then maybe corrupt. Returns how many draws were made; targets
    /// are independent and may repeat.
    pub fn apply_frame<R: Rng>(
        &self,
        grid: &mut Grid,
        enabled: bool,
        idle: bool,
        rng: &mut R,
    ) -> usize {
        self.reset(grid);

        if !enabled || !idle {
            return 0;
        }
        if rng.gen_range(0..100u32) >= GLITCH_PERCENT {
            return 0;
        }
        self.corrupt(grid, rng)
    }

    fn corrupt<R: Rng>(&self, grid: &mut Grid, rng: &mut R) -> usize {
        let rows = grid.rows_mut();
        if rows.is_empty() {
            return 0;
        }

        let count = MIN_GLITCHES + rng.gen_range(0..EXTRA_GLITCHES);
        let mut drawn = 0;
        for _ in 0..count {
            let r = rng.gen_range(0..rows.len());
            let row = &mut rows[r];
            if row.is_empty() {
                continue;
            }
            let col = rng.gen_range(0..row.len());
            row[col].displayed = CORRUPTION_GLYPHS[rng.gen_range(0..CORRUPTION_GLYPHS.len())];
            drawn += 1;
        }
        drawn
    }
}
