//! Falling-blocks scene
//!
//! 2x2 blocks drop one at a time into a randomly chosen column, stacking
//! from the bottom until every column is full, then the board resets with
//! a fresh set of colours.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use super::Scene;
use crate::PixelSink;
use crate::clock::SceneClock;
use crate::color::{BaseColour, HsvColour};
use crate::geometry::{NUM_ROWS, PIXELS_PER_ROW, pixel_index};
use crate::rng::Rng;

/// Edge length of one block in pixels
pub const BLOCK_SIZE: usize = 2;

/// Columns of blocks on the matrix
pub const NUM_BLOCK_COLS: usize = PIXELS_PER_ROW / BLOCK_SIZE;

/// Rows of blocks in one column
pub const NUM_BLOCK_ROWS: usize = NUM_ROWS / BLOCK_SIZE;

const DEFAULT_MOVE_MS: u64 = 300;
const DEFAULT_MOVES_BEFORE_RESET: u8 = 3;

const SEED_SATURATION: f32 = 1.0;
const SEED_VALUE: f32 = 0.1;
const SEED_HUE_START: f32 = 0.01;

/// Increments of the random hue walk that colours a fresh board
const HUE_WALK_STEPS: [f32; 5] = [0.01, 0.25, 0.05, 0.11, 0.33];

/// One block of a column.
///
/// `height` counts drop depth: 0 means not yet placed, 1 is the top block
/// row of the matrix and `NUM_BLOCK_ROWS` the bottom, so a falling block's
/// height only ever increases until it reaches the column's current
/// stacking target. `half_step` shifts the block down one pixel row
/// between full steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockCell {
    pub height: usize,
    pub half_step: bool,
    pub colour: HsvColour,
    pub falling: bool,
}

const EMPTY_CELL: BlockCell = BlockCell {
    height: 0,
    half_step: false,
    colour: HsvColour::OFF,
    falling: false,
};

/// Partial configuration record for the blocks scene.
///
/// Absent fields keep their previous values.
#[derive(Debug, Clone, Default)]
pub struct BlocksConfig {
    pub move_delay: Option<Duration>,
    pub moves_before_reset: Option<u8>,
}

/// Falling-blocks scene state
#[derive(Debug, Clone)]
pub struct BlocksScene {
    clock: SceneClock,
    cells: [[BlockCell; NUM_BLOCK_ROWS]; NUM_BLOCK_COLS],
    complete: [bool; NUM_BLOCK_COLS],
    active_column: Option<usize>,
    move_delay: Duration,
    moves_before_reset: u8,
    moves_since_complete: u8,
    rng: Rng,
}

impl BlocksScene {
    pub fn new(seed: u32) -> Self {
        let mut scene = Self {
            clock: SceneClock::new(),
            cells: [[EMPTY_CELL; NUM_BLOCK_ROWS]; NUM_BLOCK_COLS],
            complete: [false; NUM_BLOCK_COLS],
            active_column: None,
            move_delay: Duration::from_millis(DEFAULT_MOVE_MS),
            moves_before_reset: DEFAULT_MOVES_BEFORE_RESET,
            moves_since_complete: 0,
            rng: Rng::new(seed),
        };
        scene.reset_board();
        scene
    }

    pub const fn cell(&self, col: usize, slot: usize) -> &BlockCell {
        &self.cells[col][slot]
    }

    pub const fn is_complete(&self, col: usize) -> bool {
        self.complete[col]
    }

    pub const fn active_column(&self) -> Option<usize> {
        self.active_column
    }

    /// Apply a partial configuration record, key by key.
    pub fn apply_config(&mut self, config: &BlocksConfig) {
        if let Some(delay) = config.move_delay {
            self.move_delay = delay;
        }
        if let Some(moves) = config.moves_before_reset {
            self.moves_before_reset = moves;
        }

        #[cfg(feature = "esp32-log")]
        esp_println::println!(
            "blocks config: move ms = {}, moves before reset = {}",
            self.move_delay.as_millis(),
            self.moves_before_reset,
        );
    }

    /// Empty every cell and deal fresh colours along a random hue walk.
    fn reset_board(&mut self) {
        let mut hue = SEED_HUE_START;
        for col in 0..NUM_BLOCK_COLS {
            for cell in &mut self.cells[col] {
                *cell = BlockCell {
                    height: 0,
                    half_step: false,
                    colour: HsvColour::new(hue, SEED_SATURATION, SEED_VALUE),
                    falling: false,
                };
                let step = HUE_WALK_STEPS[self.rng.range(HUE_WALK_STEPS.len() as u32) as usize];
                hue += step;
            }
            self.complete[col] = false;
        }
        self.active_column = None;
    }

    fn draw(&self, sink: &mut dyn PixelSink) {
        for (col, column) in self.cells.iter().enumerate() {
            for cell in column {
                if cell.height == 0 {
                    continue;
                }
                let x = col * BLOCK_SIZE;
                let mut y = (cell.height - 1) * BLOCK_SIZE;
                if cell.half_step {
                    y += 1;
                }
                for dy in 0..BLOCK_SIZE {
                    for dx in 0..BLOCK_SIZE {
                        sink.set_pixel(pixel_index(x + dx, y + dy), cell.colour);
                    }
                }
            }
        }
    }

    /// Lowest unoccupied slot in the column, ignoring the candidate cell.
    ///
    /// Settled cells always occupy a contiguous run up from the bottom, so
    /// the target is one above the shallowest settled cell, or the bottom
    /// row capacity when nothing has settled yet.
    fn column_target(&self, col: usize, candidate: usize) -> usize {
        let mut target = NUM_BLOCK_ROWS;
        for (i, cell) in self.cells[col].iter().enumerate() {
            if i == candidate || cell.falling || cell.height == 0 {
                continue;
            }
            if cell.height - 1 < target {
                target = cell.height - 1;
            }
        }
        target
    }

    /// Advance the one eligible cell of the active column by a half-step.
    ///
    /// At most one cell per column falls at a time; the falling cell holds
    /// the slot until it settles on its target, so blocks land one by one.
    fn advance_column(&mut self, col: usize) {
        for i in 0..NUM_BLOCK_ROWS {
            let cell = self.cells[col][i];
            if cell.height > 0 && !cell.falling {
                continue;
            }

            let blocked = (0..NUM_BLOCK_ROWS).any(|j| j != i && self.cells[col][j].falling);
            if blocked {
                continue;
            }

            let target = self.column_target(col, i);
            let cell = &mut self.cells[col][i];
            cell.falling = true;
            if cell.height < target {
                if cell.half_step {
                    cell.half_step = false;
                    cell.height += 1;
                    if cell.height == target {
                        cell.falling = false;
                    }
                    if target == 1 {
                        self.complete[col] = true;
                        self.active_column = None;
                    }
                } else {
                    cell.half_step = true;
                }
            }

            break;
        }
    }
}

impl Scene for BlocksScene {
    fn update(&mut self, now: Instant, sink: &mut dyn PixelSink) {
        if !self.clock.ready(now, self.move_delay) {
            return;
        }

        sink.clear();
        self.draw(sink);
        sink.present();

        let mut remaining: Vec<usize, NUM_BLOCK_COLS> = Vec::new();
        for (col, complete) in self.complete.iter().enumerate() {
            if !complete {
                let _ = remaining.push(col);
            }
        }

        if self.active_column.is_none() && !remaining.is_empty() {
            #[allow(clippy::cast_possible_truncation)]
            let pick = self.rng.range(remaining.len() as u32) as usize;
            self.active_column = Some(remaining[pick]);
        }

        if let Some(col) = self.active_column {
            self.advance_column(col);
        }

        // The move that completes the last column does not count toward
        // the reset delay; the remaining set was taken before it.
        if remaining.is_empty() {
            if self.moves_since_complete >= self.moves_before_reset {
                self.moves_since_complete = 0;
                self.reset_board();
            } else {
                self.moves_since_complete += 1;
            }
        }
    }

    fn reset(&mut self, now: Instant, _base: &mut BaseColour) {
        self.moves_since_complete = 0;
        self.reset_board();
        self.clock.rebase(now);
    }

    fn rebase(&mut self, now: Instant) {
        self.clock.rebase(now);
    }
}
