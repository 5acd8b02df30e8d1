//! Snake scene
//!
//! A five-segment trail wanders the matrix, turning at random intervals
//! and bouncing off the edges. All segments share one seed colour taken
//! from the base colour at reset and breathe together under the scene's
//! evolution config.

use embassy_time::{Duration, Instant};

use super::Scene;
use crate::PixelSink;
use crate::clock::SceneClock;
use crate::color::{BaseColour, ColourEvolution, HSV_MAX_VALUE, HsvColour, evolve};
use crate::geometry::{NUM_ROWS, PIXELS_PER_ROW, pixel_index};
use crate::rng::Rng;

/// Number of segments in the trail, head included
pub const TRAIL_LENGTH: usize = 5;

const DEFAULT_MOVE_MS: u64 = 200;
const DEFAULT_MOVES_BEFORE_TURN: u8 = 5;

/// Direction the head moves on its next step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    /// The two perpendicular turns available from this heading
    const fn perpendicular(self) -> [Self; 2] {
        match self {
            Self::Up | Self::Down => [Self::Left, Self::Right],
            Self::Left | Self::Right => [Self::Up, Self::Down],
        }
    }
}

/// One step from a cell, or `None` when it would leave the grid.
const fn step(col: usize, row: usize, heading: Heading) -> Option<(usize, usize)> {
    match heading {
        Heading::Up => {
            if row == 0 {
                None
            } else {
                Some((col, row - 1))
            }
        }
        Heading::Right => {
            if col + 1 == PIXELS_PER_ROW {
                None
            } else {
                Some((col + 1, row))
            }
        }
        Heading::Down => {
            if row + 1 == NUM_ROWS {
                None
            } else {
                Some((col, row + 1))
            }
        }
        Heading::Left => {
            if col == 0 {
                None
            } else {
                Some((col - 1, row))
            }
        }
    }
}

/// One cell of the trail. `segments[0]` is the head; every other segment
/// holds the position its predecessor had one move earlier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub col: usize,
    pub row: usize,
    pub colour: HsvColour,
}

/// Partial configuration record for the snake scene.
///
/// Absent fields keep their previous values.
#[derive(Debug, Clone, Default)]
pub struct SnakeConfig {
    pub move_delay: Option<Duration>,
    pub moves_before_turn: Option<u8>,
    pub hue_step: Option<f32>,
    pub value_step: Option<f32>,
    pub value_ceiling: Option<f32>,
}

/// Snake scene state
#[derive(Debug, Clone)]
pub struct SnakeScene {
    clock: SceneClock,
    segments: [Segment; TRAIL_LENGTH],
    heading: Heading,
    moves_since_turn: u8,
    moves_before_turn: u8,
    move_delay: Duration,
    evolution: ColourEvolution,
    rng: Rng,
}

impl SnakeScene {
    pub fn new(seed: u32) -> Self {
        Self {
            clock: SceneClock::new(),
            segments: [Segment {
                col: 0,
                row: 0,
                colour: BaseColour::DEFAULT_COLOUR,
            }; TRAIL_LENGTH],
            heading: Heading::Down,
            moves_since_turn: 0,
            moves_before_turn: DEFAULT_MOVES_BEFORE_TURN,
            move_delay: Duration::from_millis(DEFAULT_MOVE_MS),
            evolution: BaseColour::DEFAULT_EVOLUTION,
            rng: Rng::new(seed),
        }
    }

    pub const fn segments(&self) -> &[Segment; TRAIL_LENGTH] {
        &self.segments
    }

    pub const fn heading(&self) -> Heading {
        self.heading
    }

    /// Apply a partial configuration record, key by key.
    pub fn apply_config(&mut self, config: &SnakeConfig) {
        if let Some(delay) = config.move_delay {
            self.move_delay = delay;
        }
        if let Some(moves) = config.moves_before_turn {
            self.moves_before_turn = moves;
        }
        if let Some(hue_step) = config.hue_step {
            self.evolution.hue_step = hue_step;
        }
        if let Some(value_step) = config.value_step {
            self.evolution.value_step = value_step;
        }
        if let Some(ceiling) = config.value_ceiling {
            self.evolution.value_ceiling = ceiling.min(HSV_MAX_VALUE);
        }

        #[cfg(feature = "esp32-log")]
        esp_println::println!(
            "snake config: move ms = {}, moves before turn = {}, hue step = {}, value step = {}, value ceiling = {}",
            self.move_delay.as_millis(),
            self.moves_before_turn,
            self.evolution.hue_step,
            self.evolution.value_step,
            self.evolution.value_ceiling,
        );
    }

    /// Pick one of the two perpendicular turns, narrowed to those whose
    /// first step stays on the grid. At least one is always legal on any
    /// grid at least two cells wide.
    fn pick_turn(&mut self, col: usize, row: usize) -> Heading {
        let [a, b] = self.heading.perpendicular();
        let a_legal = step(col, row, a).is_some();
        let b_legal = step(col, row, b).is_some();
        debug_assert!(a_legal || b_legal);
        match (a_legal, b_legal) {
            (true, true) => {
                if self.rng.coin() {
                    a
                } else {
                    b
                }
            }
            (true, false) => a,
            _ => b,
        }
    }
}

impl Scene for SnakeScene {
    fn update(&mut self, now: Instant, sink: &mut dyn PixelSink) {
        if !self.clock.ready(now, self.move_delay) {
            return;
        }

        sink.clear();
        for segment in &self.segments {
            sink.set_pixel(pixel_index(segment.col, segment.row), segment.colour);
        }
        sink.present();

        if self.moves_since_turn >= self.moves_before_turn {
            let (col, row) = (self.segments[0].col, self.segments[0].row);
            self.heading = self.pick_turn(col, row);
            self.moves_since_turn = 0;
        } else {
            self.moves_since_turn += 1;
        }

        // Trail shift: positions move back one slot, colours stay put.
        for i in (1..TRAIL_LENGTH).rev() {
            self.segments[i].col = self.segments[i - 1].col;
            self.segments[i].row = self.segments[i - 1].row;
        }

        let (col, row) = (self.segments[0].col, self.segments[0].row);
        let mut attempts = 0;
        let (col, row) = loop {
            if let Some(next) = step(col, row, self.heading) {
                break next;
            }
            self.heading = self.pick_turn(col, row);
            attempts += 1;
            // A narrowed turn is in-bounds by construction, so the retry
            // terminates on the second attempt at the latest.
            debug_assert!(attempts < 2);
        };
        self.segments[0].col = col;
        self.segments[0].row = row;

        for segment in &mut self.segments {
            segment.colour = evolve(segment.colour, self.evolution);
        }
    }

    fn reset(&mut self, now: Instant, base: &mut BaseColour) {
        let colour = base.sample();
        for segment in &mut self.segments {
            *segment = Segment {
                col: 0,
                row: 0,
                colour,
            };
        }
        self.heading = Heading::Down;
        self.moves_since_turn = 0;
        self.clock.rebase(now);
    }

    fn rebase(&mut self, now: Instant) {
        self.clock.rebase(now);
    }
}
