//! Fill/wipe scene
//!
//! Sweeps the matrix pixel by pixel, pauses, optionally wipes it clean
//! again, pauses, and repeats. Four phases, each behind its own
//! independently configurable elapsed-time gate.

use embassy_time::{Duration, Instant};

use super::Scene;
use crate::PixelSink;
use crate::clock::SceneClock;
use crate::color::{BaseColour, ColourEvolution, HSV_MAX_VALUE, HsvColour, evolve};
use crate::geometry::{NUM_PIXELS, PIXELS_PER_ROW};

const DEFAULT_FILL_PIXEL_MS: u64 = 50;
const DEFAULT_FILL_PAUSE_MS: u64 = 200;
const DEFAULT_CLEAR_PIXEL_MS: u64 = 30;
const DEFAULT_CLEAR_PAUSE_MS: u64 = 100;

/// Sub-state of the fill cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPhase {
    Filling,
    PauseAfterFill,
    Clearing,
    PauseAfterClear,
}

/// Index order of a sweep across the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    Ascending,
    Descending,
}

impl SweepDirection {
    const fn start(self) -> usize {
        match self {
            Self::Ascending => 0,
            Self::Descending => NUM_PIXELS - 1,
        }
    }
}

/// When the paint colour evolves during a fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourMode {
    /// Once, at the end of each complete fill
    OnCycle,
    /// After every painted pixel
    OnPixel,
    /// After every completed row, including the last
    OnRow,
}

/// Partial configuration record for the fill scene.
///
/// Absent fields keep their previous values.
#[derive(Debug, Clone, Default)]
pub struct FillConfig {
    pub colour_mode: Option<ColourMode>,
    pub clear_after_fill: Option<bool>,
    pub fill_direction: Option<SweepDirection>,
    pub clear_direction: Option<SweepDirection>,
    pub fill_pixel_delay: Option<Duration>,
    pub fill_pause_delay: Option<Duration>,
    pub clear_pixel_delay: Option<Duration>,
    pub clear_pause_delay: Option<Duration>,
    pub hue: Option<f32>,
    pub saturation: Option<f32>,
    pub value: Option<f32>,
    pub hue_step: Option<f32>,
    pub value_step: Option<f32>,
    pub value_ceiling: Option<f32>,
}

/// Fill/wipe scene state
#[derive(Debug, Clone)]
pub struct FillScene {
    clock: SceneClock,
    pixel: usize,
    phase: FillPhase,
    colour_mode: ColourMode,
    clear_after_fill: bool,
    fill_direction: SweepDirection,
    clear_direction: SweepDirection,
    fill_pixel_delay: Duration,
    fill_pause_delay: Duration,
    clear_pixel_delay: Duration,
    clear_pause_delay: Duration,
    colour: HsvColour,
    evolution: ColourEvolution,
}

impl Default for FillScene {
    fn default() -> Self {
        Self::new()
    }
}

impl FillScene {
    pub fn new() -> Self {
        Self {
            clock: SceneClock::new(),
            pixel: 0,
            phase: FillPhase::Filling,
            colour_mode: ColourMode::OnCycle,
            clear_after_fill: true,
            fill_direction: SweepDirection::Ascending,
            clear_direction: SweepDirection::Ascending,
            fill_pixel_delay: Duration::from_millis(DEFAULT_FILL_PIXEL_MS),
            fill_pause_delay: Duration::from_millis(DEFAULT_FILL_PAUSE_MS),
            clear_pixel_delay: Duration::from_millis(DEFAULT_CLEAR_PIXEL_MS),
            clear_pause_delay: Duration::from_millis(DEFAULT_CLEAR_PAUSE_MS),
            colour: BaseColour::DEFAULT_COLOUR,
            evolution: BaseColour::DEFAULT_EVOLUTION,
        }
    }

    pub const fn phase(&self) -> FillPhase {
        self.phase
    }

    /// Index the next fill or clear step will touch
    pub const fn active_pixel(&self) -> usize {
        self.pixel
    }

    pub const fn colour(&self) -> HsvColour {
        self.colour
    }

    /// Apply a partial configuration record, key by key.
    pub fn apply_config(&mut self, config: &FillConfig) {
        if let Some(colour_mode) = config.colour_mode {
            self.colour_mode = colour_mode;
        }
        if let Some(clear_after_fill) = config.clear_after_fill {
            self.clear_after_fill = clear_after_fill;
        }
        if let Some(fill_direction) = config.fill_direction {
            self.fill_direction = fill_direction;
        }
        if let Some(clear_direction) = config.clear_direction {
            self.clear_direction = clear_direction;
        }
        if let Some(delay) = config.fill_pixel_delay {
            self.fill_pixel_delay = delay;
        }
        if let Some(delay) = config.fill_pause_delay {
            self.fill_pause_delay = delay;
        }
        if let Some(delay) = config.clear_pixel_delay {
            self.clear_pixel_delay = delay;
        }
        if let Some(delay) = config.clear_pause_delay {
            self.clear_pause_delay = delay;
        }
        if let Some(hue) = config.hue {
            self.colour.hue = hue;
        }
        if let Some(saturation) = config.saturation {
            self.colour.saturation = saturation;
        }
        if let Some(value) = config.value {
            self.colour.value = value;
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
            "fill config: colour mode = {:?}, clear after fill = {}, fill direction = {:?}, clear direction = {:?}, fill pixel ms = {}, fill pause ms = {}, clear pixel ms = {}, clear pause ms = {}",
            self.colour_mode,
            self.clear_after_fill,
            self.fill_direction,
            self.clear_direction,
            self.fill_pixel_delay.as_millis(),
            self.fill_pause_delay.as_millis(),
            self.clear_pixel_delay.as_millis(),
            self.clear_pause_delay.as_millis(),
        );
    }

    fn evolve_colour(&mut self) {
        self.colour = evolve(self.colour, self.evolution);
    }

    /// Paint one pixel of the fill sweep and advance the state machine.
    fn step_fill(&mut self, sink: &mut dyn PixelSink) {
        sink.set_pixel(self.pixel, self.colour);
        sink.present();

        match self.colour_mode {
            ColourMode::OnPixel => self.evolve_colour(),
            ColourMode::OnRow => {
                // A row is complete when the painted pixel was the last of
                // its row in the direction of travel.
                let row_done = match self.fill_direction {
                    SweepDirection::Ascending => (self.pixel + 1).is_multiple_of(PIXELS_PER_ROW),
                    SweepDirection::Descending => self.pixel.is_multiple_of(PIXELS_PER_ROW),
                };
                if row_done {
                    self.evolve_colour();
                }
            }
            ColourMode::OnCycle => {}
        }

        let done = match self.fill_direction {
            SweepDirection::Ascending => self.pixel == NUM_PIXELS - 1,
            SweepDirection::Descending => self.pixel == 0,
        };
        if done {
            self.phase = FillPhase::PauseAfterFill;
            if self.colour_mode == ColourMode::OnCycle {
                self.evolve_colour();
            }
        } else {
            match self.fill_direction {
                SweepDirection::Ascending => self.pixel += 1,
                SweepDirection::Descending => self.pixel -= 1,
            }
        }
    }

    /// Blank one pixel of the wipe and advance the state machine.
    fn step_clear(&mut self, sink: &mut dyn PixelSink) {
        sink.set_pixel(self.pixel, HsvColour::OFF);
        sink.present();

        let done = match self.clear_direction {
            SweepDirection::Ascending => self.pixel == NUM_PIXELS - 1,
            SweepDirection::Descending => self.pixel == 0,
        };
        if done {
            self.phase = FillPhase::PauseAfterClear;
        } else {
            match self.clear_direction {
                SweepDirection::Ascending => self.pixel += 1,
                SweepDirection::Descending => self.pixel -= 1,
            }
        }
    }
}

impl Scene for FillScene {
    fn update(&mut self, now: Instant, sink: &mut dyn PixelSink) {
        match self.phase {
            FillPhase::Filling => {
                if self.clock.ready(now, self.fill_pixel_delay) {
                    self.step_fill(sink);
                }
            }
            FillPhase::PauseAfterFill => {
                if self.clock.ready(now, self.fill_pause_delay) {
                    if self.clear_after_fill {
                        self.phase = FillPhase::Clearing;
                        self.pixel = self.clear_direction.start();
                    } else {
                        self.phase = FillPhase::Filling;
                        self.pixel = self.fill_direction.start();
                    }
                }
            }
            FillPhase::Clearing => {
                if self.clock.ready(now, self.clear_pixel_delay) {
                    self.step_clear(sink);
                }
            }
            FillPhase::PauseAfterClear => {
                if self.clock.ready(now, self.clear_pause_delay) {
                    self.phase = FillPhase::Filling;
                    self.pixel = self.fill_direction.start();
                }
            }
        }
    }

    fn reset(&mut self, now: Instant, _base: &mut BaseColour) {
        self.pixel = self.fill_direction.start();
        self.phase = FillPhase::Filling;
        self.clock.rebase(now);
    }

    fn rebase(&mut self, now: Instant) {
        self.clock.rebase(now);
    }
}
