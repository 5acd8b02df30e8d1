//! Scene system with compile-time known scene variants
//!
//! Each scene is an owned state struct implementing the [`Scene`] trait.
//! The director holds one instance per variant; unselected scenes stay
//! dormant with their state intact until reselected.

mod blocks;
mod fill;
mod snake;

use embassy_time::Instant;

pub use blocks::{BLOCK_SIZE, BlockCell, BlocksConfig, BlocksScene, NUM_BLOCK_COLS, NUM_BLOCK_ROWS};
pub use fill::{ColourMode, FillConfig, FillPhase, FillScene, SweepDirection};
pub use snake::{Heading, Segment, SnakeConfig, SnakeScene, TRAIL_LENGTH};

use crate::PixelSink;
use crate::color::BaseColour;

const SCENE_NAME_FILL: &str = "fill";
const SCENE_NAME_SNAKE: &str = "snake";
const SCENE_NAME_BLOCKS: &str = "blocks";

const SCENE_ID_FILL: u8 = 0;
const SCENE_ID_SNAKE: u8 = 1;
const SCENE_ID_BLOCKS: u8 = 2;

/// Common contract of the three animation scenes.
pub trait Scene {
    /// Advance by one tick. Each scene gates its own sub-behaviour on the
    /// elapsed time since its last action and paints into the sink when a
    /// gate fires.
    fn update(&mut self, now: Instant, sink: &mut dyn PixelSink);

    /// Reinitialize transient progress and re-baseline the scene clock.
    /// Configuration is preserved.
    fn reset(&mut self, now: Instant, base: &mut BaseColour);

    /// Re-baseline the scene clock without touching animation state.
    fn rebase(&mut self, now: Instant);
}

/// Known scene ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SceneId {
    Fill = SCENE_ID_FILL,
    Snake = SCENE_ID_SNAKE,
    Blocks = SCENE_ID_BLOCKS,
}

impl SceneId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            SCENE_ID_FILL => Self::Fill,
            SCENE_ID_SNAKE => Self::Snake,
            SCENE_ID_BLOCKS => Self::Blocks,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fill => SCENE_NAME_FILL,
            Self::Snake => SCENE_NAME_SNAKE,
            Self::Blocks => SCENE_NAME_BLOCKS,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            SCENE_NAME_FILL => Some(Self::Fill),
            SCENE_NAME_SNAKE => Some(Self::Snake),
            SCENE_NAME_BLOCKS => Some(Self::Blocks),
            _ => None,
        }
    }
}
