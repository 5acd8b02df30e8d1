#![no_std]

pub mod clock;
pub mod color;
pub mod command;
pub mod director;
pub mod geometry;
pub mod rng;
pub mod scene;

pub use clock::SceneClock;
pub use color::{BaseColour, ColourEvolution, HsvColour, Rgb, evolve, hsv_to_rgb};
pub use command::{
    BaseColourConfig, CommandChannel, CommandReceiver, CommandSender, SceneCommand, SceneConfig,
};
pub use director::{Director, DirectorConfig};
pub use geometry::{NUM_PIXELS, NUM_ROWS, PIXELS_PER_ROW, pixel_index};
pub use scene::{BlocksScene, FillScene, Scene, SceneId, SnakeScene};

pub use embassy_time::{Duration, Instant};

/// Abstract pixel buffer the scenes paint into
///
/// Implement this trait to connect the engine to a physical LED driver.
/// Writes are buffered: nothing painted with [`set_pixel`](PixelSink::set_pixel)
/// or blanked with [`clear`](PixelSink::clear) becomes visible until
/// [`present`](PixelSink::present) pushes the frame to the output.
pub trait PixelSink {
    /// Blank the whole buffer
    fn clear(&mut self);

    /// Paint one pixel by linear index (0..`NUM_PIXELS`)
    fn set_pixel(&mut self, index: usize, colour: HsvColour);

    /// Push the buffered frame to the physical output
    fn present(&mut self);
}
