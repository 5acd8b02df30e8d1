//! Typed command surface for the director
//!
//! The transport layer validates incoming requests into these records and
//! sends them through a bounded channel; the director drains the channel
//! non-blockingly once per tick, so all scene mutation happens on the
//! animation thread of execution. Unknown or malformed request fields
//! never reach the core: they simply arrive as `None` and keep the
//! previous values.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::scene::{BlocksConfig, FillConfig, SceneId, SnakeConfig};

/// Partial configuration record for the shared base colour.
///
/// Absent fields keep their previous values. The value ceiling is clamped
/// to the absolute maximum of 1.0 on application.
#[derive(Debug, Clone, Default)]
pub struct BaseColourConfig {
    pub hue: Option<f32>,
    pub saturation: Option<f32>,
    pub value: Option<f32>,
    pub hue_step: Option<f32>,
    pub value_step: Option<f32>,
    pub value_ceiling: Option<f32>,
}

/// Scene-specific configuration, routed to the named scene whether or not
/// it is currently active.
#[derive(Debug, Clone)]
pub enum SceneConfig {
    Fill(FillConfig),
    Snake(SnakeConfig),
    Blocks(BlocksConfig),
}

impl SceneConfig {
    /// The scene this record configures
    pub const fn scene(&self) -> SceneId {
        match self {
            Self::Fill(_) => SceneId::Fill,
            Self::Snake(_) => SceneId::Snake,
            Self::Blocks(_) => SceneId::Blocks,
        }
    }
}

/// Command to change what is playing or how it is configured
#[derive(Debug, Clone)]
pub enum SceneCommand {
    /// Select the active scene; the newly selected scene is reinitialized
    SetScene(SceneId),
    /// Suspend scene updates; commands keep draining
    Pause,
    /// Un-gate updates and re-baseline the active scene's clock
    Resume,
    /// Pause, blank the output and reset the active scene's progress
    Stop,
    /// Route a configuration record to its scene
    Configure(SceneConfig),
    /// Update the shared base colour
    SetBaseColour(BaseColourConfig),
}

/// Type alias for command sender
pub type CommandSender<'a, const N: usize> =
    Sender<'a, CriticalSectionRawMutex, SceneCommand, N>;

/// Type alias for command receiver
pub type CommandReceiver<'a, const N: usize> =
    Receiver<'a, CriticalSectionRawMutex, SceneCommand, N>;

/// Type alias for the command channel
pub type CommandChannel<const N: usize> = Channel<CriticalSectionRawMutex, SceneCommand, N>;
