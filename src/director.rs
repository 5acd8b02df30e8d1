//! Scene direction and command processing
//!
//! The director owns one state struct per scene variant, the shared base
//! colour and the pause gate. Unselected scenes stay dormant with their
//! state intact; selecting a scene (including reselecting the current
//! one) blanks the output and reinitializes it.

use embassy_time::Instant;

use crate::PixelSink;
use crate::color::{BaseColour, HSV_MAX_VALUE};
use crate::command::{BaseColourConfig, CommandReceiver, SceneCommand, SceneConfig};
use crate::scene::{BlocksScene, FillScene, Scene, SceneId, SnakeScene};

/// Startup configuration for the director
#[derive(Debug, Clone)]
pub struct DirectorConfig {
    /// Scene selected at startup
    pub scene: SceneId,
    /// Seed for the scenes' random generators
    pub seed: u32,
    /// Initial shared base colour
    pub base_colour: BaseColour,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            scene: SceneId::Fill,
            seed: 1,
            base_colour: BaseColour::default(),
        }
    }
}

/// Scene director - the main orchestrator
pub struct Director<'a, const COMMANDS: usize> {
    commands: CommandReceiver<'a, COMMANDS>,
    current: SceneId,
    paused: bool,
    base: BaseColour,
    fill: FillScene,
    snake: SnakeScene,
    blocks: BlocksScene,
}

impl<'a, const COMMANDS: usize> Director<'a, COMMANDS> {
    /// Create a director with the command channel receiver.
    ///
    /// `now` is the current tick value; the initial scene's clock is
    /// baselined to it so the first elapsed-time gate does not fire off a
    /// stale zero timestamp.
    pub fn new(
        commands: CommandReceiver<'a, COMMANDS>,
        config: &DirectorConfig,
        now: Instant,
    ) -> Self {
        let mut director = Self {
            commands,
            current: config.scene,
            paused: false,
            base: config.base_colour.clone(),
            fill: FillScene::new(),
            snake: SnakeScene::new(config.seed),
            blocks: BlocksScene::new(config.seed.wrapping_mul(0x9e37_79b9).wrapping_add(1)),
        };
        director.reset_current(now);
        director
    }

    /// Process one tick.
    ///
    /// Drains pending commands first, then advances the active scene
    /// unless paused. Call this once per scheduler tick.
    pub fn update(&mut self, now: Instant, sink: &mut dyn PixelSink) {
        self.process_commands(now, sink);
        if self.paused {
            return;
        }
        match self.current {
            SceneId::Fill => self.fill.update(now, sink),
            SceneId::Snake => self.snake.update(now, sink),
            SceneId::Blocks => self.blocks.update(now, sink),
        }
    }

    /// Drain all pending commands from the channel (non-blocking)
    fn process_commands(&mut self, now: Instant, sink: &mut dyn PixelSink) {
        while let Ok(command) = self.commands.try_receive() {
            match command {
                SceneCommand::SetScene(id) => self.set_scene(id, now, sink),
                SceneCommand::Pause => self.pause(),
                SceneCommand::Resume => self.resume(now),
                SceneCommand::Stop => self.stop(now, sink),
                SceneCommand::Configure(config) => self.configure(&config),
                SceneCommand::SetBaseColour(config) => self.set_base_colour(&config),
            }
        }
    }

    /// Select a scene, blank the output and reinitialize it.
    pub fn set_scene(&mut self, id: SceneId, now: Instant, sink: &mut dyn PixelSink) {
        self.current = id;
        sink.clear();
        sink.present();
        self.reset_current(now);

        #[cfg(feature = "esp32-log")]
        esp_println::println!("scene: {}", id.as_str());
    }

    /// Select a scene by name. Unrecognized names leave the current scene
    /// untouched.
    pub fn set_scene_by_name(&mut self, name: &str, now: Instant, sink: &mut dyn PixelSink) {
        if let Some(id) = SceneId::parse_from_str(name) {
            self.set_scene(id, now, sink);
        }
    }

    /// Suspend scene updates. Commands keep draining while paused.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Un-gate updates and re-baseline the active scene's clock so the
    /// time spent paused does not register as elapsed.
    pub fn resume(&mut self, now: Instant) {
        self.paused = false;
        match self.current {
            SceneId::Fill => self.fill.rebase(now),
            SceneId::Snake => self.snake.rebase(now),
            SceneId::Blocks => self.blocks.rebase(now),
        }
    }

    /// Pause, blank the output and reset the active scene's transient
    /// progress. Configuration is preserved.
    pub fn stop(&mut self, now: Instant, sink: &mut dyn PixelSink) {
        self.paused = true;
        sink.clear();
        sink.present();
        self.reset_current(now);
    }

    /// Route a configuration record to its scene, active or not.
    pub fn configure(&mut self, config: &SceneConfig) {
        match config {
            SceneConfig::Fill(config) => self.fill.apply_config(config),
            SceneConfig::Snake(config) => self.snake.apply_config(config),
            SceneConfig::Blocks(config) => self.blocks.apply_config(config),
        }
    }

    /// Update the shared base colour, key by key. The value ceiling is
    /// clamped to the absolute maximum.
    pub fn set_base_colour(&mut self, config: &BaseColourConfig) {
        if let Some(hue) = config.hue {
            self.base.colour.hue = hue;
        }
        if let Some(saturation) = config.saturation {
            self.base.colour.saturation = saturation;
        }
        if let Some(value) = config.value {
            self.base.colour.value = value;
        }
        if let Some(hue_step) = config.hue_step {
            self.base.evolution.hue_step = hue_step;
        }
        if let Some(value_step) = config.value_step {
            self.base.evolution.value_step = value_step;
        }
        if let Some(ceiling) = config.value_ceiling {
            self.base.evolution.value_ceiling = ceiling.min(HSV_MAX_VALUE);
        }

        #[cfg(feature = "esp32-log")]
        esp_println::println!(
            "base colour config: hue = {}, sat = {}, value = {}, hue step = {}, value step = {}, value ceiling = {}",
            self.base.colour.hue,
            self.base.colour.saturation,
            self.base.colour.value,
            self.base.evolution.hue_step,
            self.base.evolution.value_step,
            self.base.evolution.value_ceiling,
        );
    }

    fn reset_current(&mut self, now: Instant) {
        match self.current {
            SceneId::Fill => self.fill.reset(now, &mut self.base),
            SceneId::Snake => self.snake.reset(now, &mut self.base),
            SceneId::Blocks => self.blocks.reset(now, &mut self.base),
        }
    }

    pub const fn current_scene(&self) -> SceneId {
        self.current
    }

    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    pub const fn base_colour(&self) -> &BaseColour {
        &self.base
    }

    pub const fn fill(&self) -> &FillScene {
        &self.fill
    }

    pub const fn snake(&self) -> &SnakeScene {
        &self.snake
    }

    pub const fn blocks(&self) -> &BlocksScene {
        &self.blocks
    }
}
