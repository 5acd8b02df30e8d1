mod common;

mod tests {
    use light_frame::command::{BaseColourConfig, CommandChannel, SceneCommand, SceneConfig};
    use light_frame::scene::{FillConfig, FillPhase, SceneId};
    use light_frame::{Director, DirectorConfig, Duration, Instant};

    use crate::common::TestSink;

    const FILL_MS: u64 = 50;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_unrecognized_scene_name_is_noop() {
        let channel: CommandChannel<4> = CommandChannel::new();
        let mut director = Director::new(channel.receiver(), &DirectorConfig::default(), at(0));
        let mut sink = TestSink::new();

        director.set_scene_by_name("snake", at(0), &mut sink);
        assert_eq!(director.current_scene(), SceneId::Snake);

        director.set_scene_by_name("bogus", at(0), &mut sink);
        assert_eq!(director.current_scene(), SceneId::Snake);
    }

    #[test]
    fn test_scene_switch_clears_sink_and_resets_state() {
        let channel: CommandChannel<4> = CommandChannel::new();
        let mut director = Director::new(channel.receiver(), &DirectorConfig::default(), at(0));
        let mut sink = TestSink::new();

        // Let the fill scene make progress
        director.update(at(FILL_MS), &mut sink);
        director.update(at(2 * FILL_MS), &mut sink);
        assert_eq!(director.fill().active_pixel(), 2);

        director.set_scene(SceneId::Snake, at(2 * FILL_MS), &mut sink);
        assert_eq!(sink.lit(), 0);

        // Reselecting fill reinitializes its dormant progress
        director.set_scene(SceneId::Fill, at(2 * FILL_MS), &mut sink);
        assert_eq!(director.fill().active_pixel(), 0);
        assert_eq!(director.fill().phase(), FillPhase::Filling);
    }

    #[test]
    fn test_config_staged_before_activation() {
        let channel: CommandChannel<4> = CommandChannel::new();
        let sender = channel.sender();
        let config = DirectorConfig {
            scene: SceneId::Snake,
            ..DirectorConfig::default()
        };
        let mut director = Director::new(channel.receiver(), &config, at(0));
        let mut sink = TestSink::new();

        // Configure the inactive fill scene through the channel
        sender
            .try_send(SceneCommand::Configure(SceneConfig::Fill(FillConfig {
                fill_pixel_delay: Some(Duration::from_millis(10)),
                ..FillConfig::default()
            })))
            .unwrap();
        sender.try_send(SceneCommand::SetScene(SceneId::Fill)).unwrap();
        director.update(at(100), &mut sink);
        assert_eq!(director.current_scene(), SceneId::Fill);

        // First pixel lands no earlier than the staged 10 ms delay
        sink.log.clear();
        director.update(at(105), &mut sink);
        assert!(sink.painted().is_empty());
        director.update(at(110), &mut sink);
        assert_eq!(sink.painted(), vec![0]);
    }

    #[test]
    fn test_pause_gates_updates_but_commands_drain() {
        let channel: CommandChannel<4> = CommandChannel::new();
        let sender = channel.sender();
        let mut director = Director::new(channel.receiver(), &DirectorConfig::default(), at(0));
        let mut sink = TestSink::new();

        sender.try_send(SceneCommand::Pause).unwrap();
        director.update(at(1), &mut sink);
        assert!(director.is_paused());

        // Scene updates are gated far past every delay
        director.update(at(10_000), &mut sink);
        assert!(sink.painted().is_empty());

        // Commands still drain while paused
        sender
            .try_send(SceneCommand::SetBaseColour(BaseColourConfig {
                hue: Some(0.4),
                ..BaseColourConfig::default()
            }))
            .unwrap();
        director.update(at(10_001), &mut sink);
        assert!((director.base_colour().colour.hue - 0.4).abs() < 1e-6);
        assert!(sink.painted().is_empty());
    }

    #[test]
    fn test_resume_rebaselines_clock() {
        let channel: CommandChannel<4> = CommandChannel::new();
        let mut director = Director::new(channel.receiver(), &DirectorConfig::default(), at(0));
        let mut sink = TestSink::new();

        director.update(at(FILL_MS), &mut sink);
        assert_eq!(sink.painted(), vec![0]);

        director.pause();
        director.resume(at(10_000));

        // The paused stretch does not count as elapsed time
        sink.log.clear();
        director.update(at(10_001), &mut sink);
        assert!(sink.painted().is_empty());
        director.update(at(10_000 + FILL_MS), &mut sink);
        assert_eq!(sink.painted(), vec![1]);
    }

    #[test]
    fn test_stop_resets_progress_and_keeps_config() {
        let channel: CommandChannel<4> = CommandChannel::new();
        let sender = channel.sender();
        let mut director = Director::new(channel.receiver(), &DirectorConfig::default(), at(0));
        let mut sink = TestSink::new();

        sender
            .try_send(SceneCommand::Configure(SceneConfig::Fill(FillConfig {
                fill_pixel_delay: Some(Duration::from_millis(10)),
                ..FillConfig::default()
            })))
            .unwrap();
        director.update(at(10), &mut sink);
        director.update(at(20), &mut sink);
        assert_eq!(director.fill().active_pixel(), 2);

        sender.try_send(SceneCommand::Stop).unwrap();
        director.update(at(30), &mut sink);
        assert!(director.is_paused());
        assert_eq!(sink.lit(), 0);
        assert_eq!(director.fill().active_pixel(), 0);

        // Resume continues with the configured delay from a fresh sweep
        sender.try_send(SceneCommand::Resume).unwrap();
        director.update(at(1000), &mut sink);
        sink.log.clear();
        director.update(at(1009), &mut sink);
        assert!(sink.painted().is_empty());
        director.update(at(1010), &mut sink);
        assert_eq!(sink.painted(), vec![0]);
    }

    #[test]
    fn test_base_colour_ceiling_clamped() {
        let channel: CommandChannel<4> = CommandChannel::new();
        let mut director = Director::new(channel.receiver(), &DirectorConfig::default(), at(0));

        director.set_base_colour(&BaseColourConfig {
            value_ceiling: Some(5.0),
            ..BaseColourConfig::default()
        });
        assert_eq!(director.base_colour().evolution.value_ceiling, 1.0);

        director.set_base_colour(&BaseColourConfig {
            value_ceiling: Some(0.5),
            ..BaseColourConfig::default()
        });
        assert_eq!(director.base_colour().evolution.value_ceiling, 0.5);
    }

    #[test]
    fn test_snake_seeds_from_configured_base_colour() {
        let channel: CommandChannel<4> = CommandChannel::new();
        let mut director = Director::new(channel.receiver(), &DirectorConfig::default(), at(0));
        let mut sink = TestSink::new();

        director.set_base_colour(&BaseColourConfig {
            hue: Some(0.6),
            hue_step: Some(0.0),
            ..BaseColourConfig::default()
        });
        director.set_scene(SceneId::Snake, at(0), &mut sink);

        for segment in director.snake().segments() {
            assert!((segment.colour.hue - 0.6).abs() < 1e-6);
        }
    }
}
