mod tests {
    use light_frame::color::{BaseColour, ColourEvolution, HsvColour, Rgb, evolve, hsv_to_rgb};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_evolve_advances_hue_and_value() {
        let colour = HsvColour::new(0.2, 1.0, 0.1);
        let evolution = ColourEvolution::new(0.05, 0.02, 1.0);
        let next = evolve(colour, evolution);
        assert!(close(next.hue, 0.25));
        assert!(close(next.value, 0.12));
        assert!(close(next.saturation, 1.0));
    }

    #[test]
    fn test_evolve_value_wraps_once_per_cycle() {
        // step 0.1 against a ceiling of 0.35 wraps on every 4th step
        let evolution = ColourEvolution::new(0.0, 0.1, 0.35);
        let mut colour = HsvColour::new(0.0, 1.0, 0.0);
        let mut wraps = 0;
        for _ in 0..12 {
            colour = evolve(colour, evolution);
            if colour.value == 0.0 {
                wraps += 1;
            }
        }
        assert_eq!(wraps, 3);
    }

    #[test]
    fn test_hue_zero_is_red() {
        let rgb = hsv_to_rgb(HsvColour::new(0.0, 1.0, 1.0));
        assert_eq!(rgb, Rgb { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn test_mid_sector_blend() {
        // One twelfth of a turn lands mid-way through the red-blue sector
        let rgb = hsv_to_rgb(HsvColour::new(1.0 / 12.0, 1.0, 1.0));
        assert_eq!(rgb, Rgb { r: 255, g: 0, b: 127 });
    }

    #[test]
    fn test_hue_wraps_per_turn() {
        let a = hsv_to_rgb(HsvColour::new(0.25, 1.0, 1.0));
        let b = hsv_to_rgb(HsvColour::new(1.25, 1.0, 1.0));
        let c = hsv_to_rgb(HsvColour::new(2.25, 1.0, 1.0));
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_desaturation_greys_toward_average() {
        let rgb = hsv_to_rgb(HsvColour::new(0.0, 0.0, 1.0));
        assert_eq!(rgb.r, rgb.g);
        assert_eq!(rgb.g, rgb.b);
        assert_eq!(rgb, Rgb { r: 85, g: 85, b: 85 });
    }

    #[test]
    fn test_value_scales_channels() {
        let rgb = hsv_to_rgb(HsvColour::new(0.0, 1.0, 0.5));
        assert_eq!(rgb, Rgb { r: 127, g: 0, b: 0 });
    }

    #[test]
    fn test_channels_clamp() {
        let over = hsv_to_rgb(HsvColour::new(0.0, 1.0, 2.0));
        assert_eq!(over, Rgb { r: 255, g: 0, b: 0 });

        let under = hsv_to_rgb(HsvColour::new(0.0, 1.0, -1.0));
        assert_eq!(under, Rgb { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn test_off_pixel_is_black() {
        assert_eq!(hsv_to_rgb(HsvColour::OFF), Rgb { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn test_base_colour_sample_advances_ramp() {
        let mut base = BaseColour::default();
        let first = base.sample();
        let second = base.sample();
        assert!(close(first.hue, 0.01));
        assert!(close(second.hue, 0.02));
        assert!(close(first.value, second.value));
    }
}
