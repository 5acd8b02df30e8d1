//! HSV colour model and evolution rules shared by the scenes.

use libm::fmodf;
use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Absolute ceiling for configured HSV values
pub const HSV_MAX_VALUE: f32 = 1.0;

/// A colour in HSV space.
///
/// Hue is unbounded and wraps once per full turn at conversion time.
/// Saturation and value are nominally 0..=1 but are only clamped when
/// converting to RGB, never on write.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HsvColour {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

impl HsvColour {
    /// A switched-off pixel
    pub const OFF: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(hue: f32, saturation: f32, value: f32) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }
}

/// Per-tick drift applied to a colour.
///
/// Hue rotates without bound; value ramps up and wraps back to zero once
/// it passes the ceiling, producing a repeating brightness ramp that is
/// independent of the hue rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColourEvolution {
    pub hue_step: f32,
    pub value_step: f32,
    pub value_ceiling: f32,
}

impl ColourEvolution {
    pub const fn new(hue_step: f32, value_step: f32, value_ceiling: f32) -> Self {
        Self {
            hue_step,
            value_step,
            value_ceiling,
        }
    }
}

/// Advance a colour by one evolution step.
pub fn evolve(colour: HsvColour, evolution: ColourEvolution) -> HsvColour {
    let mut out = colour;
    out.hue += evolution.hue_step;
    out.value += evolution.value_step;
    if out.value > evolution.value_ceiling {
        out.value = 0.0;
    }
    out
}

/// Shared ambient colour sampled by scenes at reset.
#[derive(Debug, Clone)]
pub struct BaseColour {
    pub colour: HsvColour,
    pub evolution: ColourEvolution,
}

impl BaseColour {
    pub const DEFAULT_COLOUR: HsvColour = HsvColour::new(0.01, 1.0, 0.07);
    pub const DEFAULT_EVOLUTION: ColourEvolution =
        ColourEvolution::new(0.01, 0.0, HSV_MAX_VALUE);

    pub const fn new(colour: HsvColour, evolution: ColourEvolution) -> Self {
        Self { colour, evolution }
    }

    /// Take a one-shot sample of the ambient colour.
    ///
    /// Every sample advances the ramp by the base evolution, so consumers
    /// that re-sample on reset walk through the configured drift.
    pub fn sample(&mut self) -> HsvColour {
        let colour = self.colour;
        self.colour = evolve(self.colour, self.evolution);
        colour
    }
}

impl Default for BaseColour {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COLOUR, Self::DEFAULT_EVOLUTION)
    }
}

/// Convert an HSV colour to packed RGB.
///
/// The hue wheel is divided into six linear segments, offset by one
/// sector to line up with the fixture's colour wheel. Desaturation blends
/// each channel toward the per-pixel channel average. Channels are scaled
/// by value first, then truncated to 0..=255 with clamping.
pub fn hsv_to_rgb(colour: HsvColour) -> Rgb {
    let mut ro = fmodf(colour.hue * 6.0, 6.0);
    ro = fmodf(ro + 7.0, 6.0);

    let (mut r, mut g, mut b) = if ro < 1.0 {
        (1.0, 1.0 - ro, 0.0)
    } else if ro < 2.0 {
        (1.0, 0.0, ro - 1.0)
    } else if ro < 3.0 {
        (3.0 - ro, 0.0, 1.0)
    } else if ro < 4.0 {
        (0.0, ro - 3.0, 1.0)
    } else if ro < 5.0 {
        (0.0, 1.0, 5.0 - ro)
    } else {
        (ro - 5.0, 1.0, 0.0)
    };

    r *= colour.value;
    g *= colour.value;
    b *= colour.value;

    let avg = (r + g + b) / 3.0;
    let sat = colour.saturation;
    r = r * sat + avg * (1.0 - sat);
    g = g * sat + avg * (1.0 - sat);
    b = b * sat + avg * (1.0 - sat);

    Rgb {
        r: channel(r),
        g: channel(g),
        b: channel(b),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(v: f32) -> u8 {
    let scaled = v * 255.0;
    if scaled <= 0.0 {
        0
    } else if scaled >= 255.0 {
        255
    } else {
        scaled as u8
    }
}
