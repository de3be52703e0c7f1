//! Colour cycles and ambient fields
//!
//! Stateless renderers: everything is a function of the time spent in the
//! current mode, so they need no reset on entry.

use rand::Rng;
use smart_leds::hsv::{hsv2rgb, Hsv};
use smart_leds::RGB8;

use crate::frame::{blend, sawtooth, triangle, Frame};

/// Hue step between neighbouring pixels in RGB mode
pub const RGB_SPREAD: u8 = 3;

/// Out of 256: chance a disco frame carries a sparkle
pub const SPARKLE_CHANCE: u8 = 64;

pub const WHITE: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};

/// Two-colour breathing field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub low: RGB8,
    pub high: RGB8,
}

impl Palette {
    pub const fn new(low: RGB8, high: RGB8) -> Self {
        Self { low, high }
    }
}

pub const BLUE_SKY: Palette = Palette::new(
    RGB8 { r: 0, g: 80, b: 255 },
    RGB8 { r: 40, g: 140, b: 255 },
);
pub const OVERCAST: Palette = Palette::new(
    RGB8 { r: 55, g: 55, b: 65 },
    RGB8 { r: 100, g: 100, b: 112 },
);
pub const GOLDEN: Palette = Palette::new(
    RGB8 { r: 255, g: 110, b: 0 },
    RGB8 { r: 255, g: 170, b: 40 },
);
pub const MIST: Palette = Palette::new(
    RGB8 { r: 35, g: 45, b: 45 },
    RGB8 { r: 90, g: 100, b: 100 },
);
pub const DARK: Palette = Palette::new(
    RGB8 { r: 0, g: 0, b: 4 },
    RGB8 { r: 3, g: 3, b: 14 },
);
pub const SNOW: Palette = Palette::new(
    RGB8 { r: 90, g: 100, b: 130 },
    RGB8 { r: 130, g: 140, b: 170 },
);
pub const RAIN: Palette = Palette::new(
    RGB8 { r: 0, g: 12, b: 50 },
    RGB8 { r: 5, g: 25, b: 80 },
);

/// Twilight gradient ends, strip start to strip end
pub const TWILIGHT: Palette = Palette::new(
    RGB8 { r: 50, g: 0, b: 90 },
    RGB8 { r: 255, g: 70, b: 20 },
);

/// Offset of pixel `index` along a wave travelling once over the strip
fn wave_offset(index: usize, len: usize, period_ms: u32) -> u32 {
    if len == 0 {
        return 0;
    }
    ((u64::from(period_ms) * index as u64) / len as u64) as u32
}

/// Slow hue cycle with a narrow spread along the strip
pub fn render_rgb(frame: &mut Frame, t_ms: u32, cycle_ms: u32, hue_offset: u8) {
    let base = sawtooth(t_ms, cycle_ms).wrapping_add(hue_offset);
    for (i, pixel) in frame.pixels_mut().iter_mut().enumerate() {
        *pixel = hsv2rgb(Hsv {
            hue: base.wrapping_add((i as u8).wrapping_mul(RGB_SPREAD)),
            sat: 255,
            val: 255,
        });
    }
}

/// Fast full-spectrum cycle with random white sparkles
pub fn render_disco<R: Rng>(frame: &mut Frame, t_ms: u32, cycle_ms: u32, rng: &mut R) {
    let len = frame.len();
    let base = sawtooth(t_ms, cycle_ms);
    for (i, pixel) in frame.pixels_mut().iter_mut().enumerate() {
        let spread = ((i * 256) / len.max(1)) as u8;
        *pixel = hsv2rgb(Hsv {
            hue: base.wrapping_add(spread),
            sat: 255,
            val: 255,
        });
    }

    if len > 0 && rng.gen::<u8>() < SPARKLE_CHANCE {
        frame.set(rng.gen_range(0..len), WHITE);
    }
}

/// Breathing field drifting slowly along the strip
pub fn render_field(frame: &mut Frame, t_ms: u32, period_ms: u32, palette: Palette) {
    let len = frame.len();
    for (i, pixel) in frame.pixels_mut().iter_mut().enumerate() {
        let t = t_ms.wrapping_add(wave_offset(i, len, period_ms));
        *pixel = blend(palette.low, palette.high, triangle(t, period_ms));
    }
}

/// Full hue gradient drifting along the strip
pub fn render_rainbow(frame: &mut Frame, t_ms: u32, period_ms: u32) {
    let len = frame.len();
    let base = sawtooth(t_ms, period_ms);
    for (i, pixel) in frame.pixels_mut().iter_mut().enumerate() {
        let spread = ((i * 256) / len.max(1)) as u8;
        *pixel = hsv2rgb(Hsv {
            hue: base.wrapping_add(spread),
            sat: 240,
            val: 200,
        });
    }
}

/// Dusk gradient from violet to orange, gently breathing
pub fn render_twilight(frame: &mut Frame, t_ms: u32, period_ms: u32) {
    let len = frame.len();
    let breath = triangle(t_ms, period_ms) / 4;
    for (i, pixel) in frame.pixels_mut().iter_mut().enumerate() {
        let position = ((i * 255) / len.saturating_sub(1).max(1)) as u8;
        *pixel = blend(TWILIGHT.low, TWILIGHT.high, position.saturating_sub(breath));
    }
}
