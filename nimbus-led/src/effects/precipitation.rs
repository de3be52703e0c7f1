//! Snow flakes and falling rain
//!
//! Both overlay a per-pixel glow on a breathing background field. Snow
//! flakes appear in place and melt away; rain drops move one pixel towards
//! the strip start every step.

use rand::Rng;
use smart_leds::RGB8;

use crate::effects::color::{render_field, Palette, WHITE};
use crate::frame::{blend, Frame, MAX_LEDS};

/// Out of 256: chance per frame that a new flake appears
pub const FLAKE_CHANCE: u8 = 40;

/// Flake glow lost per millisecond
pub const FLAKE_MELT_PER_MS: u32 = 1;

/// Time for a drop to fall one pixel
pub const RAIN_STEP_MS: u32 = 60;

/// Out of 256: chance per step that a new drop enters at the strip end
pub const DROP_CHANCE: u8 = 90;

/// Flake colour
pub const FLAKE: RGB8 = WHITE;

pub const DROP: RGB8 = RGB8 {
    r: 60,
    g: 120,
    b: 255,
};

/// Per-pixel overlay levels
#[derive(Debug, Clone)]
pub struct Precipitation {
    levels: [u8; MAX_LEDS],
    /// Time not yet consumed by rain steps
    step_ms: u32,
}

impl Default for Precipitation {
    fn default() -> Self {
        Self::new()
    }
}

impl Precipitation {
    pub const fn new() -> Self {
        Self {
            levels: [0; MAX_LEDS],
            step_ms: 0,
        }
    }

    /// Clear all flakes and drops
    pub fn clear(&mut self) {
        self.levels = [0; MAX_LEDS];
        self.step_ms = 0;
    }

    /// Overlay level of pixel `index`
    pub fn level(&self, index: usize) -> u8 {
        self.levels.get(index).copied().unwrap_or(0)
    }

    /// Melt existing flakes and maybe drop a new one
    pub fn update_snow<R: Rng>(&mut self, elapsed_ms: u32, len: usize, rng: &mut R) {
        let len = len.min(MAX_LEDS);
        let melt = elapsed_ms.saturating_mul(FLAKE_MELT_PER_MS).min(255) as u8;
        for level in self.levels[..len].iter_mut() {
            *level = level.saturating_sub(melt);
        }

        if len > 0 && rng.gen::<u8>() < FLAKE_CHANCE {
            self.levels[rng.gen_range(0..len)] = 255;
        }
    }

    /// Move drops down the strip, one pixel per step
    pub fn update_rain<R: Rng>(&mut self, elapsed_ms: u32, len: usize, rng: &mut R) {
        let len = len.min(MAX_LEDS);
        if len == 0 {
            return;
        }

        self.step_ms = self.step_ms.saturating_add(elapsed_ms);
        // Bounded work per tick even after a long stall
        let steps = (self.step_ms / RAIN_STEP_MS).min(len as u32);
        self.step_ms %= RAIN_STEP_MS;

        for _ in 0..steps {
            self.levels.copy_within(1..len, 0);
            self.levels[len - 1] = if rng.gen::<u8>() < DROP_CHANCE {
                255
            } else {
                // Short tail behind the drop
                self.levels[len - 1] / 3
            };
        }
    }

    /// Background field plus the overlay
    pub fn render(
        &self,
        frame: &mut Frame,
        t_ms: u32,
        period_ms: u32,
        palette: Palette,
        glow: RGB8,
    ) {
        render_field(frame, t_ms, period_ms, palette);
        for (pixel, level) in frame.pixels_mut().iter_mut().zip(self.levels.iter()) {
            if *level > 0 {
                *pixel = blend(*pixel, glow, *level);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::color::{RAIN, SNOW};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_flakes_melt() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut snow = Precipitation::new();
        let mut seen = false;
        for _ in 0..100 {
            snow.update_snow(16, 20, &mut rng);
            seen |= (0..20).any(|i| snow.level(i) > 0);
        }
        assert!(seen);

        // Long enough for everything to melt, but new flakes may land
        for _ in 0..10 {
            snow.update_snow(255, 20, &mut rng);
        }
        assert!((0..20).filter(|i| snow.level(*i) > 0).count() <= 1);
    }

    #[test]
    fn test_rain_falls_towards_start() {
        let mut rng = SmallRng::seed_from_u64(12);
        let mut rain = Precipitation::new();
        rain.levels[5] = 200;
        rain.update_rain(RAIN_STEP_MS, 10, &mut rng);
        assert_eq!(rain.level(4), 200);
        assert_eq!(rain.level(5), 0);
    }

    #[test]
    fn test_rain_accumulates_partial_steps() {
        let mut rng = SmallRng::seed_from_u64(13);
        let mut rain = Precipitation::new();
        rain.levels[5] = 200;
        rain.update_rain(RAIN_STEP_MS / 2, 10, &mut rng);
        assert_eq!(rain.level(5), 200);
        rain.update_rain(RAIN_STEP_MS / 2, 10, &mut rng);
        assert_eq!(rain.level(4), 200);
    }

    #[test]
    fn test_clear() {
        let mut rng = SmallRng::seed_from_u64(14);
        let mut rain = Precipitation::new();
        rain.update_rain(RAIN_STEP_MS * 20, 10, &mut rng);
        rain.clear();
        assert!((0..10).all(|i| rain.level(i) == 0));
    }

    #[test]
    fn test_render_without_overlay_is_field() {
        let snow = Precipitation::new();
        let mut overlay = Frame::new(8);
        let mut field = Frame::new(8);
        snow.render(&mut overlay, 500, 4000, SNOW, FLAKE);
        render_field(&mut field, 500, 4000, SNOW);
        assert_eq!(overlay, field);

        let mut rain = Frame::new(8);
        Precipitation::new().render(&mut rain, 0, 4000, RAIN, DROP);
        assert_eq!(rain.get(0), Some(RAIN.low));
    }
}
