//! Thunderstorm flashes
//!
//! Quiet dark field with flashes of random length and brightness lighting a
//! random stretch of the strip. After each flash the storm may re-strike
//! almost immediately, so the rhythm never settles into a cycle.

use rand::Rng;
use smart_leds::RGB8;

use crate::frame::{scale, Frame};

/// Storm background
pub const STORM: RGB8 = RGB8 { r: 3, g: 3, b: 10 };

/// Flash colour at full intensity
pub const FLASH: RGB8 = RGB8 {
    r: 225,
    g: 225,
    b: 255,
};

const FLASH_MIN_MS: u32 = 40;
const FLASH_MAX_MS: u32 = 140;
const RESTRIKE_MIN_MS: u32 = 50;
const RESTRIKE_MAX_MS: u32 = 200;

/// Lightning effect phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Strike {
    /// Dark, waiting for the next flash
    Idle { remaining_ms: u32 },
    /// Flash lighting `len` pixels starting at `start`
    Flash {
        remaining_ms: u32,
        intensity: u8,
        start: u16,
        len: u16,
    },
}

/// Lightning effect state
#[derive(Debug, Clone)]
pub struct LightningStorm {
    strike: Strike,
    min_gap_ms: u32,
    max_gap_ms: u32,
    restrike_percent: u8,
}

impl LightningStorm {
    pub fn new(min_gap_ms: u32, max_gap_ms: u32, restrike_percent: u8) -> Self {
        Self {
            strike: Strike::Idle {
                remaining_ms: min_gap_ms,
            },
            min_gap_ms,
            max_gap_ms: max_gap_ms.max(min_gap_ms),
            restrike_percent: restrike_percent.min(100),
        }
    }

    pub fn strike(&self) -> Strike {
        self.strike
    }

    pub fn is_flashing(&self) -> bool {
        matches!(self.strike, Strike::Flash { .. })
    }

    /// Go dark and wait a random gap
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.strike = Strike::Idle {
            remaining_ms: self.gap(rng),
        };
    }

    /// Advance time by `elapsed_ms`
    pub fn update<R: Rng>(&mut self, elapsed_ms: u32, len: usize, rng: &mut R) {
        self.strike = match self.strike {
            Strike::Idle { remaining_ms } if remaining_ms > elapsed_ms => Strike::Idle {
                remaining_ms: remaining_ms - elapsed_ms,
            },
            Strike::Idle { .. } => self.flash(len, rng),
            Strike::Flash {
                remaining_ms,
                intensity,
                start,
                len,
            } if remaining_ms > elapsed_ms => Strike::Flash {
                remaining_ms: remaining_ms - elapsed_ms,
                intensity,
                start,
                len,
            },
            Strike::Flash { .. } => {
                let remaining_ms = if rng.gen_range(0..100u8) < self.restrike_percent {
                    trace!("lightning restrike");
                    rng.gen_range(RESTRIKE_MIN_MS..=RESTRIKE_MAX_MS)
                } else {
                    self.gap(rng)
                };
                Strike::Idle { remaining_ms }
            }
        };
    }

    /// Draw the storm into `frame`
    pub fn render(&self, frame: &mut Frame) {
        frame.fill(STORM);

        if let Strike::Flash {
            intensity,
            start,
            len,
            ..
        } = self.strike
        {
            let start = usize::from(start);
            let end = start + usize::from(len);
            let lit = scale(FLASH, intensity);
            for (i, pixel) in frame.pixels_mut().iter_mut().enumerate() {
                if i >= start && i < end {
                    *pixel = lit;
                }
            }
        }
    }

    fn gap<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min_gap_ms..=self.max_gap_ms)
    }

    fn flash<R: Rng>(&self, len: usize, rng: &mut R) -> Strike {
        let len = len.max(1);
        let start = rng.gen_range(0..len);
        let span = rng.gen_range(1..=len - start);
        let intensity = rng.gen_range(140..=255u8);
        trace!("lightning strike at {} x{}", start, span);

        Strike::Flash {
            remaining_ms: rng.gen_range(FLASH_MIN_MS..=FLASH_MAX_MS),
            intensity,
            start: start as u16,
            len: span as u16,
        }
    }
}
