//! Night sky twinkle
//!
//! Two interleaved star subsets over a dark-blue field. The sky walks through
//! seven phases, each igniting or fading part of the stars, then starts over
//! with freshly placed subsets.
//!
//! ```text
//! Night0: sky only
//! Night1: A ignites
//! Night2: B ignites
//! Night3: A and B full
//! Night4: A dims to half
//! Night5: A recovers, B fades
//! Night6: A fades
//! ```

use rand::Rng;
use smart_leds::RGB8;

use crate::frame::{blend, Frame};

/// Sky background
pub const SKY: RGB8 = RGB8 { r: 0, g: 2, b: 14 };

/// Fully lit star
pub const STAR: RGB8 = RGB8 {
    r: 255,
    g: 240,
    b: 190,
};

/// One star in this many pixels belongs to each subset
pub const STAR_SPACING: usize = 5;

/// Twinkle phase within the night effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NightState {
    #[default]
    Night0,
    Night1,
    Night2,
    Night3,
    Night4,
    Night5,
    Night6,
}

impl NightState {
    /// Following phase, wrapping after `Night6`
    pub fn next(self) -> Self {
        match self {
            NightState::Night0 => NightState::Night1,
            NightState::Night1 => NightState::Night2,
            NightState::Night2 => NightState::Night3,
            NightState::Night3 => NightState::Night4,
            NightState::Night4 => NightState::Night5,
            NightState::Night5 => NightState::Night6,
            NightState::Night6 => NightState::Night0,
        }
    }

    /// Star levels `(a, b)` at `progress` (0..=255) through this phase
    fn levels(self, progress: u8) -> (u8, u8) {
        let p = progress;
        match self {
            NightState::Night0 => (0, 0),
            NightState::Night1 => (p, 0),
            NightState::Night2 => (255, p),
            NightState::Night3 => (255, 255),
            NightState::Night4 => (255 - p / 2, 255),
            NightState::Night5 => (128 + p / 2, 255 - p),
            NightState::Night6 => (255 - p, 0),
        }
    }
}

/// Night effect state
#[derive(Debug, Clone)]
pub struct NightSky {
    state: NightState,
    /// Time spent in the current phase
    phase_ms: u32,
    phase_duration_ms: u32,
    offset_a: usize,
    offset_b: usize,
}

impl NightSky {
    pub fn new(phase_duration_ms: u32) -> Self {
        Self {
            state: NightState::Night0,
            phase_ms: 0,
            phase_duration_ms: phase_duration_ms.max(1),
            offset_a: 0,
            offset_b: STAR_SPACING / 2,
        }
    }

    /// Current phase
    pub fn state(&self) -> NightState {
        self.state
    }

    /// Restart at `Night0` with new star subsets
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.state = NightState::Night0;
        self.phase_ms = 0;
        self.place_stars(rng);
    }

    /// Advance time; moves at most one phase per call
    ///
    /// Returns true if the phase changed.
    pub fn advance<R: Rng>(&mut self, elapsed_ms: u32, rng: &mut R) -> bool {
        self.phase_ms = self.phase_ms.saturating_add(elapsed_ms);
        if self.phase_ms < self.phase_duration_ms {
            return false;
        }

        // Carry the overshoot, but never enough to skip the next phase
        self.phase_ms = (self.phase_ms - self.phase_duration_ms).min(self.phase_duration_ms - 1);
        self.state = self.state.next();
        trace!("night phase {:?}", self.state);

        if self.state == NightState::Night0 {
            self.place_stars(rng);
        }
        true
    }

    /// Draw the sky into `frame`
    pub fn render(&self, frame: &mut Frame) {
        let progress = ((u64::from(self.phase_ms) * 256) / u64::from(self.phase_duration_ms))
            .min(255) as u8;
        let (level_a, level_b) = self.state.levels(progress);

        for (i, pixel) in frame.pixels_mut().iter_mut().enumerate() {
            let slot = (i + self.offset_a) % STAR_SPACING;
            let slot_b = (i + self.offset_b) % STAR_SPACING;
            *pixel = if slot == 0 {
                blend(SKY, STAR, level_a)
            } else if slot_b == 0 {
                blend(SKY, STAR, level_b)
            } else {
                SKY
            };
        }
    }

    fn place_stars<R: Rng>(&mut self, rng: &mut R) {
        self.offset_a = rng.gen_range(0..STAR_SPACING);
        // Keep B off A's pixels
        self.offset_b = (self.offset_a + rng.gen_range(1..STAR_SPACING)) % STAR_SPACING;
    }
}
