//! Display node configuration

use serde::{Deserialize, Serialize};

use crate::frame::MAX_LEDS;

/// Upper bound on the encoded size of [`AnimationConfig`]
pub const ANIMATION_CONFIG_MAX_SIZE: usize = 64;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A value is out of range; names the field
    Invalid(&'static str),
    /// Serialization failed (buffer too small)
    Encode,
    /// Stored blob is corrupt or from an incompatible layout
    Decode,
}

/// Animation settings for the display node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationConfig {
    /// Number of LEDs on the strip (1..=MAX_LEDS)
    pub led_count: u16,
    /// Global brightness applied to every frame (255 = full)
    pub brightness: u8,
    /// Duration of one night twinkle phase (ms)
    pub night_phase_ms: u32,
    /// Full hue revolution in RGB mode (ms)
    pub rgb_cycle_ms: u32,
    /// Full hue revolution in disco mode (ms), shorter than `rgb_cycle_ms`
    pub disco_cycle_ms: u32,
    /// Breathing/drift period of the ambient colour fields (ms)
    pub drift_period_ms: u32,
    /// Shortest quiet gap between lightning strikes (ms)
    pub lightning_min_gap_ms: u32,
    /// Longest quiet gap between lightning strikes (ms)
    pub lightning_max_gap_ms: u32,
    /// Chance (0..=100) that a flash is followed by a quick re-strike
    pub restrike_percent: u8,
    /// Seed for the effect RNG
    pub seed: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            led_count: 30,
            brightness: 255,
            night_phase_ms: 2_000,
            rgb_cycle_ms: 20_000,
            disco_cycle_ms: 2_000,
            drift_period_ms: 8_000,
            lightning_min_gap_ms: 800,
            lightning_max_gap_ms: 6_000,
            restrike_percent: 35,
            seed: 0x5EED_C10D,
        }
    }
}

impl AnimationConfig {
    /// Check all values are in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.led_count == 0 || usize::from(self.led_count) > MAX_LEDS {
            return Err(ConfigError::Invalid("led_count"));
        }
        if self.night_phase_ms == 0 {
            return Err(ConfigError::Invalid("night_phase_ms"));
        }
        if self.rgb_cycle_ms == 0 {
            return Err(ConfigError::Invalid("rgb_cycle_ms"));
        }
        if self.disco_cycle_ms == 0 || self.disco_cycle_ms >= self.rgb_cycle_ms {
            return Err(ConfigError::Invalid("disco_cycle_ms"));
        }
        if self.drift_period_ms == 0 {
            return Err(ConfigError::Invalid("drift_period_ms"));
        }
        if self.lightning_min_gap_ms == 0 {
            return Err(ConfigError::Invalid("lightning_min_gap_ms"));
        }
        if self.lightning_max_gap_ms < self.lightning_min_gap_ms {
            return Err(ConfigError::Invalid("lightning_max_gap_ms"));
        }
        if self.restrike_percent > 100 {
            return Err(ConfigError::Invalid("restrike_percent"));
        }
        Ok(())
    }

    /// Strip length as a pixel count
    pub fn pixel_count(&self) -> usize {
        usize::from(self.led_count).min(MAX_LEDS)
    }

    /// Serialize into `buffer`, returning the used prefix
    pub fn to_slice<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buffer).map_err(|_| ConfigError::Encode)
    }

    /// Deserialize and validate a stored blob
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }
}
