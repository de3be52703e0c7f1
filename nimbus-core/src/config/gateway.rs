//! Gateway configuration types

use serde::{Deserialize, Serialize};

use crate::cloud::timer::DEFAULT_FETCH_INTERVAL_MS;

/// Shortest allowed fetch interval; the weather service rate-limits below this
pub const MIN_FETCH_INTERVAL_MS: u32 = 10_000;

/// Longest golden window (3 hours)
pub const MAX_GOLDEN_WINDOW_S: u32 = 3 * 60 * 60;

/// Upper bound on the encoded size of [`GatewayConfig`]
pub const GATEWAY_CONFIG_MAX_SIZE: usize = 16;

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

/// Gateway node settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GatewayConfig {
    /// Time between weather fetches (ms)
    pub fetch_interval_ms: u32,
    /// Seconds after sunrise / before sunset a clear sky shows as golden (0 = off)
    pub golden_window_s: u32,
    /// On parse failure, resend the last good weather instead of the default
    pub hold_last_known: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            fetch_interval_ms: DEFAULT_FETCH_INTERVAL_MS,
            golden_window_s: 0,
            hold_last_known: false,
        }
    }
}

impl GatewayConfig {
    /// Check all values are in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch_interval_ms < MIN_FETCH_INTERVAL_MS {
            return Err(ConfigError::Invalid("fetch_interval_ms"));
        }
        if self.golden_window_s > MAX_GOLDEN_WINDOW_S {
            return Err(ConfigError::Invalid("golden_window_s"));
        }
        Ok(())
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
