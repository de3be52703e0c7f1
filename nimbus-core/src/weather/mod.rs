//! Weather classification
//!
//! Turns a condition token plus the solar timing fields into the closed
//! [`WeatherType`] set the display understands.

pub mod classifier;
pub mod daylight;
pub mod types;

pub use classifier::{classify, Condition};
pub use daylight::{daylight, is_night, Daylight, SolarTimes, TimingError};
pub use types::WeatherType;
