//! Weather type definitions

use nimbus_protocol::Command;

/// Outcome of one parse cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WeatherType {
    /// Parse failed; never a real reading
    Error,
    BlueSky,
    Night,
    Overcast,
    Golden,
    Snow,
    Lightning,
    Rain,
    Mist,
    Rainbow,
    Twilight,
    Dark,
    /// Condition token not in the vocabulary
    Unknown,
}

impl WeatherType {
    /// Check if this is a sentinel rather than an actual reading
    pub fn is_sentinel(&self) -> bool {
        matches!(self, WeatherType::Error | WeatherType::Unknown)
    }
}

impl From<WeatherType> for Command {
    /// Total mapping; sentinels collapse to the blue sky default
    fn from(weather: WeatherType) -> Self {
        match weather {
            WeatherType::Error | WeatherType::Unknown => Command::BlueSky,
            WeatherType::BlueSky => Command::BlueSky,
            WeatherType::Night => Command::Night,
            WeatherType::Overcast => Command::Overcast,
            WeatherType::Golden => Command::Golden,
            WeatherType::Snow => Command::Snow,
            WeatherType::Lightning => Command::Lightning,
            WeatherType::Rain => Command::Rain,
            WeatherType::Mist => Command::Mist,
            WeatherType::Rainbow => Command::Rainbow,
            WeatherType::Twilight => Command::Twilight,
            WeatherType::Dark => Command::Dark,
        }
    }
}
