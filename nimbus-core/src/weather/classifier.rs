//! Condition token → weather type
//!
//! Tokens with a fixed meaning win outright. Only the clear/cloud family
//! depends on the time of day.

use super::daylight::Daylight;
use super::types::WeatherType;

/// Parsed condition token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Condition {
    /// Clear sky: blue sky, golden or night depending on the hour
    Clear,
    /// Cloud cover: overcast by day, twilight by night
    Clouds,
    /// Classification independent of the time of day
    Fixed(WeatherType),
    /// Token not in the vocabulary
    Unrecognized,
}

/// Known condition tokens (matched ASCII case-insensitively)
const VOCABULARY: &[(&str, Condition)] = &[
    ("Clear", Condition::Clear),
    ("Clouds", Condition::Clouds),
    ("Thunderstorm", Condition::Fixed(WeatherType::Lightning)),
    ("Lightning", Condition::Fixed(WeatherType::Lightning)),
    ("Snow", Condition::Fixed(WeatherType::Snow)),
    ("Rain", Condition::Fixed(WeatherType::Rain)),
    ("Drizzle", Condition::Fixed(WeatherType::Rain)),
    ("Mist", Condition::Fixed(WeatherType::Mist)),
    ("Fog", Condition::Fixed(WeatherType::Mist)),
    ("Haze", Condition::Fixed(WeatherType::Mist)),
    ("Rainbow", Condition::Fixed(WeatherType::Rainbow)),
    ("Smoke", Condition::Fixed(WeatherType::Dark)),
    ("Dust", Condition::Fixed(WeatherType::Dark)),
    ("Sand", Condition::Fixed(WeatherType::Dark)),
    ("Ash", Condition::Fixed(WeatherType::Dark)),
    ("Squall", Condition::Fixed(WeatherType::Dark)),
    ("Tornado", Condition::Fixed(WeatherType::Dark)),
];

impl Condition {
    /// Look up a condition token
    pub fn from_token(token: &str) -> Self {
        VOCABULARY
            .iter()
            .find(|(word, _)| word.eq_ignore_ascii_case(token))
            .map(|&(_, condition)| condition)
            .unwrap_or(Condition::Unrecognized)
    }

    /// Resolve against the time of day
    pub fn resolve(self, daylight: Daylight) -> WeatherType {
        match (self, daylight) {
            (Condition::Fixed(weather), _) => weather,
            (Condition::Clear, Daylight::Day) => WeatherType::BlueSky,
            (Condition::Clear, Daylight::GoldenHour) => WeatherType::Golden,
            (Condition::Clear, Daylight::Night) => WeatherType::Night,
            (Condition::Clouds, Daylight::Day | Daylight::GoldenHour) => WeatherType::Overcast,
            (Condition::Clouds, Daylight::Night) => WeatherType::Twilight,
            (Condition::Unrecognized, _) => WeatherType::Unknown,
        }
    }
}

/// Classify a condition token for the given time of day
pub fn classify(token: &str, daylight: Daylight) -> WeatherType {
    Condition::from_token(token).resolve(daylight)
}
