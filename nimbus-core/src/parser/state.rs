//! Parser states and outcomes

use crate::weather::WeatherType;

/// Which payload field is currently being scanned
///
/// Transitions only move forward within one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParserState {
    /// Looking for the condition field
    Start,
    /// Accumulating the condition token
    Weather,
    Dt,
    Sunrise,
    Sunset,
}

impl ParserState {
    /// The state that follows this one, `None` after `Sunset`
    pub fn next(self) -> Option<Self> {
        match self {
            ParserState::Start => Some(ParserState::Weather),
            ParserState::Weather => Some(ParserState::Dt),
            ParserState::Dt => Some(ParserState::Sunrise),
            ParserState::Sunrise => Some(ParserState::Sunset),
            ParserState::Sunset => None,
        }
    }
}

/// Payload fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Weather,
    Dt,
    Sunrise,
    Sunset,
}

/// Why a parse pass failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Stream ended before every field was captured
    Truncated,
    /// A timestamp did not fit in 32 bits
    NumberOverflow,
    /// Timestamps unset or sunrise not before sunset
    InvalidTiming,
}

/// Result of feeding one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseOutcome {
    /// Need more bytes
    InProgress,
    /// A field was captured with this byte
    FieldComplete(Field),
    /// All fields captured and classified
    Done(WeatherType),
    /// Pass failed; the caller treats this as `WeatherType::Error`
    Failed(ParseError),
}

impl ParseOutcome {
    /// Check if the pass has ended, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(self, ParseOutcome::Done(_) | ParseOutcome::Failed(_))
    }

    /// Collapse a terminal outcome to a weather type
    ///
    /// Failures become `WeatherType::Error`; non-terminal outcomes give `None`.
    pub fn weather(&self) -> Option<WeatherType> {
        match self {
            ParseOutcome::Done(weather) => Some(*weather),
            ParseOutcome::Failed(_) => Some(WeatherType::Error),
            _ => None,
        }
    }
}
