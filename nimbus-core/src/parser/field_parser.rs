//! Streaming field extractor
//!
//! A finite state machine over [`ParserState`]. Each call to
//! [`StreamingFieldParser::feed`] consumes one byte and returns immediately,
//! so the gateway loop can interleave parsing with its other duties while
//! the payload trickles in.
//!
//! Recognised payload shape (the current-weather JSON document):
//!
//! ```text
//! ..."main":"Clear"... "dt":1560350645 ... "sunrise":1560343627 ... "sunset":1560396563...
//! ```
//!
//! Everything else in the stream is ignored.

use heapless::Vec;

use super::key::{KeyMatcher, KeyStep, CONDITION_KEY, DT_KEY, SUNRISE_KEY, SUNSET_KEY};
use super::state::{Field, ParseError, ParseOutcome, ParserState};
use crate::weather::{classify, daylight, SolarTimes, WeatherType};

/// Maximum stored condition token length
///
/// Longer tokens are truncated and classify as `Unknown`.
pub const TOKEN_CAPACITY: usize = 16;

/// Per-pass accumulator, reset at the start of every payload
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Field currently being scanned
    pub state: ParserState,
    /// Condition token bytes
    pub token: Vec<u8, TOKEN_CAPACITY>,
    /// Token exceeded `TOKEN_CAPACITY`
    pub token_truncated: bool,
    /// Captured timestamps
    pub times: SolarTimes,
    /// Key matcher for the current field
    matcher: KeyMatcher,
    /// Digits of the numeric field in progress, if any
    number: Option<u32>,
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseContext {
    /// Create an empty context positioned at `Start`
    pub fn new() -> Self {
        Self {
            state: ParserState::Start,
            token: Vec::new(),
            token_truncated: false,
            times: SolarTimes::default(),
            matcher: KeyMatcher::new(CONDITION_KEY),
            number: None,
        }
    }

    /// Condition token as text, if it is valid UTF-8
    pub fn token(&self) -> Option<&str> {
        core::str::from_utf8(&self.token).ok()
    }
}

fn key_for(state: ParserState) -> &'static [u8] {
    match state {
        ParserState::Start | ParserState::Weather => CONDITION_KEY,
        ParserState::Dt => DT_KEY,
        ParserState::Sunrise => SUNRISE_KEY,
        ParserState::Sunset => SUNSET_KEY,
    }
}

fn digit(byte: u8) -> Option<u32> {
    byte.is_ascii_digit().then(|| u32::from(byte - b'0'))
}

/// One-pass extractor for the weather payload
#[derive(Debug, Clone)]
pub struct StreamingFieldParser {
    ctx: ParseContext,
    /// Golden hour window in seconds (0 disables)
    golden_window_s: u32,
    /// Terminal outcome, repeated until `reset`
    latched: Option<ParseOutcome>,
}

impl Default for StreamingFieldParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingFieldParser {
    /// Create a parser with the golden hour disabled
    pub fn new() -> Self {
        Self::with_golden_window(0)
    }

    /// Create a parser that classifies clear skies near sunrise/sunset as golden
    pub fn with_golden_window(golden_window_s: u32) -> Self {
        Self {
            ctx: ParseContext::new(),
            golden_window_s,
            latched: None,
        }
    }

    /// Reset for a new payload
    pub fn reset(&mut self) {
        self.ctx = ParseContext::new();
        self.latched = None;
    }

    /// Current parser state
    pub fn state(&self) -> ParserState {
        self.ctx.state
    }

    /// Accumulated context (token and timestamps captured so far)
    pub fn context(&self) -> &ParseContext {
        &self.ctx
    }

    /// Terminal outcome of this pass, if reached
    pub fn outcome(&self) -> Option<ParseOutcome> {
        self.latched
    }

    /// Feed a single byte
    pub fn feed(&mut self, byte: u8) -> ParseOutcome {
        if let Some(outcome) = self.latched {
            return outcome;
        }

        let outcome = match self.ctx.state {
            ParserState::Start => self.scan_condition_key(byte),
            ParserState::Weather => self.accumulate_token(byte),
            ParserState::Dt | ParserState::Sunrise | ParserState::Sunset => {
                self.scan_number(byte)
            }
        };

        if outcome.is_terminal() {
            self.latched = Some(outcome);
        }
        outcome
    }

    /// Feed multiple bytes
    ///
    /// Stops at the first terminal outcome; otherwise returns the outcome of
    /// the last byte (or `InProgress` for an empty slice).
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> ParseOutcome {
        let mut outcome = self.latched.unwrap_or(ParseOutcome::InProgress);
        for &byte in bytes {
            outcome = self.feed(byte);
            if outcome.is_terminal() {
                break;
            }
        }
        outcome
    }

    /// Signal end of stream
    ///
    /// Anything short of a terminated sunset value fails with
    /// [`ParseError::Truncated`]. Digits cut off by the end of the stream do
    /// not count as a complete field.
    pub fn finish(&mut self) -> ParseOutcome {
        if let Some(outcome) = self.latched {
            return outcome;
        }

        warn!("payload truncated in {:?}", self.ctx.state);
        let outcome = ParseOutcome::Failed(ParseError::Truncated);
        self.latched = Some(outcome);
        outcome
    }

    fn advance(&mut self) {
        if let Some(next) = self.ctx.state.next() {
            self.ctx.state = next;
            self.ctx.matcher = KeyMatcher::new(key_for(next));
        }
    }

    fn scan_condition_key(&mut self, byte: u8) -> ParseOutcome {
        if let KeyStep::ValueStart(first) = self.ctx.matcher.feed(byte) {
            if first == b'"' {
                self.advance();
            } else {
                // "main" with a non-string value, e.g. the temperature block
                self.ctx.matcher.restart(first);
            }
        }
        ParseOutcome::InProgress
    }

    fn accumulate_token(&mut self, byte: u8) -> ParseOutcome {
        if byte == b'"' {
            debug!("condition token complete, truncated={}", self.ctx.token_truncated);
            self.advance();
            return ParseOutcome::FieldComplete(Field::Weather);
        }

        if self.ctx.token.push(byte).is_err() {
            self.ctx.token_truncated = true;
        }
        ParseOutcome::InProgress
    }

    fn scan_number(&mut self, byte: u8) -> ParseOutcome {
        match self.ctx.number {
            None => {
                if let KeyStep::ValueStart(first) = self.ctx.matcher.feed(byte) {
                    match digit(first) {
                        Some(d) => self.ctx.number = Some(d),
                        None => self.ctx.matcher.restart(first),
                    }
                }
                ParseOutcome::InProgress
            }
            Some(value) => match digit(byte) {
                Some(d) => match value.checked_mul(10).and_then(|v| v.checked_add(d)) {
                    Some(next) => {
                        self.ctx.number = Some(next);
                        ParseOutcome::InProgress
                    }
                    None => {
                        warn!("timestamp overflow in {:?}", self.ctx.state);
                        ParseOutcome::Failed(ParseError::NumberOverflow)
                    }
                },
                None => {
                    let outcome = self.store_number(value);
                    // The terminator may open the next key
                    self.ctx.matcher.restart(byte);
                    outcome
                }
            },
        }
    }

    fn store_number(&mut self, value: u32) -> ParseOutcome {
        self.ctx.number = None;
        let field = match self.ctx.state {
            ParserState::Dt => {
                self.ctx.times.dt = Some(value);
                Field::Dt
            }
            ParserState::Sunrise => {
                self.ctx.times.sunrise = Some(value);
                Field::Sunrise
            }
            _ => {
                self.ctx.times.sunset = Some(value);
                return self.complete();
            }
        };

        trace!("{:?} = {}", field, value);
        self.advance();
        ParseOutcome::FieldComplete(field)
    }

    fn complete(&mut self) -> ParseOutcome {
        let daylight = match daylight(&self.ctx.times, self.golden_window_s) {
            Ok(daylight) => daylight,
            Err(e) => {
                warn!("rejecting timestamps: {:?}", e);
                return ParseOutcome::Failed(ParseError::InvalidTiming);
            }
        };

        let weather = match (self.ctx.token_truncated, self.ctx.token()) {
            (false, Some(token)) => classify(token, daylight),
            _ => WeatherType::Unknown,
        };

        debug!("parse complete: {:?} ({:?})", weather, daylight);
        ParseOutcome::Done(weather)
    }
}
