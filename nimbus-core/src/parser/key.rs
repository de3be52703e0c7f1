//! Incremental key matcher
//!
//! Recognises `"key"` followed by optional whitespace, `:` and optional
//! whitespace, one byte at a time. The first byte after that is handed back
//! to the caller as the start of the value.

/// Key of the condition token (`"main":"Clear"`)
pub const CONDITION_KEY: &[u8] = b"\"main\"";
/// Key of the current timestamp
pub const DT_KEY: &[u8] = b"\"dt\"";
pub const SUNRISE_KEY: &[u8] = b"\"sunrise\"";
pub const SUNSET_KEY: &[u8] = b"\"sunset\"";

/// Result of feeding one byte to a [`KeyMatcher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStep {
    /// Key not (yet) recognised
    Searching,
    /// Key and separator seen; this byte starts the value
    ValueStart(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Number of key bytes matched so far
    Matching(usize),
    /// Full key seen, waiting for `:`
    AwaitColon,
    /// Colon seen, skipping whitespace
    AwaitValue,
}

/// Matcher for one quoted key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMatcher {
    key: &'static [u8],
    phase: Phase,
}

fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

impl KeyMatcher {
    /// Create a matcher for `key` (including its quotes)
    pub const fn new(key: &'static [u8]) -> Self {
        Self {
            key,
            phase: Phase::Matching(0),
        }
    }

    /// Forget any partial match
    pub fn reset(&mut self) {
        self.phase = Phase::Matching(0);
    }

    /// Drop the current match and rescan `byte` as a possible key start
    ///
    /// Used when the value that followed the key had the wrong shape.
    pub fn restart(&mut self, byte: u8) {
        self.reset();
        let _ = self.feed(byte);
    }

    /// Feed a single byte
    pub fn feed(&mut self, byte: u8) -> KeyStep {
        match self.phase {
            Phase::Matching(matched) => {
                if self.key.get(matched) == Some(&byte) {
                    let matched = matched + 1;
                    self.phase = if matched == self.key.len() {
                        Phase::AwaitColon
                    } else {
                        Phase::Matching(matched)
                    };
                } else {
                    // Keys only contain their opening byte at the ends,
                    // so a mismatch can only restart on this byte
                    self.phase = Phase::Matching(usize::from(self.key.first() == Some(&byte)));
                }
                KeyStep::Searching
            }
            Phase::AwaitColon => {
                if byte == b':' {
                    self.phase = Phase::AwaitValue;
                } else if !is_space(byte) {
                    // The key was a value, not a key
                    self.restart(byte);
                }
                KeyStep::Searching
            }
            Phase::AwaitValue => {
                if is_space(byte) {
                    return KeyStep::Searching;
                }
                self.reset();
                KeyStep::ValueStart(byte)
            }
        }
    }
}
