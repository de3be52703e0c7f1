//! Re-fetch timer
//!
//! Accumulates loop time and reports when the next weather fetch is due.

/// Default time between weather fetches (10 minutes)
pub const DEFAULT_FETCH_INTERVAL_MS: u32 = 10 * 60 * 1000;

/// Periodic fetch timer
#[derive(Debug, Clone)]
pub struct FetchTimer {
    interval_ms: u32,
    /// Time since the last fetch (ms)
    elapsed_ms: u32,
    /// Fetch requested regardless of elapsed time
    forced: bool,
}

impl Default for FetchTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_INTERVAL_MS)
    }
}

impl FetchTimer {
    /// Create a timer; the first fetch is due immediately
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0,
            forced: true,
        }
    }

    /// Update time tracking
    ///
    /// # Arguments
    /// - `delta_ms`: Time elapsed since last update
    pub fn update_time(&mut self, delta_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
    }

    /// Check whether a fetch is due
    pub fn is_due(&self) -> bool {
        self.forced || self.interval_elapsed()
    }

    /// Check whether a full interval has passed since the last fetch started
    pub fn interval_elapsed(&self) -> bool {
        self.elapsed_ms >= self.interval_ms
    }

    /// Request a fetch on the next check
    pub fn force(&mut self) {
        self.forced = true;
    }

    /// Record that a fetch has started
    pub fn mark_fetched(&mut self) {
        self.elapsed_ms = 0;
        self.forced = false;
    }

    /// Time until the next scheduled fetch (ms)
    pub fn remaining_ms(&self) -> u32 {
        if self.forced {
            0
        } else {
            self.interval_ms.saturating_sub(self.elapsed_ms)
        }
    }
}
