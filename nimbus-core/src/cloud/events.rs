//! Events that trigger cloud state transitions

/// Events fed to the gateway state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CloudEvent {
    /// User forced the slow colour cycle
    ManualRgb,
    /// User forced disco mode
    ManualDisco,
    /// User handed control back to the weather feed
    ResumeWeather,
    /// Fetch requested ahead of the timer (button, network came back)
    FetchDue,
}

impl CloudEvent {
    /// Check if this event selects a manual override
    pub fn is_manual_override(&self) -> bool {
        matches!(self, CloudEvent::ManualRgb | CloudEvent::ManualDisco)
    }
}
