//! Cloud state machine definition

use nimbus_protocol::{Command, ManualMode};

use super::events::CloudEvent;

/// Gateway display source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CloudState {
    /// Display follows the weather feed
    #[default]
    Weather,
    /// Manual slow colour cycle
    Rgb,
    /// Manual disco
    Disco,
}

impl CloudState {
    /// Check if the weather parser runs in this state
    pub fn parses_weather(&self) -> bool {
        matches!(self, CloudState::Weather)
    }

    /// Manual mode for the override states
    pub fn manual_mode(&self) -> Option<ManualMode> {
        match self {
            CloudState::Weather => None,
            CloudState::Rgb => Some(ManualMode::Rgb),
            CloudState::Disco => Some(ManualMode::Disco),
        }
    }

    /// Command sent on entry, if the state fixes one
    pub fn entry_command(&self) -> Option<Command> {
        self.manual_mode().map(Command::from)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: CloudEvent) -> Self {
        use CloudEvent::*;
        use CloudState::*;

        match (self, event) {
            (_, ManualRgb) => Rgb,
            (_, ManualDisco) => Disco,
            (Rgb | Disco, ResumeWeather) => Weather,
            (Weather, FetchDue) => Weather,

            // Default: stay in current state
            _ => self,
        }
    }
}
