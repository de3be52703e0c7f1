//! Display modes carried by commands

use crate::command::Command;

/// Active rendering mode of the display node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedState {
    /// Manual slow colour cycle
    Rgb,
    /// Manual fast, full-spectrum cycle
    Disco,
    BlueSky,
    /// Twinkling star sky
    Night,
    Overcast,
    Golden,
    Snow,
    /// Random flashes over a dark field
    Lightning,
    Rain,
    Mist,
    Rainbow,
    Twilight,
    Dark,
}

/// Modes the user can force on the gateway, bypassing the weather feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ManualMode {
    Rgb,
    Disco,
}

impl From<Command> for LedState {
    fn from(command: Command) -> Self {
        match command {
            Command::Rgb => LedState::Rgb,
            Command::Disco => LedState::Disco,
            Command::BlueSky => LedState::BlueSky,
            Command::Night => LedState::Night,
            Command::Overcast => LedState::Overcast,
            Command::Golden => LedState::Golden,
            Command::Snow => LedState::Snow,
            Command::Lightning => LedState::Lightning,
            Command::Rain => LedState::Rain,
            Command::Mist => LedState::Mist,
            Command::Rainbow => LedState::Rainbow,
            Command::Twilight => LedState::Twilight,
            Command::Dark => LedState::Dark,
        }
    }
}

impl From<LedState> for Command {
    fn from(state: LedState) -> Self {
        match state {
            LedState::Rgb => Command::Rgb,
            LedState::Disco => Command::Disco,
            LedState::BlueSky => Command::BlueSky,
            LedState::Night => Command::Night,
            LedState::Overcast => Command::Overcast,
            LedState::Golden => Command::Golden,
            LedState::Snow => Command::Snow,
            LedState::Lightning => Command::Lightning,
            LedState::Rain => Command::Rain,
            LedState::Mist => Command::Mist,
            LedState::Rainbow => Command::Rainbow,
            LedState::Twilight => Command::Twilight,
            LedState::Dark => Command::Dark,
        }
    }
}

impl From<ManualMode> for Command {
    fn from(mode: ManualMode) -> Self {
        match mode {
            ManualMode::Rgb => Command::Rgb,
            ManualMode::Disco => Command::Disco,
        }
    }
}

impl From<ManualMode> for LedState {
    fn from(mode: ManualMode) -> Self {
        LedState::from(Command::from(mode))
    }
}

/// Decode a received byte into a display mode
///
/// `None` means "no mode change": the receiver must keep its current state.
pub fn decode(byte: u8) -> Option<LedState> {
    Command::from_byte(byte).map(LedState::from)
}
