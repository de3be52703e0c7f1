//! Command byte table
//!
//! Both nodes are built against [`COMMAND_TABLE`]; byte values are the
//! enum discriminants so the table cannot drift from the encoder.

// Wire values
pub const COMM_RGB: u8 = 1;
pub const COMM_DISCO: u8 = 2;
pub const COMM_BLUE_SKY: u8 = 3;
pub const COMM_NIGHT: u8 = 4;
pub const COMM_OVERCAST: u8 = 5;
pub const COMM_GOLDEN: u8 = 6;
pub const COMM_SNOW: u8 = 7;
pub const COMM_LIGHTNING: u8 = 8;
pub const COMM_RAIN: u8 = 9;
pub const COMM_MIST: u8 = 10;
pub const COMM_RAINBOW: u8 = 11;
pub const COMM_TWILIGHT: u8 = 12;
pub const COMM_DARK: u8 = 13;

/// Number of assigned command bytes
pub const COMMAND_COUNT: usize = 13;

/// A display mode request as sent over the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    Rgb = COMM_RGB,
    Disco = COMM_DISCO,
    BlueSky = COMM_BLUE_SKY,
    Night = COMM_NIGHT,
    Overcast = COMM_OVERCAST,
    Golden = COMM_GOLDEN,
    Snow = COMM_SNOW,
    Lightning = COMM_LIGHTNING,
    Rain = COMM_RAIN,
    Mist = COMM_MIST,
    Rainbow = COMM_RAINBOW,
    Twilight = COMM_TWILIGHT,
    Dark = COMM_DARK,
}

/// Every command, indexed by `byte - 1`
pub const COMMAND_TABLE: [Command; COMMAND_COUNT] = [
    Command::Rgb,
    Command::Disco,
    Command::BlueSky,
    Command::Night,
    Command::Overcast,
    Command::Golden,
    Command::Snow,
    Command::Lightning,
    Command::Rain,
    Command::Mist,
    Command::Rainbow,
    Command::Twilight,
    Command::Dark,
];

impl Command {
    /// Parse a command from its wire byte
    ///
    /// Returns `None` for bytes outside the table (0, 14..=255).
    pub fn from_byte(byte: u8) -> Option<Self> {
        let index = usize::from(byte).checked_sub(1)?;
        COMMAND_TABLE.get(index).copied()
    }

    /// Convert to wire byte
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Returns true for the manually selected (non-weather) modes
    pub fn is_manual(&self) -> bool {
        matches!(self, Command::Rgb | Command::Disco)
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command.to_byte()
    }
}

impl TryFrom<u8> for Command {
    type Error = u8;

    /// Fails with the rejected byte
    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Command::from_byte(byte).ok_or(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_discriminants() {
        for (index, command) in COMMAND_TABLE.iter().enumerate() {
            assert_eq!(command.to_byte() as usize, index + 1);
        }
    }

    #[test]
    fn test_command_roundtrip() {
        for byte in 1..=COMMAND_COUNT as u8 {
            let command = Command::from_byte(byte).unwrap();
            assert_eq!(command.to_byte(), byte);
        }
    }

    #[test]
    fn test_known_wire_values() {
        assert_eq!(Command::Rgb.to_byte(), 1);
        assert_eq!(Command::Night.to_byte(), 4);
        assert_eq!(Command::Snow.to_byte(), 7);
        assert_eq!(Command::Dark.to_byte(), 13);
    }

    #[test]
    fn test_unknown_byte() {
        assert!(Command::from_byte(0x00).is_none());
        assert!(Command::from_byte(14).is_none());
        assert!(Command::from_byte(0xFF).is_none());
        assert_eq!(Command::try_from(0x42), Err(0x42));
    }

    #[test]
    fn test_is_manual() {
        assert!(Command::Rgb.is_manual());
        assert!(Command::Disco.is_manual());
        assert!(!Command::Night.is_manual());
    }
}
