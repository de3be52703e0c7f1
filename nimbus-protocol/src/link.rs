//! Byte link helpers
//!
//! Thin wrappers over `embedded-io` so both nodes push and pull command
//! bytes the same way, whatever UART driver the board provides.

use embedded_io::{Read, ReadReady, Write};

use crate::command::Command;

/// Errors from the underlying serial link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Transmit failed
    Write,
    /// Receive failed
    Read,
}

/// Transmit one command byte and flush it out
pub fn send<W: Write>(link: &mut W, command: Command) -> Result<(), LinkError> {
    link.write_all(&[command.to_byte()])
        .map_err(|_| LinkError::Write)?;
    link.flush().map_err(|_| LinkError::Write)
}

/// Poll for one received byte without blocking
///
/// Returns `Ok(None)` when nothing is waiting. The byte is returned raw;
/// use [`crate::decode`] to interpret it.
pub fn receive<R: Read + ReadReady>(link: &mut R) -> Result<Option<u8>, LinkError> {
    if !link.read_ready().map_err(|_| LinkError::Read)? {
        return Ok(None);
    }

    let mut byte = [0u8; 1];
    match link.read(&mut byte).map_err(|_| LinkError::Read)? {
        0 => Ok(None),
        _ => Ok(Some(byte[0])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_io::{ErrorKind, ErrorType};

    /// In-memory wire: writes append, reads consume from the front
    struct Wire {
        buf: [u8; 8],
        len: usize,
        pos: usize,
        broken: bool,
    }

    impl Wire {
        fn new() -> Self {
            Self {
                buf: [0; 8],
                len: 0,
                pos: 0,
                broken: false,
            }
        }
    }

    impl ErrorType for Wire {
        type Error = ErrorKind;
    }

    impl Write for Wire {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            if self.broken {
                return Err(ErrorKind::BrokenPipe);
            }
            let n = buf.len().min(self.buf.len() - self.len);
            self.buf[self.len..self.len + n].copy_from_slice(&buf[..n]);
            self.len += n;
            Ok(n)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    impl Read for Wire {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            if self.broken {
                return Err(ErrorKind::BrokenPipe);
            }
            let n = buf.len().min(self.len - self.pos);
            buf[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    impl ReadReady for Wire {
        fn read_ready(&mut self) -> Result<bool, Self::Error> {
            Ok(self.broken || self.pos < self.len)
        }
    }

    #[test]
    fn test_send_then_receive() {
        let mut wire = Wire::new();
        send(&mut wire, Command::Snow).unwrap();
        send(&mut wire, Command::Night).unwrap();

        assert_eq!(receive(&mut wire), Ok(Some(7)));
        assert_eq!(receive(&mut wire), Ok(Some(4)));
        assert_eq!(receive(&mut wire), Ok(None));
    }

    #[test]
    fn test_errors_mapped() {
        let mut wire = Wire::new();
        wire.broken = true;
        assert_eq!(send(&mut wire, Command::Rgb), Err(LinkError::Write));
        assert_eq!(receive(&mut wire), Err(LinkError::Read));
    }
}
