//! Display poll-loop driver
//!
//! Drains whatever command bytes are waiting on the link, ticks the engine
//! and pushes the frame to the strip. Called once per frame by the board.

use embedded_io::{Read, ReadReady};
use nimbus_protocol::{receive, LinkError};
use smart_leds::{SmartLedsWrite, RGB8};

use crate::config::AnimationConfig;
use crate::engine::AnimationEngine;

/// Upper bound on bytes consumed per poll, keeping frame time bounded
pub const MAX_BYTES_PER_POLL: usize = 8;

/// Display node errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Reading the command link failed
    Link(LinkError),
    /// The LED driver rejected the frame
    Driver,
}

impl From<LinkError> for DisplayError {
    fn from(e: LinkError) -> Self {
        DisplayError::Link(e)
    }
}

/// Display node: command link, engine and LED driver
pub struct DisplayNode<R, D> {
    engine: AnimationEngine,
    link: R,
    driver: D,
}

impl<R, D> DisplayNode<R, D>
where
    R: Read + ReadReady,
    D: SmartLedsWrite<Color = RGB8>,
{
    pub fn new(config: AnimationConfig, link: R, driver: D) -> Self {
        Self {
            engine: AnimationEngine::new(config),
            link,
            driver,
        }
    }

    /// Get access to the engine
    pub fn engine(&self) -> &AnimationEngine {
        &self.engine
    }

    /// Get mutable access to the engine (manual hue, direct commands)
    pub fn engine_mut(&mut self) -> &mut AnimationEngine {
        &mut self.engine
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Apply pending commands and render one frame
    ///
    /// A link error is returned after the frame is still rendered, so the
    /// strip keeps animating while the board decides what to do.
    pub fn poll(&mut self, elapsed_ms: u32) -> Result<(), DisplayError> {
        let received = self.drain();

        let frame = self.engine.tick(elapsed_ms);
        self.driver
            .write(frame.pixels().iter().copied())
            .map_err(|_| DisplayError::Driver)?;

        received.map_err(DisplayError::from)
    }

    fn drain(&mut self) -> Result<(), LinkError> {
        for _ in 0..MAX_BYTES_PER_POLL {
            match receive(&mut self.link) {
                Ok(Some(byte)) => {
                    trace!("rx {}", byte);
                    self.engine.on_byte(byte);
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("link read failed: {:?}", e);
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::NightState;
    use embedded_io::{ErrorKind, ErrorType};
    use nimbus_protocol::LedState;

    /// Bytes waiting on the wire
    struct Rx {
        bytes: heapless::Deque<u8, 32>,
        broken: bool,
    }

    impl Rx {
        fn with(bytes: &[u8]) -> Self {
            let mut rx = Rx {
                bytes: heapless::Deque::new(),
                broken: false,
            };
            for b in bytes {
                rx.bytes.push_back(*b).unwrap();
            }
            rx
        }
    }

    impl ErrorType for Rx {
        type Error = ErrorKind;
    }

    impl Read for Rx {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            if self.broken {
                return Err(ErrorKind::Other);
            }
            match self.bytes.pop_front() {
                Some(b) if !buf.is_empty() => {
                    buf[0] = b;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    impl ReadReady for Rx {
        fn read_ready(&mut self) -> Result<bool, Self::Error> {
            if self.broken {
                return Err(ErrorKind::Other);
            }
            Ok(!self.bytes.is_empty())
        }
    }

    /// LED strip that remembers the last frame
    #[derive(Default)]
    struct Strip {
        last: heapless::Vec<RGB8, 64>,
        writes: usize,
        fail: bool,
    }

    impl SmartLedsWrite for Strip {
        type Error = ();
        type Color = RGB8;

        fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
        where
            T: IntoIterator<Item = I>,
            I: Into<Self::Color>,
        {
            if self.fail {
                return Err(());
            }
            self.last.clear();
            for color in iterator {
                self.last.push(color.into()).map_err(|_| ())?;
            }
            self.writes += 1;
            Ok(())
        }
    }

    fn config() -> AnimationConfig {
        AnimationConfig {
            led_count: 12,
            ..Default::default()
        }
    }

    #[test]
    fn test_command_applied_and_frame_written() {
        let mut node = DisplayNode::new(config(), Rx::with(&[4]), Strip::default());
        assert_eq!(node.poll(16), Ok(()));
        assert_eq!(node.engine().state(), LedState::Night);
        assert_eq!(node.engine().night_state(), NightState::Night0);
        assert_eq!(node.driver().writes, 1);
        assert_eq!(node.driver().last.len(), 12);
    }

    #[test]
    fn test_garbage_bytes_skipped() {
        let mut node = DisplayNode::new(config(), Rx::with(&[7, 0, 200, 14]), Strip::default());
        assert_eq!(node.poll(16), Ok(()));
        assert_eq!(node.engine().state(), LedState::Snow);
    }

    #[test]
    fn test_last_command_wins() {
        let mut node = DisplayNode::new(config(), Rx::with(&[7, 8, 2]), Strip::default());
        node.poll(16).unwrap();
        assert_eq!(node.engine().state(), LedState::Disco);
    }

    #[test]
    fn test_bounded_bytes_per_poll() {
        let mut bytes = [3u8; MAX_BYTES_PER_POLL + 1];
        bytes[MAX_BYTES_PER_POLL] = 5;
        let mut node = DisplayNode::new(config(), Rx::with(&bytes), Strip::default());

        node.poll(16).unwrap();
        assert_eq!(node.engine().state(), LedState::BlueSky);
        node.poll(16).unwrap();
        assert_eq!(node.engine().state(), LedState::Overcast);
    }

    #[test]
    fn test_link_error_still_renders() {
        let mut rx = Rx::with(&[]);
        rx.broken = true;
        let mut node = DisplayNode::new(config(), rx, Strip::default());
        assert_eq!(node.poll(16), Err(DisplayError::Link(LinkError::Read)));
        assert_eq!(node.driver().writes, 1);
    }

    #[test]
    fn test_driver_error() {
        let strip = Strip {
            fail: true,
            ..Default::default()
        };
        let mut node = DisplayNode::new(config(), Rx::with(&[1]), strip);
        assert_eq!(node.poll(16), Err(DisplayError::Driver));
        // The command still took effect
        assert_eq!(node.engine().state(), LedState::Rgb);
    }
}
