//! Gateway poll-loop driver
//!
//! Glues the orchestrator to the serial link. The board's main loop calls
//! into this once per iteration; nothing here blocks except the link write.

use embedded_io::Write;
use nimbus_protocol::{send, Command, LinkError};

use crate::cloud::{CloudEvent, CloudOrchestrator};
use crate::config::GatewayConfig;

/// Gateway node: orchestrator plus command link
pub struct GatewayNode<W> {
    orchestrator: CloudOrchestrator,
    link: W,
    /// Last command pushed onto the link
    last_sent: Option<Command>,
}

impl<W: Write> GatewayNode<W> {
    /// Create a node that transmits on `link`
    pub fn new(config: GatewayConfig, link: W) -> Self {
        Self {
            orchestrator: CloudOrchestrator::new(config),
            link,
            last_sent: None,
        }
    }

    /// Get access to the orchestrator
    pub fn orchestrator(&self) -> &CloudOrchestrator {
        &self.orchestrator
    }

    /// Get access to the underlying link
    pub fn link(&self) -> &W {
        &self.link
    }

    /// Last command transmitted
    pub fn last_sent(&self) -> Option<Command> {
        self.last_sent
    }

    /// Advance timers; returns true when the board should start a fetch
    ///
    /// A pass left open past its interval is closed here and its fallback
    /// command transmitted.
    pub fn poll(&mut self, delta_ms: u32) -> Result<bool, LinkError> {
        let command = self.orchestrator.update_time(delta_ms);
        self.transmit(command)?;
        Ok(self.orchestrator.fetch_due())
    }

    /// Apply a manual input event
    pub fn handle_event(&mut self, event: CloudEvent) -> Result<Option<Command>, LinkError> {
        let command = self.orchestrator.handle_event(event);
        self.transmit(command)
    }

    /// The board's fetch collaborator is about to deliver a payload
    pub fn begin_fetch(&mut self) {
        self.orchestrator.begin_fetch();
    }

    /// Payload bytes arrived
    pub fn feed_payload(&mut self, bytes: &[u8]) -> Result<Option<Command>, LinkError> {
        let command = self.orchestrator.feed_bytes(bytes);
        self.transmit(command)
    }

    /// Payload stream ended
    pub fn end_fetch(&mut self) -> Result<Option<Command>, LinkError> {
        let command = self.orchestrator.end_fetch();
        self.transmit(command)
    }

    /// The fetch collaborator gave up (no connection, HTTP error)
    pub fn fetch_failed(&mut self) -> Result<Option<Command>, LinkError> {
        let command = self.orchestrator.fetch_failed();
        self.transmit(command)
    }

    fn transmit(&mut self, command: Option<Command>) -> Result<Option<Command>, LinkError> {
        let Some(command) = command else {
            return Ok(None);
        };

        if let Err(e) = send(&mut self.link, command) {
            warn!("link write failed: {:?}", e);
            return Err(e);
        }

        debug!("sent {:?}", command);
        self.last_sent = Some(command);
        Ok(Some(command))
    }
}
