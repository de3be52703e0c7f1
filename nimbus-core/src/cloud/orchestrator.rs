//! Gateway orchestrator
//!
//! Owns the cloud state, the fetch timer and the parser. Every method that
//! can change what the display should show returns the command to transmit;
//! the caller only has to push the byte onto the link.

use nimbus_protocol::Command;

use super::events::CloudEvent;
use super::machine::CloudState;
use super::timer::FetchTimer;
use crate::config::GatewayConfig;
use crate::parser::{ParseOutcome, StreamingFieldParser};
use crate::weather::WeatherType;

/// Top-level gateway state machine
#[derive(Debug, Clone)]
pub struct CloudOrchestrator {
    state: CloudState,
    parser: StreamingFieldParser,
    timer: FetchTimer,
    config: GatewayConfig,
    /// A fetch pass is in progress
    fetching: bool,
    /// Most recent successful classification
    last_known: Option<WeatherType>,
}

impl Default for CloudOrchestrator {
    fn default() -> Self {
        Self::new(GatewayConfig::default())
    }
}

impl CloudOrchestrator {
    /// Create an orchestrator in weather mode, with a fetch due immediately
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            state: CloudState::Weather,
            parser: StreamingFieldParser::with_golden_window(config.golden_window_s),
            timer: FetchTimer::new(config.fetch_interval_ms),
            config,
            fetching: false,
            last_known: None,
        }
    }

    /// Current cloud state
    pub fn state(&self) -> CloudState {
        self.state
    }

    /// Last weather successfully parsed
    pub fn last_known(&self) -> Option<WeatherType> {
        self.last_known
    }

    /// Check if a fetch pass is open
    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// Process an input event
    ///
    /// Returns the command to transmit when entering a manual mode. Resuming
    /// weather schedules an immediate fetch instead of resending stale data,
    /// and `FetchDue` does the same without leaving weather mode.
    pub fn handle_event(&mut self, event: CloudEvent) -> Option<Command> {
        let next = self.state.transition(event);
        if next == self.state {
            if event == CloudEvent::FetchDue && next.parses_weather() {
                debug!("fetch requested");
                self.timer.force();
            }
            return None;
        }

        info!("cloud state {:?} -> {:?}", self.state, next);
        self.state = next;

        if next.parses_weather() {
            self.timer.force();
        } else if self.fetching {
            // Manual override abandons the pass in flight
            self.fetching = false;
            self.parser.reset();
        }

        next.entry_command()
    }

    /// Advance the fetch timer
    ///
    /// A pass still open one full interval after it began is closed as
    /// truncated. The fallback command is returned and a new fetch becomes
    /// due. Use [`Self::fetch_due`] to decide when to start a fetch.
    pub fn update_time(&mut self, delta_ms: u32) -> Option<Command> {
        self.timer.update_time(delta_ms);
        if !self.fetching || !self.timer.interval_elapsed() {
            return None;
        }

        warn!("fetch pass timed out");
        let outcome = self.parser.finish();
        let command = self.conclude(outcome);
        self.timer.force();
        Some(command)
    }

    /// Check whether a new fetch should start
    pub fn fetch_due(&self) -> bool {
        self.state.parses_weather() && !self.fetching && self.timer.is_due()
    }

    /// Start a parse pass over a freshly requested payload
    pub fn begin_fetch(&mut self) {
        if !self.state.parses_weather() {
            return;
        }
        debug!("fetch started");
        self.parser.reset();
        self.timer.mark_fetched();
        self.fetching = true;
    }

    /// Feed payload bytes of the open pass
    ///
    /// Returns the command once the payload has been classified. Bytes are
    /// ignored outside weather mode or when no pass is open.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<Command> {
        if !self.fetching || !self.state.parses_weather() {
            return None;
        }

        match self.parser.feed_bytes(bytes) {
            outcome @ (ParseOutcome::Done(_) | ParseOutcome::Failed(_)) => {
                Some(self.conclude(outcome))
            }
            _ => None,
        }
    }

    /// Close the open pass (payload stream ended)
    ///
    /// Always yields a command in weather mode, so the display never stalls
    /// on a failed fetch.
    pub fn end_fetch(&mut self) -> Option<Command> {
        if !self.fetching || !self.state.parses_weather() {
            return None;
        }
        let outcome = self.parser.finish();
        Some(self.conclude(outcome))
    }

    /// Report that the fetch itself failed (no payload at all)
    pub fn fetch_failed(&mut self) -> Option<Command> {
        if !self.state.parses_weather() {
            return None;
        }
        warn!("fetch failed, no payload");
        self.fetching = true;
        self.parser.reset();
        self.end_fetch()
    }

    fn conclude(&mut self, outcome: ParseOutcome) -> Command {
        self.fetching = false;

        let weather = match outcome.weather() {
            Some(weather) if !weather.is_sentinel() => {
                self.last_known = Some(weather);
                weather
            }
            _ => self.fallback(),
        };

        let command = Command::from(weather);
        info!("weather {:?} -> command {=u8}", weather, command.to_byte());
        command
    }

    fn fallback(&self) -> WeatherType {
        match (self.config.hold_last_known, self.last_known) {
            (true, Some(weather)) => weather,
            _ => WeatherType::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNOW: &[u8] =
        br#"{"weather":[{"main":"Snow"}],"dt":100,"sys":{"sunrise":50,"sunset":200}}"#;
    const CLEAR_NIGHT: &[u8] =
        br#"{"weather":[{"main":"Clear"}],"dt":300,"sys":{"sunrise":50,"sunset":200}}"#;
    const NO_SUNSET: &[u8] = br#"{"weather":[{"main":"Clear"}],"dt":300,"sys":{"sunrise":50"#;

    fn fetch(orchestrator: &mut CloudOrchestrator, payload: &[u8]) -> Option<Command> {
        orchestrator.begin_fetch();
        orchestrator
            .feed_bytes(payload)
            .or_else(|| orchestrator.end_fetch())
    }

    #[test]
    fn test_snow_payload() {
        let mut orchestrator = CloudOrchestrator::default();
        assert_eq!(fetch(&mut orchestrator, SNOW), Some(Command::Snow));
        assert_eq!(orchestrator.last_known(), Some(WeatherType::Snow));
        assert!(!orchestrator.is_fetching());
    }

    #[test]
    fn test_clear_night_payload() {
        let mut orchestrator = CloudOrchestrator::default();
        let command = fetch(&mut orchestrator, CLEAR_NIGHT).unwrap();
        assert_eq!(command, Command::Night);
        assert_eq!(command.to_byte(), 4);
    }

    #[test]
    fn test_truncated_payload_sends_default() {
        let mut orchestrator = CloudOrchestrator::default();
        let command = fetch(&mut orchestrator, NO_SUNSET).unwrap();
        assert_eq!(command, Command::BlueSky);
        assert_eq!(command.to_byte(), 3);
    }

    #[test]
    fn test_hold_last_known_on_failure() {
        let config = GatewayConfig {
            hold_last_known: true,
            ..Default::default()
        };
        let mut orchestrator = CloudOrchestrator::new(config);
        assert_eq!(fetch(&mut orchestrator, SNOW), Some(Command::Snow));
        assert_eq!(fetch(&mut orchestrator, NO_SUNSET), Some(Command::Snow));
    }

    #[test]
    fn test_fetch_failed_without_payload() {
        let mut orchestrator = CloudOrchestrator::default();
        assert_eq!(orchestrator.fetch_failed(), Some(Command::BlueSky));
    }

    #[test]
    fn test_chunked_payload() {
        let mut orchestrator = CloudOrchestrator::default();
        orchestrator.begin_fetch();
        let mut result = None;
        for chunk in CLEAR_NIGHT.chunks(7) {
            if let Some(command) = orchestrator.feed_bytes(chunk) {
                result = Some(command);
            }
        }
        assert_eq!(result, Some(Command::Night));
    }

    #[test]
    fn test_manual_modes_bypass_parser() {
        let mut orchestrator = CloudOrchestrator::default();
        assert_eq!(orchestrator.handle_event(CloudEvent::ManualDisco), Some(Command::Disco));
        assert_eq!(orchestrator.state(), CloudState::Disco);

        // Payload bytes are ignored while overridden
        orchestrator.begin_fetch();
        assert!(!orchestrator.is_fetching());
        assert_eq!(orchestrator.feed_bytes(SNOW), None);
        assert_eq!(orchestrator.end_fetch(), None);
        assert_eq!(orchestrator.update_time(u32::MAX), None);
        assert!(!orchestrator.fetch_due());

        assert_eq!(orchestrator.handle_event(CloudEvent::ManualRgb), Some(Command::Rgb));
        // Same state again: nothing to send
        assert_eq!(orchestrator.handle_event(CloudEvent::ManualRgb), None);
    }

    #[test]
    fn test_resume_weather_forces_fetch() {
        let mut orchestrator = CloudOrchestrator::default();
        fetch(&mut orchestrator, SNOW);
        assert!(!orchestrator.fetch_due());

        orchestrator.handle_event(CloudEvent::ManualRgb);
        assert_eq!(orchestrator.handle_event(CloudEvent::ResumeWeather), None);
        assert!(orchestrator.fetch_due());
    }

    #[test]
    fn test_override_abandons_open_pass() {
        let mut orchestrator = CloudOrchestrator::default();
        orchestrator.begin_fetch();
        assert_eq!(orchestrator.feed_bytes(&SNOW[..20]), None);

        orchestrator.handle_event(CloudEvent::ManualDisco);
        assert!(!orchestrator.is_fetching());

        orchestrator.handle_event(CloudEvent::ResumeWeather);
        assert_eq!(orchestrator.feed_bytes(&SNOW[20..]), None);
    }

    #[test]
    fn test_fetch_schedule() {
        let config = GatewayConfig {
            fetch_interval_ms: 60_000,
            ..Default::default()
        };
        let mut orchestrator = CloudOrchestrator::new(config);
        assert_eq!(orchestrator.update_time(0), None);
        assert!(orchestrator.fetch_due());

        fetch(&mut orchestrator, SNOW);
        assert_eq!(orchestrator.update_time(59_999), None);
        assert!(!orchestrator.fetch_due());
        assert_eq!(orchestrator.update_time(1), None);
        assert!(orchestrator.fetch_due());
    }

    #[test]
    fn test_open_pass_times_out() {
        let config = GatewayConfig {
            fetch_interval_ms: 60_000,
            ..Default::default()
        };
        let mut orchestrator = CloudOrchestrator::new(config);
        orchestrator.begin_fetch();
        assert_eq!(orchestrator.feed_bytes(br#"{"main":"Cl"#), None);

        assert_eq!(orchestrator.update_time(59_999), None);
        assert!(orchestrator.is_fetching());
        assert!(!orchestrator.fetch_due());

        assert_eq!(orchestrator.update_time(1), Some(Command::BlueSky));
        assert!(!orchestrator.is_fetching());
        assert!(orchestrator.fetch_due());

        // The next pass runs normally
        assert_eq!(fetch(&mut orchestrator, SNOW), Some(Command::Snow));
    }

    #[test]
    fn test_open_pass_after_long_stall() {
        let mut orchestrator = CloudOrchestrator::default();
        orchestrator.begin_fetch();
        orchestrator.feed_bytes(br#"{"main":"Cl"#);
        assert_eq!(orchestrator.update_time(u32::MAX), Some(Command::BlueSky));
        assert!(orchestrator.fetch_due());
    }

    #[test]
    fn test_fetch_due_event() {
        let mut orchestrator = CloudOrchestrator::default();
        fetch(&mut orchestrator, SNOW);
        assert!(!orchestrator.fetch_due());

        assert_eq!(orchestrator.handle_event(CloudEvent::FetchDue), None);
        assert_eq!(orchestrator.state(), CloudState::Weather);
        assert!(orchestrator.fetch_due());
    }

    #[test]
    fn test_fetch_due_event_ignored_in_manual_mode() {
        let mut orchestrator = CloudOrchestrator::default();
        fetch(&mut orchestrator, SNOW);
        orchestrator.handle_event(CloudEvent::ManualRgb);

        assert_eq!(orchestrator.handle_event(CloudEvent::FetchDue), None);
        assert_eq!(orchestrator.state(), CloudState::Rgb);
        assert!(!orchestrator.fetch_due());
    }

    #[test]
    fn test_hold_last_known_on_unknown_weather() {
        let config = GatewayConfig {
            hold_last_known: true,
            ..Default::default()
        };
        let mut orchestrator = CloudOrchestrator::new(config);
        assert_eq!(fetch(&mut orchestrator, SNOW), Some(Command::Snow));

        let payload = br#"{"main":"Volcano","dt":100,"sunrise":50,"sunset":200}"#;
        assert_eq!(fetch(&mut orchestrator, payload), Some(Command::Snow));
        assert_eq!(orchestrator.last_known(), Some(WeatherType::Snow));
    }

    #[test]
    fn test_unknown_weather_not_remembered() {
        let mut orchestrator = CloudOrchestrator::default();
        let payload = br#"{"main":"Volcano","dt":100,"sunrise":50,"sunset":200}"#;
        assert_eq!(fetch(&mut orchestrator, payload), Some(Command::BlueSky));
        assert_eq!(orchestrator.last_known(), None);
    }
}
