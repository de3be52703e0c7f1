//! LED animation engine
//!
//! Owns the active [`LedState`] and renders one frame per tick. The mode only
//! changes through [`AnimationEngine::on_command`] / [`AnimationEngine::on_byte`];
//! ticking advances the per-mode phase (night twinkle, storm, drops) and
//! nothing else.

use nimbus_protocol::{decode, LedState};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::AnimationConfig;
use crate::effects::color::{
    self, render_disco, render_field, render_rainbow, render_rgb, render_twilight,
};
use crate::effects::precipitation::{DROP, FLAKE};
use crate::effects::{LightningStorm, NightSky, NightState, Precipitation};
use crate::frame::Frame;

/// Mode shown before the first command arrives
pub const INITIAL_STATE: LedState = LedState::BlueSky;

/// Display-side renderer
pub struct AnimationEngine {
    config: AnimationConfig,
    state: LedState,
    frame: Frame,
    rng: SmallRng,
    /// Time since the current mode was entered (wrapping)
    clock_ms: u32,
    manual_hue: u8,
    night: NightSky,
    storm: LightningStorm,
    precipitation: Precipitation,
}

impl AnimationEngine {
    /// Create an engine; the config is expected to be validated
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            state: INITIAL_STATE,
            frame: Frame::new(config.pixel_count()),
            rng: SmallRng::seed_from_u64(config.seed),
            clock_ms: 0,
            manual_hue: 0,
            night: NightSky::new(config.night_phase_ms),
            storm: LightningStorm::new(
                config.lightning_min_gap_ms,
                config.lightning_max_gap_ms,
                config.restrike_percent,
            ),
            precipitation: Precipitation::new(),
            config,
        }
    }

    /// Current display mode
    pub fn state(&self) -> LedState {
        self.state
    }

    /// Current night phase (only advances while in `Night`)
    pub fn night_state(&self) -> NightState {
        self.night.state()
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Last rendered frame
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Hue offset for RGB mode
    pub fn manual_hue(&self) -> u8 {
        self.manual_hue
    }

    pub fn set_manual_hue(&mut self, hue: u8) {
        self.manual_hue = hue;
    }

    /// Switch mode
    ///
    /// Re-sending the active mode is a no-op, so a repeated `Night` does not
    /// restart the twinkle cycle.
    pub fn on_command(&mut self, state: LedState) {
        if state == self.state {
            return;
        }

        info!("mode {:?} -> {:?}", self.state, state);
        self.state = state;
        self.clock_ms = 0;

        match state {
            LedState::Night => self.night.reset(&mut self.rng),
            LedState::Lightning => self.storm.reset(&mut self.rng),
            LedState::Snow | LedState::Rain => self.precipitation.clear(),
            _ => {}
        }
    }

    /// Apply a raw wire byte; returns false (and changes nothing) for garbage
    pub fn on_byte(&mut self, byte: u8) -> bool {
        match decode(byte) {
            Some(state) => {
                self.on_command(state);
                true
            }
            None => {
                warn!("ignoring byte {}", byte);
                false
            }
        }
    }

    /// Advance time and render the next frame
    pub fn tick(&mut self, elapsed_ms: u32) -> &Frame {
        self.clock_ms = self.clock_ms.wrapping_add(elapsed_ms);
        let t = self.clock_ms;
        let len = self.frame.len();
        let drift = self.config.drift_period_ms;

        match self.state {
            LedState::Rgb => {
                render_rgb(&mut self.frame, t, self.config.rgb_cycle_ms, self.manual_hue)
            }
            LedState::Disco => {
                render_disco(&mut self.frame, t, self.config.disco_cycle_ms, &mut self.rng)
            }
            LedState::BlueSky => render_field(&mut self.frame, t, drift, color::BLUE_SKY),
            LedState::Overcast => render_field(&mut self.frame, t, drift, color::OVERCAST),
            LedState::Golden => render_field(&mut self.frame, t, drift, color::GOLDEN),
            LedState::Mist => render_field(&mut self.frame, t, drift, color::MIST),
            LedState::Dark => render_field(&mut self.frame, t, drift, color::DARK),
            LedState::Rainbow => render_rainbow(&mut self.frame, t, drift),
            LedState::Twilight => render_twilight(&mut self.frame, t, drift),
            LedState::Night => {
                self.night.advance(elapsed_ms, &mut self.rng);
                self.night.render(&mut self.frame);
            }
            LedState::Lightning => {
                self.storm.update(elapsed_ms, len, &mut self.rng);
                self.storm.render(&mut self.frame);
            }
            LedState::Snow => {
                self.precipitation.update_snow(elapsed_ms, len, &mut self.rng);
                self.precipitation
                    .render(&mut self.frame, t, drift, color::SNOW, FLAKE);
            }
            LedState::Rain => {
                self.precipitation.update_rain(elapsed_ms, len, &mut self.rng);
                self.precipitation
                    .render(&mut self.frame, t, drift, color::RAIN, DROP);
            }
        }

        self.frame.apply_brightness(self.config.brightness);
        &self.frame
    }
}
