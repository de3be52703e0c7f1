//! Display-node logic for the Nimbus cloud lamp
//!
//! This crate turns command bytes from the gateway into pixel frames:
//!
//! - `AnimationEngine`: active mode plus per-mode effect state
//! - Effects: colour cycles, ambient fields, night twinkle, lightning,
//!   snow and rain
//! - `AnimationConfig`: strip length, timings and brightness
//! - `DisplayNode`: poll loop reading an `embedded-io` link and writing a
//!   `smart-leds` driver
//!
//! # Architecture
//!
//! Nothing here touches hardware. The board hands the node a UART that
//! implements `embedded_io::{Read, ReadReady}` and an LED driver that
//! implements `SmartLedsWrite`, then calls [`DisplayNode::poll`] once per
//! frame with the elapsed time.

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod effects;
pub mod engine;
pub mod frame;
pub mod node;

pub use config::{AnimationConfig, ConfigError};
pub use effects::NightState;
pub use engine::AnimationEngine;
pub use frame::{Frame, MAX_LEDS};
pub use node::{DisplayError, DisplayNode};
pub use nimbus_protocol::LedState;
