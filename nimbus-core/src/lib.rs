//! Gateway-node logic for the Nimbus cloud lamp
//!
//! This crate contains everything the gateway does between "payload bytes
//! arrived" and "command byte sent", independent of the board:
//!
//! - Streaming weather payload parser
//! - Day/night evaluation and weather classification
//! - Cloud orchestrator (weather vs manual override modes, fetch timer)
//! - Gateway configuration
//! - Poll-loop driver writing commands to an `embedded-io` link

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod cloud;
pub mod config;
pub mod node;
pub mod parser;
pub mod weather;

pub use cloud::{CloudEvent, CloudOrchestrator, CloudState};
pub use node::GatewayNode;
pub use parser::{ParseOutcome, StreamingFieldParser};
pub use weather::WeatherType;
