//! Nimbus gateway → display command protocol
//!
//! The gateway node (weather parser) and the display node (LED strip) are
//! coupled by a single serial line carrying one byte per mode change.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌─────────┐
//! │ COMMAND │
//! │ 1B      │
//! └─────────┘
//! ```
//!
//! There is no framing, length or checksum: every byte is self-delimiting.
//! A lost byte only delays a mode change until the next command, and a
//! corrupted byte outside the command table is dropped by the receiver
//! without touching the current mode.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod link;
pub mod mode;

pub use command::{Command, COMMAND_COUNT, COMMAND_TABLE};
pub use link::{receive, send, LinkError};
pub use mode::{decode, LedState, ManualMode};
