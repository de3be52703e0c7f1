//! Per-mode renderers
//!
//! Each effect draws a complete frame. Effects that keep state between
//! frames (night sky, storm, precipitation) expose `reset`/`clear` so the
//! engine can restart them when their mode is entered.

pub mod color;
pub mod lightning;
pub mod night;
pub mod precipitation;

pub use color::Palette;
pub use lightning::{LightningStorm, Strike};
pub use night::{NightSky, NightState};
pub use precipitation::Precipitation;
