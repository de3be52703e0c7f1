//! Gateway orchestration
//!
//! Decides what the display shows: the weather feed, or one of the manual
//! override modes. The state machine is explicit, finite and deterministic.

pub mod events;
pub mod machine;
pub mod orchestrator;
pub mod timer;

pub use events::CloudEvent;
pub use machine::CloudState;
pub use orchestrator::CloudOrchestrator;
pub use timer::FetchTimer;
