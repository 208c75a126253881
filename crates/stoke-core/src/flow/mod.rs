//! Compose → preview → submit state machine.

mod controller;
mod state;

pub use controller::{FlowConfig, FlowPorts, PostFlow, SuccessCallback};
pub use state::FlowPhase;
