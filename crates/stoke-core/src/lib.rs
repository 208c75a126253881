//! # Stoke Core
//!
//! The domain layer of the listing composer: the post and form shapes, the
//! conversions between them, field validation and the compose → preview →
//! submit flow. Infrastructure is reached only through [`ports`].

pub mod display;
pub mod domain;
pub mod error;
pub mod flow;
pub mod mapping;
pub mod ports;
pub mod validation;

pub use error::{FlowError, SubmitError};
pub use flow::{FlowConfig, FlowPhase, FlowPorts, PostFlow};
