//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod session;
mod transport;
mod verification;

pub use session::SessionProvider;
pub use transport::{PostTransport, SubmitPayload, SubmitReceipt, TransportError};
pub use verification::{BotVerifier, POST_ACTION, VerificationError};
