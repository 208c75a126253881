//! In-memory implementations - used for dry runs and when no backend is configured.

mod session;
mod transport;

pub use session::InMemorySession;
pub use transport::InMemoryPostTransport;
