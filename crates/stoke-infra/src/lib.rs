//! # Stoke Infrastructure
//!
//! Concrete implementations of the ports defined in `stoke-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No network dependencies, in-memory only
//! - `http` - Posts API transport via reqwest

pub mod memory;
pub mod verification;

#[cfg(feature = "http")]
pub mod http;

// Re-exports - In-Memory
pub use memory::{InMemoryPostTransport, InMemorySession};
pub use verification::StaticTokenVerifier;

// Re-exports - HTTP
#[cfg(feature = "http")]
pub use http::{HttpPostTransport, HttpTransportConfig};
