//! Bot-verification implementations.
//!
//! Real challenge tokens are obtained by the host (e.g. a browser widget)
//! and handed in; this crate only relays them.

mod static_token;

pub use static_token::StaticTokenVerifier;
