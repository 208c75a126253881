//! Posts API transport over HTTP.

mod client;

pub use client::{HttpPostTransport, HttpTransportConfig};
