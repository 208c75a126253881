//! # Stoke Shared
//!
//! Wire types exchanged with the listings backend that are not part of the
//! post itself.

pub mod dto;
pub mod response;

pub use dto::PostAck;
pub use response::ErrorResponse;
