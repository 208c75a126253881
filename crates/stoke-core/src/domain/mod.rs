//! Domain entities - the listing as stored and as edited.

mod form;
mod mode;
mod post;
mod session;

pub use form::{GarageSchedule, PostForm, PriceMode};
pub use mode::ComposeMode;
pub use post::{FREE_PRICE, GeoPoint, MediaRef, Post, Price};
pub use session::Session;
