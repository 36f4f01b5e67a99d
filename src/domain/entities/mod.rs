//! Core domain entities.
//!
//! - [`ShortLink`] - A stored URL to alias mapping
//! - [`NewShortLink`] - Input for creating one

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
