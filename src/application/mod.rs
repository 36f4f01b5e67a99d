//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls and domain rules behind an API that
//! HTTP handlers consume.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and resolution

pub mod services;
