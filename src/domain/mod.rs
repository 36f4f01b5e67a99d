//! Domain layer: entities and repository contracts.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//!
//! Nothing here depends on the web or persistence layers; business flow
//! lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
