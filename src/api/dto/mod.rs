//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs are decoded with [`crate::utils::json::decode_strict`] and
//! checked with their derived [`validator::Validate`] rules.

pub mod health;
pub mod shorten;
