//! Utility functions shared across layers.
//!
//! - [`alias`] - Deterministic short alias derivation
//! - [`json`] - Strict JSON decoding with client-facing error classification
//! - [`validation`] - Declarative per-field request validation
//! - [`db_error`] - Database error classification

pub mod alias;
pub mod db_error;
pub mod json;
pub mod validation;
