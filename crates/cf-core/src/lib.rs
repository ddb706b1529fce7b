//! cf-core: shared types, errors, and configuration.
//!
//! This crate is the foundational dependency for the other clipforge crates,
//! providing the unified error type, the probe result record, and the
//! configuration that drives every media operation.

pub mod config;
pub mod error;
pub mod media;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, ProbeError, Result};
pub use media::*;
