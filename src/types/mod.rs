//! Shared serialization helpers.

pub mod serde_helpers;
