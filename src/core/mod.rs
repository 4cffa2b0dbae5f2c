//! Tuning constants shared across the crate.

pub mod constants;

pub use constants::*;
