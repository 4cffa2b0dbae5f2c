//! Items and worn equipment.

pub mod equipment;
pub mod types;

pub use equipment::*;
pub use types::*;
