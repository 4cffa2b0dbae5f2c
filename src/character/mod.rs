//! Character attributes, classes, origins, and derived combat stats.

pub mod attributes;
pub mod class;
pub mod derived_stats;

pub use attributes::*;
pub use class::*;
pub use derived_stats::*;
