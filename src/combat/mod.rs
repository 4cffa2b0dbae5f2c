//! Duel resolution: abilities, zones, damage math, combatant state and the engine.

pub mod abilities;
pub mod builder;
pub mod damage;
pub mod engine;
pub mod types;
pub mod zones;

pub use abilities::*;
pub use builder::*;
pub use damage::*;
pub use engine::*;
pub use types::*;
pub use zones::*;
