//! Duel balance simulator for Monte Carlo analysis.
//!
//! Runs the same matchup many times with seeded RNGs to measure:
//! - Win and draw rates per side
//! - Fight length distribution
//! - Dodge, crit and block rates
//! - Average damage dealt by each side

mod config;
mod report;
mod runner;

pub use config::{ability_rotation, archetype, ConfigError, SimConfig};
pub use report::{FightOutcome, FightStats, SimReport};
pub use runner::run_simulation;
