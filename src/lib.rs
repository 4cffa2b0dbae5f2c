//! Arena - turn-based duel resolution for an RPG.
//!
//! Two combatants built from character snapshots fight for at most
//! [`core::constants::MAX_TURNS`] rounds. The engine is a pure function of
//! its inputs and the injected RNG; the simulator runs it in bulk.

pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod simulator;

pub use combat::builder::{build_combatant_state, BuildError, CombatantSpec};
pub use combat::engine::{run_combat, run_combat_with_choices, CombatEngine, CombatPhase};
pub use combat::types::{CombatLogEntry, CombatOutcome, CombatResult, CombatantState};
