//! Batch duel runner.
//!
//! Builds both combatants once, then replays the duel `num_fights` times,
//! each fight with its own RNG so results do not depend on fight order.

use super::config::{ConfigError, SimConfig};
use super::report::{FightStats, SimReport};
use crate::combat::builder::build_combatant_state;
use crate::combat::engine::run_combat_with_choices;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, ConfigError> {
    config.validate()?;
    let a = build_combatant_state(&config.combatant_a)
        .map_err(|source| ConfigError::Combatant { side: 'A', source })?;
    let b = build_combatant_state(&config.combatant_b)
        .map_err(|source| ConfigError::Combatant { side: 'B', source })?;

    let choices_a: Vec<&str> = config.choices_a.iter().map(String::as_str).collect();
    let choices_b: Vec<&str> = config.choices_b.iter().map(String::as_str).collect();

    info!(
        fights = config.num_fights,
        seed = ?config.seed,
        a = %a.name,
        b = %b.name,
        "starting duel simulation"
    );

    let mut fights = Vec::with_capacity(config.num_fights as usize);
    for fight_idx in 0..config.num_fights {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(fight_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let result = run_combat_with_choices(a.clone(), b.clone(), &choices_a, &choices_b, &mut rng);
        let stats = FightStats::from_result(&result);
        debug!(
            fight = fight_idx + 1,
            turns = stats.turns,
            outcome = ?stats.outcome,
            damage_a = stats.damage_a,
            damage_b = stats.damage_b,
            "fight resolved"
        );
        fights.push(stats);
    }

    let report = SimReport::from_fights(&a, &b, fights);
    info!(
        wins_a = report.wins_a,
        wins_b = report.wins_b,
        draws = report.draws,
        avg_turns = report.avg_turns,
        "simulation complete"
    );
    Ok(report)
}
