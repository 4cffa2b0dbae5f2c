//! Pure damage math shared by the engine and the simulator.
//!
//! Every function that needs randomness takes the caller's RNG, so a fight
//! driven by a seeded generator replays exactly.

use crate::character::derived_stats::{armor_reduction, magic_resist_percent};
use crate::core::constants::*;
use rand::Rng;

/// Draws the damage variance factor in `[DAMAGE_VARIANCE_MIN, DAMAGE_VARIANCE_MAX)`.
pub fn roll_variance<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(DAMAGE_VARIANCE_MIN..DAMAGE_VARIANCE_MAX)
}

/// Physical damage against the torso (zone multiplier 1.0).
///
/// # Arguments
/// * `attacker_str` - Attacker's effective strength
/// * `defender_end` - Defender's effective endurance
/// * `defender_armor` - Armor value mitigating this hit
/// * `skill_multiplier` - Ability multiplier (1.0 for a basic attack)
/// * `is_crit` - Whether the crit roll succeeded
/// * `crit_damage_mult` - Attacker's crit multiplier
/// * `rng` - Random number generator for the variance draw
///
/// # Returns
/// Final damage, never below 1
pub fn calc_physical_damage<R: Rng + ?Sized>(
    attacker_str: u32,
    defender_end: u32,
    defender_armor: u32,
    skill_multiplier: f64,
    is_crit: bool,
    crit_damage_mult: f64,
    rng: &mut R,
) -> u32 {
    calc_physical_damage_in_zone(
        attacker_str,
        defender_end,
        defender_armor,
        skill_multiplier,
        is_crit,
        crit_damage_mult,
        TORSO_DAMAGE_MULT,
        rng,
    )
}

/// Physical damage with an explicit body-zone multiplier. The zone
/// multiplier stacks with the crit multiplier.
#[allow(clippy::too_many_arguments)]
pub fn calc_physical_damage_in_zone<R: Rng + ?Sized>(
    attacker_str: u32,
    defender_end: u32,
    defender_armor: u32,
    skill_multiplier: f64,
    is_crit: bool,
    crit_damage_mult: f64,
    zone_damage_mult: f64,
    rng: &mut R,
) -> u32 {
    let base = attacker_str as f64 * PHYSICAL_DAMAGE_PER_STRENGTH;
    let after_endurance =
        base * ENDURANCE_CURVE_CONSTANT / (ENDURANCE_CURVE_CONSTANT + defender_end as f64);
    let after_armor = after_endurance * (1.0 - armor_reduction(defender_armor as i64));

    let mut damage = after_armor * skill_multiplier * roll_variance(rng);
    if is_crit {
        damage *= crit_damage_mult;
    }
    damage *= zone_damage_mult;

    floor_damage(damage)
}

/// Magic damage. Spells ignore body zones entirely.
pub fn calc_magic_damage<R: Rng + ?Sized>(
    attacker_int: u32,
    defender_wis: u32,
    spell_multiplier: f64,
    is_crit: bool,
    crit_damage_mult: f64,
    rng: &mut R,
) -> u32 {
    calc_magic_damage_with_element(
        attacker_int,
        defender_wis,
        spell_multiplier,
        is_crit,
        crit_damage_mult,
        1.0,
        rng,
    )
}

/// Magic damage scaled by an elemental effectiveness modifier.
pub fn calc_magic_damage_with_element<R: Rng + ?Sized>(
    attacker_int: u32,
    defender_wis: u32,
    spell_multiplier: f64,
    is_crit: bool,
    crit_damage_mult: f64,
    element_mod: f64,
    rng: &mut R,
) -> u32 {
    let base = attacker_int as f64 * MAGIC_DAMAGE_PER_INTELLIGENCE;
    let after_resist = base * (1.0 - magic_resist_percent(defender_wis));

    let mut damage = after_resist * spell_multiplier * roll_variance(rng);
    if is_crit {
        damage *= crit_damage_mult;
    }
    damage *= element_mod;

    floor_damage(damage)
}

/// Roll for a critical hit. One uniform draw in [0, 100) against the percent.
pub fn roll_crit<R: Rng + ?Sized>(crit_chance_percent: f64, rng: &mut R) -> bool {
    roll_percent(crit_chance_percent, rng)
}

/// Roll for a dodge. Same rule as [`roll_crit`].
pub fn roll_dodge<R: Rng + ?Sized>(dodge_chance_percent: f64, rng: &mut R) -> bool {
    roll_percent(dodge_chance_percent, rng)
}

pub(crate) fn roll_percent<R: Rng + ?Sized>(chance_percent: f64, rng: &mut R) -> bool {
    let roll: f64 = rng.gen_range(0.0..100.0);
    roll < chance_percent
}

/// Truncates to whole damage and enforces the 1-damage floor. NaN and
/// negative inputs land on the floor as well.
fn floor_damage(damage: f64) -> u32 {
    (damage.floor() as u32).max(MIN_DAMAGE)
}
