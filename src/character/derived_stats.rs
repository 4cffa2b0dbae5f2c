use super::attributes::Attributes;
use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// Combat-relevant values derived from raw attributes and armor.
///
/// Chances are percents (0-100). Reductions are fractions (0.0-1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub max_hp: u32,
    pub crit_chance: f64,
    pub crit_damage_mult: f64,
    pub dodge_chance: f64,
    pub armor: u32,
    pub armor_reduction: f64,
    /// Wisdom plus any flat magic-resist rating, fed to the resist curve.
    pub magic_resist_rating: u32,
    pub magic_resist: f64,
}

impl DerivedStats {
    /// Computes every derived stat from final attributes (origin and
    /// equipment bonuses already applied), the armor total, and a flat
    /// magic-resist rating that stacks with wisdom.
    pub fn compute(attrs: &Attributes, armor: u32, magic_resist_seed: u32) -> Self {
        let magic_resist_rating = attrs.wisdom().saturating_add(magic_resist_seed);
        Self {
            max_hp: max_hp(attrs.vitality()),
            crit_chance: crit_chance(attrs.agility(), attrs.luck()),
            crit_damage_mult: crit_damage_mult(attrs.strength()),
            dodge_chance: dodge_chance(attrs.agility()),
            armor,
            armor_reduction: armor_reduction(armor as i64),
            magic_resist_rating,
            magic_resist: magic_resist_percent(magic_resist_rating),
        }
    }
}

/// Free-function form of [`DerivedStats::compute`].
pub fn compute_derived_stats(attrs: &Attributes, armor: u32, magic_resist_seed: u32) -> DerivedStats {
    DerivedStats::compute(attrs, armor, magic_resist_seed)
}

pub fn max_hp(vitality: u32) -> u32 {
    vitality.saturating_mul(HP_PER_VITALITY).max(MIN_MAX_HP)
}

pub fn crit_chance(agility: u32, luck: u32) -> f64 {
    let raw = BASE_CRIT_CHANCE_PERCENT
        + agility as f64 / CRIT_CHANCE_AGILITY_DIVISOR
        + luck as f64 / CRIT_CHANCE_LUCK_DIVISOR;
    raw.clamp(MIN_CRIT_CHANCE_PERCENT, MAX_CRIT_CHANCE_PERCENT)
}

pub fn crit_damage_mult(strength: u32) -> f64 {
    let raw = BASE_CRIT_MULTIPLIER + strength as f64 / CRIT_MULTIPLIER_STRENGTH_DIVISOR;
    raw.clamp(BASE_CRIT_MULTIPLIER, MAX_CRIT_MULTIPLIER)
}

pub fn dodge_chance(agility: u32) -> f64 {
    let raw = BASE_DODGE_CHANCE_PERCENT + agility as f64 / DODGE_CHANCE_AGILITY_DIVISOR;
    raw.clamp(BASE_DODGE_CHANCE_PERCENT, MAX_DODGE_CHANCE_PERCENT)
}

/// Fraction of physical damage absorbed by armor. Non-positive armor absorbs nothing.
pub fn armor_reduction(armor: i64) -> f64 {
    if armor <= 0 {
        return 0.0;
    }
    let armor = armor as f64;
    (armor / (armor + ARMOR_CURVE_CONSTANT)).clamp(0.0, MAX_ARMOR_REDUCTION)
}

pub fn magic_resist_percent(wisdom: u32) -> f64 {
    let wisdom = wisdom as f64;
    (wisdom / (wisdom + MAGIC_RESIST_CURVE_CONSTANT)).clamp(0.0, MAX_MAGIC_RESIST)
}
