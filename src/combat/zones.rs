//! Body zones, per-zone armor, and the defender's stance.
//!
//! A stance is a weighting over the four zones. Untargeted attacks draw
//! their zone from it, and zones weighted below the even share count as
//! guarded, which gives blockable hits landing there a chance to be blocked.

use crate::core::constants::*;
use crate::items::types::Item;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyZone {
    Head,
    Torso,
    Waist,
    Legs,
}

impl BodyZone {
    pub fn all() -> [BodyZone; NUM_ZONES] {
        [BodyZone::Head, BodyZone::Torso, BodyZone::Waist, BodyZone::Legs]
    }

    pub fn name(&self) -> &'static str {
        match self {
            BodyZone::Head => "head",
            BodyZone::Torso => "torso",
            BodyZone::Waist => "waist",
            BodyZone::Legs => "legs",
        }
    }

    /// Physical damage multiplier for a hit landing here.
    pub fn damage_multiplier(&self) -> f64 {
        match self {
            BodyZone::Head => HEAD_DAMAGE_MULT,
            BodyZone::Torso => TORSO_DAMAGE_MULT,
            BodyZone::Waist => WAIST_DAMAGE_MULT,
            BodyZone::Legs => LEGS_DAMAGE_MULT,
        }
    }

    /// Multiplier for hits that strike every zone at once.
    pub fn mean_damage_multiplier() -> f64 {
        BodyZone::all().iter().map(BodyZone::damage_multiplier).sum::<f64>() / NUM_ZONES as f64
    }
}

/// Armor value per body zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneArmor {
    pub head: u32,
    pub torso: u32,
    pub waist: u32,
    pub legs: u32,
}

impl ZoneArmor {
    pub fn get(&self, zone: BodyZone) -> u32 {
        match zone {
            BodyZone::Head => self.head,
            BodyZone::Torso => self.torso,
            BodyZone::Waist => self.waist,
            BodyZone::Legs => self.legs,
        }
    }

    pub fn add(&mut self, zone: BodyZone, amount: u32) {
        let slot = match zone {
            BodyZone::Head => &mut self.head,
            BodyZone::Torso => &mut self.torso,
            BodyZone::Waist => &mut self.waist,
            BodyZone::Legs => &mut self.legs,
        };
        *slot = slot.saturating_add(amount);
    }

    pub fn total(&self) -> u32 {
        BodyZone::all().iter().map(|z| self.get(*z)).sum()
    }

    /// Armor that mitigates a hit on `zone`, scaled so that an even spread
    /// mitigates exactly like the total.
    pub fn effective_for(&self, zone: BodyZone) -> u32 {
        self.get(zone).saturating_mul(NUM_ZONES as u32)
    }
}

/// Sums item armor into zones. Zone-bound slots add their armor to their
/// zone; shared slots split theirs evenly across all four zones with
/// integer division, each item on its own (remainders are dropped).
pub fn aggregate_zone_armor<'a, I>(items: I) -> ZoneArmor
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut armor = ZoneArmor::default();
    for item in items {
        let value = item.armor();
        if value == 0 {
            continue;
        }
        match item.slot.zone() {
            Some(zone) => armor.add(zone, value),
            None => {
                let share = value / NUM_ZONES as u32;
                for zone in BodyZone::all() {
                    armor.add(zone, share);
                }
            }
        }
    }
    armor
}

/// Defender-controlled weighting over the zones.
///
/// Weights are signed so that malformed input survives deserialization and
/// is reported by [`validate_stance`] rather than rejected by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stance {
    pub head: i32,
    pub torso: i32,
    pub waist: i32,
    pub legs: i32,
}

impl Default for Stance {
    fn default() -> Self {
        default_stance()
    }
}

impl Stance {
    pub fn weight(&self, zone: BodyZone) -> i32 {
        match zone {
            BodyZone::Head => self.head,
            BodyZone::Torso => self.torso,
            BodyZone::Waist => self.waist,
            BodyZone::Legs => self.legs,
        }
    }

    pub fn total(&self) -> i32 {
        BodyZone::all().iter().map(|z| self.weight(*z)).sum()
    }

    /// Draws the zone an untargeted attack lands on, treating the weights as
    /// a discrete distribution. Negative weights count as zero; a stance with
    /// no positive weight sends every hit to the torso.
    pub fn sample_zone<R: Rng + ?Sized>(&self, rng: &mut R) -> BodyZone {
        let total: u32 = BodyZone::all()
            .iter()
            .map(|z| self.weight(*z).max(0) as u32)
            .sum();
        if total == 0 {
            return BodyZone::Torso;
        }

        let mut roll = rng.gen_range(0..total);
        for zone in BodyZone::all() {
            let weight = self.weight(zone).max(0) as u32;
            if roll < weight {
                return zone;
            }
            roll -= weight;
        }
        BodyZone::Legs
    }

    /// Percent chance that a blockable hit on `zone` is blocked.
    pub fn block_chance(&self, zone: BodyZone) -> f64 {
        let guard = (STANCE_EVEN_WEIGHT as i32 - self.weight(zone)).max(0);
        guard as f64 * BLOCK_CHANCE_PER_GUARD_POINT
    }
}

/// Even weighting: every zone gets the same share.
pub fn default_stance() -> Stance {
    let even = STANCE_EVEN_WEIGHT as i32;
    Stance {
        head: even,
        torso: even,
        waist: even,
        legs: even,
    }
}

pub fn validate_stance(stance: &Stance) -> Result<(), String> {
    for zone in BodyZone::all() {
        let weight = stance.weight(zone);
        if weight < 0 {
            return Err(format!(
                "Stance weight for {} must be non-negative (got {})",
                zone.name(),
                weight
            ));
        }
    }

    let total = stance.total();
    if total != STANCE_TOTAL_WEIGHT as i32 {
        return Err(format!(
            "Stance weights must sum to {} (got {})",
            STANCE_TOTAL_WEIGHT, total
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::EquipmentSlot;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zone_multiplier_ordering() {
        assert!(BodyZone::Head.damage_multiplier() > BodyZone::Torso.damage_multiplier());
        assert!(BodyZone::Torso.damage_multiplier() > BodyZone::Waist.damage_multiplier());
        assert!(BodyZone::Waist.damage_multiplier() > BodyZone::Legs.damage_multiplier());
        assert_eq!(BodyZone::Head.damage_multiplier(), 1.3);
        assert_eq!(BodyZone::Torso.damage_multiplier(), 1.0);
        assert_eq!(BodyZone::Waist.damage_multiplier(), 0.9);
        assert_eq!(BodyZone::Legs.damage_multiplier(), 0.8);
    }

    #[test]
    fn test_mean_multiplier_is_torso_like() {
        assert!((BodyZone::mean_damage_multiplier() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_helmet_armor_goes_to_head() {
        let items = vec![Item::new(EquipmentSlot::Helmet, "Helm").with_stat("ARMOR", 50)];
        assert_eq!(
            aggregate_zone_armor(&items),
            ZoneArmor {
                head: 50,
                torso: 0,
                waist: 0,
                legs: 0
            }
        );
    }

    #[test]
    fn test_weapon_armor_splits_evenly() {
        let items = vec![Item::new(EquipmentSlot::Weapon, "Buckler Blade").with_stat("ARMOR", 40)];
        let armor = aggregate_zone_armor(&items);
        for zone in BodyZone::all() {
            assert_eq!(armor.get(zone), 10);
        }
    }

    #[test]
    fn test_shared_split_floors_per_item() {
        // 7 / 4 = 1 per zone for each ring; the remainders never pool.
        let items = vec![
            Item::new(EquipmentSlot::Ring, "Ring A").with_stat("armor", 7),
            Item::new(EquipmentSlot::Accessory, "Ring B").with_stat("Armor", 7),
        ];
        let armor = aggregate_zone_armor(&items);
        for zone in BodyZone::all() {
            assert_eq!(armor.get(zone), 2);
        }
        assert_eq!(armor.total(), 8);
    }

    #[test]
    fn test_zone_totals_sum_across_items() {
        let items = vec![
            Item::new(EquipmentSlot::Chest, "Plate").with_stat("ARMOR", 30),
            Item::new(EquipmentSlot::Gloves, "Gauntlets").with_stat("ARMOR", 6),
            Item::new(EquipmentSlot::Belt, "Girdle").with_stat("ARMOR", 4),
            Item::new(EquipmentSlot::Boots, "Greaves").with_stat("ARMOR", 8),
            Item::new(EquipmentSlot::Legs, "Cuisses").with_stat("ARMOR", 12),
            Item::new(EquipmentSlot::Amulet, "Plain Amulet"),
        ];
        let armor = aggregate_zone_armor(&items);
        assert_eq!(armor.head, 0);
        assert_eq!(armor.torso, 36);
        assert_eq!(armor.waist, 4);
        assert_eq!(armor.legs, 20);
    }

    #[test]
    fn test_effective_armor_matches_total_for_even_spread() {
        let armor = ZoneArmor {
            head: 10,
            torso: 10,
            waist: 10,
            legs: 10,
        };
        assert_eq!(armor.effective_for(BodyZone::Head), armor.total());
    }

    #[test]
    fn test_default_stance_is_even_and_valid() {
        let stance = default_stance();
        for zone in BodyZone::all() {
            assert_eq!(stance.weight(zone), 25);
        }
        assert_eq!(validate_stance(&stance), Ok(()));
        assert_eq!(Stance::default(), stance);
    }

    #[test]
    fn test_validate_stance_rejects_wrong_total() {
        let stance = Stance {
            head: 30,
            torso: 30,
            waist: 30,
            legs: 30,
        };
        let err = validate_stance(&stance).unwrap_err();
        assert!(err.contains("sum to 100"), "unexpected message: {}", err);
        assert!(err.contains("120"));
    }

    #[test]
    fn test_validate_stance_rejects_negative_weight() {
        let stance = Stance {
            head: -10,
            torso: 60,
            waist: 25,
            legs: 25,
        };
        let err = validate_stance(&stance).unwrap_err();
        assert!(err.contains("head"));
        assert!(err.contains("non-negative"));
    }

    #[test]
    fn test_sample_zone_follows_weights() {
        let stance = Stance {
            head: 0,
            torso: 0,
            waist: 0,
            legs: 100,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(stance.sample_zone(&mut rng), BodyZone::Legs);
        }
    }

    #[test]
    fn test_sample_zone_hits_every_weighted_zone() {
        let stance = default_stance();
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..400 {
            seen.insert(stance.sample_zone(&mut rng));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_sample_zone_without_weight_defaults_to_torso() {
        let stance = Stance {
            head: 0,
            torso: 0,
            waist: -5,
            legs: 0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(stance.sample_zone(&mut rng), BodyZone::Torso);
    }

    #[test]
    fn test_block_chance_from_guard() {
        let stance = Stance {
            head: 5,
            torso: 45,
            waist: 25,
            legs: 25,
        };
        assert_eq!(stance.block_chance(BodyZone::Head), 40.0);
        assert_eq!(stance.block_chance(BodyZone::Torso), 0.0);
        assert_eq!(stance.block_chance(BodyZone::Waist), 0.0);
        assert_eq!(default_stance().block_chance(BodyZone::Legs), 0.0);
    }
}
