use crate::character::attributes::{AttributeBonuses, AttributeType};
use crate::combat::zones::BodyZone;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Helmet,
    Chest,
    Gloves,
    Belt,
    Legs,
    Boots,
    Weapon,
    Ring,
    Amulet,
    Accessory,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 10] {
        [
            EquipmentSlot::Helmet,
            EquipmentSlot::Chest,
            EquipmentSlot::Gloves,
            EquipmentSlot::Belt,
            EquipmentSlot::Legs,
            EquipmentSlot::Boots,
            EquipmentSlot::Weapon,
            EquipmentSlot::Ring,
            EquipmentSlot::Amulet,
            EquipmentSlot::Accessory,
        ]
    }

    /// The body zone this slot protects, or `None` for shared slots whose
    /// armor is spread over every zone.
    pub fn zone(&self) -> Option<BodyZone> {
        match self {
            EquipmentSlot::Helmet => Some(BodyZone::Head),
            EquipmentSlot::Chest | EquipmentSlot::Gloves => Some(BodyZone::Torso),
            EquipmentSlot::Belt => Some(BodyZone::Waist),
            EquipmentSlot::Legs | EquipmentSlot::Boots => Some(BodyZone::Legs),
            EquipmentSlot::Weapon
            | EquipmentSlot::Ring
            | EquipmentSlot::Amulet
            | EquipmentSlot::Accessory => None,
        }
    }
}

/// An equipped item. Stats are free-form keys (`ARMOR`, `STR`, `agility`,
/// `MAGIC_RESIST`, ...) matched without regard to case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub slot: EquipmentSlot,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stats: BTreeMap<String, i32>,
}

impl Item {
    pub fn new(slot: EquipmentSlot, name: impl Into<String>) -> Self {
        Self {
            slot,
            name: name.into(),
            stats: BTreeMap::new(),
        }
    }

    pub fn with_stat(mut self, key: impl Into<String>, value: i32) -> Self {
        self.stats.insert(key.into(), value);
        self
    }

    /// Sums every stat whose key matches `key` ignoring case.
    pub fn stat(&self, key: &str) -> i32 {
        self.stats
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .fold(0i32, |total, (_, v)| total.saturating_add(*v))
    }

    /// Armor contribution; missing or negative armor counts as zero.
    pub fn armor(&self) -> u32 {
        self.stat("armor").max(0) as u32
    }

    pub fn magic_resist(&self) -> u32 {
        self.stat("magic_resist").max(0) as u32
    }

    /// Attribute bonuses carried in the stat map (negative values ignored).
    pub fn attribute_bonuses(&self) -> AttributeBonuses {
        let mut bonuses = AttributeBonuses::new();
        for (key, value) in &self.stats {
            if let Some(attr) = AttributeType::from_key(key) {
                bonuses.add(attr, (*value).max(0) as u32);
            }
        }
        bonuses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_specific_slots() {
        assert_eq!(EquipmentSlot::Helmet.zone(), Some(BodyZone::Head));
        assert_eq!(EquipmentSlot::Chest.zone(), Some(BodyZone::Torso));
        assert_eq!(EquipmentSlot::Gloves.zone(), Some(BodyZone::Torso));
        assert_eq!(EquipmentSlot::Belt.zone(), Some(BodyZone::Waist));
        assert_eq!(EquipmentSlot::Boots.zone(), Some(BodyZone::Legs));
        assert_eq!(EquipmentSlot::Legs.zone(), Some(BodyZone::Legs));
    }

    #[test]
    fn test_shared_slots_have_no_zone() {
        for slot in [
            EquipmentSlot::Weapon,
            EquipmentSlot::Ring,
            EquipmentSlot::Amulet,
            EquipmentSlot::Accessory,
        ] {
            assert_eq!(slot.zone(), None);
        }
    }

    #[test]
    fn test_stat_lookup_ignores_case() {
        let item = Item::new(EquipmentSlot::Helmet, "Iron Cap").with_stat("Armor", 12);
        assert_eq!(item.stat("ARMOR"), 12);
        assert_eq!(item.armor(), 12);
    }

    #[test]
    fn test_case_variant_stats_saturate() {
        let item = Item::new(EquipmentSlot::Chest, "Mythril")
            .with_stat("ARMOR", i32::MAX)
            .with_stat("armor", 10);
        assert_eq!(item.stat("armor"), i32::MAX);
    }

    #[test]
    fn test_missing_or_negative_armor_is_zero() {
        let bare = Item::new(EquipmentSlot::Ring, "Plain Band");
        assert_eq!(bare.armor(), 0);

        let cursed = Item::new(EquipmentSlot::Chest, "Cursed Rags").with_stat("ARMOR", -5);
        assert_eq!(cursed.armor(), 0);
    }

    #[test]
    fn test_attribute_bonuses_from_stats() {
        let item = Item::new(EquipmentSlot::Weapon, "Longsword")
            .with_stat("STR", 4)
            .with_stat("agility", 2)
            .with_stat("ARMOR", 8)
            .with_stat("LUCK", -3);
        let bonuses = item.attribute_bonuses();
        assert_eq!(bonuses.strength, 4);
        assert_eq!(bonuses.agility, 2);
        assert_eq!(bonuses.luck, 0);
        assert_eq!(bonuses.total(), 6);
    }

    #[test]
    fn test_item_deserializes_from_json() {
        let json = r#"{"slot":"helmet","name":"Great Helm","stats":{"ARMOR":50}}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.slot, EquipmentSlot::Helmet);
        assert_eq!(item.armor(), 50);
    }
}
