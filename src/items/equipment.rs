use super::types::{EquipmentSlot, Item};
use crate::character::attributes::AttributeBonuses;
use crate::combat::zones::{aggregate_zone_armor, ZoneArmor};
use serde::{Deserialize, Serialize};

/// Worn equipment, one item per slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    pub helmet: Option<Item>,
    pub chest: Option<Item>,
    pub gloves: Option<Item>,
    pub belt: Option<Item>,
    pub legs: Option<Item>,
    pub boots: Option<Item>,
    pub weapon: Option<Item>,
    pub ring: Option<Item>,
    pub amulet: Option<Item>,
    pub accessory: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equips each item in order; a later item replaces an earlier one in the same slot.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut equipment = Self::new();
        for item in items {
            equipment.set(item.slot, Some(item));
        }
        equipment
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Helmet => &self.helmet,
            EquipmentSlot::Chest => &self.chest,
            EquipmentSlot::Gloves => &self.gloves,
            EquipmentSlot::Belt => &self.belt,
            EquipmentSlot::Legs => &self.legs,
            EquipmentSlot::Boots => &self.boots,
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Ring => &self.ring,
            EquipmentSlot::Amulet => &self.amulet,
            EquipmentSlot::Accessory => &self.accessory,
        }
    }

    pub fn set(&mut self, slot: EquipmentSlot, item: Option<Item>) {
        match slot {
            EquipmentSlot::Helmet => self.helmet = item,
            EquipmentSlot::Chest => self.chest = item,
            EquipmentSlot::Gloves => self.gloves = item,
            EquipmentSlot::Belt => self.belt = item,
            EquipmentSlot::Legs => self.legs = item,
            EquipmentSlot::Boots => self.boots = item,
            EquipmentSlot::Weapon => self.weapon = item,
            EquipmentSlot::Ring => self.ring = item,
            EquipmentSlot::Amulet => self.amulet = item,
            EquipmentSlot::Accessory => self.accessory = item,
        }
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [
            &self.helmet,
            &self.chest,
            &self.gloves,
            &self.belt,
            &self.legs,
            &self.boots,
            &self.weapon,
            &self.ring,
            &self.amulet,
            &self.accessory,
        ]
        .into_iter()
        .filter_map(|item| item.as_ref())
    }

    pub fn attribute_bonuses(&self) -> AttributeBonuses {
        self.iter_equipped()
            .fold(AttributeBonuses::new(), |acc, item| acc.combine(&item.attribute_bonuses()))
    }

    pub fn total_armor(&self) -> u32 {
        self.iter_equipped().map(Item::armor).sum()
    }

    pub fn total_magic_resist(&self) -> u32 {
        self.iter_equipped().map(Item::magic_resist).sum()
    }

    pub fn zone_armor(&self) -> ZoneArmor {
        aggregate_zone_armor(self.iter_equipped())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_starts_empty() {
        let eq = Equipment::new();
        assert_eq!(eq.iter_equipped().count(), 0);
        assert_eq!(eq.total_armor(), 0);
        assert_eq!(eq.zone_armor(), ZoneArmor::default());
    }

    #[test]
    fn test_get_set() {
        let mut eq = Equipment::new();
        let helm = Item::new(EquipmentSlot::Helmet, "Helm").with_stat("ARMOR", 5);
        eq.set(EquipmentSlot::Helmet, Some(helm.clone()));
        assert_eq!(eq.get(EquipmentSlot::Helmet), &Some(helm));
        assert_eq!(eq.get(EquipmentSlot::Boots), &None);
    }

    #[test]
    fn test_from_items_later_item_replaces_slot() {
        let eq = Equipment::from_items(vec![
            Item::new(EquipmentSlot::Boots, "Old Boots").with_stat("ARMOR", 2),
            Item::new(EquipmentSlot::Boots, "New Boots").with_stat("ARMOR", 9),
        ]);
        assert_eq!(eq.iter_equipped().count(), 1);
        assert_eq!(eq.total_armor(), 9);
    }

    #[test]
    fn test_totals_across_items() {
        let eq = Equipment::from_items(vec![
            Item::new(EquipmentSlot::Chest, "Mail")
                .with_stat("ARMOR", 30)
                .with_stat("VIT", 3),
            Item::new(EquipmentSlot::Amulet, "Charm")
                .with_stat("magic_resist", 12)
                .with_stat("wis", 2),
        ]);
        assert_eq!(eq.total_armor(), 30);
        assert_eq!(eq.total_magic_resist(), 12);
        let bonuses = eq.attribute_bonuses();
        assert_eq!(bonuses.vitality, 3);
        assert_eq!(bonuses.wisdom, 2);
    }

    #[test]
    fn test_zone_armor_uses_slot_mapping() {
        let eq = Equipment::from_items(vec![
            Item::new(EquipmentSlot::Helmet, "Helm").with_stat("ARMOR", 50),
            Item::new(EquipmentSlot::Weapon, "Shield Sword").with_stat("armor", 40),
        ]);
        let zones = eq.zone_armor();
        assert_eq!(zones.head, 60);
        assert_eq!(zones.torso, 10);
        assert_eq!(zones.waist, 10);
        assert_eq!(zones.legs, 10);
    }
}
