use super::attributes::AttributeBonuses;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Warrior,
    Rogue,
    Mage,
    Tank,
}

impl CharacterClass {
    pub fn all() -> [CharacterClass; 4] {
        [
            CharacterClass::Warrior,
            CharacterClass::Rogue,
            CharacterClass::Mage,
            CharacterClass::Tank,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Mage => "Mage",
            CharacterClass::Tank => "Tank",
        }
    }

    /// Mages fight with spells even when no ability is chosen.
    pub fn is_caster(&self) -> bool {
        matches!(self, CharacterClass::Mage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Human,
    Elf,
    Dwarf,
    Orc,
    Undead,
}

impl Origin {
    pub fn name(&self) -> &'static str {
        match self {
            Origin::Human => "Human",
            Origin::Elf => "Elf",
            Origin::Dwarf => "Dwarf",
            Origin::Orc => "Orc",
            Origin::Undead => "Undead",
        }
    }

    /// Flat attribute modifiers granted by this origin.
    pub fn bonuses(&self) -> AttributeBonuses {
        match self {
            Origin::Human => AttributeBonuses {
                strength: 1,
                agility: 1,
                vitality: 1,
                endurance: 1,
                intelligence: 1,
                wisdom: 1,
                luck: 1,
                charisma: 1,
            },
            Origin::Elf => AttributeBonuses {
                agility: 3,
                wisdom: 2,
                ..AttributeBonuses::new()
            },
            Origin::Dwarf => AttributeBonuses {
                vitality: 3,
                endurance: 2,
                ..AttributeBonuses::new()
            },
            Origin::Orc => AttributeBonuses {
                strength: 3,
                vitality: 2,
                ..AttributeBonuses::new()
            },
            Origin::Undead => AttributeBonuses {
                endurance: 3,
                wisdom: 2,
                ..AttributeBonuses::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_mage_is_caster() {
        for class in CharacterClass::all() {
            assert_eq!(class.is_caster(), class == CharacterClass::Mage);
        }
    }

    #[test]
    fn test_origin_bonus_totals() {
        assert_eq!(Origin::Human.bonuses().total(), 8);
        assert_eq!(Origin::Elf.bonuses().total(), 5);
        assert_eq!(Origin::Dwarf.bonuses().total(), 5);
        assert_eq!(Origin::Orc.bonuses().strength, 3);
        assert_eq!(Origin::Undead.bonuses().endurance, 3);
    }

    #[test]
    fn test_class_serializes_lowercase() {
        let json = serde_json::to_string(&CharacterClass::Rogue).unwrap();
        assert_eq!(json, "\"rogue\"");
        let origin: Origin = serde_json::from_str("\"dwarf\"").unwrap();
        assert_eq!(origin, Origin::Dwarf);
    }
}
