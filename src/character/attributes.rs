use crate::core::constants::NUM_ATTRIBUTES;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Strength,
    Agility,
    Vitality,
    Endurance,
    Intelligence,
    Wisdom,
    Luck,
    Charisma,
}

impl AttributeType {
    pub fn all() -> [AttributeType; NUM_ATTRIBUTES] {
        [
            AttributeType::Strength,
            AttributeType::Agility,
            AttributeType::Vitality,
            AttributeType::Endurance,
            AttributeType::Intelligence,
            AttributeType::Wisdom,
            AttributeType::Luck,
            AttributeType::Charisma,
        ]
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            AttributeType::Strength => "STR",
            AttributeType::Agility => "AGI",
            AttributeType::Vitality => "VIT",
            AttributeType::Endurance => "END",
            AttributeType::Intelligence => "INT",
            AttributeType::Wisdom => "WIS",
            AttributeType::Luck => "LUCK",
            AttributeType::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AttributeType::Strength => "strength",
            AttributeType::Agility => "agility",
            AttributeType::Vitality => "vitality",
            AttributeType::Endurance => "endurance",
            AttributeType::Intelligence => "intelligence",
            AttributeType::Wisdom => "wisdom",
            AttributeType::Luck => "luck",
            AttributeType::Charisma => "charisma",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AttributeType::Strength => 0,
            AttributeType::Agility => 1,
            AttributeType::Vitality => 2,
            AttributeType::Endurance => 3,
            AttributeType::Intelligence => 4,
            AttributeType::Wisdom => 5,
            AttributeType::Luck => 6,
            AttributeType::Charisma => 7,
        }
    }

    /// Matches either the full name or the abbreviation, ignoring case.
    pub fn from_key(key: &str) -> Option<AttributeType> {
        AttributeType::all()
            .into_iter()
            .find(|attr| key.eq_ignore_ascii_case(attr.name()) || key.eq_ignore_ascii_case(attr.abbrev()))
    }
}

/// Raw character attributes. All values are non-negative by construction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attributes {
    values: [u32; NUM_ATTRIBUTES],
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attr: AttributeType) -> u32 {
        self.values[attr.index()]
    }

    pub fn set(&mut self, attr: AttributeType, value: u32) {
        self.values[attr.index()] = value;
    }

    /// Adds bonuses on top of these values (origin, equipment).
    pub fn add(&mut self, bonuses: &AttributeBonuses) {
        for attr in AttributeType::all() {
            self.values[attr.index()] = self.values[attr.index()].saturating_add(bonuses.get(attr));
        }
    }

    pub fn strength(&self) -> u32 {
        self.get(AttributeType::Strength)
    }

    pub fn agility(&self) -> u32 {
        self.get(AttributeType::Agility)
    }

    pub fn vitality(&self) -> u32 {
        self.get(AttributeType::Vitality)
    }

    pub fn endurance(&self) -> u32 {
        self.get(AttributeType::Endurance)
    }

    pub fn intelligence(&self) -> u32 {
        self.get(AttributeType::Intelligence)
    }

    pub fn wisdom(&self) -> u32 {
        self.get(AttributeType::Wisdom)
    }

    pub fn luck(&self) -> u32 {
        self.get(AttributeType::Luck)
    }
}

/// Flat attribute bonuses from an origin or from equipment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeBonuses {
    pub strength: u32,
    pub agility: u32,
    pub vitality: u32,
    pub endurance: u32,
    pub intelligence: u32,
    pub wisdom: u32,
    pub luck: u32,
    pub charisma: u32,
}

impl AttributeBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attr: AttributeType) -> u32 {
        match attr {
            AttributeType::Strength => self.strength,
            AttributeType::Agility => self.agility,
            AttributeType::Vitality => self.vitality,
            AttributeType::Endurance => self.endurance,
            AttributeType::Intelligence => self.intelligence,
            AttributeType::Wisdom => self.wisdom,
            AttributeType::Luck => self.luck,
            AttributeType::Charisma => self.charisma,
        }
    }

    pub fn add(&mut self, attr: AttributeType, value: u32) {
        let slot = match attr {
            AttributeType::Strength => &mut self.strength,
            AttributeType::Agility => &mut self.agility,
            AttributeType::Vitality => &mut self.vitality,
            AttributeType::Endurance => &mut self.endurance,
            AttributeType::Intelligence => &mut self.intelligence,
            AttributeType::Wisdom => &mut self.wisdom,
            AttributeType::Luck => &mut self.luck,
            AttributeType::Charisma => &mut self.charisma,
        };
        *slot = slot.saturating_add(value);
    }

    /// Sums two bonus sets.
    pub fn combine(&self, other: &AttributeBonuses) -> AttributeBonuses {
        let mut total = *self;
        for attr in AttributeType::all() {
            total.add(attr, other.get(attr));
        }
        total
    }

    pub fn total(&self) -> u32 {
        AttributeType::all().iter().map(|attr| self.get(*attr)).sum()
    }
}
