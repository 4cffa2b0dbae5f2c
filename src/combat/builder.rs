//! Turns a character snapshot into a fresh [`CombatantState`].

use crate::character::attributes::{AttributeBonuses, AttributeType, Attributes};
use crate::character::class::{CharacterClass, Origin};
use crate::character::derived_stats::DerivedStats;
use crate::combat::types::CombatantState;
use crate::combat::zones::{validate_stance, BodyZone, Stance, ZoneArmor};
use crate::core::constants::NUM_ATTRIBUTES;
use crate::items::equipment::Equipment;
use crate::items::types::Item;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("combatant id must not be empty")]
    EmptyId,
    #[error("level must be at least 1")]
    ZeroLevel,
    #[error("{attribute} must be non-negative (got {value})")]
    NegativeAttribute {
        attribute: &'static str,
        value: i32,
    },
    #[error("armor must be non-negative (got {0})")]
    NegativeArmor(i32),
    #[error("magic resist must be non-negative (got {0})")]
    NegativeMagicResist(i32),
    #[error("invalid stance: {0}")]
    InvalidStance(String),
}

/// Everything needed to put a character into a fight.
///
/// Attribute and armor values are signed so that bad input from storage can
/// be rejected with a clear error instead of wrapping around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantSpec {
    pub id: String,
    pub name: String,
    pub class: CharacterClass,
    #[serde(default)]
    pub origin: Option<Origin>,
    pub level: u32,
    #[serde(default)]
    pub strength: i32,
    #[serde(default)]
    pub agility: i32,
    #[serde(default)]
    pub vitality: i32,
    #[serde(default)]
    pub endurance: i32,
    #[serde(default)]
    pub intelligence: i32,
    #[serde(default)]
    pub wisdom: i32,
    #[serde(default)]
    pub luck: i32,
    #[serde(default)]
    pub charisma: i32,
    /// Armor the character carries outside of `items`.
    #[serde(default)]
    pub armor: i32,
    /// Flat magic-resist rating stacking with wisdom.
    #[serde(default)]
    pub magic_resist: i32,
    #[serde(default)]
    pub equipment_bonuses: Option<AttributeBonuses>,
    /// Worn items. When present, armor is tracked per body zone.
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub stance: Option<Stance>,
}

impl CombatantSpec {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        class: CharacterClass,
        level: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            class,
            origin: None,
            level,
            strength: 0,
            agility: 0,
            vitality: 0,
            endurance: 0,
            intelligence: 0,
            wisdom: 0,
            luck: 0,
            charisma: 0,
            armor: 0,
            magic_resist: 0,
            equipment_bonuses: None,
            items: Vec::new(),
            stance: None,
        }
    }

    /// Sets all eight attributes in `AttributeType::all()` order
    /// (STR, AGI, VIT, END, INT, WIS, LCK, CHA).
    pub fn with_attributes(mut self, values: [i32; NUM_ATTRIBUTES]) -> Self {
        for (attr, value) in AttributeType::all().into_iter().zip(values) {
            *self.attribute_mut(attr) = value;
        }
        self
    }

    pub fn with_attribute(mut self, attr: AttributeType, value: i32) -> Self {
        *self.attribute_mut(attr) = value;
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_magic_resist(mut self, magic_resist: i32) -> Self {
        self.magic_resist = magic_resist;
        self
    }

    pub fn with_equipment_bonuses(mut self, bonuses: AttributeBonuses) -> Self {
        self.equipment_bonuses = Some(bonuses);
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn with_stance(mut self, stance: Stance) -> Self {
        self.stance = Some(stance);
        self
    }

    pub fn attribute(&self, attr: AttributeType) -> i32 {
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

    fn attribute_mut(&mut self, attr: AttributeType) -> &mut i32 {
        match attr {
            AttributeType::Strength => &mut self.strength,
            AttributeType::Agility => &mut self.agility,
            AttributeType::Vitality => &mut self.vitality,
            AttributeType::Endurance => &mut self.endurance,
            AttributeType::Intelligence => &mut self.intelligence,
            AttributeType::Wisdom => &mut self.wisdom,
            AttributeType::Luck => &mut self.luck,
            AttributeType::Charisma => &mut self.charisma,
        }
    }

    pub fn build(&self) -> Result<CombatantState, BuildError> {
        build_combatant_state(self)
    }
}

/// Builds a full-health combatant with no effects or cooldowns.
///
/// Origin bonuses, `equipment_bonuses` and attribute stats on `items` are
/// added to the base attributes before any derived stat is computed.
pub fn build_combatant_state(spec: &CombatantSpec) -> Result<CombatantState, BuildError> {
    if spec.id.trim().is_empty() {
        return Err(BuildError::EmptyId);
    }
    if spec.level == 0 {
        return Err(BuildError::ZeroLevel);
    }

    let mut attributes = Attributes::new();
    for attr in AttributeType::all() {
        let value = spec.attribute(attr);
        if value < 0 {
            return Err(BuildError::NegativeAttribute {
                attribute: attr.name(),
                value,
            });
        }
        attributes.set(attr, value as u32);
    }
    if spec.armor < 0 {
        return Err(BuildError::NegativeArmor(spec.armor));
    }
    if spec.magic_resist < 0 {
        return Err(BuildError::NegativeMagicResist(spec.magic_resist));
    }

    let stance = spec.stance.unwrap_or_default();
    validate_stance(&stance).map_err(BuildError::InvalidStance)?;

    let equipment = Equipment::from_items(spec.items.iter().cloned());

    if let Some(origin) = spec.origin {
        attributes.add(&origin.bonuses());
    }
    if let Some(bonuses) = &spec.equipment_bonuses {
        attributes.add(bonuses);
    }
    attributes.add(&equipment.attribute_bonuses());

    let base_armor = spec.armor as u32;
    let armor = base_armor.saturating_add(equipment.total_armor());
    let magic_resist = (spec.magic_resist as u32).saturating_add(equipment.total_magic_resist());
    let derived = DerivedStats::compute(&attributes, armor, magic_resist);

    let zone_armor = if spec.items.is_empty() {
        None
    } else {
        let mut zones = equipment.zone_armor();
        spread_base_armor(&mut zones, base_armor);
        Some(zones)
    };

    Ok(CombatantState {
        id: spec.id.clone(),
        name: spec.name.clone(),
        class: spec.class,
        origin: spec.origin,
        level: spec.level,
        attributes,
        derived,
        current_hp: derived.max_hp,
        status_effects: Vec::new(),
        ability_cooldowns: BTreeMap::new(),
        zone_armor,
        stance,
        actions_taken: 0,
    })
}

// Armor not tied to an item covers every zone equally; the remainder sits on the torso
fn spread_base_armor(zones: &mut ZoneArmor, armor: u32) {
    let share = armor / BodyZone::all().len() as u32;
    for zone in BodyZone::all() {
        zones.add(zone, share);
    }
    zones.add(BodyZone::Torso, armor - share * BodyZone::all().len() as u32);
}
