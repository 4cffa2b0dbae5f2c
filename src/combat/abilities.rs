//! Static per-class ability catalog.
//!
//! Each class owns four abilities unlocking at levels 5, 10, 15 and 20.
//! Abilities are looked up by (class, id); the engine never branches on
//! ability id strings beyond that lookup.

use crate::character::attributes::AttributeType;
use crate::character::class::CharacterClass;
use crate::combat::zones::BodyZone;
use crate::core::constants::BASIC_ATTACK_ID;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityType {
    Physical,
    Magic,
    Buff,
}

/// How a physical ability picks the zone it strikes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneTarget {
    /// Drawn from the defender's stance.
    Stance,
    /// Always this zone.
    Zone(BodyZone),
    /// Every zone at once; mitigation is averaged over all four.
    AllZones,
}

/// Status effect a damaging ability leaves on a target it hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OnHitEffect {
    Stun { turns: u32 },
    /// Ticks for `fraction` of the triggering hit each turn.
    DamageOverTime { fraction: f64, turns: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbilityKind {
    Physical {
        multiplier: f64,
        target: ZoneTarget,
        ignores_block: bool,
        on_hit: Option<OnHitEffect>,
    },
    Magic {
        multiplier: f64,
        on_hit: Option<OnHitEffect>,
    },
    Buff {
        stat: AttributeType,
        multiplier: f64,
        duration: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilityDef {
    pub id: &'static str,
    pub name: &'static str,
    pub class: CharacterClass,
    pub kind: AbilityKind,
    pub cooldown: u32,
    pub unlock_level: u32,
    /// Only usable as the actor's first action of a fight.
    pub first_strike_only: bool,
}

impl AbilityDef {
    pub fn ability_type(&self) -> AbilityType {
        match self.kind {
            AbilityKind::Physical { .. } => AbilityType::Physical,
            AbilityKind::Magic { .. } => AbilityType::Magic,
            AbilityKind::Buff { .. } => AbilityType::Buff,
        }
    }

    /// Damage multiplier for attacks, stat multiplier for buffs.
    pub fn multiplier(&self) -> f64 {
        match self.kind {
            AbilityKind::Physical { multiplier, .. }
            | AbilityKind::Magic { multiplier, .. }
            | AbilityKind::Buff { multiplier, .. } => multiplier,
        }
    }

    pub fn target_zone(&self) -> Option<BodyZone> {
        match self.kind {
            AbilityKind::Physical {
                target: ZoneTarget::Zone(zone),
                ..
            } => Some(zone),
            _ => None,
        }
    }

    pub fn aoe_zones(&self) -> bool {
        matches!(
            self.kind,
            AbilityKind::Physical {
                target: ZoneTarget::AllZones,
                ..
            }
        )
    }

    pub fn ignores_block(&self) -> bool {
        matches!(
            self.kind,
            AbilityKind::Physical {
                ignores_block: true,
                ..
            }
        )
    }

    pub fn on_hit(&self) -> Option<OnHitEffect> {
        match self.kind {
            AbilityKind::Physical { on_hit, .. } | AbilityKind::Magic { on_hit, .. } => on_hit,
            AbilityKind::Buff { .. } => None,
        }
    }

    pub fn is_basic(&self) -> bool {
        self.id == BASIC_ATTACK_ID
    }
}

const fn strike(multiplier: f64, target: ZoneTarget, ignores_block: bool, on_hit: Option<OnHitEffect>) -> AbilityKind {
    AbilityKind::Physical {
        multiplier,
        target,
        ignores_block,
        on_hit,
    }
}

static WARRIOR_ABILITIES: [AbilityDef; 4] = [
    AbilityDef {
        id: "heavy_strike",
        name: "Heavy Strike",
        class: CharacterClass::Warrior,
        kind: strike(1.5, ZoneTarget::Stance, false, None),
        cooldown: 2,
        unlock_level: 5,
        first_strike_only: false,
    },
    AbilityDef {
        id: "skull_crack",
        name: "Skull Crack",
        class: CharacterClass::Warrior,
        kind: strike(
            1.2,
            ZoneTarget::Zone(BodyZone::Head),
            false,
            Some(OnHitEffect::Stun { turns: 1 }),
        ),
        cooldown: 4,
        unlock_level: 10,
        first_strike_only: false,
    },
    AbilityDef {
        id: "battle_cry",
        name: "Battle Cry",
        class: CharacterClass::Warrior,
        kind: AbilityKind::Buff {
            stat: AttributeType::Strength,
            multiplier: 1.25,
            duration: 3,
        },
        cooldown: 5,
        unlock_level: 15,
        first_strike_only: false,
    },
    AbilityDef {
        id: "whirlwind",
        name: "Whirlwind",
        class: CharacterClass::Warrior,
        kind: strike(1.8, ZoneTarget::AllZones, false, None),
        cooldown: 4,
        unlock_level: 20,
        first_strike_only: false,
    },
];

static ROGUE_ABILITIES: [AbilityDef; 4] = [
    AbilityDef {
        id: "backstab",
        name: "Backstab",
        class: CharacterClass::Rogue,
        kind: strike(2.0, ZoneTarget::Stance, true, None),
        cooldown: 3,
        unlock_level: 5,
        first_strike_only: true,
    },
    AbilityDef {
        id: "poison_blade",
        name: "Poison Blade",
        class: CharacterClass::Rogue,
        kind: strike(
            1.0,
            ZoneTarget::Stance,
            false,
            Some(OnHitEffect::DamageOverTime {
                fraction: 0.3,
                turns: 3,
            }),
        ),
        cooldown: 3,
        unlock_level: 10,
        first_strike_only: false,
    },
    AbilityDef {
        id: "shadow_dance",
        name: "Shadow Dance",
        class: CharacterClass::Rogue,
        kind: AbilityKind::Buff {
            stat: AttributeType::Agility,
            multiplier: 1.5,
            duration: 3,
        },
        cooldown: 5,
        unlock_level: 15,
        first_strike_only: false,
    },
    AbilityDef {
        id: "hamstring",
        name: "Hamstring",
        class: CharacterClass::Rogue,
        kind: strike(1.4, ZoneTarget::Zone(BodyZone::Legs), true, None),
        cooldown: 3,
        unlock_level: 20,
        first_strike_only: false,
    },
];

static MAGE_ABILITIES: [AbilityDef; 4] = [
    AbilityDef {
        id: "fireball",
        name: "Fireball",
        class: CharacterClass::Mage,
        kind: AbilityKind::Magic {
            multiplier: 1.6,
            on_hit: Some(OnHitEffect::DamageOverTime {
                fraction: 0.2,
                turns: 2,
            }),
        },
        cooldown: 2,
        unlock_level: 5,
        first_strike_only: false,
    },
    AbilityDef {
        id: "frost_nova",
        name: "Frost Nova",
        class: CharacterClass::Mage,
        kind: AbilityKind::Magic {
            multiplier: 1.2,
            on_hit: Some(OnHitEffect::Stun { turns: 1 }),
        },
        cooldown: 4,
        unlock_level: 10,
        first_strike_only: false,
    },
    AbilityDef {
        id: "arcane_focus",
        name: "Arcane Focus",
        class: CharacterClass::Mage,
        kind: AbilityKind::Buff {
            stat: AttributeType::Intelligence,
            multiplier: 1.3,
            duration: 3,
        },
        cooldown: 5,
        unlock_level: 15,
        first_strike_only: false,
    },
    AbilityDef {
        id: "meteor",
        name: "Meteor",
        class: CharacterClass::Mage,
        kind: AbilityKind::Magic {
            multiplier: 2.4,
            on_hit: None,
        },
        cooldown: 5,
        unlock_level: 20,
        first_strike_only: false,
    },
];

static TANK_ABILITIES: [AbilityDef; 4] = [
    AbilityDef {
        id: "shield_bash",
        name: "Shield Bash",
        class: CharacterClass::Tank,
        kind: strike(
            1.1,
            ZoneTarget::Zone(BodyZone::Torso),
            false,
            Some(OnHitEffect::Stun { turns: 1 }),
        ),
        cooldown: 4,
        unlock_level: 5,
        first_strike_only: false,
    },
    AbilityDef {
        id: "fortify",
        name: "Fortify",
        class: CharacterClass::Tank,
        kind: AbilityKind::Buff {
            stat: AttributeType::Endurance,
            multiplier: 1.5,
            duration: 3,
        },
        cooldown: 5,
        unlock_level: 10,
        first_strike_only: false,
    },
    AbilityDef {
        id: "ground_slam",
        name: "Ground Slam",
        class: CharacterClass::Tank,
        kind: strike(1.3, ZoneTarget::AllZones, false, None),
        cooldown: 3,
        unlock_level: 15,
        first_strike_only: false,
    },
    AbilityDef {
        id: "crushing_blow",
        name: "Crushing Blow",
        class: CharacterClass::Tank,
        kind: strike(1.7, ZoneTarget::Zone(BodyZone::Head), true, None),
        cooldown: 4,
        unlock_level: 20,
        first_strike_only: false,
    },
];

/// Every catalog ability of a class, in unlock order.
pub fn class_abilities(class: CharacterClass) -> &'static [AbilityDef] {
    match class {
        CharacterClass::Warrior => &WARRIOR_ABILITIES,
        CharacterClass::Rogue => &ROGUE_ABILITIES,
        CharacterClass::Mage => &MAGE_ABILITIES,
        CharacterClass::Tank => &TANK_ABILITIES,
    }
}

/// Abilities unlocked at or below `level`, in catalog order.
pub fn get_abilities_for_class(class: CharacterClass, level: u32) -> Vec<&'static AbilityDef> {
    class_abilities(class)
        .iter()
        .filter(|ability| ability.unlock_level <= level)
        .collect()
}

pub fn get_ability_by_id(class: CharacterClass, id: &str) -> Option<&'static AbilityDef> {
    class_abilities(class).iter().find(|ability| ability.id == id)
}

/// The fallback action every class has: a physical swing, or a plain bolt for casters.
pub fn basic_attack(class: CharacterClass) -> AbilityDef {
    let kind = if class.is_caster() {
        AbilityKind::Magic {
            multiplier: 1.0,
            on_hit: None,
        }
    } else {
        strike(1.0, ZoneTarget::Stance, false, None)
    };

    AbilityDef {
        id: BASIC_ATTACK_ID,
        name: "Attack",
        class,
        kind,
        cooldown: 0,
        unlock_level: 1,
        first_strike_only: false,
    }
}
