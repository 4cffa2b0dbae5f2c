use crate::character::attributes::{AttributeType, Attributes};
use crate::character::class::{CharacterClass, Origin};
use crate::character::derived_stats::{crit_chance, crit_damage_mult, dodge_chance, DerivedStats};
use crate::combat::zones::{BodyZone, Stance, ZoneArmor};
use crate::core::constants::{STATUS_TICK_ACTION, STUN_ACTION};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatusEffectKind {
    Stun,
    DamageOverTime { per_turn: u32 },
    Buff { stat: AttributeType, multiplier: f64 },
}

/// A timed effect on a combatant. Removed once `remaining` reaches zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub remaining: u32,
    /// Ability id that applied the effect.
    pub source: String,
}

/// A combatant during a fight.
///
/// Built once per fight by [`crate::combat::build_combatant_state`], mutated
/// by the engine round by round, and handed back inside the
/// [`CombatResult`] as the final snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantState {
    pub id: String,
    pub name: String,
    pub class: CharacterClass,
    pub origin: Option<Origin>,
    pub level: u32,
    /// Final attributes, origin and equipment bonuses included.
    pub attributes: Attributes,
    pub derived: DerivedStats,
    pub current_hp: u32,
    pub status_effects: Vec<StatusEffect>,
    pub ability_cooldowns: BTreeMap<String, u32>,
    /// Per-zone armor when the combatant was built from items.
    pub zone_armor: Option<ZoneArmor>,
    pub stance: Stance,
    /// Actions resolved so far this fight (stunned turns excluded).
    pub actions_taken: u32,
}

impl CombatantState {
    pub fn max_hp(&self) -> u32 {
        self.derived.max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Applies damage, flooring HP at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    pub fn cooldown(&self, ability_id: &str) -> u32 {
        self.ability_cooldowns.get(ability_id).copied().unwrap_or(0)
    }

    pub fn set_cooldown(&mut self, ability_id: &str, turns: u32) {
        if turns == 0 {
            self.ability_cooldowns.remove(ability_id);
        } else {
            self.ability_cooldowns.insert(ability_id.to_string(), turns);
        }
    }

    /// Counts every running cooldown down by one and drops finished ones.
    pub fn tick_cooldowns(&mut self) {
        for turns in self.ability_cooldowns.values_mut() {
            *turns = turns.saturating_sub(1);
        }
        self.ability_cooldowns.retain(|_, turns| *turns > 0);
    }

    pub fn is_stunned(&self) -> bool {
        self.status_effects
            .iter()
            .any(|effect| effect.kind == StatusEffectKind::Stun && effect.remaining > 0)
    }

    /// Adds an effect. An effect of the same kind from the same source is
    /// refreshed instead of stacked; stuns never stack and keep the longer duration.
    pub fn apply_status(&mut self, effect: StatusEffect) {
        if effect.remaining == 0 {
            return;
        }

        let existing = self.status_effects.iter_mut().find(|current| {
            std::mem::discriminant(&current.kind) == std::mem::discriminant(&effect.kind)
                && (effect.kind == StatusEffectKind::Stun || current.source == effect.source)
        });

        match existing {
            Some(current) if effect.kind == StatusEffectKind::Stun => {
                current.remaining = current.remaining.max(effect.remaining);
            }
            Some(current) => *current = effect,
            None => self.status_effects.push(effect),
        }
    }

    /// Product of every active buff on `attr`.
    pub fn buff_multiplier(&self, attr: AttributeType) -> f64 {
        self.status_effects
            .iter()
            .filter_map(|effect| match effect.kind {
                StatusEffectKind::Buff { stat, multiplier } if stat == attr => Some(multiplier),
                _ => None,
            })
            .product()
    }

    pub fn effective_attribute(&self, attr: AttributeType) -> u32 {
        let base = self.attributes.get(attr);
        let multiplier = self.buff_multiplier(attr);
        if multiplier == 1.0 {
            return base;
        }
        (base as f64 * multiplier).floor() as u32
    }

    pub fn effective_agility(&self) -> u32 {
        self.effective_attribute(AttributeType::Agility)
    }

    pub fn effective_dodge_chance(&self) -> f64 {
        dodge_chance(self.effective_agility())
    }

    pub fn effective_crit_chance(&self) -> f64 {
        crit_chance(self.effective_agility(), self.attributes.luck())
    }

    pub fn effective_crit_mult(&self) -> f64 {
        crit_damage_mult(self.effective_attribute(AttributeType::Strength))
    }

    /// Armor mitigating a physical hit on `zone`; `None` means every zone at once.
    pub fn armor_against(&self, zone: Option<BodyZone>) -> u32 {
        match (self.zone_armor, zone) {
            (Some(zones), Some(zone)) => zones.effective_for(zone),
            (Some(zones), None) => zones.total(),
            (None, _) => self.derived.armor,
        }
    }
}

/// One resolved action or status tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatLogEntry {
    pub turn: u32,
    pub actor_id: String,
    pub target_id: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dodged: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<BodyZone>,
    pub message: String,
}

impl CombatLogEntry {
    pub(crate) fn new(
        turn: u32,
        actor_id: &str,
        target_id: &str,
        action: &str,
        message: String,
    ) -> Self {
        Self {
            turn,
            actor_id: actor_id.to_string(),
            target_id: target_id.to_string(),
            action: action.to_string(),
            damage: None,
            dodged: None,
            crit: None,
            blocked: None,
            zone: None,
            message,
        }
    }

    /// Status ticks and stunned turns, as opposed to chosen actions.
    pub fn is_status(&self) -> bool {
        self.action == STATUS_TICK_ACTION || self.action == STUN_ACTION
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    Victory { winner_id: String, loser_id: String },
    Draw,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatResult {
    /// `None` together with `loser_id` exactly when `draw` is set.
    pub winner_id: Option<String>,
    pub loser_id: Option<String>,
    pub draw: bool,
    pub turns: u32,
    pub log: Vec<CombatLogEntry>,
    pub combatant_a: CombatantState,
    pub combatant_b: CombatantState,
}

impl CombatResult {
    pub(crate) fn new(
        outcome: CombatOutcome,
        turns: u32,
        log: Vec<CombatLogEntry>,
        combatant_a: CombatantState,
        combatant_b: CombatantState,
    ) -> Self {
        let (winner_id, loser_id, draw) = match outcome {
            CombatOutcome::Victory { winner_id, loser_id } => (Some(winner_id), Some(loser_id), false),
            CombatOutcome::Draw => (None, None, true),
        };
        Self {
            winner_id,
            loser_id,
            draw,
            turns,
            log,
            combatant_a,
            combatant_b,
        }
    }

    pub fn outcome(&self) -> CombatOutcome {
        match (&self.winner_id, &self.loser_id) {
            (Some(winner_id), Some(loser_id)) => CombatOutcome::Victory {
                winner_id: winner_id.clone(),
                loser_id: loser_id.clone(),
            },
            _ => CombatOutcome::Draw,
        }
    }

    /// Final snapshot of the winner, if there is one.
    pub fn winner(&self) -> Option<&CombatantState> {
        let winner_id = self.winner_id.as_deref()?;
        [&self.combatant_a, &self.combatant_b]
            .into_iter()
            .find(|c| c.id == winner_id)
    }

    /// Total damage dealt by the combatant with `actor_id`, status ticks excluded.
    pub fn damage_dealt_by(&self, actor_id: &str) -> u32 {
        self.log
            .iter()
            .filter(|entry| entry.actor_id == actor_id && !entry.is_status())
            .filter_map(|entry| entry.damage)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::zones::default_stance;

    fn combatant() -> CombatantState {
        let mut attributes = Attributes::new();
        attributes.set(AttributeType::Strength, 50);
        attributes.set(AttributeType::Agility, 40);
        attributes.set(AttributeType::Vitality, 20);
        let derived = DerivedStats::compute(&attributes, 30, 0);
        CombatantState {
            id: "hero".to_string(),
            name: "Hero".to_string(),
            class: CharacterClass::Warrior,
            origin: None,
            level: 10,
            attributes,
            derived,
            current_hp: derived.max_hp,
            status_effects: Vec::new(),
            ability_cooldowns: BTreeMap::new(),
            zone_armor: None,
            stance: default_stance(),
            actions_taken: 0,
        }
    }

    fn buff(stat: AttributeType, multiplier: f64, source: &str) -> StatusEffect {
        StatusEffect {
            kind: StatusEffectKind::Buff { stat, multiplier },
            remaining: 3,
            source: source.to_string(),
        }
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut c = combatant();
        c.take_damage(50);
        assert_eq!(c.current_hp, 150);
        c.take_damage(10_000);
        assert_eq!(c.current_hp, 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_cooldowns_tick_and_clear() {
        let mut c = combatant();
        c.set_cooldown("heavy_strike", 2);
        c.set_cooldown("skull_crack", 1);
        c.tick_cooldowns();
        assert_eq!(c.cooldown("heavy_strike"), 1);
        assert_eq!(c.cooldown("skull_crack"), 0);
        assert!(!c.ability_cooldowns.contains_key("skull_crack"));
        c.tick_cooldowns();
        assert!(c.ability_cooldowns.is_empty());
    }

    #[test]
    fn test_buffs_multiply_effective_attribute() {
        let mut c = combatant();
        assert_eq!(c.effective_attribute(AttributeType::Strength), 50);
        c.apply_status(buff(AttributeType::Strength, 1.5, "battle_cry"));
        assert_eq!(c.effective_attribute(AttributeType::Strength), 75);
        assert_eq!(c.effective_agility(), 40);
    }

    #[test]
    fn test_same_source_buff_refreshes() {
        let mut c = combatant();
        c.apply_status(buff(AttributeType::Strength, 1.5, "battle_cry"));
        c.apply_status(buff(AttributeType::Strength, 1.5, "battle_cry"));
        assert_eq!(c.status_effects.len(), 1);
        assert_eq!(c.effective_attribute(AttributeType::Strength), 75);
    }

    #[test]
    fn test_stun_keeps_longer_duration() {
        let mut c = combatant();
        c.apply_status(StatusEffect {
            kind: StatusEffectKind::Stun,
            remaining: 2,
            source: "skull_crack".to_string(),
        });
        c.apply_status(StatusEffect {
            kind: StatusEffectKind::Stun,
            remaining: 1,
            source: "shield_bash".to_string(),
        });
        assert_eq!(c.status_effects.len(), 1);
        assert_eq!(c.status_effects[0].remaining, 2);
        assert!(c.is_stunned());
    }

    #[test]
    fn test_zero_duration_effect_is_ignored() {
        let mut c = combatant();
        c.apply_status(StatusEffect {
            kind: StatusEffectKind::Stun,
            remaining: 0,
            source: "x".to_string(),
        });
        assert!(c.status_effects.is_empty());
    }

    #[test]
    fn test_agility_buff_raises_dodge() {
        let mut c = combatant();
        let before = c.effective_dodge_chance();
        assert_eq!(before, c.derived.dodge_chance);
        c.apply_status(buff(AttributeType::Agility, 1.5, "shadow_dance"));
        assert!(c.effective_dodge_chance() > before);
    }

    #[test]
    fn test_armor_against_without_zones_uses_total() {
        let c = combatant();
        assert_eq!(c.armor_against(Some(BodyZone::Head)), 30);
        assert_eq!(c.armor_against(None), 30);
    }

    #[test]
    fn test_armor_against_with_zones() {
        let mut c = combatant();
        c.zone_armor = Some(ZoneArmor {
            head: 20,
            torso: 5,
            waist: 0,
            legs: 3,
        });
        assert_eq!(c.armor_against(Some(BodyZone::Head)), 80);
        assert_eq!(c.armor_against(Some(BodyZone::Waist)), 0);
        assert_eq!(c.armor_against(None), 28);
    }

    #[test]
    fn test_log_entry_omits_absent_fields() {
        let entry = CombatLogEntry::new(1, "a", "a", "battle_cry", "A roars".to_string());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("damage"));
        assert!(!json.contains("dodged"));
        assert!(json.contains("\"actor_id\":\"a\""));
    }

    #[test]
    fn test_result_outcome_roundtrip() {
        let a = combatant();
        let mut b = combatant();
        b.id = "rival".to_string();
        let result = CombatResult::new(
            CombatOutcome::Victory {
                winner_id: "hero".to_string(),
                loser_id: "rival".to_string(),
            },
            3,
            Vec::new(),
            a,
            b,
        );
        assert!(!result.draw);
        assert_eq!(result.winner().map(|c| c.id.as_str()), Some("hero"));
        assert_eq!(
            result.outcome(),
            CombatOutcome::Victory {
                winner_id: "hero".to_string(),
                loser_id: "rival".to_string()
            }
        );

        let draw = CombatResult::new(CombatOutcome::Draw, 15, Vec::new(), combatant(), combatant());
        assert!(draw.draw);
        assert!(draw.winner_id.is_none() && draw.loser_id.is_none());
        assert!(draw.winner().is_none());
    }
}
