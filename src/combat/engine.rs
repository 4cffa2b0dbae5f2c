//! Turn-based duel resolution.
//!
//! A fight is a sequence of rounds. In each round both combatants act once,
//! faster (effective agility) side first, side A winning ties. A turn is:
//!
//! 1. tick status effects (DoT damage, stun check, durations count down)
//! 2. pick the action from the side's choice queue, falling back to `basic`
//! 3. resolve it: zone, dodge, block, crit, damage, on-hit effect
//! 4. start the used ability's cooldown, then count all cooldowns down
//!
//! The fight ends after the first round that leaves someone dead, or after
//! [`MAX_TURNS`] rounds. All randomness comes from the caller's RNG, so the
//! same inputs and seed always replay the same log.

use crate::character::attributes::AttributeType;
use crate::combat::abilities::{
    basic_attack, get_ability_by_id, AbilityDef, AbilityKind, OnHitEffect, ZoneTarget,
};
use crate::combat::damage::{calc_magic_damage, calc_physical_damage_in_zone, roll_crit, roll_dodge, roll_percent};
use crate::combat::types::{
    CombatLogEntry, CombatOutcome, CombatResult, CombatantState, StatusEffect, StatusEffectKind,
};
use crate::combat::zones::BodyZone;
use crate::core::constants::{BLOCK_DAMAGE_MULT, MAX_TURNS, MIN_DAMAGE, STATUS_TICK_ACTION, STUN_ACTION};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatPhase {
    NotStarted,
    /// The fight is live; this many rounds have resolved.
    Turn(u32),
    Terminal(CombatOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    A,
    B,
}

/// A fight that can be advanced one round at a time.
#[derive(Debug, Clone)]
pub struct CombatEngine {
    a: CombatantState,
    b: CombatantState,
    choices_a: VecDeque<String>,
    choices_b: VecDeque<String>,
    log: Vec<CombatLogEntry>,
    phase: CombatPhase,
    rounds: u32,
}

impl CombatEngine {
    /// The two combatants must have distinct ids; the outcome names sides by id.
    pub fn new(a: CombatantState, b: CombatantState, choices_a: &[&str], choices_b: &[&str]) -> Self {
        debug_assert_ne!(a.id, b.id, "combatants share an id");
        Self {
            a,
            b,
            choices_a: choices_a.iter().map(|id| id.to_string()).collect(),
            choices_b: choices_b.iter().map(|id| id.to_string()).collect(),
            log: Vec::new(),
            phase: CombatPhase::NotStarted,
            rounds: 0,
        }
    }

    pub fn phase(&self) -> &CombatPhase {
        &self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, CombatPhase::Terminal(_))
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn log(&self) -> &[CombatLogEntry] {
        &self.log
    }

    pub fn combatants(&self) -> (&CombatantState, &CombatantState) {
        (&self.a, &self.b)
    }

    /// Resolves one full round. Does nothing once the fight is over.
    pub fn step_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &CombatPhase {
        if self.is_finished() {
            return &self.phase;
        }

        self.rounds += 1;
        let round = self.rounds;

        for side in self.turn_order() {
            let (actor, target, choices) = match side {
                Side::A => (&mut self.a, &mut self.b, &mut self.choices_a),
                Side::B => (&mut self.b, &mut self.a, &mut self.choices_b),
            };
            if !actor.is_alive() || !target.is_alive() {
                continue;
            }
            take_turn(actor, target, choices, round, &mut self.log, rng);
        }

        self.phase = self.phase_after_round();
        &self.phase
    }

    /// Runs the remaining rounds and hands back the result with both final snapshots.
    pub fn finish<R: Rng + ?Sized>(mut self, rng: &mut R) -> CombatResult {
        loop {
            let phase = self.step_round(rng).clone();
            if let CombatPhase::Terminal(outcome) = phase {
                return CombatResult::new(outcome, self.rounds, self.log, self.a, self.b);
            }
        }
    }

    fn turn_order(&self) -> [Side; 2] {
        if self.b.effective_agility() > self.a.effective_agility() {
            [Side::B, Side::A]
        } else {
            [Side::A, Side::B]
        }
    }

    fn phase_after_round(&self) -> CombatPhase {
        match (self.a.is_alive(), self.b.is_alive()) {
            (true, false) => CombatPhase::Terminal(victory(&self.a, &self.b)),
            (false, true) => CombatPhase::Terminal(victory(&self.b, &self.a)),
            (false, false) => CombatPhase::Terminal(CombatOutcome::Draw),
            (true, true) if self.rounds >= MAX_TURNS => CombatPhase::Terminal(CombatOutcome::Draw),
            (true, true) => CombatPhase::Turn(self.rounds),
        }
    }
}

fn victory(winner: &CombatantState, loser: &CombatantState) -> CombatOutcome {
    CombatOutcome::Victory {
        winner_id: winner.id.clone(),
        loser_id: loser.id.clone(),
    }
}

/// Runs a full fight. Side B always uses `basic`. The two ids must differ.
pub fn run_combat<R: Rng + ?Sized>(
    a: CombatantState,
    b: CombatantState,
    choices_a: &[&str],
    rng: &mut R,
) -> CombatResult {
    run_combat_with_choices(a, b, choices_a, &[], rng)
}

pub fn run_combat_with_choices<R: Rng + ?Sized>(
    a: CombatantState,
    b: CombatantState,
    choices_a: &[&str],
    choices_b: &[&str],
    rng: &mut R,
) -> CombatResult {
    CombatEngine::new(a, b, choices_a, choices_b).finish(rng)
}

/// Parameters of a damaging action.
#[derive(Debug, Clone, Copy)]
struct Attack {
    multiplier: f64,
    /// Zone targeting for physical attacks; `None` for spells.
    aim: Option<ZoneTarget>,
    ignores_block: bool,
    on_hit: Option<OnHitEffect>,
}

fn take_turn<R: Rng + ?Sized>(
    actor: &mut CombatantState,
    target: &mut CombatantState,
    choices: &mut VecDeque<String>,
    turn: u32,
    log: &mut Vec<CombatLogEntry>,
    rng: &mut R,
) {
    let stunned = tick_status_effects(actor, turn, log);
    if !actor.is_alive() {
        return;
    }
    if stunned {
        log.push(CombatLogEntry::new(
            turn,
            &actor.id,
            &actor.id,
            STUN_ACTION,
            format!("{} is stunned and cannot act", actor.name),
        ));
        actor.tick_cooldowns();
        return;
    }

    let choice = choices.pop_front();
    let ability = select_ability(actor, choice.as_deref());
    actor.actions_taken += 1;

    let landed = match ability.kind {
        AbilityKind::Buff {
            stat,
            multiplier,
            duration,
        } => {
            apply_buff(actor, &ability, stat, multiplier, duration, turn, log);
            true
        }
        AbilityKind::Physical {
            multiplier,
            target: aim,
            ignores_block,
            on_hit,
        } => {
            let attack = Attack {
                multiplier,
                aim: Some(aim),
                ignores_block,
                on_hit,
            };
            resolve_attack(actor, target, &ability, attack, turn, log, rng)
        }
        AbilityKind::Magic { multiplier, on_hit } => {
            let attack = Attack {
                multiplier,
                aim: None,
                ignores_block: true,
                on_hit,
            };
            resolve_attack(actor, target, &ability, attack, turn, log, rng)
        }
    };

    if landed && ability.cooldown > 0 {
        actor.set_cooldown(ability.id, ability.cooldown);
    }
    actor.tick_cooldowns();
}

/// Applies DoT damage, counts every effect down and drops expired ones.
/// Returns whether the combatant was stunned going into this turn.
fn tick_status_effects(actor: &mut CombatantState, turn: u32, log: &mut Vec<CombatLogEntry>) -> bool {
    let stunned = actor.is_stunned();

    let ticks: Vec<(u32, String)> = actor
        .status_effects
        .iter()
        .filter_map(|effect| match effect.kind {
            StatusEffectKind::DamageOverTime { per_turn } => Some((per_turn, effect.source.clone())),
            _ => None,
        })
        .collect();

    for (damage, source) in ticks {
        actor.take_damage(damage);
        let mut entry = CombatLogEntry::new(
            turn,
            &actor.id,
            &actor.id,
            STATUS_TICK_ACTION,
            format!("{} takes {} damage from {}", actor.name, damage, source),
        );
        entry.damage = Some(damage);
        log.push(entry);
        if !actor.is_alive() {
            break;
        }
    }

    for effect in &mut actor.status_effects {
        effect.remaining = effect.remaining.saturating_sub(1);
    }
    actor.status_effects.retain(|effect| effect.remaining > 0);

    stunned
}

/// The chosen ability if the actor may use it right now, else `basic`.
fn select_ability(actor: &CombatantState, choice: Option<&str>) -> AbilityDef {
    let basic = basic_attack(actor.class);
    let Some(id) = choice else {
        return basic;
    };

    match get_ability_by_id(actor.class, id) {
        Some(ability) if is_usable(actor, ability) => *ability,
        _ => basic,
    }
}

fn is_usable(actor: &CombatantState, ability: &AbilityDef) -> bool {
    ability.unlock_level <= actor.level
        && actor.cooldown(ability.id) == 0
        && !(ability.first_strike_only && actor.actions_taken > 0)
}

fn apply_buff(
    actor: &mut CombatantState,
    ability: &AbilityDef,
    stat: AttributeType,
    multiplier: f64,
    duration: u32,
    turn: u32,
    log: &mut Vec<CombatLogEntry>,
) {
    actor.apply_status(StatusEffect {
        kind: StatusEffectKind::Buff { stat, multiplier },
        remaining: duration,
        source: ability.id.to_string(),
    });
    log.push(CombatLogEntry::new(
        turn,
        &actor.id,
        &actor.id,
        ability.id,
        format!(
            "{} uses {}: {} x{:.2} for {} turns",
            actor.name,
            ability.name,
            stat.name(),
            multiplier,
            duration
        ),
    ));
}

/// Resolves a damaging action. Returns `false` when the target dodged.
fn resolve_attack<R: Rng + ?Sized>(
    actor: &CombatantState,
    target: &mut CombatantState,
    ability: &AbilityDef,
    attack: Attack,
    turn: u32,
    log: &mut Vec<CombatLogEntry>,
    rng: &mut R,
) -> bool {
    let zone = match attack.aim {
        Some(ZoneTarget::Stance) => Some(target.stance.sample_zone(rng)),
        Some(ZoneTarget::Zone(zone)) => Some(zone),
        Some(ZoneTarget::AllZones) | None => None,
    };

    let mut entry = CombatLogEntry::new(turn, &actor.id, &target.id, ability.id, String::new());
    entry.zone = zone;

    if roll_dodge(target.effective_dodge_chance(), rng) {
        entry.dodged = Some(true);
        entry.message = format!("{} dodges {}'s {}", target.name, actor.name, ability.name);
        log.push(entry);
        return false;
    }

    let blocked = match zone {
        Some(zone) if !attack.ignores_block => {
            let chance = target.stance.block_chance(zone);
            chance > 0.0 && roll_percent(chance, rng)
        }
        _ => false,
    };

    let crit = roll_crit(actor.effective_crit_chance(), rng);
    let crit_mult = actor.effective_crit_mult();

    let mut damage = if attack.aim.is_some() {
        let zone_mult = zone.map_or_else(BodyZone::mean_damage_multiplier, |z| z.damage_multiplier());
        calc_physical_damage_in_zone(
            actor.effective_attribute(AttributeType::Strength),
            target.effective_attribute(AttributeType::Endurance),
            target.armor_against(zone),
            attack.multiplier,
            crit,
            crit_mult,
            zone_mult,
            rng,
        )
    } else {
        calc_magic_damage(
            actor.effective_attribute(AttributeType::Intelligence),
            target.derived.magic_resist_rating,
            attack.multiplier,
            crit,
            crit_mult,
            rng,
        )
    };
    if blocked {
        damage = ((damage as f64 * BLOCK_DAMAGE_MULT).floor() as u32).max(MIN_DAMAGE);
    }

    target.take_damage(damage);

    let mut message = format!("{} hits {} with {}", actor.name, target.name, ability.name);
    if let Some(zone) = zone {
        message.push_str(&format!(" to the {}", zone.name()));
    }
    message.push_str(&format!(" for {} damage", damage));
    if crit {
        message.push_str(" (critical)");
    }
    if blocked {
        message.push_str(" (blocked)");
    }

    if !blocked && target.is_alive() {
        match attack.on_hit {
            Some(OnHitEffect::Stun { turns }) => {
                target.apply_status(StatusEffect {
                    kind: StatusEffectKind::Stun,
                    remaining: turns,
                    source: ability.id.to_string(),
                });
                message.push_str(&format!(", {} is stunned", target.name));
            }
            Some(OnHitEffect::DamageOverTime { fraction, turns }) => {
                let per_turn = ((damage as f64 * fraction).floor() as u32).max(MIN_DAMAGE);
                target.apply_status(StatusEffect {
                    kind: StatusEffectKind::DamageOverTime { per_turn },
                    remaining: turns,
                    source: ability.id.to_string(),
                });
                message.push_str(&format!(", {} per turn for {} turns", per_turn, turns));
            }
            None => {}
        }
    }

    entry.damage = Some(damage);
    entry.dodged = Some(false);
    entry.crit = Some(crit);
    entry.blocked = blocked.then_some(true);
    entry.message = message;
    log.push(entry);
    true
}
