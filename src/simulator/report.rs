//! Simulation report generation.

use crate::combat::types::{CombatLogEntry, CombatResult, CombatantState};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FightOutcome {
    AWins,
    BWins,
    Draw,
}

/// Numbers pulled out of one fight's result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FightStats {
    pub outcome: FightOutcome,
    pub turns: u32,
    /// Damaging actions attempted by either side
    pub attacks: u32,
    pub dodges: u32,
    pub crits: u32,
    pub blocks: u32,
    /// Direct damage dealt by each side (status ticks excluded)
    pub damage_a: u32,
    pub damage_b: u32,
}

impl FightStats {
    pub fn from_result(result: &CombatResult) -> Self {
        let id_a = &result.combatant_a.id;
        let outcome = match &result.winner_id {
            None => FightOutcome::Draw,
            Some(winner) if winner == id_a => FightOutcome::AWins,
            Some(_) => FightOutcome::BWins,
        };

        let attacks: Vec<&CombatLogEntry> = result.log.iter().filter(|e| e.dodged.is_some()).collect();

        Self {
            outcome,
            turns: result.turns,
            attacks: attacks.len() as u32,
            dodges: attacks.iter().filter(|e| e.dodged == Some(true)).count() as u32,
            crits: attacks.iter().filter(|e| e.crit == Some(true)).count() as u32,
            blocks: attacks.iter().filter(|e| e.blocked == Some(true)).count() as u32,
            damage_a: result.damage_dealt_by(id_a),
            damage_b: result.damage_dealt_by(&result.combatant_b.id),
        }
    }
}

/// Aggregated results from a batch of fights.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub name_a: String,
    pub name_b: String,
    pub num_fights: u32,

    pub wins_a: u32,
    pub wins_b: u32,
    pub draws: u32,
    pub win_rate_a: f64,
    pub win_rate_b: f64,
    pub draw_rate: f64,

    pub avg_turns: f64,
    pub min_turns: u32,
    pub max_turns: u32,
    pub turn_distribution: BTreeMap<u32, u32>,

    /// Dodges per attempted attack
    pub dodge_rate: f64,
    /// Crits and blocks per attack that was not dodged
    pub crit_rate: f64,
    pub block_rate: f64,

    pub avg_damage_a: f64,
    pub avg_damage_b: f64,

    #[serde(skip)]
    pub fights: Vec<FightStats>,
}

impl SimReport {
    pub fn from_fights(a: &CombatantState, b: &CombatantState, fights: Vec<FightStats>) -> Self {
        let num_fights = fights.len() as u32;
        let denom = num_fights.max(1) as f64;

        let count = |outcome: FightOutcome| fights.iter().filter(|f| f.outcome == outcome).count() as u32;
        let wins_a = count(FightOutcome::AWins);
        let wins_b = count(FightOutcome::BWins);
        let draws = count(FightOutcome::Draw);

        let mut turn_distribution = BTreeMap::new();
        for fight in &fights {
            *turn_distribution.entry(fight.turns).or_insert(0) += 1;
        }

        let attacks: u32 = fights.iter().map(|f| f.attacks).sum();
        let dodges: u32 = fights.iter().map(|f| f.dodges).sum();
        let connected = attacks.saturating_sub(dodges).max(1) as f64;

        Self {
            name_a: a.name.clone(),
            name_b: b.name.clone(),
            num_fights,
            wins_a,
            wins_b,
            draws,
            win_rate_a: wins_a as f64 / denom,
            win_rate_b: wins_b as f64 / denom,
            draw_rate: draws as f64 / denom,
            avg_turns: fights.iter().map(|f| f.turns as f64).sum::<f64>() / denom,
            min_turns: fights.iter().map(|f| f.turns).min().unwrap_or(0),
            max_turns: fights.iter().map(|f| f.turns).max().unwrap_or(0),
            turn_distribution,
            dodge_rate: dodges as f64 / attacks.max(1) as f64,
            crit_rate: fights.iter().map(|f| f.crits).sum::<u32>() as f64 / connected,
            block_rate: fights.iter().map(|f| f.blocks).sum::<u32>() as f64 / connected,
            avg_damage_a: fights.iter().map(|f| f.damage_a as f64).sum::<f64>() / denom,
            avg_damage_b: fights.iter().map(|f| f.damage_b as f64).sum::<f64>() / denom,
            fights,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                      DUEL SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "{} vs {}: {} fights\n\n",
            self.name_a, self.name_b, self.num_fights
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  {:<20} {:>6} wins  {:>5.1}%\n",
            self.name_a,
            self.wins_a,
            self.win_rate_a * 100.0
        ));
        report.push_str(&format!(
            "  {:<20} {:>6} wins  {:>5.1}%\n",
            self.name_b,
            self.wins_b,
            self.win_rate_b * 100.0
        ));
        report.push_str(&format!(
            "  {:<20} {:>6}       {:>5.1}%\n\n",
            "Draws",
            self.draws,
            self.draw_rate * 100.0
        ));

        report.push_str("── FIGHT LENGTH ─────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Turns:  {:.2}  (min {}, max {})\n",
            self.avg_turns, self.min_turns, self.max_turns
        ));
        for (turns, fights) in &self.turn_distribution {
            let pct = *fights as f64 / self.num_fights.max(1) as f64 * 100.0;
            let bar: String = "█".repeat((pct / 2.0) as usize);
            report.push_str(&format!("  {:>2} turns: {:>5.1}% {}\n", turns, pct, bar));
        }
        report.push('\n');

        report.push_str("── COMBAT RATES ─────────────────────────────────────────────────\n");
        report.push_str(&format!("  Dodge Rate: {:.1}%\n", self.dodge_rate * 100.0));
        report.push_str(&format!("  Crit Rate:  {:.1}%\n", self.crit_rate * 100.0));
        report.push_str(&format!("  Block Rate: {:.1}%\n", self.block_rate * 100.0));
        report.push_str(&format!(
            "  Avg Damage: {} {:.0}, {} {:.0}\n\n",
            self.name_a, self.avg_damage_a, self.name_b, self.avg_damage_b
        ));

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let spread = (self.win_rate_a - self.win_rate_b).abs();
        let rating = if spread < 0.1 {
            "EVEN - Neither side dominates"
        } else if spread < 0.3 {
            "FAVORED - One side has a clear edge"
        } else {
            "LOPSIDED - Matchup is decided before it starts"
        };
        report.push_str(&format!("  Matchup: {}\n", rating));
        if self.draw_rate > 0.25 {
            report.push_str("  ⚠️  Many fights hit the turn limit - damage too low?\n");
        }
        if self.avg_turns < 2.0 {
            report.push_str("  ⚠️  Fights end almost immediately - damage too high?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::class::CharacterClass;
    use crate::combat::builder::CombatantSpec;

    fn state(id: &str) -> CombatantState {
        CombatantSpec::new(id, id.to_uppercase(), CharacterClass::Warrior, 1)
            .build()
            .unwrap()
    }

    fn fight(outcome: FightOutcome, turns: u32) -> FightStats {
        FightStats {
            outcome,
            turns,
            attacks: 10,
            dodges: 2,
            crits: 4,
            blocks: 1,
            damage_a: 300,
            damage_b: 100,
        }
    }

    #[test]
    fn test_rates_and_averages() {
        let fights = vec![
            fight(FightOutcome::AWins, 4),
            fight(FightOutcome::AWins, 6),
            fight(FightOutcome::BWins, 8),
            fight(FightOutcome::Draw, 15),
        ];
        let report = SimReport::from_fights(&state("a"), &state("b"), fights);

        assert_eq!(report.num_fights, 4);
        assert_eq!((report.wins_a, report.wins_b, report.draws), (2, 1, 1));
        assert!((report.win_rate_a - 0.5).abs() < 1e-9);
        assert!((report.avg_turns - 8.25).abs() < 1e-9);
        assert_eq!((report.min_turns, report.max_turns), (4, 15));
        assert!((report.dodge_rate - 0.2).abs() < 1e-9);
        assert!((report.crit_rate - 0.5).abs() < 1e-9);
        assert!((report.block_rate - 0.125).abs() < 1e-9);
        assert_eq!(report.turn_distribution.get(&15), Some(&1));
    }

    #[test]
    fn test_empty_batch_has_no_nan() {
        let report = SimReport::from_fights(&state("a"), &state("b"), Vec::new());
        assert_eq!(report.win_rate_a, 0.0);
        assert_eq!(report.avg_turns, 0.0);
        assert_eq!(report.crit_rate, 0.0);
    }

    #[test]
    fn test_text_and_json_output() {
        let report = SimReport::from_fights(&state("a"), &state("b"), vec![fight(FightOutcome::AWins, 5)]);
        let text = report.to_text();
        assert!(text.contains("A vs B: 1 fights"));
        assert!(text.contains("Crit Rate"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["wins_a"], 1);
        assert!(json.get("fights").is_none());
    }
}
