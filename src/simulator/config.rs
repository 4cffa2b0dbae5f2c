//! Simulation configuration.

use crate::character::class::CharacterClass;
use crate::combat::abilities::get_abilities_for_class;
use crate::combat::builder::{BuildError, CombatantSpec};
use crate::core::constants::MAX_TURNS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("combatant {side}: {source}")]
    Combatant {
        side: char,
        #[source]
        source: BuildError,
    },
    #[error("both combatants use id {0:?}")]
    DuplicateId(String),
    #[error("num_fights must be at least 1")]
    NoFights,
}

/// Configuration for a batch of duels between the same two combatants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of fights to run
    pub num_fights: u32,

    /// Random seed for reproducibility (None = random). Fight `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Log verbosity (0 = warnings only, 1 = summary, 2 = every fight)
    pub verbosity: u8,

    pub combatant_a: CombatantSpec,
    pub combatant_b: CombatantSpec,

    /// Ability ids each side tries in order before falling back to `basic`.
    /// Missing lists mean `basic` only, whatever the preset would pick.
    #[serde(default)]
    pub choices_a: Vec<String>,
    #[serde(default)]
    pub choices_b: Vec<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::class_matchup(CharacterClass::Warrior, CharacterClass::Warrior, 20)
    }
}

impl SimConfig {
    /// Two archetypes of the given classes at the same level, each cycling
    /// through its unlocked abilities.
    pub fn class_matchup(class_a: CharacterClass, class_b: CharacterClass, level: u32) -> Self {
        Self {
            num_fights: 1000,
            seed: None,
            verbosity: 1,
            combatant_a: archetype("a", class_a, level),
            combatant_b: archetype("b", class_b, level),
            choices_a: ability_rotation(class_a, level),
            choices_b: ability_rotation(class_b, level),
        }
    }

    /// Small seeded batch for quick checks
    pub fn quick(num_fights: u32) -> Self {
        Self {
            num_fights,
            seed: Some(42),
            ..Default::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks that both combatants can be built and the batch is non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_fights == 0 {
            return Err(ConfigError::NoFights);
        }
        self.combatant_a
            .build()
            .map_err(|source| ConfigError::Combatant { side: 'A', source })?;
        self.combatant_b
            .build()
            .map_err(|source| ConfigError::Combatant { side: 'B', source })?;
        if self.combatant_a.id == self.combatant_b.id {
            return Err(ConfigError::DuplicateId(self.combatant_a.id.clone()));
        }
        Ok(())
    }
}

/// A typical build for `class` at `level`: attribute points follow the
/// class's weighting and grow with level.
pub fn archetype(id: &str, class: CharacterClass, level: u32) -> CombatantSpec {
    // STR, AGI, VIT, END, INT, WIS, LUCK, CHA
    let weights: [i32; 8] = match class {
        CharacterClass::Warrior => [5, 3, 4, 3, 1, 1, 1, 1],
        CharacterClass::Rogue => [3, 5, 3, 2, 1, 1, 3, 1],
        CharacterClass::Mage => [1, 2, 3, 2, 6, 3, 1, 1],
        CharacterClass::Tank => [3, 1, 5, 5, 1, 2, 1, 1],
    };
    let armor = match class {
        CharacterClass::Warrior => 25,
        CharacterClass::Rogue => 15,
        CharacterClass::Mage => 10,
        CharacterClass::Tank => 40,
    };

    let per_point = 2 + level as i32 / 2;
    CombatantSpec::new(id, format!("{} {}", class.name(), id.to_uppercase()), class, level)
        .with_attributes(weights.map(|w| w * per_point))
        .with_armor(armor + level as i32)
}

/// Unlocked ability ids repeated to cover a full fight.
pub fn ability_rotation(class: CharacterClass, level: u32) -> Vec<String> {
    get_abilities_for_class(class, level)
        .iter()
        .cycle()
        .take(MAX_TURNS as usize)
        .map(|ability| ability.id.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_fights, 1000);
        assert_ne!(config.combatant_a.id, config.combatant_b.id);
    }

    #[test]
    fn test_every_archetype_builds() {
        for class in CharacterClass::all() {
            for level in [1, 10, 20, 50] {
                let state = archetype("x", class, level).build().unwrap();
                assert!(state.current_hp >= 100);
            }
        }
    }

    #[test]
    fn test_rotation_respects_unlocks() {
        assert!(ability_rotation(CharacterClass::Rogue, 1).is_empty());
        let rotation = ability_rotation(CharacterClass::Rogue, 10);
        assert_eq!(rotation.len(), MAX_TURNS as usize);
        assert_eq!(rotation[0], "backstab");
        assert_eq!(rotation[1], "poison_blade");
        assert_eq!(rotation[2], "backstab");
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
            num_fights = 25
            seed = 7
            choices_a = ["heavy_strike"]

            [combatant_a]
            id = "hero"
            name = "Hero"
            class = "warrior"
            level = 20
            strength = 50
            vitality = 40
            armor = 20

            [combatant_b]
            id = "villain"
            name = "Villain"
            class = "mage"
            origin = "undead"
            level = 20
            intelligence = 60
            vitality = 30

            [combatant_b.stance]
            head = 10
            torso = 40
            waist = 25
            legs = 25
        "#;
        let config = SimConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.num_fights, 25);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.choices_a, vec!["heavy_strike".to_string()]);
        assert!(config.choices_b.is_empty());
        assert_eq!(config.combatant_b.class, CharacterClass::Mage);
        assert_eq!(config.combatant_b.stance.map(|s| s.head), Some(10));
    }

    #[test]
    fn test_toml_with_bad_combatant_is_rejected() {
        let toml = r#"
            [combatant_a]
            id = "hero"
            name = "Hero"
            class = "warrior"
            level = 20
            strength = -4

            [combatant_b]
            id = "villain"
            name = "Villain"
            class = "rogue"
            level = 20
        "#;
        match SimConfig::from_toml_str(toml) {
            Err(ConfigError::Combatant { side: 'A', source }) => {
                assert!(matches!(source, BuildError::NegativeAttribute { .. }));
            }
            other => panic!("expected combatant error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        assert!(matches!(
            SimConfig::from_toml_str("num_fights = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut config = SimConfig::quick(5);
        config.combatant_b.id = config.combatant_a.id.clone();
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateId(_))));
    }

    #[test]
    fn test_zero_fights_rejected() {
        assert!(matches!(SimConfig::quick(0).validate(), Err(ConfigError::NoFights)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SimConfig::load(Path::new("/nonexistent/arena.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/arena.toml"));
    }
}
