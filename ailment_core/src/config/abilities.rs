//! Ability book - named elemental payload presets

use super::ConfigError;
use crate::effect::{BurnParams, EffectParams, FrostParams, PoisonParams};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A named elemental payload an ability or hazard can throw at a target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityConfig {
    /// Unique identifier (e.g., "venom_spit", "ember_burst")
    pub id: String,
    /// Display name
    pub name: String,
    pub params: EffectParams,
}

/// Registry of ability configurations
#[derive(Debug, Clone, Default)]
pub struct AbilityBook {
    abilities: HashMap<String, AbilityConfig>,
}

impl AbilityBook {
    /// Create a new empty book
    pub fn new() -> Self {
        AbilityBook {
            abilities: HashMap::new(),
        }
    }

    /// Register an ability
    pub fn register(&mut self, config: AbilityConfig) {
        self.abilities.insert(config.id.clone(), config);
    }

    /// Get an ability by id
    pub fn get(&self, id: &str) -> Option<&AbilityConfig> {
        self.abilities.get(id)
    }

    /// The payload of an ability by id
    pub fn params(&self, id: &str) -> Option<&EffectParams> {
        self.abilities.get(id).map(|a| &a.params)
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    /// Load default abilities
    pub fn with_defaults() -> Self {
        let mut book = Self::new();

        book.register(AbilityConfig {
            id: "venom_spit".to_string(),
            name: "Venom Spit".to_string(),
            params: EffectParams::Poison(PoisonParams {
                base_damage: 8.0,
                duration: 6.0,
                tick_rate: 1.0,
                slow_amount: 0.1,
                max_stacks: 3,
                stack_damage_multiplier: 0.5,
            }),
        });

        // Single-target fire whip
        book.register(AbilityConfig {
            id: "cinder_lash".to_string(),
            name: "Cinder Lash".to_string(),
            params: EffectParams::Burn(BurnParams {
                burst_damage: 12.0,
                dot_damage: 16.0,
                duration: 4.0,
                tick_rate: 0.5,
                splash_radius: None,
            }),
        });

        // Splashing fireball
        book.register(AbilityConfig {
            id: "ember_burst".to_string(),
            name: "Ember Burst".to_string(),
            params: EffectParams::Burn(BurnParams {
                burst_damage: 18.0,
                dot_damage: 24.0,
                duration: 4.0,
                tick_rate: 0.5,
                splash_radius: Some(2.5),
            }),
        });

        book.register(AbilityConfig {
            id: "rime_nova".to_string(),
            name: "Rime Nova".to_string(),
            params: EffectParams::Frost(FrostParams {
                direct_damage: 10.0,
                freeze_chance: 0.35,
                freeze_duration: 1.5,
                chill_duration: 3.0,
                chill_slow_amount: 0.3,
            }),
        });

        book
    }
}

/// Container for ability configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AbilitiesConfig {
    #[serde(rename = "abilities")]
    abilities: Vec<AbilityConfig>,
}

/// Load ability configurations from a TOML file
pub fn load_ability_book(path: &Path) -> Result<AbilityBook, ConfigError> {
    let config: AbilitiesConfig = super::load_toml(path)?;
    build_book(config)
}

/// Load ability configurations from a TOML string
pub fn parse_ability_book(content: &str) -> Result<AbilityBook, ConfigError> {
    let config: AbilitiesConfig = super::parse_toml(content)?;
    build_book(config)
}

fn build_book(config: AbilitiesConfig) -> Result<AbilityBook, ConfigError> {
    let mut book = AbilityBook::new();
    for ability in config.abilities {
        ability.params.validate().map_err(|err| {
            ConfigError::ValidationError(format!("ability '{}': {}", ability.id, err))
        })?;
        book.register(ability);
    }
    Ok(book)
}
