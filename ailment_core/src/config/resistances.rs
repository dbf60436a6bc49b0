//! Resistance table loading

use super::ConfigError;
use crate::resist::ResistanceTable;
use crate::types::{Archetype, StatusKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One archetype/kind override
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResistanceEntry {
    archetype: Archetype,
    kind: StatusKind,
    multiplier: f64,
}

/// Container for resistance overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResistancesConfig {
    #[serde(rename = "resistances")]
    entries: Vec<ResistanceEntry>,
}

/// Load a resistance table from a TOML file
pub fn load_resistances(path: &Path) -> Result<ResistanceTable, ConfigError> {
    let config: ResistancesConfig = super::load_toml(path)?;
    build_table(config)
}

/// Load a resistance table from a TOML string
pub fn parse_resistances(content: &str) -> Result<ResistanceTable, ConfigError> {
    let config: ResistancesConfig = super::parse_toml(content)?;
    build_table(config)
}

fn build_table(config: ResistancesConfig) -> Result<ResistanceTable, ConfigError> {
    let mut table = ResistanceTable::new();
    for entry in &config.entries {
        if entry.multiplier <= 0.0 || entry.multiplier > 1.0 {
            return Err(ConfigError::ValidationError(format!(
                "resistance for {:?}/{:?} must be in (0, 1], got {}",
                entry.archetype, entry.kind, entry.multiplier
            )));
        }
        table.set(entry.archetype, entry.kind, entry.multiplier);
    }
    Ok(table)
}
