//! Character catalog - Template stats looked up by identity

use crate::combatant::CharacterStats;
use crate::config::{load_toml, parse_toml, ConfigError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Source of template stats for battle participants
pub trait CharacterCatalog: Send + Sync {
    /// Look up a character by identity
    fn resolve(&self, id: &str) -> Option<CharacterStats>;
}

impl<F> CharacterCatalog for F
where
    F: Fn(&str) -> Option<CharacterStats> + Send + Sync,
{
    fn resolve(&self, id: &str) -> Option<CharacterStats> {
        self(id)
    }
}

/// Container for roster files
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RosterFile {
    #[serde(default)]
    characters: Vec<CharacterStats>,
}

/// In-memory catalog, usually loaded from `roster.toml`
#[derive(Debug, Clone, Default)]
pub struct Roster {
    characters: HashMap<String, CharacterStats>,
    /// Insertion order, for stable listings
    order: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a character
    pub fn insert(&mut self, stats: CharacterStats) {
        if !self.characters.contains_key(&stats.id) {
            self.order.push(stats.id.clone());
        }
        self.characters.insert(stats.id.clone(), stats);
    }

    pub fn get(&self, id: &str) -> Option<&CharacterStats> {
        self.characters.get(id)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Characters in the order they were added
    pub fn iter(&self) -> impl Iterator<Item = &CharacterStats> {
        self.order.iter().filter_map(|id| self.characters.get(id))
    }

    fn from_file(file: RosterFile) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut roster = Roster::new();
        for stats in file.characters {
            validate_character(&stats)?;
            if !seen.insert(stats.id.clone()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate character id: {}",
                    stats.id
                )));
            }
            roster.insert(stats);
        }
        Ok(roster)
    }
}

impl CharacterCatalog for Roster {
    fn resolve(&self, id: &str) -> Option<CharacterStats> {
        self.characters.get(id).cloned()
    }
}

fn validate_character(stats: &CharacterStats) -> Result<(), ConfigError> {
    if stats.id.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "character id must not be empty".to_string(),
        ));
    }
    if stats.max_hp == 0 {
        return Err(ConfigError::ValidationError(format!(
            "{}: max_hp must be positive",
            stats.id
        )));
    }
    if !(0.0..=1.0).contains(&stats.crit) {
        return Err(ConfigError::ValidationError(format!(
            "{}: crit must be between 0 and 1, got {}",
            stats.id, stats.crit
        )));
    }
    Ok(())
}

/// Load a roster from a TOML file
pub fn load_roster(path: &Path) -> Result<Roster, ConfigError> {
    let file: RosterFile = load_toml(path)?;
    Roster::from_file(file)
}

/// Load a roster from a TOML string
pub fn parse_roster(content: &str) -> Result<Roster, ConfigError> {
    let file: RosterFile = parse_toml(content)?;
    Roster::from_file(file)
}

/// Get the bundled roster
pub fn default_roster() -> Roster {
    let toml = include_str!("../config/roster.toml");
    parse_roster(toml).unwrap_or_default()
}
