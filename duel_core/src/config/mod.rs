//! Configuration loading from TOML files

mod constants;
mod rounds;

pub use constants::{ChanceConstants, CombatConstants, CritConstants, HitConstants};
pub use rounds::RoundPolicy;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// RNG seeding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RngConfig {
    /// Master seed. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Top-level duel configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuelConfig {
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub rounds: RoundPolicy,
    #[serde(default)]
    pub rng: RngConfig,
}

impl DuelConfig {
    /// Config with a fixed seed and default tuning
    pub fn seeded(seed: u64) -> Self {
        DuelConfig {
            rng: RngConfig { seed: Some(seed) },
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.combat.validate().map_err(ConfigError::ValidationError)?;
        if let Some(secs) = self.rounds.deadline_secs {
            if secs <= 0.0 || self.rounds.deadline().is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "round deadline must be a positive number of seconds, got {}",
                    secs
                )));
            }
        }
        Ok(())
    }
}

/// Load and validate a duel configuration file
pub fn load_config(path: &Path) -> Result<DuelConfig, ConfigError> {
    let config: DuelConfig = load_toml(path)?;
    config.validate()?;
    Ok(config)
}

/// Parse and validate a duel configuration string
pub fn parse_config(content: &str) -> Result<DuelConfig, ConfigError> {
    let config: DuelConfig = parse_toml(content)?;
    config.validate()?;
    Ok(config)
}

/// Get the bundled default configuration
pub fn default_config() -> DuelConfig {
    let toml = include_str!("../../config/duel.toml");
    parse_config(toml).unwrap_or_default()
}
