//! Combat constants configuration

use serde::{Deserialize, Serialize};

/// Tunable combat constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatConstants {
    #[serde(default)]
    pub hit: HitConstants,
    #[serde(default)]
    pub evade: ChanceConstants,
    #[serde(default)]
    pub defend: ChanceConstants,
    #[serde(default)]
    pub crit: CritConstants,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitConstants {
    /// Hit chance between equally agile combatants
    #[serde(default = "default_hit_base")]
    pub base: f64,
    /// Hit chance gained per point of agility advantage
    #[serde(default = "default_agility_factor")]
    pub agility_factor: f64,
    #[serde(default = "default_hit_min")]
    pub min: f64,
    #[serde(default = "default_hit_max")]
    pub max: f64,
}

impl Default for HitConstants {
    fn default() -> Self {
        HitConstants {
            base: 0.80,
            agility_factor: 0.005,
            min: 0.10,
            max: 0.95,
        }
    }
}

fn default_hit_base() -> f64 {
    0.80
}
fn default_agility_factor() -> f64 {
    0.005
}
fn default_hit_min() -> f64 {
    0.10
}
fn default_hit_max() -> f64 {
    0.95
}

/// Stat-scaled chance: clamp(min, max, stat / divisor)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChanceConstants {
    #[serde(default = "default_divisor")]
    pub divisor: f64,
    #[serde(default = "default_chance_min")]
    pub min: f64,
    #[serde(default = "default_chance_max")]
    pub max: f64,
}

impl Default for ChanceConstants {
    fn default() -> Self {
        ChanceConstants {
            divisor: 100.0,
            min: 0.05,
            max: 0.60,
        }
    }
}

impl ChanceConstants {
    pub fn chance(&self, stat: u32) -> f64 {
        (stat as f64 / self.divisor).clamp(self.min, self.max)
    }
}

fn default_divisor() -> f64 {
    100.0
}
fn default_chance_min() -> f64 {
    0.05
}
fn default_chance_max() -> f64 {
    0.60
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritConstants {
    /// Damage multiplier on a critical strike (1.5 = 150%)
    #[serde(default = "default_crit_multiplier")]
    pub multiplier: f64,
}

impl Default for CritConstants {
    fn default() -> Self {
        CritConstants { multiplier: 1.5 }
    }
}

fn default_crit_multiplier() -> f64 {
    1.5
}

impl CombatConstants {
    /// Check ranges. Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let ranges = [
            ("hit", self.hit.min, self.hit.max),
            ("evade", self.evade.min, self.evade.max),
            ("defend", self.defend.min, self.defend.max),
        ];
        for (name, min, max) in ranges {
            if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) || min > max {
                return Err(format!("{} chance bounds [{}, {}] are invalid", name, min, max));
            }
        }
        if !(self.evade.divisor > 0.0 && self.defend.divisor > 0.0) {
            return Err("chance divisors must be positive".to_string());
        }
        if self.crit.multiplier < 0.0 {
            return Err("crit multiplier must not be negative".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = CombatConstants::default();
        assert!((constants.hit.base - 0.80).abs() < f64::EPSILON);
        assert!((constants.evade.max - 0.60).abs() < f64::EPSILON);
        assert!((constants.crit.multiplier - 1.5).abs() < f64::EPSILON);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_partial_table_keeps_defaults() {
        let toml = r#"
[hit]
base = 0.7

[crit]
"#;
        let constants: CombatConstants = toml::from_str(toml).unwrap();
        assert!((constants.hit.base - 0.7).abs() < f64::EPSILON);
        assert!((constants.hit.max - 0.95).abs() < f64::EPSILON);
        assert!((constants.crit.multiplier - 1.5).abs() < f64::EPSILON);
        assert_eq!(constants.defend, ChanceConstants::default());
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let mut constants = CombatConstants::default();
        constants.defend.min = 0.9;
        assert!(constants.validate().is_err());
    }
}
