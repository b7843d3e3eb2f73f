//! Combatant - Live stat snapshot of a battle participant

use serde::{Deserialize, Serialize};

/// Static character template, as stored in the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterStats {
    /// Unique identity
    pub id: String,
    /// Display name
    pub name: String,
    pub max_hp: u32,
    pub atk: u32,
    pub def: u32,
    pub agi: u32,
    pub speed: u32,
    /// Critical strike probability (0.0 - 1.0)
    #[serde(default)]
    pub crit: f64,
}

impl CharacterStats {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        CharacterStats {
            id: id.into(),
            name: name.into(),
            max_hp: 100,
            atk: 10,
            def: 0,
            agi: 0,
            speed: 10,
            crit: 0.0,
        }
    }
}

/// A participant's mutable in-battle state.
///
/// Built from a [`CharacterStats`] when a battle starts and dropped with the
/// battle; the template is never touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: String,
    pub name: String,
    pub max_hp: u32,
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub agi: u32,
    pub speed: u32,
    pub crit: f64,
}

impl Combatant {
    /// Snapshot a template at full health
    pub fn from_template(stats: &CharacterStats) -> Self {
        Combatant {
            id: stats.id.clone(),
            name: stats.name.clone(),
            max_hp: stats.max_hp,
            hp: stats.max_hp,
            atk: stats.atk,
            def: stats.def,
            agi: stats.agi,
            speed: stats.speed,
            crit: stats.crit.clamp(0.0, 1.0),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Subtract damage, clamping at zero. Returns the hp actually lost.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        let lost = damage.min(self.hp);
        self.hp -= lost;
        lost
    }
}
