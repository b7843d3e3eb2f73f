//! duel_core - Turn-based duel resolution for two participants
//!
//! This library provides:
//! - Combat math: hit, evade, defend and crit rolls
//! - Battle: the per-pair round state machine
//! - BattleManager: registry of concurrent battles, one per participant
//! - Config and roster loading from TOML

pub mod battle;
pub mod combatant;
pub mod config;
pub mod error;
pub mod manager;
pub mod math;
pub mod prelude;
pub mod rng;
pub mod roster;
pub mod types;

// Re-export core types for convenience
pub use battle::{battle_key, ActionEffect, ActionReport, Battle, BattleSnapshot, BattleUpdate, RoundReport};
pub use combatant::{CharacterStats, Combatant};
pub use config::{default_config, load_config, DuelConfig};
pub use error::{BattleError, ErrorKind};
pub use manager::{BattleManager, Reply};
pub use roster::{default_roster, load_roster, CharacterCatalog, Roster};
pub use types::{Action, Intent, Outcome};
