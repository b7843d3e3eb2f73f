//! Prelude module for convenient imports
//!
//! ```rust
//! use duel_core::prelude::*;
//! ```

// Core types
pub use crate::types::{Action, Intent, Outcome};
pub use crate::combatant::{CharacterStats, Combatant};

// Battles
pub use crate::battle::{Battle, BattleSnapshot, BattleUpdate, RoundReport};
pub use crate::manager::{BattleManager, Reply};
pub use crate::error::{BattleError, ErrorKind};

// Config
pub use crate::config::{default_config, DuelConfig};
pub use crate::roster::{default_roster, CharacterCatalog, Roster};
