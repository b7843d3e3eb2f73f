//! Core value types shared by battles and the manager

use crate::error::BattleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Action a participant declares for the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Attack,
    Defend,
    Evade,
}

impl Action {
    /// Get all actions
    pub fn all() -> &'static [Action] {
        &[Action::Attack, Action::Defend, Action::Evade]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Attack => "attack",
            Action::Defend => "defend",
            Action::Evade => "evade",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = BattleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attack" | "atk" | "a" => Ok(Action::Attack),
            "defend" | "def" | "d" => Ok(Action::Defend),
            "evade" | "eva" | "e" => Ok(Action::Evade),
            other => Err(BattleError::InvalidAction(other.to_string())),
        }
    }
}

/// Battle outcome. Leaving `InProgress` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "winner", rename_all = "snake_case")]
pub enum Outcome {
    InProgress,
    Draw,
    Decided(String),
}

impl Outcome {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Winner identity, if the battle was decided
    pub fn winner(&self) -> Option<&str> {
        match self {
            Outcome::Decided(id) => Some(id),
            _ => None,
        }
    }
}

/// Structured request produced by whatever reads user input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Intent {
    /// Start a battle between two identities on behalf of `actor`
    Start {
        actor_id: String,
        opponent_ids: [String; 2],
    },
    /// Declare an action in the actor's current battle
    Action { actor_id: String, action: Action },
    Unknown,
}
