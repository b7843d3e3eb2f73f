//! Round reports and battle updates

use crate::combatant::Combatant;
use crate::math::Strike;
use crate::types::{Action, Outcome};
use serde::{Deserialize, Serialize};

/// What one side's declared action did this round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionEffect {
    /// Defend or Evade declared; only matters when the other side attacks
    Prepared(Action),
    /// Attack negated by the target's Evade
    Evaded,
    Missed,
    Hit(Strike),
    /// No action was declared
    Idle,
}

/// One entry of a round's combat log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionReport {
    pub actor_id: String,
    pub actor_name: String,
    pub target_id: String,
    pub target_name: String,
    pub action: Option<Action>,
    pub effect: ActionEffect,
}

impl ActionReport {
    pub fn damage(&self) -> u32 {
        match self.effect {
            ActionEffect::Hit(strike) => strike.damage,
            _ => 0,
        }
    }

    /// Human readable log line
    pub fn describe(&self) -> String {
        match self.effect {
            ActionEffect::Prepared(Action::Defend) => format!("{} braces to defend.", self.actor_name),
            ActionEffect::Prepared(_) => format!("{} gets ready to evade.", self.actor_name),
            ActionEffect::Evaded => format!(
                "{} attacks, but {} evades!",
                self.actor_name, self.target_name
            ),
            ActionEffect::Missed => format!("{} attacks and misses.", self.actor_name),
            ActionEffect::Hit(strike) => {
                let mut line = format!(
                    "{} hits {} for {} damage",
                    self.actor_name, self.target_name, strike.damage
                );
                if strike.critical {
                    line.push_str(" (CRITICAL)");
                } else if strike.defended {
                    line.push_str(" (defended)");
                }
                line.push('.');
                line
            }
            ActionEffect::Idle => format!("{} does nothing.", self.actor_name),
        }
    }
}

/// Hp of one combatant after a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpStatus {
    pub id: String,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
}

impl From<&Combatant> for HpStatus {
    fn from(c: &Combatant) -> Self {
        HpStatus {
            id: c.id.clone(),
            name: c.name.clone(),
            hp: c.hp,
            max_hp: c.max_hp,
        }
    }
}

/// Everything that happened in one resolved round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    /// Actions in the order they were applied
    pub actions: Vec<ActionReport>,
    pub hp: [HpStatus; 2],
    pub outcome: Outcome,
    /// Resolved by the round deadline rather than by both declarations
    pub forced: bool,
}

impl RoundReport {
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Round {}:", self.round)];
        lines.extend(self.actions.iter().map(ActionReport::describe));
        match &self.outcome {
            Outcome::InProgress => lines.push(format!(
                "{} {}/{} | {} {}/{}",
                self.hp[0].name,
                self.hp[0].hp,
                self.hp[0].max_hp,
                self.hp[1].name,
                self.hp[1].hp,
                self.hp[1].max_hp
            )),
            Outcome::Draw => lines.push("Both fighters fall. It's a draw!".to_string()),
            Outcome::Decided(winner) => {
                let name = self
                    .hp
                    .iter()
                    .find(|s| &s.id == winner)
                    .map(|s| s.name.as_str())
                    .unwrap_or(winner.as_str());
                lines.push(format!("{} wins!", name));
            }
        }
        lines.join("\n")
    }
}

/// Read-only view of a battle. Pending actions are reported as declared or
/// not, never by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub key: String,
    pub round: u32,
    /// Identities in acting order
    pub turn_order: [String; 2],
    pub combatants: [Combatant; 2],
    pub declared: [bool; 2],
    pub outcome: Outcome,
}

impl BattleSnapshot {
    pub fn combatant(&self, id: &str) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn summary(&self) -> String {
        let first = self
            .combatant(&self.turn_order[0])
            .map(|c| c.name.as_str())
            .unwrap_or(self.turn_order[0].as_str());
        let status = match &self.outcome {
            Outcome::InProgress => format!("round {}, awaiting actions", self.round),
            Outcome::Draw => "finished in a draw".to_string(),
            Outcome::Decided(winner) => format!("won by {}", winner),
        };
        format!(
            "{} vs {}: {} acts first, {}",
            self.combatants[0].name, self.combatants[1].name, first, status
        )
    }
}

/// Successful result of a battle operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BattleUpdate {
    Started(BattleSnapshot),
    /// Action recorded; the opponent has not declared yet
    Waiting {
        participant_id: String,
        opponent_id: String,
    },
    Resolved(RoundReport),
}

impl BattleUpdate {
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            BattleUpdate::Started(snapshot) => Some(&snapshot.outcome),
            BattleUpdate::Resolved(report) => Some(&report.outcome),
            BattleUpdate::Waiting { .. } => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome().is_some_and(Outcome::is_finished)
    }

    pub fn winner(&self) -> Option<&str> {
        self.outcome().and_then(Outcome::winner)
    }

    pub fn message(&self) -> String {
        match self {
            BattleUpdate::Started(snapshot) => snapshot.summary(),
            BattleUpdate::Waiting { opponent_id, .. } => {
                format!("Action recorded. Waiting for {}.", opponent_id)
            }
            BattleUpdate::Resolved(report) => report.summary(),
        }
    }
}
