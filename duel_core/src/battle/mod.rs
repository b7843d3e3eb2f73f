//! Battle - Per-pair combat state machine
//!
//! A battle waits for both participants to declare an action, then resolves
//! the round in a turn order fixed at creation:
//!
//! ```text
//! AwaitingActions(n) --both declared--> Resolving --> AwaitingActions(n + 1)
//!                                                 \-> Finished(Draw | Decided)
//! ```
//!
//! Finished is terminal. Every rejected call leaves the battle untouched.

mod report;

pub use report::{ActionEffect, ActionReport, BattleSnapshot, BattleUpdate, HpStatus, RoundReport};

use crate::combatant::{CharacterStats, Combatant};
use crate::config::{CombatConstants, RoundPolicy};
use crate::error::BattleError;
use crate::math::{resolve_attack, AttackResult};
use crate::rng::{roll, BattleRng};
use crate::types::{Action, Outcome};
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

/// Canonical key for an unordered pair of identities
pub fn battle_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{}:{}", a, b)
    } else {
        format!("{}:{}", b, a)
    }
}

/// Which of the two combatant slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    A,
    B,
}

impl Side {
    fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

pub struct Battle {
    key: String,
    combatants: [Combatant; 2],
    round: u32,
    turn_order: [Side; 2],
    pending: [Option<Action>; 2],
    outcome: Outcome,
    constants: CombatConstants,
    rng: BattleRng,
    round_opened_at: Instant,
}

impl fmt::Debug for Battle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Battle")
            .field("key", &self.key)
            .field("combatants", &self.combatants)
            .field("round", &self.round)
            .field("turn_order", &self.turn_order)
            .field("pending", &self.pending)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl Battle {
    /// Start a battle from two templates.
    ///
    /// The faster combatant acts first for the whole battle. Equal speeds are
    /// settled by a single coin flip from `rng`.
    pub fn new(
        a: &CharacterStats,
        b: &CharacterStats,
        constants: CombatConstants,
        mut rng: BattleRng,
    ) -> Result<Self, BattleError> {
        if a.id == b.id {
            return Err(BattleError::SelfBattle(a.id.clone()));
        }

        let turn_order = if a.speed > b.speed {
            [Side::A, Side::B]
        } else if b.speed > a.speed {
            [Side::B, Side::A]
        } else if roll(&mut rng) < 0.5 {
            [Side::A, Side::B]
        } else {
            [Side::B, Side::A]
        };

        let mut battle = Battle {
            key: battle_key(&a.id, &b.id),
            combatants: [Combatant::from_template(a), Combatant::from_template(b)],
            round: 1,
            turn_order,
            pending: [None, None],
            outcome: Outcome::InProgress,
            constants,
            rng,
            round_opened_at: Instant::now(),
        };
        // A template with no health can't take part in a live battle
        battle.outcome = battle.check_end();

        info!(
            key = %battle.key,
            first = %battle.combatant(turn_order[0]).id,
            "battle started"
        );
        Ok(battle)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    /// Identities in acting order
    pub fn turn_order(&self) -> [&str; 2] {
        [
            self.combatant(self.turn_order[0]).id.as_str(),
            self.combatant(self.turn_order[1]).id.as_str(),
        ]
    }

    pub fn participant_ids(&self) -> [&str; 2] {
        [self.combatants[0].id.as_str(), self.combatants[1].id.as_str()]
    }

    pub fn combatant_by_id(&self, id: &str) -> Option<&Combatant> {
        self.side_of(id).map(|side| self.combatant(side))
    }

    /// The action `id` has declared this round, if any
    pub fn pending_action(&self, id: &str) -> Option<Action> {
        self.side_of(id).and_then(|side| self.pending[side.index()])
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        let [first, second] = self.turn_order();
        BattleSnapshot {
            key: self.key.clone(),
            round: self.round,
            turn_order: [first.to_string(), second.to_string()],
            combatants: self.combatants.clone(),
            declared: [self.pending[0].is_some(), self.pending[1].is_some()],
            outcome: self.outcome.clone(),
        }
    }

    /// Record a participant's action, resolving the round once both sides
    /// have declared. Re-declaring before the opponent overwrites.
    pub fn submit_action(
        &mut self,
        participant_id: &str,
        action: Action,
    ) -> Result<BattleUpdate, BattleError> {
        if self.is_finished() {
            return Err(BattleError::BattleFinished);
        }
        let side = self
            .side_of(participant_id)
            .ok_or_else(|| BattleError::NotAParticipant(participant_id.to_string()))?;

        self.pending[side.index()] = Some(action);
        debug!(key = %self.key, round = self.round, participant = participant_id, "action declared");

        if self.pending[side.other().index()].is_none() {
            return Ok(BattleUpdate::Waiting {
                participant_id: participant_id.to_string(),
                opponent_id: self.combatant(side.other()).id.clone(),
            });
        }

        Ok(BattleUpdate::Resolved(self.resolve_round(false)))
    }

    /// Whether the current round has outlived the policy's deadline
    pub fn is_overdue(&self, now: Instant, policy: &RoundPolicy) -> bool {
        match policy.deadline() {
            Some(deadline) if !self.is_finished() => {
                now.saturating_duration_since(self.round_opened_at) >= deadline
            }
            _ => false,
        }
    }

    /// Resolve an overdue round, giving every undeclared side the policy's
    /// fallback action. Returns `None` when the round is not overdue.
    pub fn expire_round(&mut self, now: Instant, policy: &RoundPolicy) -> Option<RoundReport> {
        if !self.is_overdue(now, policy) {
            return None;
        }
        for slot in self.pending.iter_mut().filter(|slot| slot.is_none()) {
            *slot = Some(policy.fallback_action);
        }
        tracing::warn!(key = %self.key, round = self.round, "round deadline passed, forcing resolution");
        Some(self.resolve_round(true))
    }

    fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side.index()]
    }

    fn side_of(&self, id: &str) -> Option<Side> {
        if self.combatants[0].id == id {
            Some(Side::A)
        } else if self.combatants[1].id == id {
            Some(Side::B)
        } else {
            None
        }
    }

    fn resolve_round(&mut self, forced: bool) -> RoundReport {
        let [first, second] = self.turn_order;
        let round = self.round;
        let mut actions = Vec::with_capacity(2);

        actions.push(self.process_single_action(first, second));
        self.outcome = self.check_end();

        if !self.is_finished() {
            actions.push(self.process_single_action(second, first));
            self.outcome = self.check_end();
        }

        if self.is_finished() {
            info!(key = %self.key, round, outcome = ?self.outcome, "battle finished");
        } else {
            self.round += 1;
            self.pending = [None, None];
            self.round_opened_at = Instant::now();
        }

        RoundReport {
            round,
            actions,
            hp: [
                HpStatus::from(&self.combatants[0]),
                HpStatus::from(&self.combatants[1]),
            ],
            outcome: self.outcome.clone(),
            forced,
        }
    }

    fn process_single_action(&mut self, attacker: Side, defender: Side) -> ActionReport {
        let action = self.pending[attacker.index()];
        let effect = match action {
            Some(Action::Attack) => {
                let result = resolve_attack(
                    &self.combatants[attacker.index()],
                    &self.combatants[defender.index()],
                    self.pending[defender.index()],
                    &self.constants,
                    &mut self.rng,
                );
                match result {
                    AttackResult::Evaded => ActionEffect::Evaded,
                    AttackResult::Missed => ActionEffect::Missed,
                    AttackResult::Hit(strike) => {
                        self.combatants[defender.index()].take_damage(strike.damage);
                        ActionEffect::Hit(strike)
                    }
                }
            }
            Some(prepared) => ActionEffect::Prepared(prepared),
            None => ActionEffect::Idle,
        };

        let att = self.combatant(attacker);
        let def = self.combatant(defender);
        let report = ActionReport {
            actor_id: att.id.clone(),
            actor_name: att.name.clone(),
            target_id: def.id.clone(),
            target_name: def.name.clone(),
            action,
            effect,
        };
        debug!(key = %self.key, round = self.round, "{}", report.describe());
        report
    }

    fn check_end(&self) -> Outcome {
        let [a, b] = &self.combatants;
        match (a.is_alive(), b.is_alive()) {
            (false, false) => Outcome::Draw,
            (true, false) => Outcome::Decided(a.id.clone()),
            (false, true) => Outcome::Decided(b.id.clone()),
            (true, true) => Outcome::InProgress,
        }
    }
}
