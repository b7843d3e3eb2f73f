//! Combat math - Chance functions and attack rolls
//!
//! Chances (with default constants):
//! - hit    = clamp(0.10, 0.95, 0.80 + 0.005 * (attacker.agi - defender.agi))
//! - evade  = clamp(0.05, 0.60, defender.agi / 100)
//! - defend = clamp(0.05, 0.60, defender.def / 100)
//!
//! A roll succeeds when a uniform draw in [0, 1) is below the chance.
//!
//! Damage on a landed hit, first match wins:
//! 1. Crit (draw < attacker.crit): floor(atk * 1.5), ignores Defend
//! 2. Defender declared Defend and the defend roll passes: max(0, atk - def)
//! 3. Otherwise: atk

use crate::combatant::Combatant;
use crate::config::CombatConstants;
use crate::rng::roll;
use crate::types::Action;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Chance that an attack lands
pub fn hit_chance(attacker: &Combatant, defender: &Combatant, constants: &CombatConstants) -> f64 {
    let hit = &constants.hit;
    let agility_gap = attacker.agi as f64 - defender.agi as f64;
    (hit.base + hit.agility_factor * agility_gap).clamp(hit.min, hit.max)
}

/// Chance that a declared Evade negates an attack
pub fn evade_chance(defender: &Combatant, constants: &CombatConstants) -> f64 {
    constants.evade.chance(defender.agi)
}

/// Chance that a declared Defend mitigates a non-critical hit
pub fn defend_chance(defender: &Combatant, constants: &CombatConstants) -> f64 {
    constants.defend.chance(defender.def)
}

/// Damage of a critical strike
pub fn crit_damage(atk: u32, constants: &CombatConstants) -> u32 {
    (atk as f64 * constants.crit.multiplier).floor().max(0.0) as u32
}

/// Damage of a hit that a successful Defend mitigated
pub fn defended_damage(atk: u32, def: u32) -> u32 {
    atk.saturating_sub(def)
}

/// Damage dealt by a landed hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strike {
    pub damage: u32,
    pub critical: bool,
    /// The defender's Defend roll succeeded
    pub defended: bool,
}

/// Result of one Attack against one defender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackResult {
    /// Defender's Evade succeeded; no hit roll was made
    Evaded,
    Missed,
    Hit(Strike),
}

impl AttackResult {
    pub fn damage(&self) -> u32 {
        match self {
            AttackResult::Hit(strike) => strike.damage,
            _ => 0,
        }
    }
}

/// Roll damage for a hit that has already landed
pub fn roll_damage(
    attacker: &Combatant,
    defender: &Combatant,
    defender_action: Option<Action>,
    constants: &CombatConstants,
    rng: &mut impl Rng,
) -> Strike {
    if roll(rng) < attacker.crit {
        return Strike {
            damage: crit_damage(attacker.atk, constants),
            critical: true,
            defended: false,
        };
    }

    if defender_action == Some(Action::Defend) && roll(rng) < defend_chance(defender, constants) {
        return Strike {
            damage: defended_damage(attacker.atk, defender.def),
            critical: false,
            defended: true,
        };
    }

    Strike {
        damage: attacker.atk,
        critical: false,
        defended: false,
    }
}

/// Resolve an Attack against a defender's declared action.
///
/// Draw order: evade (only against a declared Evade), hit, crit, defend
/// (only against a declared Defend, and only when the hit was not a crit).
/// Does not touch hp.
pub fn resolve_attack(
    attacker: &Combatant,
    defender: &Combatant,
    defender_action: Option<Action>,
    constants: &CombatConstants,
    rng: &mut impl Rng,
) -> AttackResult {
    if defender_action == Some(Action::Evade) && roll(rng) < evade_chance(defender, constants) {
        return AttackResult::Evaded;
    }

    if roll(rng) >= hit_chance(attacker, defender, constants) {
        return AttackResult::Missed;
    }

    AttackResult::Hit(roll_damage(attacker, defender, defender_action, constants, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::CharacterStats;
    use crate::rng::ScriptedRng;
    use proptest::prelude::*;

    fn fighter(atk: u32, def: u32, agi: u32, crit: f64) -> Combatant {
        let mut stats = CharacterStats::new("f", "Fighter");
        stats.atk = atk;
        stats.def = def;
        stats.agi = agi;
        stats.crit = crit;
        Combatant::from_template(&stats)
    }

    #[test]
    fn test_hit_chance_even_agility() {
        let c = CombatConstants::default();
        let chance = hit_chance(&fighter(10, 0, 20, 0.0), &fighter(10, 0, 20, 0.0), &c);
        assert!((chance - 0.80).abs() < 1e-9);
    }

    #[test]
    fn test_hit_chance_clamped() {
        let c = CombatConstants::default();
        // +200 agility: 0.80 + 1.0 -> capped at 0.95
        assert!((hit_chance(&fighter(10, 0, 200, 0.0), &fighter(10, 0, 0, 0.0), &c) - 0.95).abs() < 1e-9);
        // -200 agility: 0.80 - 1.0 -> floored at 0.10
        assert!((hit_chance(&fighter(10, 0, 0, 0.0), &fighter(10, 0, 200, 0.0), &c) - 0.10).abs() < 1e-9);
    }

    #[test]
    fn test_evade_and_defend_chances() {
        let c = CombatConstants::default();
        assert!((evade_chance(&fighter(0, 0, 30, 0.0), &c) - 0.30).abs() < 1e-9);
        assert!((evade_chance(&fighter(0, 0, 2, 0.0), &c) - 0.05).abs() < 1e-9);
        assert!((evade_chance(&fighter(0, 0, 95, 0.0), &c) - 0.60).abs() < 1e-9);
        assert!((defend_chance(&fighter(0, 9, 0, 0.0), &c) - 0.09).abs() < 1e-9);
        assert!((defend_chance(&fighter(0, 80, 0, 0.0), &c) - 0.60).abs() < 1e-9);
    }

    #[test]
    fn test_crit_bypasses_defend() {
        let c = CombatConstants::default();
        let attacker = fighter(21, 0, 0, 0.5);
        let defender = fighter(0, 50, 0, 0.0);
        // crit draw passes, no defend draw consumed
        let mut rng = ScriptedRng::new([0.1]);
        let strike = roll_damage(&attacker, &defender, Some(Action::Defend), &c, &mut rng);
        assert_eq!(strike.damage, 31);
        assert!(strike.critical);
        assert!(!strike.defended);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_defend_mitigates() {
        let c = CombatConstants::default();
        let attacker = fighter(20, 0, 0, 0.0);
        let defender = fighter(0, 9, 0, 0.0);
        // crit fails, defend (9%) passes
        let mut rng = ScriptedRng::new([0.5, 0.01]);
        let strike = roll_damage(&attacker, &defender, Some(Action::Defend), &c, &mut rng);
        assert_eq!(strike.damage, 11);
        assert!(strike.defended);
    }

    #[test]
    fn test_defend_never_goes_negative() {
        let c = CombatConstants::default();
        let attacker = fighter(5, 0, 0, 0.0);
        let defender = fighter(0, 40, 0, 0.0);
        let mut rng = ScriptedRng::new([0.9, 0.0]);
        let strike = roll_damage(&attacker, &defender, Some(Action::Defend), &c, &mut rng);
        assert_eq!(strike.damage, 0);
    }

    #[test]
    fn test_failed_defend_takes_full_damage() {
        let c = CombatConstants::default();
        let mut rng = ScriptedRng::new([0.9, 0.9]);
        let strike = roll_damage(&fighter(20, 0, 0, 0.0), &fighter(0, 9, 0, 0.0), Some(Action::Defend), &c, &mut rng);
        assert_eq!(strike.damage, 20);
        assert!(!strike.defended);
    }

    #[test]
    fn test_successful_evade_skips_hit_roll() {
        let c = CombatConstants::default();
        let mut rng = ScriptedRng::new([0.0]);
        let result = resolve_attack(&fighter(20, 0, 0, 0.0), &fighter(0, 0, 30, 0.0), Some(Action::Evade), &c, &mut rng);
        assert_eq!(result, AttackResult::Evaded);
        assert_eq!(result.damage(), 0);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_failed_evade_falls_through_to_hit() {
        let c = CombatConstants::default();
        // evade fails, hit passes, crit fails
        let mut rng = ScriptedRng::new([0.99, 0.0, 0.99]);
        let result = resolve_attack(&fighter(20, 0, 0, 0.0), &fighter(0, 0, 30, 0.0), Some(Action::Evade), &c, &mut rng);
        assert_eq!(result.damage(), 20);
    }

    #[test]
    fn test_miss() {
        let c = CombatConstants::default();
        let mut rng = ScriptedRng::new([0.99]);
        let result = resolve_attack(&fighter(20, 0, 0, 0.0), &fighter(0, 0, 0, 0.0), None, &c, &mut rng);
        assert_eq!(result, AttackResult::Missed);
    }

    proptest! {
        #[test]
        fn prop_chances_within_bounds(a_agi in 0u32..500, d_agi in 0u32..500, d_def in 0u32..500) {
            let c = CombatConstants::default();
            let attacker = fighter(10, 0, a_agi, 0.0);
            let defender = fighter(10, d_def, d_agi, 0.0);
            let hit = hit_chance(&attacker, &defender, &c);
            prop_assert!((0.10..=0.95).contains(&hit));
            prop_assert!((0.05..=0.60).contains(&evade_chance(&defender, &c)));
            prop_assert!((0.05..=0.60).contains(&defend_chance(&defender, &c)));
        }

        #[test]
        fn prop_damage_bounded(atk in 0u32..10_000, def in 0u32..10_000, crit in 0.0f64..=1.0, seed in any::<u64>()) {
            use rand::SeedableRng;
            let c = CombatConstants::default();
            let attacker = fighter(atk, 0, 0, crit);
            let defender = fighter(0, def, 0, 0.0);
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            let strike = roll_damage(&attacker, &defender, Some(Action::Defend), &c, &mut rng);
            prop_assert!(strike.damage <= crit_damage(atk, &c));
            if !strike.critical {
                prop_assert!(strike.damage <= atk);
            }
        }
    }
}
