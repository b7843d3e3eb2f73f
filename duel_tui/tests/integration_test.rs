//! Integration test: Load roster -> Start battle -> Fight -> Reclaim -> Fight again
//!
//! This test drives the full flow through the BattleManager the way a front
//! end would.

use duel_core::config::DuelConfig;
use duel_core::rng::ScriptedRng;
use duel_core::{
    default_roster, Action, ActionEffect, BattleError, BattleManager, BattleUpdate,
    CharacterStats, ErrorKind, Intent, Outcome,
};
use std::time::{Duration, Instant};

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

fn stats(id: &str, hp: u32, atk: u32, def: u32, agi: u32, speed: u32) -> CharacterStats {
    CharacterStats {
        id: id.to_string(),
        name: id.to_uppercase(),
        max_hp: hp,
        atk,
        def,
        agi,
        speed,
        crit: 0.0,
    }
}

/// Attack with both sides until the battle ends
fn fight_to_the_end(manager: &BattleManager, a: &str, b: &str) -> Outcome {
    for _ in 0..1000 {
        manager.submit_action(a, Action::Attack).unwrap();
        match manager.submit_action(b, Action::Attack).unwrap() {
            BattleUpdate::Resolved(report) => {
                println!("{}", report.summary());
                if report.outcome.is_finished() {
                    return report.outcome;
                }
            }
            other => panic!("second declaration should resolve the round: {:?}", other),
        }
    }
    panic!("battle between {} and {} never finished", a, b);
}

#[test]
fn test_full_duel_flow() {
    separator("STEP 1: Load default roster");
    let roster = default_roster();
    println!("  {} characters loaded", roster.len());
    assert!(roster.get("aria").is_some());
    assert!(roster.get("borin").is_some());

    let manager = BattleManager::new(roster, DuelConfig::seeded(42));

    separator("STEP 2: Start aria vs borin");
    let update = manager.start_battle("aria", "borin").unwrap();
    println!("{}", update.message());
    let BattleUpdate::Started(snapshot) = update else {
        panic!("expected a start summary");
    };
    assert_eq!(snapshot.round, 1);
    // aria is faster
    assert_eq!(snapshot.turn_order[0], "aria");
    assert!(manager.is_engaged("aria"));
    assert!(manager.is_engaged("borin"));

    separator("STEP 3: Fight");
    let outcome = fight_to_the_end(&manager, "aria", "borin");
    println!("  Outcome: {:?}", outcome);
    assert!(outcome.is_finished());

    separator("STEP 4: Battle reclaimed");
    assert_eq!(manager.active_battles(), 0);
    assert!(!manager.is_engaged("aria"));
    assert!(!manager.is_engaged("borin"));
    assert_eq!(
        manager.submit_action("aria", Action::Attack),
        Err(BattleError::NotInBattle("aria".to_string()))
    );

    separator("STEP 5: Same pair fights again");
    let update = manager.start_battle("borin", "aria").unwrap();
    assert!(matches!(update, BattleUpdate::Started(_)));
    assert_eq!(manager.battle_of("aria").unwrap().round, 1);
}

#[test]
fn test_registry_conflicts() {
    let manager = BattleManager::new(default_roster(), DuelConfig::seeded(1));
    manager.start_battle("aria", "borin").unwrap();

    separator("Duplicate pair");
    let err = manager.start_battle("borin", "aria").unwrap_err();
    println!("  {}", err);
    assert_eq!(err, BattleError::AlreadyInProgress("aria:borin".to_string()));
    assert_eq!(err.kind(), ErrorKind::StateConflict);

    separator("Busy participant");
    let err = manager.start_battle("cass", "aria").unwrap_err();
    println!("  {}", err);
    assert_eq!(err, BattleError::AlreadyInOtherBattle("aria".to_string()));

    separator("Unknown character");
    let err = manager.start_battle("cass", "zed").unwrap_err();
    println!("  {}", err);
    assert_eq!(err.kind(), ErrorKind::NotFound);

    separator("Independent pair");
    manager.start_battle("cass", "dren").unwrap();
    assert_eq!(manager.active_battles(), 2);

    // Declarations in one battle don't leak into the other
    let update = manager.submit_action("aria", Action::Defend).unwrap();
    assert!(matches!(update, BattleUpdate::Waiting { .. }));
    let snapshot = manager.battle_of("cass").unwrap();
    assert_eq!(snapshot.declared, [false, false]);
}

#[test]
fn test_intent_replies() {
    let manager = BattleManager::new(default_roster(), DuelConfig::seeded(3));

    let reply = manager.handle(&Intent::Start {
        actor_id: "aria".to_string(),
        opponent_ids: ["aria".to_string(), "cass".to_string()],
    });
    println!("  {}", reply.message);
    assert!(reply.ok);
    assert!(!reply.finished);

    let reply = manager.handle(&Intent::Action {
        actor_id: "aria".to_string(),
        action: Action::Evade,
    });
    assert!(reply.ok);
    assert_eq!(reply.message, "Action recorded. Waiting for cass.");

    let reply = manager.handle(&Intent::Action {
        actor_id: "borin".to_string(),
        action: Action::Attack,
    });
    assert!(!reply.ok);
    assert_eq!(reply.error, Some(ErrorKind::StateConflict));

    let reply = manager.handle(&Intent::Unknown);
    assert!(!reply.ok);
    assert_eq!(reply.message, "Unknown command.");
}

#[test]
fn test_scripted_defended_hit() {
    separator("X attacks, Y defends");
    let manager = BattleManager::new(default_roster(), DuelConfig::seeded(0));
    let x = stats("x", 100, 20, 0, 10, 18);
    let y = stats("y", 90, 15, 9, 10, 20);
    // hit passes, crit fails, defend passes
    let rng = Box::new(ScriptedRng::new([0.0, 0.99, 0.0]));
    manager.start_battle_with_rng(&x, &y, rng).unwrap();

    manager.submit_action("x", Action::Attack).unwrap();
    let BattleUpdate::Resolved(report) = manager.submit_action("y", Action::Defend).unwrap()
    else {
        panic!("round should resolve");
    };
    println!("{}", report.summary());

    assert_eq!(report.actions[0].actor_id, "y");
    assert_eq!(report.actions[1].damage(), 11);
    let snapshot = manager.battle_of("x").unwrap();
    assert_eq!(snapshot.combatant("y").unwrap().hp, 79);
    assert_eq!(snapshot.combatant("x").unwrap().hp, 100);
    assert_eq!(snapshot.round, 2);
}

#[test]
fn test_knockout_skips_second_action() {
    separator("First strike knocks out");
    let manager = BattleManager::new(default_roster(), DuelConfig::seeded(0));
    let x = stats("x", 100, 200, 0, 10, 30);
    let y = stats("y", 90, 50, 0, 10, 5);
    // x hits, no crit
    let rng = Box::new(ScriptedRng::new([0.0, 0.99]));
    manager.start_battle_with_rng(&x, &y, rng).unwrap();

    manager.submit_action("y", Action::Attack).unwrap();
    let update = manager.submit_action("x", Action::Attack).unwrap();
    println!("{}", update.message());

    assert!(update.is_finished());
    assert_eq!(update.winner(), Some("x"));
    let BattleUpdate::Resolved(report) = update else {
        panic!("round should resolve");
    };
    assert_eq!(report.actions.len(), 1);
    assert!(matches!(report.actions[0].effect, ActionEffect::Hit(_)));
    assert_eq!(report.hp[1].hp, 0);
    assert!(!manager.is_engaged("x"));
    assert!(!manager.is_engaged("y"));
}

#[test]
fn test_round_deadline_forces_resolution() {
    separator("Round deadline");
    let mut config = DuelConfig::seeded(9);
    config.rounds.deadline_secs = Some(10.0);
    config.rounds.fallback_action = Action::Defend;
    let manager = BattleManager::new(default_roster(), config);

    manager.start_battle("aria", "borin").unwrap();
    manager.submit_action("aria", Action::Evade).unwrap();

    assert!(manager.expire_overdue(Instant::now()).is_empty());

    let reports = manager.expire_overdue(Instant::now() + Duration::from_secs(11));
    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    println!("{}", report.summary());
    assert!(report.forced);
    assert_eq!(report.round, 1);
    // Neither side attacked, so nobody took damage
    assert!(report.actions.iter().all(|a| a.damage() == 0));
    assert_eq!(manager.battle_of("aria").unwrap().round, 2);
}
