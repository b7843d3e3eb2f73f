//! Duel simulation utilities

use duel_core::{
    config::DuelConfig, Action, BattleManager, BattleUpdate, CharacterStats, Outcome, Roster,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Aggregate results of many auto-played duels
#[derive(Debug, Clone, Default)]
pub struct DuelSimulation {
    pub duels: u32,
    pub wins_a: u32,
    pub wins_b: u32,
    pub draws: u32,
    /// Duels cut off by the round limit
    pub unfinished: u32,
    pub total_rounds: u32,
}

impl DuelSimulation {
    /// Play `duels` battles between `a` and `b`, both sides picking actions
    /// uniformly at random.
    pub fn run(
        a: &CharacterStats,
        b: &CharacterStats,
        duels: u32,
        max_rounds: u32,
        rng: &mut impl Rng,
    ) -> Self {
        let mut result = DuelSimulation::default();
        let mut roster = Roster::new();
        roster.insert(a.clone());
        roster.insert(b.clone());

        for _ in 0..duels {
            result.duels += 1;
            // Fresh registry per duel, so a duel cut off by the round limit
            // doesn't keep the pair engaged
            let manager = BattleManager::new(roster.clone(), DuelConfig::seeded(rng.gen()));
            if manager.start_battle(&a.id, &b.id).is_err() {
                result.unfinished += 1;
                continue;
            }

            let mut outcome = Outcome::InProgress;
            let mut rounds = 0;
            while rounds < max_rounds && !outcome.is_finished() {
                let action_a = *Action::all().choose(rng).unwrap_or(&Action::Attack);
                let action_b = *Action::all().choose(rng).unwrap_or(&Action::Attack);
                if manager.submit_action(&a.id, action_a).is_err() {
                    break;
                }
                match manager.submit_action(&b.id, action_b) {
                    Ok(BattleUpdate::Resolved(report)) => {
                        rounds += 1;
                        outcome = report.outcome;
                    }
                    _ => break,
                }
            }

            result.total_rounds += rounds;
            match outcome {
                Outcome::Decided(winner) if winner == a.id => result.wins_a += 1,
                Outcome::Decided(_) => result.wins_b += 1,
                Outcome::Draw => result.draws += 1,
                Outcome::InProgress => result.unfinished += 1,
            }
        }

        result
    }

    /// Win rate of side A in percent
    pub fn win_rate_a(&self) -> f64 {
        if self.duels > 0 {
            self.wins_a as f64 / self.duels as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Win rate of side B in percent
    pub fn win_rate_b(&self) -> f64 {
        if self.duels > 0 {
            self.wins_b as f64 / self.duels as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Average rounds per duel
    pub fn avg_rounds(&self) -> f64 {
        if self.duels > 0 {
            self.total_rounds as f64 / self.duels as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_duel_simulation() {
        let mut a = CharacterStats::new("a", "Alpha");
        a.atk = 25;
        let mut b = CharacterStats::new("b", "Beta");
        b.atk = 10;
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);

        let result = DuelSimulation::run(&a, &b, 50, 200, &mut rng);

        assert_eq!(result.duels, 50);
        assert_eq!(
            result.wins_a + result.wins_b + result.draws + result.unfinished,
            50
        );
        assert!(result.wins_a > result.wins_b);
        assert!(result.avg_rounds() > 0.0);
    }
}
