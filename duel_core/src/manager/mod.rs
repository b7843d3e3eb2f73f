//! BattleManager - Registry of live battles
//!
//! Routes actions to battles by participant identity and keeps every
//! identity in at most one unfinished battle.
//!
//! Locking: the registry mutex guards both maps and is never held while
//! waiting on a battle lock. Each battle has its own mutex covering a full
//! submit-and-resolve. When a round finishes a battle, the entries are
//! removed while that battle's lock is still held, so by the time the caller
//! sees the final report both participants are free again.

mod reply;

pub use reply::Reply;

use crate::battle::{battle_key, Battle, BattleSnapshot, BattleUpdate, RoundReport};
use crate::combatant::CharacterStats;
use crate::config::DuelConfig;
use crate::error::BattleError;
use crate::rng::{derive_battle_rng, master_rng, BattleRng};
use crate::roster::CharacterCatalog;
use crate::types::{Action, Intent};
use parking_lot::Mutex;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

type SharedBattle = Arc<Mutex<Battle>>;

#[derive(Default)]
struct Registry {
    /// Battle key -> battle
    battles: HashMap<String, SharedBattle>,
    /// Participant identity -> battle key
    active: HashMap<String, String>,
}

pub struct BattleManager {
    registry: Mutex<Registry>,
    catalog: Arc<dyn CharacterCatalog>,
    config: DuelConfig,
    master_rng: Mutex<ChaCha8Rng>,
}

impl BattleManager {
    /// Create a manager. An invalid config is replaced by the default tuning,
    /// keeping its seed.
    pub fn new(catalog: impl CharacterCatalog + 'static, config: DuelConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!(error = %err, "invalid duel config, using defaults");
                DuelConfig {
                    rng: config.rng,
                    ..Default::default()
                }
            }
        };
        let master_rng = Mutex::new(master_rng(config.rng.seed));
        BattleManager {
            registry: Mutex::new(Registry::default()),
            catalog: Arc::new(catalog),
            config,
            master_rng,
        }
    }

    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    /// Start a battle between two catalog identities
    pub fn start_battle(&self, id_a: &str, id_b: &str) -> Result<BattleUpdate, BattleError> {
        let a = self.lookup(id_a)?;
        let b = self.lookup(id_b)?;
        self.register(&a, &b, None)
    }

    /// Start a battle from stats the caller already resolved
    pub fn start_battle_with_stats(
        &self,
        a: &CharacterStats,
        b: &CharacterStats,
    ) -> Result<BattleUpdate, BattleError> {
        self.register(a, b, None)
    }

    /// Start a battle that draws from `rng` instead of the master generator
    pub fn start_battle_with_rng(
        &self,
        a: &CharacterStats,
        b: &CharacterStats,
        rng: BattleRng,
    ) -> Result<BattleUpdate, BattleError> {
        self.register(a, b, Some(rng))
    }

    /// Declare an action in the participant's current battle
    pub fn submit_action(
        &self,
        participant_id: &str,
        action: Action,
    ) -> Result<BattleUpdate, BattleError> {
        let battle = self
            .battle_handle(participant_id)
            .ok_or_else(|| BattleError::NotInBattle(participant_id.to_string()))?;

        let mut guard = battle.lock();
        let update = guard.submit_action(participant_id, action)?;
        if guard.is_finished() {
            self.reclaim(&battle, &guard);
        }
        Ok(update)
    }

    /// Force resolution of every round past its deadline.
    ///
    /// Does nothing unless the config sets a round deadline.
    pub fn expire_overdue(&self, now: Instant) -> Vec<RoundReport> {
        if self.config.rounds.deadline().is_none() {
            return Vec::new();
        }
        let battles: Vec<SharedBattle> = self.registry.lock().battles.values().cloned().collect();

        let mut reports = Vec::new();
        for battle in battles {
            let mut guard = battle.lock();
            if let Some(report) = guard.expire_round(now, &self.config.rounds) {
                if guard.is_finished() {
                    self.reclaim(&battle, &guard);
                }
                reports.push(report);
            }
        }
        reports
    }

    /// Map an intent onto the matching operation
    pub fn handle(&self, intent: &Intent) -> Reply {
        match intent {
            Intent::Start {
                actor_id,
                opponent_ids: [a, b],
            } => {
                debug!(actor = %actor_id, a = %a, b = %b, "start requested");
                self.start_battle(a, b).into()
            }
            Intent::Action { actor_id, action } => self.submit_action(actor_id, *action).into(),
            Intent::Unknown => Reply::unknown_command(),
        }
    }

    /// Snapshot of the battle `id` is currently in
    pub fn battle_of(&self, id: &str) -> Option<BattleSnapshot> {
        self.battle_handle(id).map(|battle| battle.lock().snapshot())
    }

    pub fn is_engaged(&self, id: &str) -> bool {
        self.registry.lock().active.contains_key(id)
    }

    /// Number of live battles
    pub fn active_battles(&self) -> usize {
        self.registry.lock().battles.len()
    }

    fn lookup(&self, id: &str) -> Result<CharacterStats, BattleError> {
        self.catalog
            .resolve(id)
            .ok_or_else(|| BattleError::UnknownCharacter(id.to_string()))
    }

    fn battle_handle(&self, id: &str) -> Option<SharedBattle> {
        let registry = self.registry.lock();
        let key = registry.active.get(id)?;
        registry.battles.get(key).cloned()
    }

    fn register(
        &self,
        a: &CharacterStats,
        b: &CharacterStats,
        rng: Option<BattleRng>,
    ) -> Result<BattleUpdate, BattleError> {
        if a.id == b.id {
            return Err(BattleError::SelfBattle(a.id.clone()));
        }
        let key = battle_key(&a.id, &b.id);
        let mut registry = self.registry.lock();

        if registry.battles.contains_key(&key) {
            return Err(BattleError::AlreadyInProgress(key));
        }
        for id in [&a.id, &b.id] {
            if registry.active.contains_key(id.as_str()) {
                return Err(BattleError::AlreadyInOtherBattle(id.clone()));
            }
        }

        let rng = match rng {
            Some(rng) => rng,
            None => derive_battle_rng(&mut *self.master_rng.lock()),
        };
        let battle = Battle::new(a, b, self.config.combat.clone(), rng)?;
        let snapshot = battle.snapshot();

        if !battle.is_finished() {
            registry.active.insert(a.id.clone(), key.clone());
            registry.active.insert(b.id.clone(), key.clone());
            registry
                .battles
                .insert(key.clone(), Arc::new(Mutex::new(battle)));
            info!(key = %key, live = registry.battles.len(), "battle registered");
        }

        Ok(BattleUpdate::Started(snapshot))
    }

    /// Drop a finished battle from both maps. Entries that were replaced in
    /// the meantime are left alone.
    fn reclaim(&self, handle: &SharedBattle, battle: &Battle) {
        let mut registry = self.registry.lock();
        let key = battle.key();

        if registry
            .battles
            .get(key)
            .is_some_and(|live| Arc::ptr_eq(live, handle))
        {
            registry.battles.remove(key);
        }
        for id in battle.participant_ids() {
            if registry.active.get(id).map(String::as_str) == Some(key) {
                registry.active.remove(id);
            }
        }
        info!(key = %key, outcome = ?battle.outcome(), "battle reclaimed");
    }
}
