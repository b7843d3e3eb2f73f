//! Application state

use crate::simulation::DuelSimulation;
use duel_core::{
    Action, BattleManager, BattleSnapshot, BattleUpdate, CharacterStats, DuelConfig, Intent,
    Reply, Roster, RoundReport,
};
use rand::SeedableRng;
use std::time::Instant;

/// Number of auto-played duels per simulation run
const SIMULATION_DUELS: u32 = 200;
const SIMULATION_MAX_ROUNDS: u32 = 200;
const MAX_LOG_LINES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Select,
    Battle,
}

/// The two local players
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    pub fn label(&self) -> &'static str {
        match self {
            Seat::One => "Player 1",
            Seat::Two => "Player 2",
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub show_help: bool,
    pub manager: BattleManager,
    pub characters: Vec<CharacterStats>,
    /// Roster index picked by each seat
    pub picks: [usize; 2],
    /// Seat whose pick the arrow keys move
    pub picking: Seat,
    pub log: Vec<String>,
    pub log_scroll: usize,
    /// Last finished duel, kept so the result stays on screen
    pub last_result: Option<RoundReport>,
    pub simulation: Option<DuelSimulation>,
    sim_rng: rand::rngs::StdRng,
}

impl App {
    pub fn new(roster: Roster, config: DuelConfig) -> Self {
        let characters: Vec<CharacterStats> = roster.iter().cloned().collect();
        let sim_seed = config.rng.seed.unwrap_or(0);
        let second = if characters.len() > 1 { 1 } else { 0 };
        App {
            screen: Screen::Select,
            show_help: false,
            manager: BattleManager::new(roster, config),
            characters,
            picks: [0, second],
            picking: Seat::One,
            log: Vec::new(),
            log_scroll: 0,
            last_result: None,
            simulation: None,
            sim_rng: rand::rngs::StdRng::seed_from_u64(sim_seed),
        }
    }

    pub fn fighter(&self, seat: Seat) -> Option<&CharacterStats> {
        let index = match seat {
            Seat::One => self.picks[0],
            Seat::Two => self.picks[1],
        };
        self.characters.get(index)
    }

    fn fighter_id(&self, seat: Seat) -> String {
        self.fighter(seat).map(|c| c.id.clone()).unwrap_or_default()
    }

    /// Snapshot of the battle the two seats are in
    pub fn snapshot(&self) -> Option<BattleSnapshot> {
        self.manager.battle_of(&self.fighter_id(Seat::One))
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn switch_seat(&mut self) {
        self.picking = match self.picking {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        };
    }

    pub fn on_up(&mut self) {
        match self.screen {
            Screen::Select => self.move_pick(-1),
            Screen::Battle => self.log_scroll = self.log_scroll.saturating_add(1),
        }
    }

    pub fn on_down(&mut self) {
        match self.screen {
            Screen::Select => self.move_pick(1),
            Screen::Battle => self.log_scroll = self.log_scroll.saturating_sub(1),
        }
    }

    fn move_pick(&mut self, delta: isize) {
        if self.characters.is_empty() {
            return;
        }
        let slot = match self.picking {
            Seat::One => 0,
            Seat::Two => 1,
        };
        let len = self.characters.len() as isize;
        self.picks[slot] = (self.picks[slot] as isize + delta).rem_euclid(len) as usize;
        self.simulation = None;
    }

    /// Start a duel between the picked fighters
    pub fn start(&mut self) {
        let intent = Intent::Start {
            actor_id: self.fighter_id(Seat::One),
            opponent_ids: [self.fighter_id(Seat::One), self.fighter_id(Seat::Two)],
        };
        let reply = self.manager.handle(&intent);
        if reply.ok {
            self.log.clear();
            self.log_scroll = 0;
            self.last_result = None;
        }
        self.push_reply(&reply);
        if reply.ok && !reply.finished {
            self.screen = Screen::Battle;
        }
    }

    /// Declare an action for a seat
    pub fn declare(&mut self, seat: Seat, action: Action) {
        if self.screen != Screen::Battle {
            return;
        }
        let actor = self.fighter_id(seat);
        match self.manager.submit_action(&actor, action) {
            // Don't reveal the choice to the other player
            Ok(BattleUpdate::Waiting { .. }) => {
                self.push_line(format!("{} is ready.", seat.label()));
            }
            Ok(update) => {
                self.push_reply(&Reply::from(&update));
                if let BattleUpdate::Resolved(report) = update {
                    if report.outcome.is_finished() {
                        self.finish(report);
                    }
                }
            }
            Err(err) => self.push_reply(&Reply::from(&err)),
        }
    }

    /// Resolve rounds that ran past the configured deadline
    pub fn tick(&mut self) {
        if self.screen != Screen::Battle {
            return;
        }
        for report in self.manager.expire_overdue(Instant::now()) {
            self.push_line("Time's up!".to_string());
            for line in report.summary().lines() {
                self.push_line(line.to_string());
            }
            if report.outcome.is_finished() {
                self.finish(report);
            }
        }
    }

    fn finish(&mut self, report: RoundReport) {
        match serde_json::to_string(&report) {
            Ok(json) => tracing::info!(report = %json, "duel over"),
            Err(err) => tracing::warn!(error = %err, "could not serialize final round"),
        }
        self.last_result = Some(report);
        self.screen = Screen::Select;
    }

    /// Immediately restart the same pairing
    pub fn rematch(&mut self) {
        if self.screen == Screen::Select && !self.log.is_empty() {
            self.start();
        }
    }

    /// Auto-play duels between the current picks
    pub fn simulate(&mut self) {
        let (Some(a), Some(b)) = (self.fighter(Seat::One), self.fighter(Seat::Two)) else {
            return;
        };
        if a.id == b.id {
            self.push_line("Pick two different fighters to simulate.".to_string());
            return;
        }
        let (a, b) = (a.clone(), b.clone());
        let result = DuelSimulation::run(
            &a,
            &b,
            SIMULATION_DUELS,
            SIMULATION_MAX_ROUNDS,
            &mut self.sim_rng,
        );
        self.simulation = Some(result);
    }

    fn push_reply(&mut self, reply: &Reply) {
        let prefix = if reply.ok { "" } else { "! " };
        for line in reply.message.lines() {
            self.push_line(format!("{}{}", prefix, line));
        }
    }

    fn push_line(&mut self, line: String) {
        self.log.push(line);
        if self.log.len() > MAX_LOG_LINES {
            let excess = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..excess);
        }
    }
}
