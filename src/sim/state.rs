//! Game state and core simulation types
//!
//! `GameState` exclusively owns every plane and both laser pools. Other
//! parts of the simulation mutate them only through a `&mut GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::Plane;
use super::projectile::Projectile;
use super::spawner::{SpawnDecision, Spawner};
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Simulation frozen, still rendered
    Paused,
    /// Player health reached zero (terminal)
    GameOver,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32 },
    BossSpawned { id: u32 },
    EnemyDestroyed { id: u32 },
    BossDestroyed { id: u32 },
    /// An enemy flew off the bottom of the screen
    EnemyEscaped { id: u32 },
    PlayerHit { damage: u32, health: u32 },
    GameOver { score: u64 },
}

/// End-of-run numbers, printed by headless runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub seed: u64,
    pub ticks: u64,
    pub score: u64,
    pub kill_count: u64,
    pub player_health: u32,
    pub phase: GamePhase,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Never decreases
    pub score: u64,
    /// Enemies plus bosses destroyed; never decreases
    pub kill_count: u64,
    /// Simulation tick counter (only advances while running)
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Plane,
    /// Active enemies, in spawn order
    pub enemies: Vec<Plane>,
    /// At most one boss at a time
    pub boss: Option<Plane>,
    pub player_lasers: Vec<Projectile>,
    pub hostile_lasers: Vec<Projectile>,
    pub spawner: Spawner,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game with the given seed
    pub fn new(seed: u64, config: GameConfig) -> Self {
        let player = Plane::player(1, &config);
        Self {
            spawner: Spawner::new(&config),
            config,
            seed,
            score: 0,
            kill_count: 0,
            time_ticks: 0,
            phase: GamePhase::Running,
            player,
            enemies: Vec::new(),
            boss: None,
            player_lasers: Vec::new(),
            hostile_lasers: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 2,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Simulated time: the single clock reading used for every cooldown
    pub fn now_ms(&self) -> u64 {
        self.time_ticks * self.config.tick_ms()
    }

    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.config.screen_width, self.config.screen_height)
    }

    pub fn player_health(&self) -> u32 {
        self.player.health
    }

    pub fn boss_active(&self) -> bool {
        self.boss.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Toggle between running and paused. Game over can't be toggled.
    /// Returns the phase after the toggle.
    pub fn toggle_pause(&mut self) -> GamePhase {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::GameOver => GamePhase::GameOver,
        };
        self.phase
    }

    /// Insert a regular enemy at `pos`, returning its id
    pub fn spawn_enemy_at(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let enemy = Plane::enemy(id, pos, &self.config, &mut self.rng);
        self.enemies.push(enemy);
        self.events.push(GameEvent::EnemySpawned { id });
        id
    }

    /// Insert the boss at `pos`. Returns `None` if a boss is already active.
    pub fn spawn_boss_at(&mut self, pos: Vec2) -> Option<u32> {
        if self.boss.is_some() {
            return None;
        }
        let id = self.next_entity_id();
        self.boss = Some(Plane::boss(id, pos, &self.config, &mut self.rng));
        self.events.push(GameEvent::BossSpawned { id });
        log::info!("Boss incoming after {} kills", self.kill_count);
        Some(id)
    }

    /// Carry out a spawner decision
    pub fn apply_spawn(&mut self, decision: SpawnDecision) {
        match decision {
            SpawnDecision::None => {}
            SpawnDecision::Enemy(pos) => {
                self.spawn_enemy_at(pos);
            }
            SpawnDecision::Boss(pos) => {
                self.spawn_boss_at(pos);
            }
        }
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            seed: self.seed,
            ticks: self.time_ticks,
            score: self.score,
            kill_count: self.kill_count,
            player_health: self.player.health,
            phase: self.phase,
        }
    }
}
