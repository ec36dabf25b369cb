//! Enemy and boss spawn cadence
//!
//! The spawner only decides; `GameState::apply_spawn` inserts the plane.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::{BOSS_SPAWN_Y, SPAWN_MARGIN_X, SPAWN_Y_RANGE};

/// Outcome of one spawn check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnDecision {
    None,
    Enemy(Vec2),
    Boss(Vec2),
}

/// Spawn timer and cadence rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Time of the last regular spawn (ms of simulated time)
    pub last_spawn_ms: u64,
    interval_ms: u64,
    boss_spawn_count: u64,
    screen: Vec2,
}

impl Spawner {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            last_spawn_ms: 0,
            interval_ms: config.enemy_spawn_interval_ms,
            boss_spawn_count: u64::from(config.boss_spawn_count),
            screen: Vec2::new(config.screen_width, config.screen_height),
        }
    }

    /// True when `kill_count` has just reached a boss milestone
    pub fn boss_due(&self, kill_count: u64, boss_active: bool) -> bool {
        kill_count > 0 && kill_count % self.boss_spawn_count == 0 && !boss_active
    }

    /// Decide what (if anything) appears this tick.
    ///
    /// The boss milestone wins over a regular spawn, and a live boss
    /// suppresses regular spawns entirely. Only regular spawns reset the
    /// spawn timer.
    pub fn try_spawn(
        &mut self,
        now_ms: u64,
        kill_count: u64,
        boss_active: bool,
        rng: &mut impl Rng,
    ) -> SpawnDecision {
        if self.boss_due(kill_count, boss_active) {
            return SpawnDecision::Boss(Vec2::new(self.screen.x / 2.0, BOSS_SPAWN_Y));
        }

        if !boss_active && now_ms.saturating_sub(self.last_spawn_ms) > self.interval_ms {
            let x = rng.random_range(SPAWN_MARGIN_X..=self.screen.x - SPAWN_MARGIN_X);
            let y = rng.random_range(SPAWN_Y_RANGE.0..=SPAWN_Y_RANGE.1);
            self.last_spawn_ms = now_ms;
            return SpawnDecision::Enemy(Vec2::new(x, y));
        }

        SpawnDecision::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_regular_spawn_after_interval() {
        let mut spawner = Spawner::new(&GameConfig::default());
        let mut rng = Pcg32::seed_from_u64(1);

        assert_eq!(spawner.try_spawn(1000, 0, false, &mut rng), SpawnDecision::None);
        match spawner.try_spawn(1001, 0, false, &mut rng) {
            SpawnDecision::Enemy(pos) => {
                assert!((50.0..=1150.0).contains(&pos.x));
                assert!((-100.0..=-50.0).contains(&pos.y));
            }
            other => panic!("expected enemy spawn, got {other:?}"),
        }
        assert_eq!(spawner.last_spawn_ms, 1001);
        assert_eq!(spawner.try_spawn(1500, 0, false, &mut rng), SpawnDecision::None);
    }

    #[test]
    fn test_boss_takes_priority() {
        let mut spawner = Spawner::new(&GameConfig::default());
        let mut rng = Pcg32::seed_from_u64(1);

        let decision = spawner.try_spawn(5000, 50, false, &mut rng);
        assert_eq!(decision, SpawnDecision::Boss(Vec2::new(600.0, 100.0)));
        // Boss spawns leave the regular timer alone
        assert_eq!(spawner.last_spawn_ms, 0);
    }

    #[test]
    fn test_boss_only_on_positive_multiples() {
        let spawner = Spawner::new(&GameConfig::default());
        assert!(!spawner.boss_due(0, false));
        assert!(!spawner.boss_due(49, false));
        assert!(spawner.boss_due(50, false));
        assert!(!spawner.boss_due(51, false));
        assert!(spawner.boss_due(100, false));
        assert!(!spawner.boss_due(100, true));
    }

    #[test]
    fn test_active_boss_suppresses_regular_spawns() {
        let mut spawner = Spawner::new(&GameConfig::default());
        let mut rng = Pcg32::seed_from_u64(1);

        for now in (2000..20_000).step_by(500) {
            assert_eq!(spawner.try_spawn(now, 51, true, &mut rng), SpawnDecision::None);
            // Also while the milestone count is still showing
            assert_eq!(spawner.try_spawn(now, 50, true, &mut rng), SpawnDecision::None);
        }
    }
}
