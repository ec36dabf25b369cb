//! Hit detection and combat resolution
//!
//! Everything collides as an axis-aligned box centred on its position.
//! Resolution is two-phase: first every hit is decided against the state as
//! it stood at the start of resolution (discounting damage already queued),
//! then damage, removals and scoring are applied in one pass.

use glam::Vec2;

use super::state::{GameEvent, GameState};
use crate::consts::{BOSS_SCORE, ENEMY_SCORE, PLAYER_LASER_DAMAGE};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of `size` centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; boxes that only share an edge don't collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Half-open point test (left/top edges inclusive)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

/// What a single player laser hit this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LaserHit {
    Enemy(usize),
    Boss,
}

/// Resolve all projectile collisions for one tick.
///
/// Player lasers test enemies in collection order and stop at the first hit;
/// only a laser that hit no enemy is tested against the boss. A target whose
/// queued damage already covers its remaining health is no longer hittable,
/// so a laser never lands on something that is already dead this tick.
/// Hostile lasers then test the player and deal their own damage value.
pub fn resolve(state: &mut GameState) {
    // --- Phase 1: decide ---
    let mut enemy_damage = vec![0u32; state.enemies.len()];
    let mut boss_damage = 0u32;
    let mut hits: Vec<Option<LaserHit>> = Vec::with_capacity(state.player_lasers.len());

    for laser in &state.player_lasers {
        let rect = laser.aabb();

        let enemy_hit = state.enemies.iter().enumerate().find(|(i, enemy)| {
            enemy.health > enemy_damage[*i] && rect.overlaps(&enemy.aabb())
        });

        let hit = if let Some((i, _)) = enemy_hit {
            enemy_damage[i] += PLAYER_LASER_DAMAGE;
            Some(LaserHit::Enemy(i))
        } else {
            match &state.boss {
                Some(boss) if boss.health > boss_damage && rect.overlaps(&boss.aabb()) => {
                    boss_damage += PLAYER_LASER_DAMAGE;
                    Some(LaserHit::Boss)
                }
                _ => None,
            }
        };
        hits.push(hit);
    }

    // --- Phase 2: apply ---
    let mut spent = hits.iter();
    state
        .player_lasers
        .retain(|_| spent.next().is_some_and(|hit| hit.is_none()));

    for (enemy, damage) in state.enemies.iter_mut().zip(&enemy_damage) {
        if *damage > 0 {
            enemy.take_damage(*damage);
        }
    }

    let mut destroyed = Vec::new();
    state.enemies.retain(|enemy| {
        if enemy.health == 0 {
            destroyed.push(enemy.id);
            false
        } else {
            true
        }
    });
    for id in destroyed {
        state.score += ENEMY_SCORE;
        state.kill_count += 1;
        state.events.push(GameEvent::EnemyDestroyed { id });
    }

    if boss_damage > 0 {
        let boss_down = state.boss.as_mut().is_some_and(|boss| {
            boss.take_damage(boss_damage);
            boss.health == 0
        });
        if boss_down {
            if let Some(boss) = state.boss.take() {
                state.score += BOSS_SCORE;
                state.kill_count += 1;
                state.events.push(GameEvent::BossDestroyed { id: boss.id });
                log::info!("Boss destroyed (score {})", state.score);
            }
        }
    }

    // Hostile lasers vs player
    let player_rect = state.player.aabb();
    let mut damage_taken = 0u32;
    state.hostile_lasers.retain(|laser| {
        if laser.aabb().overlaps(&player_rect) {
            damage_taken += laser.damage;
            false
        } else {
            true
        }
    });
    if damage_taken > 0 {
        state.player.take_damage(damage_taken);
        state.events.push(GameEvent::PlayerHit {
            damage: damage_taken,
            health: state.player.health,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::entity::Plane;
    use crate::sim::projectile::{Owner, Projectile};

    fn laser_at(pos: Vec2) -> Projectile {
        Projectile::new(Owner::Player, pos, -8.0, Vec2::new(4.0, 10.0), 1)
    }

    fn hostile_at(pos: Vec2, damage: u32) -> Projectile {
        Projectile::new(Owner::Hostile, pos, 10.0, Vec2::new(4.0, 10.0), damage)
    }

    fn state_with_enemy(pos: Vec2) -> GameState {
        let mut state = GameState::new(7, GameConfig::default());
        let id = state.next_entity_id();
        let enemy = Plane::enemy(id, pos, &state.config, &mut state.rng);
        state.enemies.push(enemy);
        state
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_center(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::from_center(Vec2::new(9.0, 0.0), Vec2::new(10.0, 10.0));
        let c = Aabb::from_center(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Touching edges only
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_aabb_contains_point() {
        let a = Aabb::from_center(Vec2::new(50.0, 50.0), Vec2::new(20.0, 10.0));
        assert!(a.contains(Vec2::new(40.0, 45.0)));
        assert!(!a.contains(Vec2::new(60.0, 50.0)));
        assert!(!a.contains(Vec2::new(39.9, 50.0)));
    }

    #[test]
    fn test_enemy_takes_two_hits() {
        let mut state = state_with_enemy(Vec2::new(300.0, 300.0));

        state.player_lasers.push(laser_at(Vec2::new(300.0, 300.0)));
        resolve(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 1);
        assert!(state.player_lasers.is_empty());
        assert_eq!(state.score, 0);

        state.player_lasers.push(laser_at(Vec2::new(300.0, 300.0)));
        resolve(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 1);
        assert_eq!(state.kill_count, 1);
    }

    #[test]
    fn test_laser_hits_only_first_enemy() {
        let mut state = state_with_enemy(Vec2::new(300.0, 300.0));
        let id = state.next_entity_id();
        let second = Plane::enemy(id, Vec2::new(310.0, 300.0), &state.config, &mut state.rng);
        state.enemies.push(second);

        state.player_lasers.push(laser_at(Vec2::new(305.0, 300.0)));
        resolve(&mut state);
        assert_eq!(state.enemies[0].health, 1);
        assert_eq!(state.enemies[1].health, 2);
    }

    #[test]
    fn test_dead_enemy_not_hit_twice() {
        let mut state = state_with_enemy(Vec2::new(300.0, 300.0));
        let id = state.next_entity_id();
        let second = Plane::enemy(id, Vec2::new(310.0, 300.0), &state.config, &mut state.rng);
        state.enemies.push(second);

        // Three lasers: two finish the first enemy, the third moves on
        for _ in 0..3 {
            state.player_lasers.push(laser_at(Vec2::new(305.0, 300.0)));
        }
        resolve(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 1);
        assert_eq!(state.kill_count, 1);
        assert!(state.player_lasers.is_empty());
    }

    #[test]
    fn test_enemy_shields_boss() {
        let mut state = state_with_enemy(Vec2::new(600.0, 100.0));
        let id = state.next_entity_id();
        state.boss = Some(Plane::boss(id, Vec2::new(600.0, 100.0), &state.config, &mut state.rng));

        state.player_lasers.push(laser_at(Vec2::new(600.0, 100.0)));
        resolve(&mut state);
        assert_eq!(state.enemies[0].health, 1);
        assert_eq!(state.boss.as_ref().unwrap().health, 5);
    }

    #[test]
    fn test_boss_takes_five_hits() {
        let mut state = GameState::new(3, GameConfig::default());
        let id = state.next_entity_id();
        state.boss = Some(Plane::boss(id, Vec2::new(600.0, 100.0), &state.config, &mut state.rng));

        for hit in 1..=4 {
            state.player_lasers.push(laser_at(Vec2::new(600.0, 100.0)));
            resolve(&mut state);
            assert_eq!(state.boss.as_ref().unwrap().health, 5 - hit);
        }
        assert!(state.boss_active());

        state.player_lasers.push(laser_at(Vec2::new(600.0, 100.0)));
        resolve(&mut state);
        assert!(!state.boss_active());
        assert_eq!(state.score, 5);
        assert_eq!(state.kill_count, 1);
        assert!(state.events.contains(&GameEvent::BossDestroyed { id }));
    }

    #[test]
    fn test_missed_laser_survives() {
        let mut state = state_with_enemy(Vec2::new(300.0, 300.0));
        state.player_lasers.push(laser_at(Vec2::new(900.0, 300.0)));
        resolve(&mut state);
        assert_eq!(state.player_lasers.len(), 1);
        assert_eq!(state.enemies[0].health, 2);
    }

    #[test]
    fn test_hostile_laser_damages_player() {
        let mut state = GameState::new(3, GameConfig::default());
        let at = state.player.pos;
        state.hostile_lasers.push(hostile_at(at, 5));
        state.hostile_lasers.push(hostile_at(Vec2::new(10.0, 10.0), 5));

        resolve(&mut state);
        assert_eq!(state.player.health, 95);
        assert_eq!(state.hostile_lasers.len(), 1);
    }

    #[test]
    fn test_player_health_clamps_at_zero() {
        let mut state = GameState::new(3, GameConfig::default());
        state.player.health = 3;
        let at = state.player.pos;
        state.hostile_lasers.push(hostile_at(at, 5));
        resolve(&mut state);
        assert_eq!(state.player.health, 0);
    }
}
