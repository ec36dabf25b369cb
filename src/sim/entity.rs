//! Planes: the player, regular enemies and the boss
//!
//! One `Plane` struct carries what every plane shares (position, box,
//! health, weapon). Kind-specific state lives in the `EntityKind` variant and
//! motion dispatches on it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::projectile::{Owner, Projectile};
use crate::config::GameConfig;
use crate::consts::*;

/// Directional keys held during a tick (each independent)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Steering {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// AI heading for enemies and the boss
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pilot {
    /// -1, 0 or 1
    pub direction_x: f32,
    /// Enemies always descend (1.0); the boss rolls -0.5, 0 or 0.5
    pub direction_y: f32,
    /// Ticks until the heading is re-rolled
    pub countdown: u32,
    /// Burst lasers still to fire (enemies only)
    #[serde(default)]
    pub burst_remaining: u32,
}

/// Which kind of plane this is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy(Pilot),
    Boss(Pilot),
}

/// Laser a plane fires
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Signed vertical speed of fired lasers
    pub velocity: f32,
    pub damage: u32,
    pub size: Vec2,
}

/// A plane entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub id: u32,
    pub kind: EntityKind,
    /// Centre of the bounding box
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
    pub max_health: u32,
    /// Pixels per tick
    pub speed: f32,
    pub shoot_cooldown_ms: u64,
    pub last_shot_ms: u64,
    pub weapon: Weapon,
}

impl Plane {
    /// The player, centred horizontally near the bottom of the screen
    pub fn player(id: u32, config: &GameConfig) -> Self {
        Self {
            id,
            kind: EntityKind::Player,
            pos: Vec2::new(
                config.screen_width / 2.0,
                config.screen_height - PLAYER_START_OFFSET_Y,
            ),
            size: Vec2::new(config.plane_width, config.plane_height),
            health: config.player_max_health,
            max_health: config.player_max_health,
            speed: config.player_speed,
            shoot_cooldown_ms: config.player_shoot_cooldown_ms,
            last_shot_ms: 0,
            weapon: Weapon {
                velocity: -config.player_laser_speed,
                damage: PLAYER_LASER_DAMAGE,
                size: Vec2::new(config.laser_width, config.laser_height),
            },
        }
    }

    pub fn enemy(id: u32, pos: Vec2, config: &GameConfig, rng: &mut impl Rng) -> Self {
        let pilot = Pilot {
            direction_x: if rng.random_bool(0.5) { -1.0 } else { 1.0 },
            direction_y: 1.0,
            countdown: roll_countdown(ENEMY_REROLL_TICKS, rng),
            burst_remaining: 0,
        };
        Self {
            id,
            kind: EntityKind::Enemy(pilot),
            pos,
            size: Vec2::new(config.plane_width, config.plane_height),
            health: config.enemy_health,
            max_health: config.enemy_health,
            speed: config.enemy_speed,
            shoot_cooldown_ms: config.enemy_shoot_cooldown_ms,
            last_shot_ms: 0,
            weapon: Weapon {
                velocity: config.enemy_laser_speed,
                damage: config.enemy_laser_damage,
                size: Vec2::new(config.laser_width, config.laser_height),
            },
        }
    }

    pub fn boss(id: u32, pos: Vec2, config: &GameConfig, rng: &mut impl Rng) -> Self {
        let pilot = Pilot {
            direction_x: if rng.random_bool(0.5) { -1.0 } else { 1.0 },
            direction_y: 0.0,
            countdown: roll_countdown(BOSS_REROLL_TICKS, rng),
            burst_remaining: 0,
        };
        Self {
            id,
            kind: EntityKind::Boss(pilot),
            pos,
            size: Vec2::new(config.boss_width, config.boss_height),
            health: config.boss_health,
            max_health: config.boss_health,
            speed: config.boss_speed,
            shoot_cooldown_ms: config.boss_shoot_cooldown_ms,
            last_shot_ms: 0,
            weapon: Weapon {
                velocity: config.boss_laser_speed,
                damage: config.boss_laser_damage,
                size: Vec2::new(config.laser_width, config.laser_height),
            },
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player)
    }

    /// Damaged enemies and bosses show a health bar; the player never does
    pub fn show_health_bar(&self) -> bool {
        !self.is_player() && self.health < self.max_health
    }

    /// Remove health, never going below zero
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Advance one tick. `steering` is only read for the player.
    pub fn advance(&mut self, steering: Steering, screen: Vec2, rng: &mut impl Rng) {
        match self.kind {
            EntityKind::Player => update_player(self, steering, screen),
            EntityKind::Enemy(_) => update_enemy(self, screen, rng),
            EntityKind::Boss(_) => update_boss(self, screen, rng),
        }
    }

    /// Fire if the cooldown has elapsed
    pub fn shoot(&mut self, now_ms: u64) -> Option<Projectile> {
        debug_assert!(now_ms >= self.last_shot_ms, "clock went backwards");
        if now_ms.saturating_sub(self.last_shot_ms) > self.shoot_cooldown_ms {
            self.last_shot_ms = now_ms;
            Some(self.laser())
        } else {
            None
        }
    }

    /// Per-tick fire decision for enemies and the boss.
    ///
    /// Enemies occasionally start a burst: a short salvo spaced by
    /// `enemy_burst_interval_ms` that bypasses both the shoot roll and the
    /// regular cooldown. Otherwise each tick rolls the kind's shoot chance
    /// and then goes through `shoot`.
    pub fn hostile_fire(
        &mut self,
        now_ms: u64,
        config: &GameConfig,
        rng: &mut impl Rng,
    ) -> Option<Projectile> {
        let chance = match &mut self.kind {
            EntityKind::Player => return None,
            EntityKind::Boss(_) => config.boss_shoot_chance,
            EntityKind::Enemy(pilot) => {
                if pilot.burst_remaining == 0
                    && config.enemy_burst_shots > 0
                    && rng.random_bool(config.enemy_burst_chance)
                {
                    pilot.burst_remaining = config.enemy_burst_shots;
                }
                if pilot.burst_remaining > 0 {
                    if now_ms.saturating_sub(self.last_shot_ms) < config.enemy_burst_interval_ms {
                        return None;
                    }
                    pilot.burst_remaining -= 1;
                    self.last_shot_ms = now_ms;
                    return Some(self.laser());
                }
                config.enemy_shoot_chance
            }
        };

        if rng.random_bool(chance) {
            self.shoot(now_ms)
        } else {
            None
        }
    }

    /// A laser leaving the nose (player, upward) or the tail (hostiles, downward)
    fn laser(&self) -> Projectile {
        let half_height = self.size.y / 2.0;
        let (owner, spawn) = match self.kind {
            EntityKind::Player => (Owner::Player, self.pos - Vec2::new(0.0, half_height)),
            EntityKind::Enemy(_) | EntityKind::Boss(_) => {
                (Owner::Hostile, self.pos + Vec2::new(0.0, half_height))
            }
        };
        Projectile::new(
            owner,
            spawn,
            self.weapon.velocity,
            self.weapon.size,
            self.weapon.damage,
        )
    }
}

fn roll_countdown(range: (u32, u32), rng: &mut impl Rng) -> u32 {
    rng.random_range(range.0..=range.1)
}

fn roll<const N: usize>(choices: &[f32; N], rng: &mut impl Rng) -> f32 {
    choices[rng.random_range(0..N)]
}

/// Tick the re-roll countdown; returns true when the heading should change
fn countdown_elapsed(pilot: &mut Pilot) -> bool {
    pilot.countdown = pilot.countdown.saturating_sub(1);
    pilot.countdown == 0
}

/// Force the horizontal heading back inward at the screen edges
fn bounce_horizontal(pilot: &mut Pilot, x: f32, half_width: f32, screen_width: f32) {
    if x <= half_width {
        pilot.direction_x = 1.0;
    } else if x >= screen_width - half_width {
        pilot.direction_x = -1.0;
    }
}

fn update_player(plane: &mut Plane, steering: Steering, screen: Vec2) {
    let mut dx = 0.0;
    let mut dy = 0.0;
    if steering.left {
        dx -= plane.speed;
    }
    if steering.right {
        dx += plane.speed;
    }
    if steering.up {
        dy -= plane.speed;
    }
    if steering.down {
        dy += plane.speed;
    }

    // Diagonal speed must match axial speed
    if dx != 0.0 && dy != 0.0 {
        dx *= DIAGONAL_FACTOR;
        dy *= DIAGONAL_FACTOR;
    }

    let half = plane.size / 2.0;
    plane.pos.x = (plane.pos.x + dx).clamp(half.x, screen.x - half.x);
    plane.pos.y = (plane.pos.y + dy).clamp(half.y, screen.y - half.y);
}

fn update_enemy(plane: &mut Plane, screen: Vec2, rng: &mut impl Rng) {
    let EntityKind::Enemy(pilot) = &mut plane.kind else {
        return;
    };

    if countdown_elapsed(pilot) {
        pilot.direction_x = roll(&DIRECTIONS_X, rng);
        pilot.countdown = roll_countdown(ENEMY_REROLL_TICKS, rng);
    }

    plane.pos.x += pilot.direction_x * plane.speed * ENEMY_SIDEWAYS_FACTOR;
    plane.pos.y += pilot.direction_y * plane.speed;

    bounce_horizontal(pilot, plane.pos.x, plane.size.x / 2.0, screen.x);
}

fn update_boss(plane: &mut Plane, screen: Vec2, rng: &mut impl Rng) {
    let EntityKind::Boss(pilot) = &mut plane.kind else {
        return;
    };

    if countdown_elapsed(pilot) {
        pilot.direction_x = roll(&DIRECTIONS_X, rng);
        pilot.direction_y = roll(&BOSS_DIRECTIONS_Y, rng);
        pilot.countdown = roll_countdown(BOSS_REROLL_TICKS, rng);
    }

    plane.pos.x += pilot.direction_x * plane.speed;
    plane.pos.y += pilot.direction_y * plane.speed;

    bounce_horizontal(pilot, plane.pos.x, plane.size.x / 2.0, screen.x);

    // Stay in the top third of the screen
    let half_height = plane.size.y / 2.0;
    if plane.pos.y <= half_height {
        pilot.direction_y = 0.5;
    } else if plane.pos.y >= screen.y / 3.0 {
        pilot.direction_y = -0.5;
    }
}
