//! Laser projectiles
//!
//! Lasers only travel vertically. The sign of `velocity` encodes direction:
//! negative is up (player fire), positive is down (hostile fire).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::{HOSTILE_LASER_EXIT_MARGIN, PLAYER_LASER_EXIT_Y};

/// Which pool a projectile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Hostile,
}

/// A laser in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: Owner,
    /// Centre of the laser
    pub pos: Vec2,
    /// Vertical speed in pixels per tick
    pub velocity: f32,
    pub size: Vec2,
    /// Health removed from whatever this hits (always >= 1)
    pub damage: u32,
}

impl Projectile {
    pub fn new(owner: Owner, pos: Vec2, velocity: f32, size: Vec2, damage: u32) -> Self {
        debug_assert!(damage >= 1, "projectiles must deal damage");
        Self {
            owner,
            pos,
            velocity,
            size,
            damage: damage.max(1),
        }
    }

    pub fn advance(&mut self) {
        self.pos.y += self.velocity;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Player lasers leave through the top, hostile lasers through the bottom
    pub fn is_off_screen(&self, screen_height: f32) -> bool {
        match self.owner {
            Owner::Player => self.pos.y < PLAYER_LASER_EXIT_Y,
            Owner::Hostile => self.pos.y > screen_height + HOSTILE_LASER_EXIT_MARGIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_follows_velocity_sign() {
        let mut up = Projectile::new(Owner::Player, Vec2::new(100.0, 100.0), -8.0, Vec2::new(4.0, 10.0), 1);
        let mut down = Projectile::new(Owner::Hostile, Vec2::new(100.0, 100.0), 12.0, Vec2::new(4.0, 10.0), 5);
        up.advance();
        down.advance();
        assert_eq!(up.pos.y, 92.0);
        assert_eq!(down.pos.y, 112.0);
    }

    #[test]
    fn test_off_screen_depends_on_owner() {
        let size = Vec2::new(4.0, 10.0);
        let player = Projectile::new(Owner::Player, Vec2::new(0.0, -10.5), -8.0, size, 1);
        assert!(player.is_off_screen(800.0));
        let player = Projectile::new(Owner::Player, Vec2::new(0.0, -9.0), -8.0, size, 1);
        assert!(!player.is_off_screen(800.0));

        let hostile = Projectile::new(Owner::Hostile, Vec2::new(0.0, 811.0), 10.0, size, 1);
        assert!(hostile.is_off_screen(800.0));
        // Far above the screen is not "off" for a downward laser
        let hostile = Projectile::new(Owner::Hostile, Vec2::new(0.0, -50.0), 10.0, size, 1);
        assert!(!hostile.is_off_screen(800.0));
    }
}
