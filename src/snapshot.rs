//! Per-frame render snapshot
//!
//! Taken after the tick completes. Renderers only ever see this copy, never
//! the live `GameState`.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{EntityKind, GamePhase, GameState, Owner, Plane, Projectile};

/// Plane kind without AI state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityTag {
    Player,
    Enemy,
    Boss,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: u32,
    pub tag: EntityTag,
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub show_health_bar: bool,
}

impl From<&Plane> for EntityView {
    fn from(plane: &Plane) -> Self {
        let tag = match plane.kind {
            EntityKind::Player => EntityTag::Player,
            EntityKind::Enemy(_) => EntityTag::Enemy,
            EntityKind::Boss(_) => EntityTag::Boss,
        };
        Self {
            id: plane.id,
            tag,
            pos: plane.pos,
            size: plane.size,
            health: plane.health,
            max_health: plane.max_health,
            show_health_bar: plane.show_health_bar(),
        }
    }
}

impl EntityView {
    /// Remaining health in [0, 1]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub owner: Owner,
    pub pos: Vec2,
    pub size: Vec2,
    pub damage: u32,
}

impl From<&Projectile> for ProjectileView {
    fn from(laser: &Projectile) -> Self {
        Self {
            owner: laser.owner,
            pos: laser.pos,
            size: laser.size,
            damage: laser.damage,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub screen: Vec2,
    /// Player first, then enemies in order, then the boss
    pub entities: Vec<EntityView>,
    /// Player lasers first, then hostile lasers
    pub projectiles: Vec<ProjectileView>,
    pub score: u64,
    pub health: u32,
    pub max_health: u32,
    pub kill_count: u64,
    pub phase: GamePhase,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let entities = std::iter::once(&state.player)
            .chain(&state.enemies)
            .chain(&state.boss)
            .map(EntityView::from)
            .collect();
        let projectiles = state
            .player_lasers
            .iter()
            .chain(&state.hostile_lasers)
            .map(ProjectileView::from)
            .collect();

        Self {
            tick: state.time_ticks,
            screen: state.screen(),
            entities,
            projectiles,
            score: state.score,
            health: state.player.health,
            max_health: state.player.max_health,
            kill_count: state.kill_count,
            phase: state.phase,
        }
    }

    pub fn player(&self) -> Option<&EntityView> {
        self.entities.iter().find(|e| e.tag == EntityTag::Player)
    }

    pub fn boss(&self) -> Option<&EntityView> {
        self.entities.iter().find(|e| e.tag == EntityTag::Boss)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &EntityView> {
        self.entities.iter().filter(|e| e.tag == EntityTag::Enemy)
    }
}
