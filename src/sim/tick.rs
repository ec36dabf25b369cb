//! Fixed timestep simulation tick
//!
//! Order within a tick: player input -> lasers and hostiles advance ->
//! spawner -> combat -> off-screen cleanup -> game-over check.

use super::collision::resolve;
use super::entity::Steering;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::ENEMY_EXIT_MARGIN;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Directional keys held this tick
    pub steering: Steering,
    /// Fire was pressed this tick
    pub fire: bool,
    /// Idle/demo mode - AI flies the player
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Does nothing unless the game is running; paused and finished games keep
/// their last state for rendering.
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;
    let now = state.now_ms();
    let screen = state.screen();

    let input = if input.idle_mode {
        demo_input(state)
    } else {
        *input
    };

    // Player
    state.player.advance(input.steering, screen, &mut state.rng);
    if input.fire {
        if let Some(laser) = state.player.shoot(now) {
            state.player_lasers.push(laser);
        }
    }

    // Lasers already in flight
    for laser in state
        .player_lasers
        .iter_mut()
        .chain(state.hostile_lasers.iter_mut())
    {
        laser.advance();
    }

    // Hostiles move, then may fire
    for enemy in state.enemies.iter_mut().chain(state.boss.iter_mut()) {
        enemy.advance(Steering::default(), screen, &mut state.rng);
        if let Some(laser) = enemy.hostile_fire(now, &state.config, &mut state.rng) {
            state.hostile_lasers.push(laser);
        }
    }

    // Spawning
    let boss_active = state.boss_active();
    let decision = state
        .spawner
        .try_spawn(now, state.kill_count, boss_active, &mut state.rng);
    state.apply_spawn(decision);

    // Combat
    resolve(state);

    // Stale entities
    let exit_y = screen.y + ENEMY_EXIT_MARGIN;
    let mut escaped = Vec::new();
    state.enemies.retain(|enemy| {
        if enemy.pos.y > exit_y {
            escaped.push(enemy.id);
            false
        } else {
            true
        }
    });
    state
        .events
        .extend(escaped.into_iter().map(|id| GameEvent::EnemyEscaped { id }));
    state.player_lasers.retain(|laser| !laser.is_off_screen(screen.y));
    state.hostile_lasers.retain(|laser| !laser.is_off_screen(screen.y));

    if state.player.health == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!(
            "Game over after {} ticks: score {}, kills {}",
            state.time_ticks,
            state.score,
            state.kill_count
        );
    }

    debug_assert!(state.player.health <= state.player.max_health);
    debug_assert_eq!(state.phase == GamePhase::GameOver, state.player.health == 0);
    debug_assert!(state.enemies.iter().all(|e| e.health > 0));
}

/// Steer toward the most threatening hostile and keep firing.
///
/// Target is the boss when present, otherwise the lowest on-screen enemy.
/// With nothing to shoot at, drift back to the centre.
fn demo_input(state: &GameState) -> TickInput {
    let target_x = state
        .boss
        .as_ref()
        .map(|boss| boss.pos.x)
        .or_else(|| {
            state
                .enemies
                .iter()
                .filter(|e| e.pos.y > 0.0)
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|e| e.pos.x)
        })
        .unwrap_or(state.config.screen_width / 2.0);

    let dx = target_x - state.player.pos.x;
    let dead_zone = state.player.speed;
    TickInput {
        steering: Steering {
            left: dx < -dead_zone,
            right: dx > dead_zone,
            ..Default::default()
        },
        fire: true,
        idle_mode: true,
    }
}
