//! Tejas Thrust - a top-down arcade dogfight
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, combat, game state)
//! - `config`: Immutable game tuning passed into the simulation
//! - `snapshot`: Read-only per-frame view handed to renderers
//! - `driver`: Fixed-rate frame loop (input -> tick -> render -> pace)
//! - `renderer`: Rendering collaborators (terminal, headless)
//! - `platform`: Terminal session and input handling
//! - `ui`: HUD layout and button hit-testing shared by frontends

pub mod config;
pub mod driver;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod snapshot;
pub mod ui;

pub use config::{ConfigError, GameConfig};
pub use driver::{DriverExit, FrameDriver};
pub use snapshot::RenderSnapshot;

/// Fixed rules that are part of the game design rather than its tuning
pub mod consts {
    /// Per-axis scale for diagonal movement (1/sqrt(2) to three places)
    pub const DIAGONAL_FACTOR: f32 = 0.707;

    /// Enemy heading re-roll interval in ticks (inclusive)
    pub const ENEMY_REROLL_TICKS: (u32, u32) = (60, 120);
    /// Boss heading re-roll interval in ticks (inclusive)
    pub const BOSS_REROLL_TICKS: (u32, u32) = (30, 90);
    /// Enemies drift sideways at this fraction of their speed
    pub const ENEMY_SIDEWAYS_FACTOR: f32 = 0.5;
    /// Vertical headings a boss can roll
    pub const BOSS_DIRECTIONS_Y: [f32; 3] = [-0.5, 0.0, 0.5];
    /// Horizontal headings enemies and bosses can roll
    pub const DIRECTIONS_X: [f32; 3] = [-1.0, 0.0, 1.0];

    /// Enemies are dropped once they are this far below the screen
    pub const ENEMY_EXIT_MARGIN: f32 = 50.0;
    /// Player lasers are dropped once above this y
    pub const PLAYER_LASER_EXIT_Y: f32 = -10.0;
    /// Hostile lasers are dropped once this far below the screen
    pub const HOSTILE_LASER_EXIT_MARGIN: f32 = 10.0;

    /// Horizontal inset for regular enemy spawns
    pub const SPAWN_MARGIN_X: f32 = 50.0;
    /// Regular enemies appear this far above the visible area
    pub const SPAWN_Y_RANGE: (f32, f32) = (-100.0, -50.0);
    /// Boss spawn height (horizontally centred)
    pub const BOSS_SPAWN_Y: f32 = 100.0;
    /// Player starts this far above the bottom edge, horizontally centred
    pub const PLAYER_START_OFFSET_Y: f32 = 100.0;

    /// Clickable button size
    pub const BUTTON_WIDTH: f32 = 80.0;
    pub const BUTTON_HEIGHT: f32 = 40.0;
    /// Button inset from the bottom edge (top of the button)
    pub const BUTTON_BOTTOM_OFFSET: f32 = 60.0;
    /// Button inset from the left/right edge
    pub const BUTTON_SIDE_MARGIN: f32 = 20.0;

    /// Every player laser hit removes exactly one point of health
    pub const PLAYER_LASER_DAMAGE: u32 = 1;

    /// Score for destroying a regular enemy
    pub const ENEMY_SCORE: u64 = 1;
    /// Score for destroying the boss
    pub const BOSS_SCORE: u64 = 5;
}
