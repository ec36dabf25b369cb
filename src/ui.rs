//! HUD layout shared by renderers and input handling
//!
//! Positions are in world pixels (the configured screen size), so hit-tests
//! behave the same whatever the frontend draws with.

use glam::Vec2;

use crate::consts::{BUTTON_BOTTOM_OFFSET, BUTTON_HEIGHT, BUTTON_SIDE_MARGIN, BUTTON_WIDTH};
use crate::sim::GamePhase;
use crate::sim::collision::Aabb;

/// Clickable HUD buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Exit,
    PauseResume,
}

/// Axis-aligned rectangle given by its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        Aabb::from_center(self.center(), Vec2::new(self.w, self.h)).contains(point)
    }
}

/// Exit button, bottom left
pub fn exit_button(screen: Vec2) -> Rect {
    Rect::new(
        BUTTON_SIDE_MARGIN,
        screen.y - BUTTON_BOTTOM_OFFSET,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

/// Pause/resume button, bottom right
pub fn pause_button(screen: Vec2) -> Rect {
    Rect::new(
        screen.x - BUTTON_WIDTH - BUTTON_SIDE_MARGIN,
        screen.y - BUTTON_BOTTOM_OFFSET,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

/// Which button (if any) is under `point`
pub fn hit_test(screen: Vec2, point: Vec2) -> Option<Button> {
    if exit_button(screen).contains(point) {
        Some(Button::Exit)
    } else if pause_button(screen).contains(point) {
        Some(Button::PauseResume)
    } else {
        None
    }
}

pub fn pause_label(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Paused => "RESUME",
        GamePhase::Running | GamePhase::GameOver => "PAUSE",
    }
}

/// Health bar colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Healthy,
    Warning,
    Critical,
}

impl HealthBand {
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction > 0.3 {
            HealthBand::Healthy
        } else if fraction > 0.1 {
            HealthBand::Warning
        } else {
            HealthBand::Critical
        }
    }
}

/// Centered overlay text for the current phase
pub fn overlay_lines(phase: GamePhase, score: u64) -> Vec<String> {
    match phase {
        GamePhase::Running => Vec::new(),
        GamePhase::Paused => vec![
            "GAME PAUSED".to_string(),
            "Click RESUME (or press P) to continue".to_string(),
        ],
        GamePhase::GameOver => vec![
            "GAME OVER".to_string(),
            format!("Final Score: {score}"),
            "Click EXIT (or press Q) to quit".to_string(),
        ],
    }
}
