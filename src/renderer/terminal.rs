//! Terminal renderer
//!
//! Draws a `RenderSnapshot` with crossterm. World pixels are scaled onto the
//! character grid; row 0 is reserved for the HUD.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};
use glam::Vec2;

use super::Renderer;
use crate::sim::{GamePhase, Owner};
use crate::snapshot::{EntityTag, EntityView, ProjectileView, RenderSnapshot};
use crate::ui::{self, HealthBand, Rect};

// ── Colour palette ──────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BOSS: Color = Color::Red;
const C_LASER_PLAYER: Color = Color::Cyan;
const C_LASER_HOSTILE: Color = Color::Magenta;
const C_BUTTON: Color = Color::Grey;
const C_OVERLAY: Color = Color::White;

const FALLBACK_SIZE: (u16, u16) = (80, 24);
const HEALTH_BAR_CELLS: usize = 20;

/// Maps world pixels onto terminal cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    screen: Vec2,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, screen: Vec2) -> Self {
        Self {
            cols: cols.max(2),
            rows: rows.max(3),
            screen,
        }
    }

    /// Current terminal size, or 80x24 when it can't be queried
    pub fn from_terminal(screen: Vec2) -> Self {
        let (cols, rows) = terminal::size().unwrap_or(FALLBACK_SIZE);
        Self::new(cols, rows, screen)
    }

    /// Rows available to the playfield (below the HUD)
    fn play_rows(&self) -> u16 {
        self.rows - 1
    }

    /// Cell for a world point, `None` when off the grid
    pub fn to_cell(&self, world: Vec2) -> Option<(u16, u16)> {
        let col = (world.x / self.screen.x * self.cols as f32).floor();
        let row = (world.y / self.screen.y * self.play_rows() as f32).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.play_rows() as f32 {
            return None;
        }
        Some((col as u16, row as u16 + 1))
    }

    /// World point at the centre of a cell. The HUD row maps to the top edge.
    pub fn to_world(&self, col: u16, row: u16) -> Vec2 {
        let play_row = row.saturating_sub(1) as f32;
        Vec2::new(
            (col as f32 + 0.5) / self.cols as f32 * self.screen.x,
            (play_row + 0.5) / self.play_rows() as f32 * self.screen.y,
        )
    }
}

/// Crossterm renderer over any writer (stdout in practice)
pub struct TerminalRenderer<W: Write> {
    out: W,
    viewport: Option<Viewport>,
}

impl<W: Write> TerminalRenderer<W> {
    /// Follows the terminal size, re-queried every frame
    pub fn new(out: W) -> Self {
        Self {
            out,
            viewport: None,
        }
    }

    /// Fixed grid, for tests and recordings
    pub fn with_viewport(out: W, viewport: Viewport) -> Self {
        Self {
            out,
            viewport: Some(viewport),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw_hud(&mut self, vp: &Viewport, snapshot: &RenderSnapshot) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        self.out.queue(Print(format!("Score:{:>6}", snapshot.score)))?;

        let fraction = if snapshot.max_health == 0 {
            0.0
        } else {
            snapshot.health as f32 / snapshot.max_health as f32
        };
        let label = format!(" {:>3}/{}", snapshot.health, snapshot.max_health);
        let width = (HEALTH_BAR_CELLS + label.len() + 1) as u16;
        self.out.queue(cursor::MoveTo(vp.cols.saturating_sub(width), 0))?;
        self.out.queue(style::SetForegroundColor(band_color(HealthBand::from_fraction(fraction))))?;
        self.out.queue(Print(bar(fraction, HEALTH_BAR_CELLS)))?;
        self.out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        self.out.queue(Print(label))?;
        Ok(())
    }

    fn draw_entity(&mut self, vp: &Viewport, entity: &EntityView) -> std::io::Result<()> {
        let Some((col, row)) = vp.to_cell(entity.pos) else {
            return Ok(());
        };
        let (color, rows): (Color, &[&str]) = match entity.tag {
            // Nose first, then wings
            EntityTag::Player => (C_PLAYER, &["▲", "/█\\"]),
            EntityTag::Enemy => (C_ENEMY, &["«▼»"]),
            EntityTag::Boss => (C_BOSS, &["<═╦═>", "╚▼▼╝"]),
        };
        self.out.queue(style::SetForegroundColor(color))?;
        for (i, glyph) in rows.iter().enumerate() {
            let y = row + i as u16;
            if y >= vp.rows {
                break;
            }
            let half = glyph.chars().count() as u16 / 2;
            self.out.queue(cursor::MoveTo(col.saturating_sub(half), y))?;
            self.out.queue(Print(*glyph))?;
        }

        if entity.show_health_bar && row > 1 {
            let cells = (entity.size.x / vp.screen.x * vp.cols as f32).round().max(3.0) as usize;
            let fraction = entity.health_fraction();
            self.out.queue(cursor::MoveTo(col.saturating_sub(cells as u16 / 2), row - 1))?;
            self.out.queue(style::SetForegroundColor(band_color(HealthBand::from_fraction(fraction))))?;
            self.out.queue(Print(bar(fraction, cells)))?;
        }
        Ok(())
    }

    fn draw_projectile(&mut self, vp: &Viewport, laser: &ProjectileView) -> std::io::Result<()> {
        let Some((col, row)) = vp.to_cell(laser.pos) else {
            return Ok(());
        };
        let (color, glyph) = match laser.owner {
            Owner::Player => (C_LASER_PLAYER, "║"),
            Owner::Hostile => (C_LASER_HOSTILE, "↓"),
        };
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(glyph))?;
        Ok(())
    }

    fn draw_button(&mut self, vp: &Viewport, rect: Rect, label: &str) -> std::io::Result<()> {
        let Some((col, row)) = vp.to_cell(rect.center()) else {
            return Ok(());
        };
        let text = format!("[{label}]");
        let half = text.chars().count() as u16 / 2;
        self.out.queue(cursor::MoveTo(col.saturating_sub(half), row))?;
        self.out.queue(style::SetForegroundColor(C_BUTTON))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn draw_overlay(&mut self, vp: &Viewport, snapshot: &RenderSnapshot) -> std::io::Result<()> {
        let lines = ui::overlay_lines(snapshot.phase, snapshot.score);
        let top = (vp.rows / 2).saturating_sub(lines.len() as u16 / 2);
        self.out.queue(style::SetForegroundColor(C_OVERLAY))?;
        for (i, line) in lines.iter().enumerate() {
            let half = line.chars().count() as u16 / 2;
            self.out.queue(cursor::MoveTo((vp.cols / 2).saturating_sub(half), top + i as u16))?;
            self.out.queue(Print(line))?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, snapshot: &RenderSnapshot) -> std::io::Result<()> {
        let vp = self
            .viewport
            .unwrap_or_else(|| Viewport::from_terminal(snapshot.screen));

        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_hud(&vp, snapshot)?;

        // Lasers underneath planes
        for laser in &snapshot.projectiles {
            self.draw_projectile(&vp, laser)?;
        }
        for entity in &snapshot.entities {
            self.draw_entity(&vp, entity)?;
        }

        self.draw_button(&vp, ui::exit_button(snapshot.screen), "EXIT")?;
        self.draw_button(&vp, ui::pause_button(snapshot.screen), ui::pause_label(snapshot.phase))?;

        if snapshot.phase != GamePhase::Running {
            self.draw_overlay(&vp, snapshot)?;
        }

        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, vp.rows - 1))?;
        self.out.flush()
    }
}

fn band_color(band: HealthBand) -> Color {
    match band {
        HealthBand::Healthy => Color::Green,
        HealthBand::Warning => Color::Yellow,
        HealthBand::Critical => Color::Red,
    }
}

fn bar(fraction: f32, cells: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * cells as f32).round() as usize).min(cells);
    format!("{}{}", "█".repeat(filled), "░".repeat(cells - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::GameState;

    const SCREEN: Vec2 = Vec2::new(1200.0, 800.0);

    #[test]
    fn test_viewport_mapping() {
        let vp = Viewport::new(120, 41, SCREEN);
        assert_eq!(vp.to_cell(Vec2::ZERO), Some((0, 1)));
        assert_eq!(vp.to_cell(Vec2::new(600.0, 400.0)), Some((60, 21)));
        assert_eq!(vp.to_cell(Vec2::new(1199.0, 799.0)), Some((119, 40)));
        assert_eq!(vp.to_cell(Vec2::new(600.0, -60.0)), None);
        assert_eq!(vp.to_cell(Vec2::new(1200.0, 10.0)), None);
    }

    #[test]
    fn test_cell_round_trips_through_buttons() {
        let vp = Viewport::new(120, 41, SCREEN);
        let exit = ui::exit_button(SCREEN);
        let (col, row) = vp.to_cell(exit.center()).unwrap();
        assert_eq!(ui::hit_test(SCREEN, vp.to_world(col, row)), Some(ui::Button::Exit));
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(1.0, 4), "████");
        assert_eq!(bar(0.5, 4), "██░░");
        assert_eq!(bar(0.0, 4), "░░░░");
        assert_eq!(bar(2.0, 4), "████");
    }

    #[test]
    fn test_render_writes_hud_and_buttons() {
        let state = GameState::new(3, GameConfig::default());
        let mut renderer = TerminalRenderer::with_viewport(Vec::new(), Viewport::new(100, 30, SCREEN));
        renderer.render(&RenderSnapshot::capture(&state)).unwrap();
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.contains("Score:     0"));
        assert!(text.contains("[EXIT]"));
        assert!(text.contains("[PAUSE]"));
        assert!(text.contains("▲"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_render_paused_overlay() {
        let mut state = GameState::new(3, GameConfig::default());
        state.toggle_pause();
        let mut renderer = TerminalRenderer::with_viewport(Vec::new(), Viewport::new(100, 30, SCREEN));
        renderer.render(&RenderSnapshot::capture(&state)).unwrap();
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.contains("GAME PAUSED"));
        assert!(text.contains("[RESUME]"));
    }
}
