//! Native terminal platform: crossterm session setup and keyboard/mouse input

use std::collections::HashMap;
use std::io::{Write, stdout};
use std::time::Duration;

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};
use glam::Vec2;

use crate::input::{FrameInput, InputEvent, InputSource};
use crate::renderer::terminal::Viewport;
use crate::sim::Steering;

/// A key counts as held if it was seen within this many frames.
/// Classic terminals only report presses (OS auto-repeat), never releases.
const HOLD_WINDOW: u64 = 4;

/// Raw mode + alternate screen for as long as this lives
pub struct TerminalSession {
    keyboard_enhanced: bool,
}

impl TerminalSession {
    pub fn start() -> std::io::Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        out.execute(EnableMouseCapture)?;

        // Release events where the terminal supports them
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        log::debug!("Terminal session started (keyboard enhancement: {keyboard_enhanced})");

        Ok(Self { keyboard_enhanced })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(DisableMouseCapture);
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = out.flush();
    }
}

/// Tracks which keys are down and turns one-shot keys into events
#[derive(Debug, Default)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event seen during `frame`
    pub fn handle(&mut self, key: KeyEvent, frame: u64) -> Option<InputEvent> {
        let code = normalize(key.code);
        match key.kind {
            KeyEventKind::Press => {
                self.key_frame.insert(code, frame);
                match code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        Some(InputEvent::Quit)
                    }
                    KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
                    KeyCode::Char('p') => Some(InputEvent::TogglePause),
                    KeyCode::Char(' ') => Some(InputEvent::Fire),
                    _ => None,
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, frame);
                None
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
                None
            }
        }
    }

    fn is_held(&self, code: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&code)
            .is_some_and(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
    }

    pub fn steering(&self, frame: u64) -> Steering {
        Steering {
            up: self.is_held(KeyCode::Up, frame) || self.is_held(KeyCode::Char('w'), frame),
            down: self.is_held(KeyCode::Down, frame) || self.is_held(KeyCode::Char('s'), frame),
            left: self.is_held(KeyCode::Left, frame) || self.is_held(KeyCode::Char('a'), frame),
            right: self.is_held(KeyCode::Right, frame) || self.is_held(KeyCode::Char('d'), frame),
        }
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Non-blocking crossterm input, polled once per frame on the game thread
pub struct TerminalInput {
    keys: KeyTracker,
    screen: Vec2,
    frame: u64,
}

impl TerminalInput {
    /// `screen` is the world size, used to map mouse cells to world pixels
    pub fn new(screen: Vec2) -> Self {
        Self {
            keys: KeyTracker::new(),
            screen,
            frame: 0,
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> std::io::Result<FrameInput> {
        self.frame += 1;
        let mut events = Vec::new();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => events.extend(self.keys.handle(key, self.frame)),
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    let world = Viewport::from_terminal(self.screen).to_world(column, row);
                    events.push(InputEvent::PointerDown {
                        x: world.x,
                        y: world.y,
                    });
                }
                _ => {}
            }
        }

        Ok(FrameInput {
            events,
            held: self.keys.steering(self.frame),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_one_shot_keys() {
        let mut keys = KeyTracker::new();
        assert_eq!(keys.handle(press(KeyCode::Char(' ')), 1), Some(InputEvent::Fire));
        assert_eq!(keys.handle(press(KeyCode::Char('P')), 1), Some(InputEvent::TogglePause));
        assert_eq!(keys.handle(press(KeyCode::Esc), 1), Some(InputEvent::Quit));
        assert_eq!(
            keys.handle(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), 1),
            Some(InputEvent::Quit)
        );
        assert_eq!(keys.handle(press(KeyCode::Left), 1), None);
    }

    #[test]
    fn test_held_keys_expire() {
        let mut keys = KeyTracker::new();
        keys.handle(press(KeyCode::Left), 10);
        keys.handle(press(KeyCode::Char('W')), 10);
        let held = keys.steering(12);
        assert!(held.left && held.up);
        assert!(!held.right && !held.down);
        assert_eq!(keys.steering(10 + HOLD_WINDOW + 1), Steering::default());
    }

    #[test]
    fn test_release_clears_immediately() {
        let mut keys = KeyTracker::new();
        keys.handle(press(KeyCode::Right), 5);
        let mut release = press(KeyCode::Right);
        release.kind = KeyEventKind::Release;
        keys.handle(release, 5);
        assert!(!keys.steering(5).right);
    }
}
