//! Input collaborator interface
//!
//! Frontends turn whatever they read (terminal keys, mouse clicks, a script)
//! into one `FrameInput` per frame: discrete events plus held directions.

use std::collections::VecDeque;

use crate::sim::Steering;

/// Discrete input events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed / quit key
    Quit,
    /// Fire key pressed
    Fire,
    /// Pause key pressed
    TogglePause,
    /// Pointer pressed at world coordinates
    PointerDown { x: f32, y: f32 },
}

/// Everything read from the input collaborator for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    /// Directional keys currently held
    pub held: Steering,
}

impl FrameInput {
    pub fn with_event(event: InputEvent) -> Self {
        Self {
            events: vec![event],
            held: Steering::default(),
        }
    }

    pub fn holding(held: Steering) -> Self {
        Self {
            events: Vec::new(),
            held,
        }
    }
}

/// Source of per-frame input
pub trait InputSource {
    fn poll(&mut self) -> std::io::Result<FrameInput>;
}

/// Replays a fixed list of frames, then reports idle frames
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<FrameInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = FrameInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, frame: FrameInput) {
        self.frames.push_back(frame);
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> std::io::Result<FrameInput> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_drains_then_idles() {
        let mut input = ScriptedInput::new([
            FrameInput::with_event(InputEvent::Fire),
            FrameInput::holding(Steering { up: true, ..Default::default() }),
        ]);
        assert_eq!(input.remaining(), 2);
        assert_eq!(input.poll().unwrap().events, vec![InputEvent::Fire]);
        assert!(input.poll().unwrap().held.up);
        assert_eq!(input.poll().unwrap(), FrameInput::default());
    }
}
