//! Rendering collaborators
//!
//! The simulation hands each renderer a finished `RenderSnapshot`; how it
//! ends up on screen (or nowhere) is the renderer's business.

pub mod terminal;

pub use terminal::TerminalRenderer;

use crate::snapshot::RenderSnapshot;

/// Consumes one snapshot per frame
pub trait Renderer {
    fn render(&mut self, snapshot: &RenderSnapshot) -> std::io::Result<()>;
}

/// Renders nothing; keeps the latest snapshot for inspection
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub last: Option<RenderSnapshot>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, snapshot: &RenderSnapshot) -> std::io::Result<()> {
        self.frames += 1;
        if snapshot.tick % 600 == 0 && snapshot.tick > 0 {
            log::debug!(
                "tick {}: score {} health {} enemies {}",
                snapshot.tick,
                snapshot.score,
                snapshot.health,
                snapshot.enemies().count()
            );
        }
        self.last = Some(snapshot.clone());
        Ok(())
    }
}
