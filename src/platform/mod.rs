//! Platform layer
//!
//! Terminal setup/teardown and turning raw terminal events into
//! `FrameInput`s.

pub mod terminal;

pub use terminal::{KeyTracker, TerminalInput, TerminalSession};
