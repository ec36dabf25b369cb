//! Fixed-rate frame loop
//!
//! Each frame: poll input -> apply UI events -> tick (if running) ->
//! snapshot -> render -> wait out the rest of the frame. Everything happens
//! on the calling thread; the renderer only sees the finished snapshot.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use crate::input::{InputEvent, InputSource};
use crate::renderer::Renderer;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::snapshot::RenderSnapshot;
use crate::ui::{self, Button};

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverExit {
    /// Quit requested (key, exit button, closed input)
    Quit,
    /// Frame limit reached
    FrameLimit,
}

/// Frame pacing strategy
pub trait FramePacer {
    /// Block until the frame that started at `frame_start` is over
    fn wait(&mut self, frame_start: Instant);
}

/// Sleeps off whatever is left of a fixed frame budget
#[derive(Debug, Clone, Copy)]
pub struct FixedRatePacer {
    frame: Duration,
}

impl FixedRatePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
        }
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }
}

impl FramePacer for FixedRatePacer {
    fn wait(&mut self, frame_start: Instant) {
        let elapsed = frame_start.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        }
    }
}

/// Runs frames back to back (tests, headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl FramePacer for NoPacing {
    fn wait(&mut self, _frame_start: Instant) {}
}

/// Owns the game state and drives it with its collaborators
pub struct FrameDriver<I, R, P> {
    state: GameState,
    input: I,
    renderer: R,
    pacer: P,
    demo: bool,
    frames: u64,
    render_failures: u64,
}

impl<I: InputSource, R: Renderer, P: FramePacer> FrameDriver<I, R, P> {
    pub fn new(state: GameState, input: I, renderer: R, pacer: P) -> Self {
        Self {
            state,
            input,
            renderer,
            pacer,
            demo: false,
            frames: 0,
            render_failures: 0,
        }
    }

    /// Let the demo pilot fly the player
    pub fn with_demo(mut self, demo: bool) -> Self {
        self.demo = demo;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn render_failures(&self) -> u64 {
        self.render_failures
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Run until quit, or until `max_frames` frames have been rendered
    pub fn run(&mut self, max_frames: Option<u64>) -> std::io::Result<DriverExit> {
        loop {
            if max_frames.is_some_and(|max| self.frames >= max) {
                return Ok(DriverExit::FrameLimit);
            }
            if let ControlFlow::Break(exit) = self.step()? {
                return Ok(exit);
            }
        }
    }

    /// One full frame
    pub fn step(&mut self) -> std::io::Result<ControlFlow<DriverExit>> {
        let frame_start = Instant::now();

        let frame = self.input.poll()?;
        let mut fire = false;
        for event in frame.events {
            match event {
                InputEvent::Quit => return Ok(ControlFlow::Break(DriverExit::Quit)),
                InputEvent::Fire => fire = true,
                InputEvent::TogglePause => self.toggle_pause(),
                InputEvent::PointerDown { x, y } => {
                    match ui::hit_test(self.state.screen(), glam::Vec2::new(x, y)) {
                        Some(Button::Exit) => return Ok(ControlFlow::Break(DriverExit::Quit)),
                        Some(Button::PauseResume) => self.toggle_pause(),
                        None => {}
                    }
                }
            }
        }

        if self.state.is_running() {
            let input = TickInput {
                steering: frame.held,
                fire,
                idle_mode: self.demo,
            };
            tick(&mut self.state, &input);
            self.log_events();
        }

        let snapshot = RenderSnapshot::capture(&self.state);
        if let Err(e) = self.renderer.render(&snapshot) {
            // Rendering trouble never stops the simulation
            self.render_failures += 1;
            if self.render_failures == 1 {
                log::warn!("Render error: {e}");
            } else {
                log::debug!("Render error #{}: {e}", self.render_failures);
            }
        }
        self.frames += 1;

        self.pacer.wait(frame_start);
        Ok(ControlFlow::Continue(()))
    }

    fn toggle_pause(&mut self) {
        let before = self.state.phase;
        let after = self.state.toggle_pause();
        if before != after {
            log::info!(
                "{} at tick {}",
                if after == GamePhase::Paused { "Paused" } else { "Resumed" },
                self.state.time_ticks
            );
        }
    }

    fn log_events(&self) {
        for event in &self.state.events {
            match event {
                GameEvent::PlayerHit { damage, health } => {
                    log::debug!("Player hit for {damage} ({health} left)")
                }
                other => log::trace!("tick {}: {other:?}", self.state.time_ticks),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::input::{FrameInput, ScriptedInput};
    use crate::renderer::HeadlessRenderer;
    use crate::sim::Steering;

    fn driver(frames: Vec<FrameInput>) -> FrameDriver<ScriptedInput, HeadlessRenderer, NoPacing> {
        FrameDriver::new(
            GameState::new(77, GameConfig::default()),
            ScriptedInput::new(frames),
            HeadlessRenderer::new(),
            NoPacing,
        )
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(&mut self, _snapshot: &RenderSnapshot) -> std::io::Result<()> {
            Err(std::io::Error::other("no display"))
        }
    }

    #[test]
    fn test_runs_to_frame_limit() {
        let mut driver = driver(Vec::new());
        assert_eq!(driver.run(Some(120)).unwrap(), DriverExit::FrameLimit);
        assert_eq!(driver.frames(), 120);
        assert_eq!(driver.renderer().frames, 120);
        assert_eq!(driver.state().time_ticks, 120);
    }

    #[test]
    fn test_quit_event_stops_before_tick() {
        let mut driver = driver(vec![
            FrameInput::default(),
            FrameInput::with_event(InputEvent::Quit),
        ]);
        assert_eq!(driver.run(None).unwrap(), DriverExit::Quit);
        assert_eq!(driver.state().time_ticks, 1);
        assert_eq!(driver.frames(), 1);
    }

    #[test]
    fn test_exit_button_quits() {
        let mut driver = driver(vec![FrameInput::with_event(InputEvent::PointerDown {
            x: 50.0,
            y: 760.0,
        })]);
        assert_eq!(driver.run(Some(10)).unwrap(), DriverExit::Quit);
    }

    #[test]
    fn test_pause_button_freezes_and_still_renders() {
        let mut driver = driver(Vec::new());
        driver.run(Some(100)).unwrap();

        let click = FrameInput::with_event(InputEvent::PointerDown { x: 1150.0, y: 760.0 });
        driver.input.push(click.clone());
        let held = Steering { left: true, ..Default::default() };
        for _ in 0..20 {
            driver.input.push(FrameInput::holding(held));
        }

        driver.step().unwrap();
        assert_eq!(driver.state().phase, GamePhase::Paused);
        let frozen = RenderSnapshot::capture(driver.state());

        for _ in 0..20 {
            driver.step().unwrap();
        }
        assert_eq!(RenderSnapshot::capture(driver.state()), frozen);
        // Rendering kept going while paused
        assert_eq!(driver.renderer().frames, 121);
        assert_eq!(driver.renderer().last.as_ref().unwrap().phase, GamePhase::Paused);

        driver.input.push(click);
        driver.step().unwrap();
        assert_eq!(driver.state().phase, GamePhase::Running);
        assert_eq!(driver.state().time_ticks, frozen.tick + 1);
    }

    #[test]
    fn test_render_failure_does_not_stop_simulation() {
        let mut driver = FrameDriver::new(
            GameState::new(77, GameConfig::default()),
            ScriptedInput::default(),
            FailingRenderer,
            NoPacing,
        );
        assert_eq!(driver.run(Some(30)).unwrap(), DriverExit::FrameLimit);
        assert_eq!(driver.state().time_ticks, 30);
        assert_eq!(driver.render_failures(), 30);
    }

    #[test]
    fn test_fixed_rate_pacer_frame() {
        let pacer = FixedRatePacer::new(60);
        assert_eq!(pacer.frame(), Duration::from_secs(1) / 60);
    }
}
