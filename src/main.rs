//! Tejas Thrust entry point
//!
//! Parses the command line, loads the tuning and runs the game either in the
//! terminal or headless.

use std::io::{BufWriter, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tejas_thrust::driver::{FixedRatePacer, FrameDriver, NoPacing};
use tejas_thrust::input::ScriptedInput;
use tejas_thrust::platform::{TerminalInput, TerminalSession};
use tejas_thrust::renderer::{HeadlessRenderer, TerminalRenderer};
use tejas_thrust::sim::GameState;
use tejas_thrust::{DriverExit, GameConfig};

const DEFAULT_HEADLESS_TICKS: u64 = 3600;

#[derive(Parser, Debug)]
#[command(name = "tejas-thrust")]
#[command(about = "Top-down arcade dogfight in the terminal")]
struct Cli {
    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// JSON file overriding the default tuning
    #[arg(long)]
    config: Option<PathBuf>,
    /// Run without a terminal and print a JSON summary
    #[arg(long)]
    headless: bool,
    /// Stop after this many frames (headless default: 3600)
    #[arg(long)]
    ticks: Option<u64>,
    /// Let the demo pilot fly
    #[arg(long)]
    demo: bool,
    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    config.validate().context("invalid configuration")?;

    if cli.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("Tejas Thrust starting with seed {seed}");
    let state = GameState::new(seed, config);

    if cli.headless {
        run_headless(state, cli.ticks.unwrap_or(DEFAULT_HEADLESS_TICKS), cli.demo)
    } else {
        run_terminal(state, cli.ticks, cli.demo)
    }
}

fn run_headless(state: GameState, ticks: u64, demo: bool) -> Result<()> {
    let mut driver =
        FrameDriver::new(state, ScriptedInput::default(), HeadlessRenderer::new(), NoPacing)
            .with_demo(demo);
    driver.run(Some(ticks)).context("headless run failed")?;

    let summary = driver.state().summary();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run_terminal(state: GameState, ticks: Option<u64>, demo: bool) -> Result<()> {
    let pacer = FixedRatePacer::new(state.config.fps);
    let input = TerminalInput::new(state.screen());

    let (exit, summary) = {
        let _session = TerminalSession::start().context("failed to set up the terminal")?;
        let renderer = TerminalRenderer::new(BufWriter::new(stdout()));
        let mut driver = FrameDriver::new(state, input, renderer, pacer).with_demo(demo);
        let exit = driver.run(ticks)?;
        (exit, driver.state().summary())
    };

    if exit == DriverExit::FrameLimit {
        log::info!("Frame limit reached");
    }
    println!(
        "Final score: {} ({} kills, {} ticks, seed {})",
        summary.score, summary.kill_count, summary.ticks, summary.seed
    );
    Ok(())
}
