#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Chase experience.
//!
//! By default the game opens a window and advances the simulation at a fixed
//! tick rate. `--headless` replays a move script instead and prints the final
//! board, which keeps runs reproducible in terminals and tests.

mod config;
mod headless;
mod pacing;
mod report;

use std::{cell::RefCell, path::PathBuf, rc::Rc};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use maze_chase_core::WELCOME_BANNER;
use maze_chase_rendering::{
    DirectionLatch, LoopControl, Palette, Presentation, RenderingBackend, Scene,
    TileGridPresentation,
};
use maze_chase_rendering_macroquad::MacroquadBackend;
use maze_chase_world::{query, GameSession};
use tracing::{info, warn};

use crate::{
    config::{GameConfig, Settings},
    pacing::TickPacer,
    report::GameReport,
};

/// Whether presentation waits for the display refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SyncMode {
    /// Synchronise with the display refresh rate.
    On,
    /// Present frames as fast as possible.
    Off,
}

/// Collect every pickup in the maze while avoiding the adversaries.
#[derive(Debug, Parser)]
#[command(name = "maze-chase")]
#[command(version)]
struct Cli {
    /// TOML file providing the seed, tick rate and level.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for the adversaries' random walks. Random when unset.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation ticks per second in windowed mode.
    #[arg(long, value_name = "TICKS_PER_SECOND")]
    tick_rate: Option<f32>,

    /// Run without a window, replaying `--moves`.
    #[arg(long)]
    headless: bool,

    /// Move script for headless runs: `U`, `D`, `L`, `R`, and `.` for no input.
    #[arg(long, value_name = "SCRIPT", requires = "headless")]
    moves: Option<String>,

    /// Tick limit for headless runs. Defaults to the script length.
    #[arg(long, requires = "headless")]
    max_ticks: Option<u64>,

    /// Print the final report as JSON.
    #[arg(long)]
    json: bool,

    /// Log every tick.
    #[arg(short, long)]
    verbose: bool,

    /// Controls whether vertical sync is enabled.
    #[arg(long, value_enum, default_value_t = SyncMode::On)]
    vsync: SyncMode,

    /// Print frame rate metrics once per second.
    #[arg(long)]
    show_fps: bool,
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    info!("{WELCOME_BANNER}");

    let file = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let settings = file.resolve(cli.seed, cli.tick_rate, rand::random)?;
    info!(seed = settings.seed, tick_rate = settings.tick_rate, "starting session");

    let report = if cli.headless {
        run_headless(&cli, settings)?
    } else {
        run_windowed(&cli, settings)?
    };

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let from_env = std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_filter(
            verbose,
            from_env.as_deref(),
        )))
        .with_writer(std::io::stderr)
        .init();
}

/// Filter directives: `--verbose` forces debug, otherwise `RUST_LOG` when
/// set, otherwise info.
fn log_filter(verbose: bool, from_env: Option<&str>) -> String {
    if verbose {
        return tracing::Level::DEBUG.as_str().to_ascii_lowercase();
    }
    match from_env.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives.to_owned(),
        _ => tracing::Level::INFO.as_str().to_ascii_lowercase(),
    }
}

fn build_scene(session: &GameSession) -> Result<Scene> {
    let grid = query::grid(session);
    let tile_grid = TileGridPresentation::new(
        grid.columns(),
        grid.rows(),
        TileGridPresentation::DEFAULT_TILE_LENGTH,
    )?;
    let scene = Scene::new(tile_grid, grid.cells().to_vec(), &query::snapshot(session))?;
    Ok(scene)
}

fn run_headless(cli: &Cli, settings: Settings) -> Result<GameReport> {
    let moves = headless::parse_moves(cli.moves.as_deref().unwrap_or_default())
        .context("invalid move script")?;
    let max_ticks = cli.max_ticks.unwrap_or(moves.len() as u64);

    let mut session = GameSession::seeded(settings.level, settings.seed);
    headless::run(&mut session, &moves, max_ticks)?;

    if !cli.json {
        println!("{}", build_scene(&session)?);
    }
    Ok(GameReport::from_session(settings.seed, &session))
}

fn run_windowed(cli: &Cli, settings: Settings) -> Result<GameReport> {
    let Settings {
        seed,
        tick_rate,
        level,
    } = settings;

    let mut session = GameSession::seeded(level, seed);
    let scene = build_scene(&session)?;
    let mut pacer = TickPacer::new(tick_rate)?;
    let mut latch = DirectionLatch::default();
    let report = Rc::new(RefCell::new(GameReport::from_session(seed, &session)));
    let latest = Rc::clone(&report);

    let backend = MacroquadBackend::new()
        .with_vsync(cli.vsync == SyncMode::On)
        .with_show_fps(cli.show_fps);
    let presentation = Presentation::new("Maze Chase", Palette::classic(), scene);

    backend
        .run(presentation, move |dt, input, scene| {
            if input.quit_requested {
                return LoopControl::Exit;
            }
            if query::state(&session).is_terminal() {
                return LoopControl::Continue;
            }

            latch.observe(input.held);
            for _ in 0..pacer.advance(dt) {
                match session.advance(latch.take()) {
                    Ok(result) => {
                        scene.apply_tick(&result);
                        if result.state.is_terminal() {
                            break;
                        }
                    }
                    Err(error) => {
                        warn!(%error, "tick rejected");
                        return LoopControl::Exit;
                    }
                }
            }

            *latest.borrow_mut() = GameReport::from_session(seed, &session);
            LoopControl::Continue
        })
        .context("window loop failed")?;

    let final_report = report.borrow().clone();
    Ok(final_report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_defaults_to_info() {
        assert_eq!(log_filter(false, None), "info");
        assert_eq!(log_filter(false, Some("  ")), "info");
    }

    #[test]
    fn log_filter_honours_environment() {
        assert_eq!(log_filter(false, Some("debug")), "debug");
        assert_eq!(log_filter(false, Some("error")), "error");
        assert_eq!(
            log_filter(false, Some("maze_chase_world=debug,warn")),
            "maze_chase_world=debug,warn"
        );
    }

    #[test]
    fn verbose_forces_debug() {
        assert_eq!(log_filter(true, None), "debug");
        assert_eq!(log_filter(true, Some("error")), "debug");
    }
}
