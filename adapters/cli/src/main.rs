#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Twenty48 in the terminal.

mod session;

use std::{fs::File, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use log::{info, warn};
use twenty48_core::{GridSize, MoveState};
use twenty48_rendering::{
    render_plain, Palette, Presentation, RenderingBackend, Scene, DEFAULT_CELL_WIDTH,
    NO_PLACEMENT_MESSAGE,
};
use twenty48_rendering_terminal::{load_palette, TerminalBackend};
use twenty48_system_controller::{Config, Controller};
use twenty48_system_spawning::{Config as SpawnConfig, DEFAULT_RETRY_BUDGET};
use twenty48_world::query;

use crate::session::{Ending, Session};

/// Command-line arguments accepted by the game.
#[derive(Debug, Parser)]
#[command(
    name = "twenty48",
    version,
    about = "Slide and merge numbered tiles in the terminal"
)]
struct CliArgs {
    /// Number of columns in the grid.
    #[arg(long, default_value_t = 4, value_name = "N")]
    width: u32,

    /// Number of rows in the grid.
    #[arg(long, default_value_t = 4, value_name = "N")]
    height: u32,

    /// Seed for tile placement; drawn at random when omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Random draws allowed when looking for an empty cell.
    #[arg(long, default_value_t = DEFAULT_RETRY_BUDGET, value_name = "N")]
    spawn_budget: u32,

    /// Characters reserved for each cell's number.
    #[arg(long, default_value_t = DEFAULT_CELL_WIDTH, value_name = "N")]
    cell_width: u16,

    /// TOML manifest overriding the tile colors.
    #[arg(long, value_name = "FILE")]
    palette: Option<PathBuf>,

    /// Log filter such as "info" or "twenty48_world=debug"; overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    /// Writes log records to a file instead of stderr.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    if let Err(error) = init_logging(&args) {
        eprintln!("error: {error:#}");
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(ending) if ending.is_failure() => {
            println!("{NO_PLACEMENT_MESSAGE}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(args: &CliArgs) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(filter) = &args.log_level {
        let _ = builder.parse_filters(filter);
    }
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file at {}", path.display()))?;
        let _ = builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run(args: CliArgs) -> Result<Ending> {
    let size = GridSize::new(args.width, args.height).context("invalid grid dimensions")?;
    let palette = match &args.palette {
        Some(path) => load_palette(path)?,
        None => Palette::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("using seed {seed:#018x}");

    let spawning = SpawnConfig::new(seed).with_retry_budget(args.spawn_budget);
    let controller = match Controller::new_game(Config::new(size, spawning)) {
        Ok(controller) => controller,
        Err(error) => {
            warn!("{error}");
            return Ok(Ending::NoPlacement);
        }
    };

    let title = query::welcome_banner(controller.world());
    let mut session = Session::new(controller, palette, args.cell_width)?;
    let presentation = Presentation::new(title, session.scene().clone());

    TerminalBackend::default().run(presentation, |input, scene| {
        let control = session.handle(input);
        scene.clone_from(session.scene());
        control
    })?;

    let ending = session.ending().unwrap_or(Ending::Quit);
    match ending {
        Ending::Quit => {}
        Ending::Lost => print!("{}", render_plain(session.scene())),
        Ending::NoPlacement => {
            let board = Scene::new(session.scene().grid.clone(), MoveState::Ready);
            print!("{}", render_plain(&board));
        }
    }
    Ok(ending)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_game() {
        let args = CliArgs::try_parse_from(["twenty48"]).expect("defaults parse");

        assert_eq!(args.width, 4);
        assert_eq!(args.height, 4);
        assert_eq!(args.seed, None);
        assert_eq!(args.spawn_budget, DEFAULT_RETRY_BUDGET);
        assert_eq!(args.cell_width, DEFAULT_CELL_WIDTH);
        assert!(args.palette.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let args = CliArgs::try_parse_from([
            "twenty48",
            "--width",
            "5",
            "--height",
            "3",
            "--seed",
            "42",
            "--spawn-budget",
            "10",
            "--cell-width",
            "8",
            "--log-level",
            "debug",
        ])
        .expect("flags parse");

        assert_eq!((args.width, args.height), (5, 3));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.spawn_budget, 10);
        assert_eq!(args.cell_width, 8);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn non_numeric_dimensions_are_rejected() {
        assert!(CliArgs::try_parse_from(["twenty48", "--width", "wide"]).is_err());
    }
}
