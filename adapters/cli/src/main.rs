#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Labyrinth Snake levels.

mod input;
mod progress_store;
mod render;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use labyrinth_snake_catalog::{build_catalog, configs_from_toml, shipped_catalog, Catalog};
use labyrinth_snake_core::{CellCoord, Level, LevelId, SessionStatus};
use labyrinth_snake_session::{self as session, query, Session};
use labyrinth_snake_system_calibration::{directions_along, shortest_path};
use labyrinth_snake_system_progress::Progress;
use tracing_subscriber::EnvFilter;

use crate::render::{render_level, Overlay};

/// Steer a snake through seeded mazes within a move budget.
#[derive(Debug, Parser)]
#[command(name = "labyrinth-snake", version, about)]
struct Cli {
    /// TOML file with `[[level]]` tables replacing the shipped catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// JSON file storing completed and unlocked levels.
    #[arg(long, global = true, env = "LABYRINTH_SNAKE_PROGRESS")]
    progress: Option<PathBuf>,

    /// Emit debug logs unless `RUST_LOG` says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Lists every level with its size and move budget.
    Levels,
    /// Prints a level's maze.
    Show {
        /// One-based level number.
        level: u32,
        /// Overlay the optimal route.
        #[arg(long)]
        solution: bool,
    },
    /// Replays a move script (`wasd`, arrows, `r` to reset) against a level.
    Play {
        /// One-based level number.
        level: u32,
        /// Moves to apply in order.
        script: String,
    },
    /// Prints the optimal move script for a level.
    Solve {
        /// One-based level number.
        level: u32,
    },
}

/// Entry point for the Labyrinth Snake command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let catalog = load_catalog(cli.catalog.as_deref())?;
    let progress = match cli.progress.as_deref() {
        Some(path) => Some(progress_store::load(path)?),
        None => None,
    };

    match cli.command {
        Commands::Levels => list_levels(&catalog, progress.as_ref()),
        Commands::Show { level, solution } => {
            let level = find_level(&catalog, level)?;
            show_level(level, solution)
        }
        Commands::Play { level, script } => {
            let level = find_level(&catalog, level)?;
            let last = catalog.last_id().unwrap_or(level.id());
            play_level(level, last, &script, progress, cli.progress.as_deref())
        }
        Commands::Solve { level } => {
            let level = find_level(&catalog, level)?;
            let route = solve(level)?;
            println!("{}", input::format_moves(&directions_along(&route)));
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return shipped_catalog().context("failed to build the shipped catalog");
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog at {}", path.display()))?;
    let configs = configs_from_toml(&text)
        .with_context(|| format!("failed to parse catalog at {}", path.display()))?;
    build_catalog(&configs).with_context(|| format!("invalid catalog at {}", path.display()))
}

fn find_level(catalog: &Catalog, number: u32) -> Result<&Level> {
    catalog.level(LevelId::new(number)).with_context(|| {
        format!(
            "level {number} does not exist; the catalog has {} levels",
            catalog.len()
        )
    })
}

fn solve(level: &Level) -> Result<Vec<CellCoord>> {
    shortest_path(level.grid(), level.entry(), level.exit())
        .with_context(|| format!("level {} has no route to its exit", level.id().get()))
}

fn list_levels(catalog: &Catalog, progress: Option<&Progress>) -> Result<()> {
    for level in catalog.levels() {
        let marker = match progress {
            Some(progress) if progress.is_completed(level.id()) => "*",
            Some(progress) if !progress.is_unlocked(level.id()) => "x",
            _ => " ",
        };
        println!(
            "{marker} {:>3}  {:<16} {:>2}x{:<2}  shortest {:>3}  budget {:>3}",
            level.id().get(),
            level.label(),
            level.columns(),
            level.rows(),
            level.shortest_path(),
            level.move_budget(),
        );
    }
    Ok(())
}

fn show_level(level: &Level, solution: bool) -> Result<()> {
    let route = if solution { Some(solve(level)?) } else { None };
    println!(
        "Level {}: {} (budget {})",
        level.id().get(),
        level.label(),
        level.move_budget()
    );
    print!(
        "{}",
        render_level(
            level,
            Overlay {
                route: route.as_deref(),
                ..Overlay::default()
            }
        )
    );
    Ok(())
}

fn play_level(
    level: &Level,
    last: LevelId,
    script: &str,
    progress: Option<Progress>,
    progress_path: Option<&Path>,
) -> Result<()> {
    if let Some(progress) = progress.as_ref() {
        if !progress.is_unlocked(level.id()) {
            bail!("level {} is locked", level.id().get());
        }
    }

    let commands = input::parse_script(script)?;
    let mut session = Session::new(level);
    let mut events = Vec::new();
    for command in commands {
        session::apply(&mut session, command, &mut events);
    }

    print!(
        "{}",
        render_level(
            level,
            Overlay {
                snake: Some((query::path(&session), query::facing(&session))),
                ..Overlay::default()
            }
        )
    );
    let status = match query::status(&session) {
        SessionStatus::InProgress => "in progress",
        SessionStatus::Won => "won",
        SessionStatus::Lost => "lost",
    };
    println!(
        "status: {status}, moves used {} of {}",
        query::moves_used(&session),
        level.move_budget()
    );

    if let (Some(mut progress), Some(path)) = (progress, progress_path) {
        progress.handle(&events, last);
        progress_store::save(path, &progress)?;
    }
    Ok(())
}
