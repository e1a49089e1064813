#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays input scripts against a Pantry Maze level.

mod config;
mod levels;
mod script;
mod session;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use pantry_maze_core::{Event, LevelOutcome, WELCOME_BANNER};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{
    levels::{Layout, LevelKind},
    session::Session,
};

/// Command-line arguments for the Pantry Maze headless runner.
#[derive(Debug, Parser)]
#[command(name = "pantry-maze", about = "Replay an input script against a Pantry Maze level")]
struct CliArgs {
    /// Level to load.
    #[arg(long, value_enum, default_value_t = LevelKind::Tutorial)]
    level: LevelKind,
    /// Optional TOML file overriding balancing values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Emit debug logs for grants, consumption and tutorial steps.
    #[arg(long)]
    verbose: bool,
    /// Script holding one action per line.
    script: PathBuf,
}

/// Entry point for the Pantry Maze command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let settings = config::load(args.config.as_deref())?;
    let layout = args
        .level
        .layout(&settings.pickups)
        .with_context(|| format!("level {:?} is malformed", args.level))?;
    let source = fs::read_to_string(&args.script)
        .with_context(|| format!("could not read script '{}'", args.script.display()))?;
    let frames = script::parse(&source)
        .with_context(|| format!("could not parse script '{}'", args.script.display()))?;

    println!("{WELCOME_BANNER}");
    print_layout(&layout);

    let (mut session, setup) = Session::new(args.level, &layout, &settings);
    for event in &setup {
        print_event(0, event);
    }

    info!(frames = frames.len(), level = ?args.level, "replaying script");
    for (index, frame) in frames.iter().enumerate() {
        for event in &session.frame(frame) {
            print_event(index + 1, event);
        }
    }

    print_summary(&session);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "pantry_maze={level},pantry_maze_world={level},\
             pantry_maze_system_progress={level},pantry_maze_system_pulse={level}"
        )
        .into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_layout(layout: &Layout) {
    let spawn = layout.spawn();
    println!(
        "maze: {} regions, {} walls, spawn at ({}, {})",
        layout.placements().len(),
        layout.walls(),
        spawn.column,
        spawn.row
    );
    for placement in layout.placements() {
        println!(
            "  region {:>2} at ({}, {}): {:?}",
            placement.region.get(),
            placement.cell.column,
            placement.cell.row,
            placement.kind
        );
    }
}

fn print_event(frame: usize, event: &Event) {
    match event {
        Event::InstructionShown { step } => {
            println!("[frame {frame}] {event:?} \"{}\"", step.instruction());
        }
        _ => println!("[frame {frame}] {event:?}"),
    }
}

fn print_summary(session: &Session) {
    match session.outcome() {
        Some(LevelOutcome::Won { stars }) => println!("outcome: won with {} stars", stars.get()),
        Some(LevelOutcome::Lost) => println!("outcome: lost"),
        Some(LevelOutcome::TutorialComplete) => println!("outcome: tutorial complete"),
        None => println!("outcome: in progress"),
    }

    let (collected, required) = session.progress();
    println!("ingredients: {collected}/{required}");
    if let Some(clock) = session.clock() {
        println!("time left: {clock}");
    }
    if let Some(step) = session.instruction() {
        println!("instruction: {}", step.instruction());
    }

    let tint = session.tint();
    println!(
        "tint: #{:02x}{:02x}{:02x}",
        tint.red(),
        tint.green(),
        tint.blue()
    );
}
