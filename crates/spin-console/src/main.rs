//! Spinlab CLI - interactive slot machine sessions in the terminal

mod input;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use spin_core::{GridSpec, MachineDefinition, Session, SessionConfig, StandardStakeRules};

use crate::input::ConsoleInput;
use crate::render::ConsoleRenderer;

#[derive(Parser, Debug)]
#[command(name = "spinlab", about = "Console slot machine sessions")]
struct Args {
    /// Starting balance; prompts for a deposit when omitted
    #[arg(short, long)]
    balance: Option<f64>,

    /// Grid rows
    #[arg(long, default_value_t = 3)]
    rows: u8,

    /// Grid columns
    #[arg(long, default_value_t = 3)]
    columns: u8,

    /// Seed for a reproducible session (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Machine definition JSON file (default: the classic fruit machine)
    #[arg(short, long)]
    machine: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let definition = match &args.machine {
        Some(path) => MachineDefinition::from_path(path)
            .with_context(|| format!("loading machine definition {}", path.display()))?,
        None => MachineDefinition::classic(),
    };
    let catalog = definition.catalog()?;
    log::info!(
        "machine \"{}\" loaded with {} symbols",
        definition.name,
        catalog.len()
    );

    let mut input = ConsoleInput::stdin();
    let balance = match args.balance {
        Some(amount) => amount,
        None => input.read_value("Please deposit the amount you would like to play with: ")?,
    };

    let config = SessionConfig {
        initial_balance: balance,
        grid: GridSpec::new(args.rows, args.columns),
        seed: args.seed,
    };
    let renderer = ConsoleRenderer::stdout(definition.name.clone(), catalog.clone());
    let mut session = Session::new(catalog, &config, input, StandardStakeRules, renderer)
        .context("starting session")?;

    let stats = session.run().context("running session")?;
    log::info!(
        "session finished after {} rounds (rtp {:.1}%)",
        stats.rounds,
        stats.rtp()
    );
    Ok(())
}
