//! tdzero CLI - Self-play temporal-difference learning for marking games
//!
//! This CLI provides a unified interface for:
//! - Training an agent through epsilon-greedy self-play
//! - Validating a trained agent against a random baseline
//! - Playing interactively against a trained agent
//! - Inspecting the enumerated state space

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tdzero")]
#[command(version, about = "Self-play TD(0) agent for marking games", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent through self-play and validate it
    Train(tdzero::cli::commands::train::TrainArgs),

    /// Train an agent, then play against it on the console
    Play(tdzero::cli::commands::play::PlayArgs),

    /// Enumerate the state space and summarize terminal verdicts
    States(tdzero::cli::commands::states::StatesArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => tdzero::cli::commands::train::execute(args),
        Commands::Play(args) => tdzero::cli::commands::play::execute(args),
        Commands::States(args) => tdzero::cli::commands::states::execute(args),
    }
}
