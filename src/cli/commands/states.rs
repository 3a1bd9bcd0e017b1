//! States command: enumerate and summarize the full state space

use anyhow::Result;
use clap::Parser;

use crate::{cli::output, config::GridConfig, enumerator::StateEnumerator, game::Mark};

#[derive(Parser, Debug)]
#[command(about = "Enumerate the state space and summarize terminal verdicts")]
pub struct StatesArgs {
    /// Board side length
    #[arg(long, short = 's', default_value_t = 3)]
    pub size: usize,
}

pub fn execute(args: StatesArgs) -> Result<()> {
    let grid = GridConfig::new(args.size, args.size)?;

    let spinner = output::create_spinner("Enumerating board states...");
    let triples = StateEnumerator::new(grid).enumerate_all();
    spinner.finish_and_clear();

    let mut x_wins = 0;
    let mut o_wins = 0;
    let mut draws = 0;
    let mut ongoing = 0;
    for class in &triples {
        match (class.ended, class.winner) {
            (true, Some(Mark::X)) => x_wins += 1,
            (true, Some(Mark::O)) => o_wins += 1,
            (true, None) => draws += 1,
            (false, _) => ongoing += 1,
        }
    }

    output::print_section(&format!("State space for a {0}x{0} board", args.size));
    output::print_kv("Total states", &output::format_number(triples.len()));
    output::print_kv("X wins", &output::format_number(x_wins));
    output::print_kv("O wins", &output::format_number(o_wins));
    output::print_kv("Full-board draws", &output::format_number(draws));
    output::print_kv("Non-terminal", &output::format_number(ongoing));

    Ok(())
}
