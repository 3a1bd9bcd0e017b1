//! Play command: train an agent, then face it interactively

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output,
    config::GridConfig,
    game::{Environment, Mark, Outcome},
    players::ConsolePlayer,
};

#[derive(Parser, Debug)]
#[command(about = "Train an agent, then play against it on the console")]
pub struct PlayArgs {
    /// Number of self-play training games before the match
    #[arg(long, short = 'g', default_value_t = 20_000)]
    pub games: usize,

    /// Games over which exploration is annealed from fully random
    #[arg(long, default_value_t = 1_000)]
    pub anneal: usize,

    /// Learning rate alpha
    #[arg(long, default_value_t = 0.5)]
    pub alpha: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let grid = GridConfig::standard();

    output::print_section("Preparing opponent");
    output::print_kv("Training games", &output::format_number(args.games));

    let (mut agent_x, _agent_o, _stats) = super::train::train_self_play(
        grid, args.games, args.anneal, args.alpha, 0.1, args.seed, false,
    )?;

    // Greedy play against the human.
    agent_x.set_epsilon(0.0);

    output::print_section("Match");
    println!("You play O; the agent plays X and moves first.");

    loop {
        let outcome = {
            // Scope the stdin lock to the game so the play-again prompt
            // below can take it again.
            let stdin = io::stdin();
            let mut human = ConsolePlayer::new(Mark::O, stdin.lock(), io::stdout());
            let mut env = Environment::with_render(grid);
            env.play_game(&mut agent_x, &mut human)?
        };

        match outcome {
            Outcome::Win(Mark::X) => println!("The agent wins."),
            Outcome::Win(Mark::O) => println!("You win!"),
            Outcome::Draw => println!("Draw."),
            Outcome::Ongoing => {}
        }

        if !prompt_play_again()? {
            break;
        }
    }

    Ok(())
}

fn prompt_play_again() -> Result<bool> {
    print!("Play again? [y/n]: ");
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    Ok(read > 0 && line.trim().eq_ignore_ascii_case("y"))
}
