//! Train command: self-play training followed by validation against a
//! random player

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    agent::TdAgent,
    cli::output,
    config::GridConfig,
    enumerator::StateEnumerator,
    game::Mark,
    pipeline::{
        MatchupResult, ProgressObserver, SelfPlayTrainer, TrainingConfig, TrainingStats,
        ValidationConfig, Validator,
    },
    players::RandomPlayer,
    values::ValueTable,
};

#[derive(Parser, Debug)]
#[command(about = "Train an agent through self-play, then validate it")]
pub struct TrainArgs {
    /// Number of self-play training games
    #[arg(long, short = 'g', default_value_t = 50_000)]
    pub games: usize,

    /// Games over which exploration is annealed from fully random
    #[arg(long, default_value_t = 1_000)]
    pub anneal: usize,

    /// Number of validation games against the random player
    #[arg(long, default_value_t = 1_000)]
    pub validation_games: usize,

    /// Learning rate alpha
    #[arg(long, default_value_t = 0.5)]
    pub alpha: f64,

    /// Initial exploration rate (overridden while annealing is active)
    #[arg(long, default_value_t = 0.1)]
    pub eps: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export the validation summary to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Suppress progress bars
    #[arg(long)]
    pub quiet: bool,
}

/// Enumerate the state space, build both agents and run self-play training.
/// Shared with the play command.
pub(crate) fn train_self_play(
    grid: GridConfig,
    games: usize,
    anneal: usize,
    alpha: f64,
    eps: f64,
    seed: Option<u64>,
    quiet: bool,
) -> Result<(TdAgent, TdAgent, TrainingStats)> {
    let spinner = output::create_spinner("Enumerating board states...");
    let triples = StateEnumerator::new(grid).enumerate_all();
    spinner.finish_with_message(format!(
        "{} states classified",
        output::format_number(triples.len())
    ));

    let mut agent_x = TdAgent::new(
        Mark::X,
        eps,
        alpha,
        ValueTable::initialize(Mark::X, &triples, &grid),
    );
    let mut agent_o = TdAgent::new(
        Mark::O,
        eps,
        alpha,
        ValueTable::initialize(Mark::O, &triples, &grid),
    );

    let config = TrainingConfig {
        games,
        anneal_games: anneal,
        seed,
    };
    let mut trainer = SelfPlayTrainer::new(grid, config);
    if !quiet {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }
    let stats = trainer.run(&mut agent_x, &mut agent_o)?;

    Ok((agent_x, agent_o, stats))
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let grid = GridConfig::standard();

    output::print_section("Self-play training");
    output::print_kv("Games", &output::format_number(args.games));
    output::print_kv("Anneal window", &output::format_number(args.anneal));
    output::print_kv("Alpha", &args.alpha.to_string());
    if let Some(seed) = args.seed {
        output::print_kv("Seed", &seed.to_string());
    }

    let (mut agent_x, _agent_o, stats) = train_self_play(
        grid, args.games, args.anneal, args.alpha, args.eps, args.seed, args.quiet,
    )?;

    println!();
    output::print_kv("X wins", &output::format_number(stats.x_wins));
    output::print_kv("O wins", &output::format_number(stats.o_wins));
    output::print_kv("Draws", &output::format_number(stats.draws));

    output::print_section("Validation vs random player");
    let mut opponent = match args.seed {
        Some(seed) => RandomPlayer::with_seed(Mark::O, seed.wrapping_add(2)),
        None => RandomPlayer::new(Mark::O),
    };

    let mut validator = Validator::new(
        grid,
        ValidationConfig {
            games: args.validation_games,
        },
    );
    if !args.quiet {
        validator = validator.with_observer(Box::new(ProgressObserver::new()));
    }
    let result = validator.run(&mut agent_x, &mut opponent)?;

    print_validation_summary(&result);

    if let Some(path) = &args.export {
        result.save(path)?;
        println!("\nResults exported to: {}", path.display());
    }

    Ok(())
}

fn print_validation_summary(result: &MatchupResult) {
    println!();
    output::print_kv(
        "Agent wins",
        &format!("{} ({:.1}%)", result.wins, result.win_rate * 100.0),
    );
    output::print_kv(
        "Random wins",
        &format!("{} ({:.1}%)", result.losses, result.loss_rate * 100.0),
    );
    output::print_kv(
        "Draws",
        &format!("{} ({:.1}%)", result.draws, result.draw_rate * 100.0),
    );
}
