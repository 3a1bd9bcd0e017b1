//! End-to-end pipeline test
//! Trains an agent through self-play, then validates that it reliably beats
//! a uniformly random opponent

use tdzero::{
    GridConfig, Mark, RandomPlayer, StateEnumerator, TdAgent, ValueTable,
    pipeline::{SelfPlayTrainer, TrainingConfig, ValidationConfig, Validator},
};

fn trained_agents(grid: GridConfig, games: usize, seed: u64) -> (TdAgent, TdAgent) {
    let triples = StateEnumerator::new(grid).enumerate_all();

    let mut agent_x = TdAgent::new(
        Mark::X,
        0.1,
        0.5,
        ValueTable::initialize(Mark::X, &triples, &grid),
    );
    let mut agent_o = TdAgent::new(
        Mark::O,
        0.1,
        0.5,
        ValueTable::initialize(Mark::O, &triples, &grid),
    );

    let config = TrainingConfig {
        games,
        anneal_games: 500,
        seed: Some(seed),
    };
    let mut trainer = SelfPlayTrainer::new(grid, config);
    let stats = trainer
        .run(&mut agent_x, &mut agent_o)
        .expect("training run failed");
    assert_eq!(stats.total_games, games);
    assert_eq!(stats.x_wins + stats.o_wins + stats.draws, games);

    (agent_x, agent_o)
}

#[test]
fn test_trained_agent_beats_random_opponent() {
    let grid = GridConfig::standard();
    let (mut agent_x, _agent_o) = trained_agents(grid, 3_000, 42);

    // Validate greedily.
    agent_x.set_epsilon(0.0);

    let mut opponent = RandomPlayer::with_seed(Mark::O, 99);
    let mut validator = Validator::new(grid, ValidationConfig { games: 300 });
    let result = validator
        .run(&mut agent_x, &mut opponent)
        .expect("validation run failed");

    assert_eq!(result.total_games, 300);
    assert_eq!(result.wins + result.draws + result.losses, 300);
    assert!(
        result.wins > result.losses,
        "trained agent lost the matchup: {} wins vs {} losses",
        result.wins,
        result.losses
    );
    assert!(
        result.win_rate > 0.5,
        "trained agent win rate too low: {:.3}",
        result.win_rate
    );
}

#[test]
fn test_seeded_training_is_reproducible() {
    let grid = GridConfig::standard();
    let (agent_a, _) = trained_agents(grid, 500, 7);
    let (agent_b, _) = trained_agents(grid, 500, 7);

    for id in 0..grid.num_states() {
        assert_eq!(
            agent_a.value(id),
            agent_b.value(id),
            "value tables diverged at state {id}"
        );
    }
}
