//! Self-play training driver

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    agent::TdAgent,
    config::GridConfig,
    game::{Environment, Mark, Outcome},
    pipeline::Observer,
};

/// Self-play training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of self-play episodes
    pub games: usize,

    /// Episodes over which exploration is annealed as `1/(t+1)`; afterwards
    /// epsilon stays at its last annealed value
    pub anneal_games: usize,

    /// Base random seed; the second agent gets `seed + 1`
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            games: 50_000,
            anneal_games: 1_000,
            seed: None,
        }
    }
}

/// Tallies of a completed training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingStats {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

/// Plays two learning agents against each other, one fresh environment per
/// episode, strictly sequentially.
pub struct SelfPlayTrainer {
    grid: GridConfig,
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl SelfPlayTrainer {
    pub fn new(grid: GridConfig, config: TrainingConfig) -> Self {
        SelfPlayTrainer {
            grid,
            config,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the configured number of episodes, `first` opening every game.
    pub fn run(&mut self, first: &mut TdAgent, second: &mut TdAgent) -> Result<TrainingStats> {
        if let Some(seed) = self.config.seed {
            first.reseed(seed);
            second.reseed(seed.wrapping_add(1));
        }

        for observer in &mut self.observers {
            observer.on_run_start(self.config.games)?;
        }

        let mut stats = TrainingStats {
            total_games: 0,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        };

        for t in 0..self.config.games {
            if t < self.config.anneal_games {
                // Fully random on the first episode, sharpening toward
                // greedy play as the schedule progresses.
                let eps = 1.0 / (t + 1) as f64;
                first.set_epsilon(eps);
                second.set_epsilon(eps);
            }

            let mut env = Environment::new(self.grid);
            let outcome = env.play_game(first, second)?;

            match outcome {
                Outcome::Win(Mark::X) => stats.x_wins += 1,
                Outcome::Win(Mark::O) => stats.o_wins += 1,
                Outcome::Draw => stats.draws += 1,
                Outcome::Ongoing => {}
            }
            stats.total_games += 1;

            for observer in &mut self.observers {
                observer.on_game_end(t, outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{enumerator::StateEnumerator, values::ValueTable};

    #[test]
    fn test_training_run_completes_and_tallies() {
        let grid = GridConfig::standard();
        let triples = StateEnumerator::new(grid).enumerate_all();

        let mut first = TdAgent::new(
            Mark::X,
            1.0,
            0.5,
            ValueTable::initialize(Mark::X, &triples, &grid),
        );
        let mut second = TdAgent::new(
            Mark::O,
            0.1,
            0.5,
            ValueTable::initialize(Mark::O, &triples, &grid),
        );

        let config = TrainingConfig {
            games: 50,
            anneal_games: 20,
            seed: Some(42),
        };
        let mut trainer = SelfPlayTrainer::new(grid, config);
        let stats = trainer.run(&mut first, &mut second).unwrap();

        assert_eq!(stats.total_games, 50);
        assert_eq!(stats.x_wins + stats.o_wins + stats.draws, 50);
        // Histories must be consumed by the terminal updates.
        assert!(first.history().is_empty());
        assert!(second.history().is_empty());
    }

    #[test]
    fn test_annealing_schedule_reaches_floor() {
        let grid = GridConfig::standard();
        let triples = StateEnumerator::new(grid).enumerate_all();

        let mut first = TdAgent::new(
            Mark::X,
            1.0,
            0.5,
            ValueTable::initialize(Mark::X, &triples, &grid),
        );
        let mut second = TdAgent::new(
            Mark::O,
            1.0,
            0.5,
            ValueTable::initialize(Mark::O, &triples, &grid),
        );

        let config = TrainingConfig {
            games: 30,
            anneal_games: 10,
            seed: Some(7),
        };
        let mut trainer = SelfPlayTrainer::new(grid, config);
        trainer.run(&mut first, &mut second).unwrap();

        // Last annealed value is 1/anneal_games and is then held.
        assert!((first.epsilon() - 0.1).abs() < 1e-12);
        assert!((second.epsilon() - 0.1).abs() < 1e-12);
    }
}
