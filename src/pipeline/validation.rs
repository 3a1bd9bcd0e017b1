//! Validation driver: fixed matchups against a baseline opponent

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    config::GridConfig,
    game::{Environment, Outcome},
    pipeline::Observer,
    players::Player,
};

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Number of validation games
    pub games: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { games: 1_000 }
    }
}

/// Result of a validation matchup, counted from the first seat's perspective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchupResult {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

impl MatchupResult {
    pub fn new(total_games: usize, wins: usize, draws: usize, losses: usize) -> Self {
        let rate = |n: usize| {
            if total_games > 0 {
                n as f64 / total_games as f64
            } else {
                0.0
            }
        };
        Self {
            total_games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }

    /// Save result to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Runs a sequence of games between a trained agent and an opponent, one
/// fresh environment per game. Any learning hooks the seats carry still run
/// inside the game loop, matching the training driver's behavior.
pub struct Validator {
    grid: GridConfig,
    config: ValidationConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl Validator {
    pub fn new(grid: GridConfig, config: ValidationConfig) -> Self {
        Validator {
            grid,
            config,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Play the configured number of games, `agent` acting first.
    pub fn run(
        &mut self,
        agent: &mut dyn Player,
        opponent: &mut dyn Player,
    ) -> Result<MatchupResult> {
        let agent_mark = agent.mark();

        for observer in &mut self.observers {
            observer.on_run_start(self.config.games)?;
        }

        let mut wins = 0;
        let mut draws = 0;
        let mut losses = 0;

        for game_num in 0..self.config.games {
            let mut env = Environment::new(self.grid);
            let outcome = env.play_game(agent, opponent)?;

            match outcome {
                Outcome::Win(mark) if mark == agent_mark => wins += 1,
                Outcome::Win(_) => losses += 1,
                Outcome::Draw => draws += 1,
                Outcome::Ongoing => {}
            }

            for observer in &mut self.observers {
                observer.on_game_end(game_num, outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        Ok(MatchupResult::new(self.config.games, wins, draws, losses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{game::Mark, players::RandomPlayer};

    #[test]
    fn test_matchup_rates() {
        let result = MatchupResult::new(10, 6, 3, 1);
        assert!((result.win_rate - 0.6).abs() < 1e-12);
        assert!((result.draw_rate - 0.3).abs() < 1e-12);
        assert!((result.loss_rate - 0.1).abs() < 1e-12);

        let empty = MatchupResult::new(0, 0, 0, 0);
        assert_eq!(empty.win_rate, 0.0);
    }

    #[test]
    fn test_validator_counts_every_game() {
        let grid = GridConfig::standard();
        let mut agent = RandomPlayer::with_seed(Mark::X, 1);
        let mut opponent = RandomPlayer::with_seed(Mark::O, 2);

        let mut validator = Validator::new(grid, ValidationConfig { games: 25 });
        let result = validator.run(&mut agent, &mut opponent).unwrap();

        assert_eq!(result.total_games, 25);
        assert_eq!(result.wins + result.draws + result.losses, 25);
    }
}
