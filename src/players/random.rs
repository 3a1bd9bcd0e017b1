//! Uniformly-random baseline player

use rand::{SeedableRng, random, rngs::StdRng, seq::IndexedRandom};

use crate::{
    error::{Error, Result},
    game::{Environment, Mark},
    players::Player,
};

/// Picks uniformly among the empty cells; never learns.
pub struct RandomPlayer {
    mark: Mark,
    name: String,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(mark: Mark) -> Self {
        Self::with_seed(mark, random())
    }

    /// Create a random player with a deterministic seed.
    pub fn with_seed(mark: Mark, seed: u64) -> Self {
        RandomPlayer {
            mark,
            name: format!("Random-{mark}"),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn select_action(&mut self, env: &mut Environment) -> Result<(usize, usize)> {
        let valid_actions = env.empty_cells();
        let &(row, col) = valid_actions
            .choose(&mut self.rng)
            .ok_or(Error::NoValidMoves)?;
        env.place(row, col, self.mark)?;
        Ok((row, col))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::config::GridConfig;

    #[test]
    fn test_plays_only_empty_cells() {
        let config = GridConfig::standard();
        let mut player = RandomPlayer::with_seed(Mark::O, 7);
        let mut env = Environment::new(config);
        env.place(1, 1, Mark::X).unwrap();

        for _ in 0..8 {
            let (row, col) = player.select_action(&mut env).unwrap();
            assert_ne!((row, col), (1, 1));
        }
        assert!(env.empty_cells().is_empty());
        assert!(matches!(
            player.select_action(&mut env),
            Err(Error::NoValidMoves)
        ));
    }

    #[test]
    fn test_covers_the_whole_board_over_trials() {
        let config = GridConfig::standard();
        let mut player = RandomPlayer::with_seed(Mark::X, 42);

        let mut seen = HashSet::new();
        for _ in 0..200 {
            let mut env = Environment::new(config);
            seen.insert(player.select_action(&mut env).unwrap());
        }
        assert_eq!(seen.len(), 9);
    }
}
