//! Epsilon-greedy agent with backward TD(0) value learning

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    error::{Error, Result},
    game::{Environment, Mark},
    players::Player,
    values::ValueTable,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular learning agent.
///
/// Actions are chosen epsilon-greedily over the value of the state each
/// hypothetical placement would produce. Every visited state id of an
/// episode is recorded, and at the terminal state the reward is propagated
/// backward through the whole trajectory with the TD(0) rule.
#[derive(Debug, Clone)]
pub struct TdAgent {
    mark: Mark,
    eps: f64,
    alpha: f64,
    values: ValueTable,
    history: Vec<usize>,
    rng: StdRng,
    name: String,
}

impl TdAgent {
    /// Create an agent for `mark` with exploration rate `eps`, learning
    /// rate `alpha`, and an initial value table.
    pub fn new(mark: Mark, eps: f64, alpha: f64, values: ValueTable) -> Self {
        TdAgent {
            mark,
            eps,
            alpha,
            values,
            history: Vec::new(),
            rng: build_rng(None),
            name: format!("TD-{mark}"),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Reseed the internal generator, for reproducible training runs.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Mutate the exploration rate; drivers call this to anneal exploration
    /// from fully random toward greedy play across training.
    pub fn set_epsilon(&mut self, eps: f64) {
        self.eps = eps;
    }

    pub fn epsilon(&self) -> f64 {
        self.eps
    }

    pub fn value(&self, state_id: usize) -> f64 {
        self.values.get(state_id)
    }

    /// State ids observed so far in the current episode.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Greedy selection: one scan over the valid actions, keeping the first
    /// strict maximum of the hypothetical successor-state values.
    fn greedy_action(
        &self,
        env: &Environment,
        valid_actions: &[(usize, usize)],
    ) -> Result<(usize, usize)> {
        let mut best: Option<((usize, usize), f64)> = None;
        for &(row, col) in valid_actions {
            let state = env.encode_with(row, col, self.mark)?;
            let value = self.values.get(state);
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some(((row, col), value));
            }
        }
        best.map(|(action, _)| action).ok_or(Error::NoValidMoves)
    }
}

impl Player for TdAgent {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn select_action(&mut self, env: &mut Environment) -> Result<(usize, usize)> {
        let valid_actions = env.empty_cells();
        if valid_actions.is_empty() {
            return Err(Error::NoValidMoves);
        }

        let (row, col) = if self.rng.random::<f64>() < self.eps {
            *valid_actions
                .choose(&mut self.rng)
                .ok_or(Error::NoValidMoves)?
        } else {
            self.greedy_action(env, &valid_actions)?
        };

        env.place(row, col, self.mark)?;
        Ok((row, col))
    }

    fn observe_state(&mut self, state_id: usize) {
        self.history.push(state_id);
    }

    /// Backward TD(0) update, applied only at the end of an episode.
    ///
    /// The terminal reward stands in for the value of the state after the
    /// last recorded one. Walking the history in reverse, each state moves
    /// toward the current target by `alpha`, and its freshly updated value
    /// becomes the bootstrap target for its predecessor. Opponent plies are
    /// included: the trajectory is shared, not per-seat.
    fn update_value_function(&mut self, env: &Environment) {
        if !env.ended() {
            return;
        }

        let mut target = env.reward(self.mark);
        for &state in self.history.iter().rev() {
            let value = self.values.get(state);
            let updated = value + self.alpha * (target - value);
            self.values.set(state, updated);
            target = updated;
        }
        self.history.clear();
    }
}
