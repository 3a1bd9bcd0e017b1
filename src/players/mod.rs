//! Player capability interface shared by learning and non-learning seats
//!
//! The driver treats every seat kind uniformly through this trait: the TD
//! agent, the uniformly-random baseline and the console player all take
//! turns the same way, and the non-learning kinds simply keep the default
//! no-op observation and update hooks.

mod console;
mod random;

pub use console::ConsolePlayer;
pub use random::RandomPlayer;

use crate::{
    error::Result,
    game::{Environment, Mark},
};

/// A seat at the board.
pub trait Player {
    /// Symbol this player places.
    fn mark(&self) -> Mark;

    /// Display name for summaries and logs.
    fn name(&self) -> &str;

    /// Choose an action and apply it to the board, returning the chosen
    /// (row, col).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidMoves`] when invoked on a board with
    /// no empty cell, which is a caller error: the driver checks for
    /// termination before every ply.
    fn select_action(&mut self, env: &mut Environment) -> Result<(usize, usize)>;

    /// Record a visited state id. The driver calls this once per ply for
    /// every participant, not only the acting one.
    fn observe_state(&mut self, _state_id: usize) {}

    /// Apply end-of-episode learning. No-op for non-learning players.
    fn update_value_function(&mut self, _env: &Environment) {}
}
