//! Self-play temporal-difference learning for marking games.
//!
//! A tabular TD(0) agent learns a value function over the full enumerated
//! state space of a square marking board by playing against itself, then
//! faces baseline or human opponents. The crate is organized as:
//!
//! - [`game`]: the board environment, terminal detection, and the game loop
//! - [`enumerator`]: exhaustive state-space enumeration and classification
//! - [`values`]: the tabular value function and its initialization rules
//! - [`agent`]: the epsilon-greedy TD(0) learner
//! - [`players`]: the player trait plus random and console opponents
//! - [`pipeline`]: training and validation drivers with observer hooks
//! - [`cli`]: the command-line surface

pub mod agent;
pub mod cli;
pub mod config;
pub mod enumerator;
pub mod error;
pub mod game;
pub mod pipeline;
pub mod players;
pub mod values;

pub use agent::TdAgent;
pub use config::GridConfig;
pub use enumerator::{StateClass, StateEnumerator};
pub use error::{Error, Result};
pub use game::{Cell, Environment, Mark, Outcome};
pub use players::{ConsolePlayer, Player, RandomPlayer};
pub use values::ValueTable;
