//! Game-state model: marks, cells, outcomes and the board environment

mod environment;

pub use environment::{Cell, Environment, Mark, Outcome};
