//! Command-line interface for training, validating and playing against the
//! agent

pub mod commands;
pub mod output;
