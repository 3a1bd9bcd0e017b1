//! Training and validation drivers
//!
//! The trainer runs self-play episodes with epsilon annealing; the validator
//! pits a trained agent against a fixed opponent. Both report progress
//! through composable observers.

mod observers;
mod training;
mod validation;

pub use observers::{MetricsObserver, MetricsSummary, Observer, ProgressObserver};
pub use training::{SelfPlayTrainer, TrainingConfig, TrainingStats};
pub use validation::{MatchupResult, ValidationConfig, Validator};
