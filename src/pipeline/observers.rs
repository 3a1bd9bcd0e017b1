//! Observer hooks for the training and validation loops
//!
//! Observers allow composable progress reporting and metric collection
//! without coupling the drivers to specific output formats.

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    game::{Mark, Outcome},
};

/// Hooks invoked by the training and validation drivers.
pub trait Observer {
    fn on_run_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, _outcome: Outcome) -> Result<()> {
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Progress bar observer, counting outcomes from the X seat's perspective.
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        ProgressObserver {
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome) -> Result<()> {
        match outcome {
            Outcome::Win(Mark::X) => self.wins += 1,
            Outcome::Win(Mark::O) => self.losses += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Ongoing => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(format!("{} D:{} L:{}", self.wins, self.draws, self.losses));
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("{} D:{} L:{}", self.wins, self.draws, self.losses));
        }
        Ok(())
    }
}

/// Metrics observer: win/draw/loss tallies from the X seat's perspective.
pub struct MetricsObserver {
    wins: usize,
    draws: usize,
    losses: usize,
    total_games: usize,
}

impl MetricsObserver {
    pub fn new() -> Self {
        MetricsObserver {
            wins: 0,
            draws: 0,
            losses: 0,
            total_games: 0,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.wins as f64 / self.total_games as f64
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            win_rate: self.win_rate(),
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of collected metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
}

impl Observer for MetricsObserver {
    fn on_game_end(&mut self, _game_num: usize, outcome: Outcome) -> Result<()> {
        self.total_games += 1;
        match outcome {
            Outcome::Win(Mark::X) => self.wins += 1,
            Outcome::Win(Mark::O) => self.losses += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Ongoing => {}
        }
        Ok(())
    }
}
