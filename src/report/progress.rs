use kdam::{tqdm, Bar, BarExt};
use tracing::info;

use super::Subscriber;
use crate::trainer::EpisodeSummary;

/// Terminal progress bar over the episodes of one training run.
pub struct ProgressBar {
    pb: Bar,
}

impl ProgressBar {
    pub fn new(label: &str, n_episodes: u64) -> Self {
        let mut pb = tqdm!(total = n_episodes as usize);
        pb.set_description(label.to_string());
        pb.refresh();
        Self { pb }
    }
}

impl Subscriber<EpisodeSummary> for ProgressBar {
    fn consume(&mut self, data: EpisodeSummary) {
        if let Some(average) = data.window_average {
            self.pb.set_postfix(format!(
                "avg reward={:.2}, epsilon={:.4}",
                average, data.epsilon
            ));
        }
        self.pb.update(1);
    }
}

/// Logs an `Episode i/N` line every `every` episodes.
#[derive(Debug, Clone)]
pub struct LogReporter {
    label: String,
    every: u64,
    last_average: Option<f64>,
}

impl LogReporter {
    pub fn new(label: &str, every: u64) -> Self {
        Self {
            label: label.to_string(),
            every: every.max(1),
            last_average: None,
        }
    }

    pub fn last_average(&self) -> Option<f64> {
        self.last_average
    }
}

impl Subscriber<EpisodeSummary> for LogReporter {
    fn consume(&mut self, data: EpisodeSummary) {
        if data.window_average.is_some() {
            self.last_average = data.window_average;
        }
        if data.episode % self.every == 0 || data.episode == data.n_episodes {
            info!(
                label = %self.label,
                epsilon = data.epsilon,
                average = ?self.last_average,
                "Episode {}/{}",
                data.episode,
                data.n_episodes
            );
        }
    }
}
