use std::collections::VecDeque;

/// Rolling window over the latest episode rewards plus the mean of every
/// complete window seen so far.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceTrace {
    window: usize,
    recent: VecDeque<f64>,
    averages: Vec<f64>,
    episodes: u64,
}

impl PerformanceTrace {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            recent: VecDeque::with_capacity(window),
            averages: vec![],
            episodes: 0,
        }
    }

    /// Records one episode reward. Returns the window mean when this episode
    /// closes a window.
    pub fn push(&mut self, reward: f64) -> Option<f64> {
        if self.window == 0 {
            return None;
        }
        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(reward);
        self.episodes += 1;
        if self.episodes % self.window as u64 == 0 {
            let average = self.recent_average()?;
            self.averages.push(average);
            Some(average)
        } else {
            None
        }
    }

    pub fn recent_average(&self) -> Option<f64> {
        if self.recent.is_empty() {
            None
        } else {
            Some(self.recent.iter().sum::<f64>() / self.recent.len() as f64)
        }
    }

    pub fn averages(&self) -> &[f64] {
        &self.averages
    }

    pub fn best_average(&self) -> Option<f64> {
        self.averages.iter().copied().reduce(f64::max)
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    /// `(episode, average)` pairs, each average placed at the first episode
    /// of its window.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.averages
            .iter()
            .enumerate()
            .map(|(i, avg)| ((i * self.window) as f64, *avg))
            .collect()
    }
}
