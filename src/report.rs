//! Collaborators that only look at training output: progress display,
//! periodic log lines, reward plots and grid printing. None of them can
//! change what the trainer learns.

mod grid;
mod plot;
mod progress;

pub use grid::{format_policy_grid, format_value_grid};
pub use plot::{plot_moving_average, plot_state_values};
pub use progress::{LogReporter, ProgressBar};

pub trait Subscriber<T> {
    fn consume(&mut self, data: T);
}
