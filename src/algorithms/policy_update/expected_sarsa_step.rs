use ndarray::Array1;

use super::PolicyUpdate;
use crate::algorithms::action_selection::EpsilonGreedy;

/// One-step Expected Sarsa: the expectation of the next action values under
/// the epsilon-greedy behavior policy of the current episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpectedSarsaStep;

impl PolicyUpdate for ExpectedSarsaStep {
    fn future_q_value(
        &self,
        next_q_values: &Array1<f64>,
        _next_action: usize,
        action_selection: &EpsilonGreedy,
        epsilon: f64,
    ) -> f64 {
        let policy_probs: Array1<f64> =
            action_selection.action_distribution(next_q_values, epsilon);
        policy_probs.dot(next_q_values)
    }
}
