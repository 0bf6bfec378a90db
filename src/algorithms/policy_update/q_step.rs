use ndarray::Array1;

use super::PolicyUpdate;
use crate::algorithms::action_selection::EpsilonGreedy;

/// Off-policy one-step Q-learning (Sarsamax).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QStep;

impl PolicyUpdate for QStep {
    fn future_q_value(
        &self,
        next_q_values: &Array1<f64>,
        _next_action: usize,
        _action_selection: &EpsilonGreedy,
        _epsilon: f64,
    ) -> f64 {
        next_q_values[EpsilonGreedy::greedy_action(next_q_values)]
    }
}
