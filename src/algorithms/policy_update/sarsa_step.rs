use ndarray::Array1;

use super::PolicyUpdate;
use crate::algorithms::action_selection::EpsilonGreedy;

/// On-policy one-step Sarsa: bootstraps off the action the behavior policy
/// already chose for the next step. That same action must be the one executed
/// next, otherwise the rule stops being Sarsa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SarsaStep;

impl PolicyUpdate for SarsaStep {
    fn future_q_value(
        &self,
        next_q_values: &Array1<f64>,
        next_action: usize,
        _action_selection: &EpsilonGreedy,
        _epsilon: f64,
    ) -> f64 {
        next_q_values[next_action]
    }
}
