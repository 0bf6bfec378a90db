mod expected_sarsa_step;
mod q_step;
mod sarsa_step;

use enum_dispatch::enum_dispatch;
use ndarray::Array1;
use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;

use crate::algorithms::action_selection::EpsilonGreedy;
use crate::policy::ActionValueTable;

pub use expected_sarsa_step::ExpectedSarsaStep;
pub use q_step::QStep;
pub use sarsa_step::SarsaStep;

/// One environment step, consumed by an update rule right after it happens.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<T> {
    pub state: T,
    pub action: usize,
    pub reward: f64,
    pub next_state: T,
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateParameters {
    pub learning_rate: f64,
    pub discount_factor: f64,
    pub epsilon: f64,
}

#[enum_dispatch]
pub trait PolicyUpdate {
    /// Bootstrapped value of `next_state` used in a non-terminal target.
    ///
    /// `next_action` is the action the behavior policy already picked for the
    /// next step and `epsilon` is the exploration rate of the current episode.
    fn future_q_value(
        &self,
        next_q_values: &Array1<f64>,
        next_action: usize,
        action_selection: &EpsilonGreedy,
        epsilon: f64,
    ) -> f64;
}

#[enum_dispatch(PolicyUpdate)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateRule {
    Sarsa(SarsaStep),
    QLearning(QStep),
    ExpectedSarsa(ExpectedSarsaStep),
}

impl UpdateRule {
    pub fn all() -> [UpdateRule; 3] {
        [
            UpdateRule::Sarsa(SarsaStep),
            UpdateRule::QLearning(QStep),
            UpdateRule::ExpectedSarsa(ExpectedSarsaStep),
        ]
    }

    /// Moves `Q[state][action]` towards the TD target and returns the
    /// temporal difference `target - Q[state][action]` measured before the move.
    ///
    /// Terminal transitions use `reward` as target. Non-terminal transitions
    /// must carry the next action; only that one entry of the table changes.
    pub fn update<T: Hash + Eq + Clone>(
        &self,
        table: &mut ActionValueTable<T>,
        transition: &Transition<T>,
        next_action: Option<usize>,
        action_selection: &EpsilonGreedy,
        params: UpdateParameters,
    ) -> f64 {
        debug_assert!(
            transition.done || next_action.is_some(),
            "non-terminal transition without a next action"
        );
        let target: f64 = match next_action {
            Some(next_action) if !transition.done => {
                let next_q_values: &Array1<f64> = table.get(&transition.next_state);
                let future_q_value: f64 = self.future_q_value(
                    next_q_values,
                    next_action,
                    action_selection,
                    params.epsilon,
                );
                transition.reward + params.discount_factor * future_q_value
            }
            _ => transition.reward,
        };
        let values: &mut Array1<f64> = table.get_mut(&transition.state);
        let temporal_difference: f64 = target - values[transition.action];
        values[transition.action] += params.learning_rate * temporal_difference;
        temporal_difference
    }
}

impl Display for UpdateRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateRule::Sarsa(_) => write!(f, "Sarsa"),
            UpdateRule::QLearning(_) => write!(f, "Q-learning"),
            UpdateRule::ExpectedSarsa(_) => write!(f, "Expected Sarsa"),
        }
    }
}

impl FromStr for UpdateRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "sarsa" => Ok(UpdateRule::Sarsa(SarsaStep)),
            "qlearning" | "q_learning" | "sarsamax" => Ok(UpdateRule::QLearning(QStep)),
            "expected_sarsa" | "expectedsarsa" => {
                Ok(UpdateRule::ExpectedSarsa(ExpectedSarsaStep))
            }
            other => Err(format!("unknown update rule '{}'", other)),
        }
    }
}
