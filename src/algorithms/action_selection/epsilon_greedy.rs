use ndarray::Array1;
use rand::{distributions::Uniform, prelude::Distribution, Rng};

use crate::utils::{argmax, categorical_sample};

/// Epsilon-greedy behavior policy derived from a vector of action values.
///
/// Every action gets `epsilon / n` probability and the greedy action gets the
/// remaining `1 - epsilon` on top. The greedy action is the first maximal
/// index, so ties always resolve to the lowest action.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    exploration_decider: Uniform<f64>,
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self::new()
    }
}

impl EpsilonGreedy {
    pub fn new() -> Self {
        Self {
            exploration_decider: Uniform::from(0.0..1.0),
        }
    }

    pub fn greedy_action(values: &Array1<f64>) -> usize {
        argmax(values)
    }

    pub fn action_distribution(&self, values: &Array1<f64>, epsilon: f64) -> Array1<f64> {
        let mut policy_probs: Array1<f64> =
            Array1::from_elem(values.len(), epsilon / values.len() as f64);
        policy_probs[Self::greedy_action(values)] += 1.0 - epsilon;
        policy_probs
    }

    /// Draws one action from [`EpsilonGreedy::action_distribution`] using a
    /// single uniform sample from `rng`.
    pub fn sample_action<R: Rng + ?Sized>(
        &self,
        values: &Array1<f64>,
        epsilon: f64,
        rng: &mut R,
    ) -> usize {
        let policy_probs = self.action_distribution(values, epsilon);
        let random: f64 = self.exploration_decider.sample(rng);
        categorical_sample(&policy_probs, random)
    }
}
