use std::fmt::Display;

use crate::error::TrainingError;

/// Exploration rate as a function of the 1-based episode index.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EpsilonSchedule {
    /// `1 / episode`
    #[default]
    InverseEpisode,
    /// `initial - decay * (episode - 1)`, never below `final_epsilon`
    Linear {
        initial: f64,
        final_epsilon: f64,
        decay: f64,
    },
}

impl EpsilonSchedule {
    /// Linear decay reaching `final_epsilon` after `exploration_time * n_episodes` episodes.
    pub fn linear_over(
        initial: f64,
        final_epsilon: f64,
        exploration_time: f64,
        n_episodes: u64,
    ) -> Self {
        let span: f64 = (exploration_time * n_episodes as f64).max(1.0);
        Self::Linear {
            initial,
            final_epsilon,
            decay: (initial - final_epsilon) / span,
        }
    }

    pub fn epsilon(&self, episode: u64) -> f64 {
        let episode = episode.max(1);
        match self {
            EpsilonSchedule::InverseEpisode => 1.0 / episode as f64,
            EpsilonSchedule::Linear {
                initial,
                final_epsilon,
                decay,
            } => (initial - decay * (episode - 1) as f64).max(*final_epsilon),
        }
    }

    pub fn validate(&self) -> Result<(), TrainingError> {
        match *self {
            EpsilonSchedule::InverseEpisode => Ok(()),
            EpsilonSchedule::Linear {
                initial,
                final_epsilon,
                decay,
            } => {
                if !(0.0..=1.0).contains(&initial) || !(0.0..=1.0).contains(&final_epsilon) {
                    Err(TrainingError::InvalidSchedule(format!(
                        "epsilon bounds must lie in [0, 1], got {} and {}",
                        initial, final_epsilon
                    )))
                } else if final_epsilon > initial {
                    Err(TrainingError::InvalidSchedule(format!(
                        "final epsilon {} is above initial epsilon {}",
                        final_epsilon, initial
                    )))
                } else if decay.is_nan() || decay < 0.0 {
                    Err(TrainingError::InvalidSchedule(format!(
                        "decay must be non-negative, got {}",
                        decay
                    )))
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl Display for EpsilonSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EpsilonSchedule::InverseEpisode => write!(f, "1/episode"),
            EpsilonSchedule::Linear {
                initial,
                final_epsilon,
                decay,
            } => write!(f, "linear({} -> {}, -{} per episode)", initial, final_epsilon, decay),
        }
    }
}
