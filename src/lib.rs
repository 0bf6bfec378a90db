//! Tabular temporal-difference control.
//!
//! [`Trainer`] learns an [`ActionValueTable`] for an episodic [`Env`] with one
//! of three one-step update rules ([`UpdateRule`]): Sarsa, Q-learning or
//! Expected Sarsa, acting epsilon-greedily on the current estimates.

pub mod algorithms;
pub mod env;
pub mod error;
pub mod policy;
pub mod report;
pub mod trainer;
pub mod utils;

pub use algorithms::action_selection::{EpsilonGreedy, EpsilonSchedule};
pub use algorithms::policy_update::{
    ExpectedSarsaStep, PolicyUpdate, QStep, SarsaStep, Transition, UpdateParameters, UpdateRule,
};
pub use env::{ActionSpace, Env, EnvError};
pub use error::{ReportError, TrainingError};
pub use policy::ActionValueTable;
pub use trainer::{EpisodeSummary, PerformanceTrace, TrainConfig, TrainResults, Trainer};
