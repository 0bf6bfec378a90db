use thiserror::Error;

use crate::env::EnvError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrainingError {
    #[error("learning rate must lie in (0, 1], got {0}")]
    InvalidLearningRate(f64),

    #[error("discount factor must lie in [0, 1], got {0}")]
    InvalidDiscountFactor(f64),

    #[error("number of episodes must be positive")]
    NoEpisodes,

    #[error("step ceiling per episode must be positive")]
    NoSteps,

    #[error("reporting window must be positive")]
    InvalidReportWindow,

    #[error("invalid exploration schedule: {0}")]
    InvalidSchedule(String),

    #[error("environment has an empty action space")]
    EmptyActionSpace,

    #[error("selected action {action} but the environment only has {size}")]
    ActionOutOfRange { action: usize, size: usize },

    #[error(transparent)]
    Env(#[from] EnvError),
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("nothing to report, the performance trace is empty")]
    EmptyTrace,

    #[error("cannot lay out {len} values in rows of {ncol}")]
    GridShape { len: usize, ncol: usize },

    #[error("failed to draw plot: {0}")]
    Plot(String),
}
