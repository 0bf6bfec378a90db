mod action_space;
mod cliff_walking;

use thiserror::Error;

pub use action_space::ActionSpace;
pub use cliff_walking::CliffWalkingEnv;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("environment is not ready to receive actions, call reset first")]
    NotReady,

    #[error("action {action} is outside of the action space of size {size}")]
    InvalidAction { action: usize, size: usize },
}

/// Episodic environment with a discrete action space.
///
/// `step` returns `(next_state, reward, done)`. The action space is read once
/// at the start of a training run and must not change afterwards.
pub trait Env<T> {
    fn reset(&mut self) -> T;
    fn step(&mut self, action: usize) -> Result<(T, f64, bool), EnvError>;
    fn action_space(&self) -> ActionSpace;
    fn render(&self) -> String;
}
