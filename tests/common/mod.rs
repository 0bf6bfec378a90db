use td_control::{ActionSpace, Env, EnvError};

pub const LEFT: usize = 0;
pub const RIGHT: usize = 1;

/// Deterministic corridor `0..=goal`. Every step costs `-1`, `LEFT` at the
/// left wall stays in place and reaching `goal` ends the episode.
#[derive(Debug, Clone)]
pub struct CorridorEnv {
    pub goal: usize,
    pos: usize,
    ready: bool,
}

impl CorridorEnv {
    pub fn new(goal: usize) -> Self {
        Self {
            goal,
            pos: 0,
            ready: false,
        }
    }

    pub fn transition(&self, pos: usize, action: usize) -> (usize, f64, bool) {
        let next = match action {
            LEFT => pos.saturating_sub(1),
            _ => (pos + 1).min(self.goal),
        };
        (next, -1.0, next == self.goal)
    }
}

impl Env<usize> for CorridorEnv {
    fn reset(&mut self) -> usize {
        self.pos = 0;
        self.ready = true;
        self.pos
    }

    fn step(&mut self, action: usize) -> Result<(usize, f64, bool), EnvError> {
        if !self.ready {
            return Err(EnvError::NotReady);
        }
        if action > RIGHT {
            return Err(EnvError::InvalidAction { action, size: 2 });
        }
        let obs = self.transition(self.pos, action);
        self.pos = obs.0;
        if obs.2 {
            self.ready = false;
        }
        Ok(obs)
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::new(2)
    }

    fn render(&self) -> String {
        (0..=self.goal)
            .map(|i| if i == self.pos { '@' } else { '_' })
            .collect()
    }
}
