use super::{ActionSpace, Env, EnvError};

#[inline(always)]
fn from_2d_to_1d(ncol: usize, row: usize, col: usize) -> usize {
    row * ncol + col
}

#[inline(always)]
fn from_1d_to_2d(ncol: usize, pos: usize) -> (usize, usize) {
    (pos / ncol, pos % ncol)
}

#[inline(always)]
fn inc(nrow: usize, ncol: usize, row: usize, col: usize, a: usize) -> (usize, usize) {
    match a {
        // up
        0 => (row.saturating_sub(1), col),
        // right
        1 => (row, (col + 1).min(ncol - 1)),
        // down
        2 => ((row + 1).min(nrow - 1), col),
        // left
        3 => (row, col.saturating_sub(1)),
        _ => (row, col),
    }
}

/// The 4x12 cliff walking grid.
///
/// The agent starts in the bottom-left corner and has to reach the
/// bottom-right corner. Every move costs `-1`; stepping into the cliff costs
/// `-100` and sends the agent back to the start without ending the episode.
#[derive(Debug, Clone)]
pub struct CliffWalkingEnv {
    ready: bool,
    obs: [[(usize, f64, bool); 4]; 48],
    player_pos: usize,
}

impl CliffWalkingEnv {
    pub const NROW: usize = 4;
    pub const NCOL: usize = 12;
    pub const START_POSITION: usize = 36;
    pub const CLIFF_POSITIONS: [usize; 10] = [37, 38, 39, 40, 41, 42, 43, 44, 45, 46];
    pub const GOAL_POSITION: usize = 47;
    pub const ACTIONS: [&'static str; 4] = ["UP", "RIGHT", "DOWN", "LEFT"];
    const MAP: &'static str = "____________\n____________\n____________\n_!!!!!!!!!!G";

    fn update_probability_matrix(row: usize, col: usize, action: usize) -> (usize, f64, bool) {
        let (newrow, newcol) = inc(Self::NROW, Self::NCOL, row, col, action);
        let newstate: usize = from_2d_to_1d(Self::NCOL, newrow, newcol);
        if Self::CLIFF_POSITIONS.contains(&newstate) {
            (Self::START_POSITION, -100.0, false)
        } else {
            (newstate, -1.0, newstate == Self::GOAL_POSITION)
        }
    }

    pub fn new() -> Self {
        let mut obs: [[(usize, f64, bool); 4]; 48] = [[(0, 0.0, false); 4]; 48];
        for row in 0..Self::NROW {
            for col in 0..Self::NCOL {
                for a in 0..4 {
                    let i = from_2d_to_1d(Self::NCOL, row, col);
                    obs[i][a] = Self::update_probability_matrix(row, col, a);
                }
            }
        }
        Self {
            ready: false,
            obs,
            player_pos: Self::START_POSITION,
        }
    }

    pub fn n_states() -> usize {
        Self::NROW * Self::NCOL
    }

    pub fn position(&self) -> (usize, usize) {
        from_1d_to_2d(Self::NCOL, self.player_pos)
    }

    /// Optimal state values for the undiscounted task, row-major.
    pub fn optimal_state_values() -> [f64; 48] {
        let mut values: [f64; 48] = [0.0; 48];
        for row in 0..3 {
            for col in 0..Self::NCOL {
                values[from_2d_to_1d(Self::NCOL, row, col)] =
                    -(14.0 - row as f64 - col as f64);
            }
        }
        values[Self::START_POSITION] = -13.0;
        values
    }
}

impl Default for CliffWalkingEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl Env<usize> for CliffWalkingEnv {
    fn reset(&mut self) -> usize {
        self.player_pos = Self::START_POSITION;
        self.ready = true;
        self.player_pos
    }

    fn step(&mut self, action: usize) -> Result<(usize, f64, bool), EnvError> {
        if !self.ready {
            return Err(EnvError::NotReady);
        }
        if action >= Self::ACTIONS.len() {
            return Err(EnvError::InvalidAction {
                action,
                size: Self::ACTIONS.len(),
            });
        }
        let obs: (usize, f64, bool) = self.obs[self.player_pos][action];
        self.player_pos = obs.0;
        if obs.2 {
            self.ready = false;
        }
        Ok(obs)
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::new(Self::ACTIONS.len())
    }

    fn render(&self) -> String {
        let mut new_map: String = Self::MAP.to_string();
        let (row, col) = self.position();
        // one extra byte per line for the newline
        let pos: usize = row * (Self::NCOL + 1) + col;
        new_map.replace_range(pos..pos + 1, "@");
        new_map
    }
}
