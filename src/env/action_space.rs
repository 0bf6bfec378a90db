#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpace {
    pub size: usize,
}

impl ActionSpace {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn contains(&self, action: usize) -> bool {
        action < self.size
    }
}
