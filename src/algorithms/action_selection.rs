mod epsilon_greedy;
mod epsilon_schedule;

pub use epsilon_greedy::EpsilonGreedy;
pub use epsilon_schedule::EpsilonSchedule;
