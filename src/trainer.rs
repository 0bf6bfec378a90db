mod trace;

use rand::Rng;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, info};

use crate::algorithms::action_selection::{EpsilonGreedy, EpsilonSchedule};
use crate::algorithms::policy_update::{Transition, UpdateParameters, UpdateRule};
use crate::env::Env;
use crate::error::TrainingError;
use crate::policy::ActionValueTable;
use crate::report::Subscriber;

pub use trace::PerformanceTrace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    pub n_episodes: u64,
    pub learning_rate: f64,
    pub discount_factor: f64,
    /// Episodes still running after this many steps are cut short.
    pub max_steps: u64,
    /// Length of the reward window of the performance trace.
    pub plot_every: usize,
    pub epsilon: EpsilonSchedule,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            n_episodes: 5000,
            learning_rate: 0.02,
            discount_factor: 1.0,
            max_steps: 300,
            plot_every: 100,
            epsilon: EpsilonSchedule::InverseEpisode,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<(), TrainingError> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(TrainingError::InvalidLearningRate(self.learning_rate));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(TrainingError::InvalidDiscountFactor(self.discount_factor));
        }
        if self.n_episodes == 0 {
            return Err(TrainingError::NoEpisodes);
        }
        if self.max_steps == 0 {
            return Err(TrainingError::NoSteps);
        }
        if self.plot_every == 0 {
            return Err(TrainingError::InvalidReportWindow);
        }
        self.epsilon.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummary {
    pub episode: u64,
    pub n_episodes: u64,
    pub epsilon: f64,
    pub reward: f64,
    pub steps: u64,
    /// `false` when the episode hit the step ceiling.
    pub terminated: bool,
    /// Set on the episodes that close a reporting window.
    pub window_average: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct TrainResults<T: Hash + Eq> {
    pub table: ActionValueTable<T>,
    pub trace: PerformanceTrace,
    pub rewards: Vec<f64>,
    pub lengths: Vec<u64>,
    pub truncated: u64,
}

/// Runs episodes against an environment and learns an action-value table
/// with one of the TD update rules.
pub struct Trainer {
    config: TrainConfig,
    update_rule: UpdateRule,
    action_selection: EpsilonGreedy,
    subscribers: Vec<Box<dyn Subscriber<EpisodeSummary>>>,
}

impl Trainer {
    pub fn new(update_rule: UpdateRule, config: TrainConfig) -> Self {
        Self {
            config,
            update_rule,
            action_selection: EpsilonGreedy::new(),
            subscribers: vec![],
        }
    }

    pub fn with_subscriber(mut self, subscriber: Box<dyn Subscriber<EpisodeSummary>>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    pub fn train<T, E, R>(
        &mut self,
        env: &mut E,
        rng: &mut R,
    ) -> Result<TrainResults<T>, TrainingError>
    where
        T: Hash + Eq + Clone + Debug,
        E: Env<T> + ?Sized,
        R: Rng + ?Sized,
    {
        self.config.validate()?;
        let action_space = env.action_space();
        if action_space.size == 0 {
            return Err(TrainingError::EmptyActionSpace);
        }

        info!(
            rule = %self.update_rule,
            n_episodes = self.config.n_episodes,
            learning_rate = self.config.learning_rate,
            discount_factor = self.config.discount_factor,
            epsilon = %self.config.epsilon,
            "starting training"
        );

        let mut table: ActionValueTable<T> = ActionValueTable::new(action_space.size);
        let mut performance = PerformanceTrace::new(self.config.plot_every);
        let mut rewards: Vec<f64> = vec![];
        let mut lengths: Vec<u64> = vec![];
        let mut truncated: u64 = 0;

        for episode in 1..=self.config.n_episodes {
            let epsilon: f64 = self.config.epsilon.epsilon(episode);
            let (epi_reward, steps, terminated) =
                self.run_episode(env, &mut table, epsilon, rng)?;

            if !terminated {
                truncated += 1;
                tracing::trace!(episode, steps, "episode reached the step ceiling");
            }
            let window_average = performance.push(epi_reward);
            if let Some(average) = window_average {
                debug!(episode, average, epsilon, states = table.len(), "reward window closed");
            }
            rewards.push(epi_reward);
            lengths.push(steps);

            let summary = EpisodeSummary {
                episode,
                n_episodes: self.config.n_episodes,
                epsilon,
                reward: epi_reward,
                steps,
                terminated,
                window_average,
            };
            for subscriber in self.subscribers.iter_mut() {
                subscriber.consume(summary);
            }
        }

        info!(
            rule = %self.update_rule,
            states = table.len(),
            truncated,
            best_average = ?performance.best_average(),
            "training finished"
        );

        Ok(TrainResults {
            table,
            trace: performance,
            rewards,
            lengths,
            truncated,
        })
    }

    /// Plays one episode, updating `table` after every step.
    ///
    /// Returns `(total reward, steps, terminated)`; `terminated` is `false`
    /// when the step ceiling ended the episode. Fails with
    /// [`TrainingError::ActionOutOfRange`] if `table` proposes an action the
    /// environment does not have.
    pub fn run_episode<T, E, R>(
        &self,
        env: &mut E,
        table: &mut ActionValueTable<T>,
        epsilon: f64,
        rng: &mut R,
    ) -> Result<(f64, u64, bool), TrainingError>
    where
        T: Hash + Eq + Clone,
        E: Env<T> + ?Sized,
        R: Rng + ?Sized,
    {
        let params = UpdateParameters {
            learning_rate: self.config.learning_rate,
            discount_factor: self.config.discount_factor,
            epsilon,
        };
        let action_space = env.action_space();
        let mut epi_reward: f64 = 0.0;
        let mut steps: u64 = 0;
        let mut curr_obs: T = env.reset();
        let mut curr_action: usize =
            self.action_selection
                .sample_action(table.get(&curr_obs), epsilon, rng);

        while steps < self.config.max_steps {
            if !action_space.contains(curr_action) {
                return Err(TrainingError::ActionOutOfRange {
                    action: curr_action,
                    size: action_space.size,
                });
            }
            steps += 1;
            let (next_obs, reward, terminated) = env.step(curr_action)?;
            epi_reward += reward;
            // chosen before the update so Sarsa bootstraps off the action played next
            let next_action: Option<usize> = if terminated {
                None
            } else {
                Some(
                    self.action_selection
                        .sample_action(table.get(&next_obs), epsilon, rng),
                )
            };
            let transition = Transition {
                state: curr_obs,
                action: curr_action,
                reward,
                next_state: next_obs,
                done: terminated,
            };
            self.update_rule.update(
                table,
                &transition,
                next_action,
                &self.action_selection,
                params,
            );
            match next_action {
                Some(action) => {
                    curr_obs = transition.next_state;
                    curr_action = action;
                }
                None => return Ok((epi_reward, steps, true)),
            }
        }
        Ok((epi_reward, steps, false))
    }

    /// Follows the greedy policy of `table` for one episode without learning.
    /// States missing from the table act as zero vectors and are not inserted.
    pub fn evaluate<T, E>(
        &self,
        table: &ActionValueTable<T>,
        env: &mut E,
        mut on_step: impl FnMut(&E),
    ) -> Result<(f64, u64, bool), TrainingError>
    where
        T: Hash + Eq + Clone,
        E: Env<T> + ?Sized,
    {
        let mut epi_reward: f64 = 0.0;
        let mut steps: u64 = 0;
        let mut curr_obs: T = env.reset();
        on_step(&*env);
        while steps < self.config.max_steps {
            steps += 1;
            let action: usize = table
                .get_if_has(&curr_obs)
                .map_or(0, EpsilonGreedy::greedy_action);
            let (next_obs, reward, terminated) = env.step(action)?;
            on_step(&*env);
            epi_reward += reward;
            if terminated {
                return Ok((epi_reward, steps, true));
            }
            curr_obs = next_obs;
        }
        Ok((epi_reward, steps, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ActionSpace, EnvError};
    use rand::{rngs::StdRng, SeedableRng};

    /// Never terminates; counts the steps it was asked for.
    struct Endless {
        steps: u64,
    }

    impl Env<u8> for Endless {
        fn reset(&mut self) -> u8 {
            0
        }

        fn step(&mut self, _action: usize) -> Result<(u8, f64, bool), EnvError> {
            self.steps += 1;
            Ok((0, -1.0, false))
        }

        fn action_space(&self) -> ActionSpace {
            ActionSpace::new(3)
        }

        fn render(&self) -> String {
            String::new()
        }
    }

    /// Single step episode with reward 1.
    struct OneShot;

    impl Env<u8> for OneShot {
        fn reset(&mut self) -> u8 {
            0
        }

        fn step(&mut self, _action: usize) -> Result<(u8, f64, bool), EnvError> {
            Ok((1, 1.0, true))
        }

        fn action_space(&self) -> ActionSpace {
            ActionSpace::new(2)
        }

        fn render(&self) -> String {
            String::new()
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(TrainConfig::default().validate(), Ok(()));
    }

    #[test]
    fn malformed_config_is_rejected_before_training() {
        let cases = [
            (
                TrainConfig {
                    learning_rate: 0.0,
                    ..TrainConfig::default()
                },
                TrainingError::InvalidLearningRate(0.0),
            ),
            (
                TrainConfig {
                    learning_rate: 1.5,
                    ..TrainConfig::default()
                },
                TrainingError::InvalidLearningRate(1.5),
            ),
            (
                TrainConfig {
                    discount_factor: -0.1,
                    ..TrainConfig::default()
                },
                TrainingError::InvalidDiscountFactor(-0.1),
            ),
            (
                TrainConfig {
                    n_episodes: 0,
                    ..TrainConfig::default()
                },
                TrainingError::NoEpisodes,
            ),
            (
                TrainConfig {
                    max_steps: 0,
                    ..TrainConfig::default()
                },
                TrainingError::NoSteps,
            ),
            (
                TrainConfig {
                    plot_every: 0,
                    ..TrainConfig::default()
                },
                TrainingError::InvalidReportWindow,
            ),
        ];
        for (config, expected) in cases {
            let mut env = Endless { steps: 0 };
            let mut rng = StdRng::seed_from_u64(0);
            let result = Trainer::new(UpdateRule::all()[0], config).train(&mut env, &mut rng);
            assert_eq!(result.err(), Some(expected));
            assert_eq!(env.steps, 0);
        }
    }

    #[test]
    fn step_ceiling_truncates_silently() {
        let config = TrainConfig {
            n_episodes: 3,
            max_steps: 300,
            plot_every: 1,
            ..TrainConfig::default()
        };
        let mut env = Endless { steps: 0 };
        let mut rng = StdRng::seed_from_u64(1);
        let results = Trainer::new(UpdateRule::all()[1], config)
            .train(&mut env, &mut rng)
            .unwrap();
        assert_eq!(env.steps, 900);
        assert_eq!(results.lengths, vec![300, 300, 300]);
        assert_eq!(results.rewards, vec![-300.0; 3]);
        assert_eq!(results.truncated, 3);
        assert_eq!(results.trace.averages(), &[-300.0; 3]);
    }

    #[test]
    fn terminal_episode_updates_towards_reward() {
        let config = TrainConfig {
            n_episodes: 1,
            learning_rate: 0.5,
            ..TrainConfig::default()
        };
        for rule in UpdateRule::all() {
            let mut rng = StdRng::seed_from_u64(2);
            let mut results = Trainer::new(rule, config).train(&mut OneShot, &mut rng).unwrap();
            let values = results.table.get(&0).to_vec();
            assert_eq!(values.iter().sum::<f64>(), 0.5, "{}", rule);
            // the terminal state is never looked up
            assert!(results.table.get_if_has(&1).is_none());
            assert_eq!(results.truncated, 0);
        }
    }

    #[test]
    fn subscribers_see_every_episode() {
        use std::cell::RefCell;
        use std::rc::Rc;

        struct Collect(Rc<RefCell<Vec<EpisodeSummary>>>);

        impl Subscriber<EpisodeSummary> for Collect {
            fn consume(&mut self, data: EpisodeSummary) {
                self.0.borrow_mut().push(data);
            }
        }

        let seen = Rc::new(RefCell::new(vec![]));
        let config = TrainConfig {
            n_episodes: 4,
            plot_every: 2,
            ..TrainConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        Trainer::new(UpdateRule::all()[2], config)
            .with_subscriber(Box::new(Collect(seen.clone())))
            .train(&mut OneShot, &mut rng)
            .unwrap();
        let seen = seen.borrow();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0].epsilon, 1.0);
        assert_eq!(seen[3].epsilon, 0.25);
        assert_eq!(seen[0].window_average, None);
        assert_eq!(seen[1].window_average, Some(1.0));
        assert!(seen.iter().all(|s| s.terminated && s.steps == 1));
    }

    /// Fails on its first step.
    struct Unready;

    impl Env<u8> for Unready {
        fn reset(&mut self) -> u8 {
            0
        }

        fn step(&mut self, _action: usize) -> Result<(u8, f64, bool), EnvError> {
            Err(EnvError::NotReady)
        }

        fn action_space(&self) -> ActionSpace {
            ActionSpace::new(2)
        }

        fn render(&self) -> String {
            String::new()
        }
    }

    #[test]
    fn huge_episode_counts_do_not_reserve_up_front() {
        let config = TrainConfig {
            n_episodes: u64::MAX,
            ..TrainConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(8);
        let result = Trainer::new(UpdateRule::all()[0], config).train(&mut Unready, &mut rng);
        assert_eq!(result.err(), Some(TrainingError::Env(EnvError::NotReady)));
    }

    #[test]
    fn actions_outside_the_env_are_never_played() {
        let trainer = Trainer::new(UpdateRule::all()[1], TrainConfig::default());
        // a table built for three actions against a two-action env
        let mut table: ActionValueTable<u8> = ActionValueTable::new(3);
        table.update(&0, 2, 5.0);
        let mut rng = StdRng::seed_from_u64(6);
        let result = trainer.run_episode(&mut OneShot, &mut table, 0.0, &mut rng);
        assert_eq!(
            result,
            Err(TrainingError::ActionOutOfRange { action: 2, size: 2 })
        );
        assert!(table.get_if_has(&1).is_none());
    }

    #[test]
    fn evaluate_does_not_grow_table() {
        let trainer = Trainer::new(UpdateRule::all()[0], TrainConfig::default());
        let table: ActionValueTable<u8> = ActionValueTable::new(2);
        let mut frames = 0;
        let (reward, steps, terminated) =
            trainer.evaluate(&table, &mut OneShot, |_| frames += 1).unwrap();
        assert_eq!((reward, steps, terminated), (1.0, 1, true));
        assert_eq!(frames, 2);
        assert!(table.is_empty());
    }
}
