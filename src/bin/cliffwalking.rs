use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use rand::{rngs::StdRng, SeedableRng};
use structopt::StructOpt;
use tracing::Level;

use td_control::env::CliffWalkingEnv;
use td_control::report::{
    format_policy_grid, format_value_grid, plot_moving_average, plot_state_values, LogReporter,
    ProgressBar,
};
use td_control::{Env, EpsilonSchedule, PerformanceTrace, TrainConfig, Trainer, UpdateRule};

extern crate structopt;

/// Train tabular TD control agents on cliff walking and report their results
#[derive(StructOpt, Debug)]
#[structopt(name = "TDControl - CliffWalking")]
struct Cli {
    /// Show example of a greedy episode after training
    #[structopt(long = "show_example")]
    show_example: bool,

    /// Show a progress bar instead of periodic log lines
    #[structopt(long = "progress")]
    progress: bool,

    /// Update rule: sarsa, qlearning, expected_sarsa or all
    #[structopt(long = "algorithm", default_value = "all")]
    algorithm: String,

    /// Number of episodes for the training
    #[structopt(long = "n_episodes", short = "n", default_value = "5000")]
    n_episodes: u64,

    /// Maximum number of steps per episode
    #[structopt(long = "max_steps", default_value = "300")]
    max_steps: u64,

    /// Learning rate of the update rule
    #[structopt(long = "learning_rate", default_value = "0.02")]
    learning_rate: f64,

    /// Discount factor to be used on the temporal difference calculation
    #[structopt(long = "discount_factor", default_value = "1.0")]
    discount_factor: f64,

    /// Decay epsilon linearly to zero over this fraction of the episodes instead of 1/episode
    #[structopt(long = "exploration_time")]
    exploration_time: Option<f64>,

    /// Number of episodes averaged in each point of the reward curve
    #[structopt(long = "plot_every", default_value = "100")]
    plot_every: usize,

    /// Seed for reproducibility
    #[structopt(long = "seed", default_value = "42")]
    seed: u64,

    /// Directory where the reward and state-value plots are written
    #[structopt(long = "output", parse(from_os_str), default_value = ".")]
    output: PathBuf,

    /// Log verbosity, repeat for more detail
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: u8,
}

/// "Expected Sarsa" -> "expected_sarsa"
fn file_stem(label: &str) -> String {
    label.to_lowercase().replace(['-', ' '], "_")
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli: Cli = Cli::from_args();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let rules: Vec<UpdateRule> = if cli.algorithm == "all" {
        UpdateRule::all().to_vec()
    } else {
        vec![cli.algorithm.parse::<UpdateRule>()?]
    };

    let epsilon = match cli.exploration_time {
        Some(exploration_time) => {
            EpsilonSchedule::linear_over(1.0, 0.0, exploration_time, cli.n_episodes)
        }
        None => EpsilonSchedule::InverseEpisode,
    };
    let config = TrainConfig {
        n_episodes: cli.n_episodes,
        learning_rate: cli.learning_rate,
        discount_factor: cli.discount_factor,
        max_steps: cli.max_steps,
        plot_every: cli.plot_every,
        epsilon,
    };

    let mut env = CliffWalkingEnv::new();
    let states: Vec<usize> = (0..CliffWalkingEnv::n_states()).collect();

    let mut traces: Vec<PerformanceTrace> = vec![];
    let mut legends: Vec<String> = vec![];

    for rule in rules {
        let label = rule.to_string();
        let mut trainer = Trainer::new(rule, config);
        trainer = if cli.progress {
            trainer.with_subscriber(Box::new(ProgressBar::new(&label, cli.n_episodes)))
        } else {
            trainer.with_subscriber(Box::new(LogReporter::new(
                &label,
                (cli.n_episodes / 10).max(1),
            )))
        };

        let mut rng = StdRng::seed_from_u64(cli.seed);
        let now: Instant = Instant::now();
        let results = trainer.train(&mut env, &mut rng)?;
        let elapsed: std::time::Duration = now.elapsed();
        println!("\n{} {:.2?}", label, elapsed);

        println!(
            "Estimated Optimal Policy (UP = 0, RIGHT = 1, DOWN = 2, LEFT = 3, N/A = -1):"
        );
        println!(
            "{}",
            format_policy_grid(&results.table.greedy_policy(&states), CliffWalkingEnv::NCOL)
        );
        let state_values: Vec<f64> = results.table.state_values(&states);
        println!("Estimated state values:");
        println!("{}", format_value_grid(&state_values, CliffWalkingEnv::NCOL));
        let values_path = cli.output.join(format!("values_{}.svg", file_stem(&label)));
        plot_state_values(
            &state_values,
            CliffWalkingEnv::NCOL,
            &format!("{} State Values", label),
            &values_path,
        )?;
        if let Some(best) = results.trace.best_average() {
            println!(
                "Best Average Reward over {} Episodes: {:.2}",
                cli.plot_every, best
            );
        }

        if cli.show_example {
            let (reward, steps, terminated) =
                trainer.evaluate(&results.table, &mut env, |e| println!("{}\n", e.render()))?;
            println!("episode reward {:?}", reward);
            println!(
                "{} with {:?} steps",
                if terminated { "terminated" } else { "truncated" },
                steps
            );
        }

        traces.push(results.trace);
        legends.push(label);
    }

    let optimal_values = CliffWalkingEnv::optimal_state_values();
    println!("Optimal state values:");
    println!("{}", format_value_grid(&optimal_values, CliffWalkingEnv::NCOL));
    plot_state_values(
        &optimal_values,
        CliffWalkingEnv::NCOL,
        "Optimal State Values",
        &cli.output.join("values_optimal.svg"),
    )?;

    let path = cli.output.join("rewards.svg");
    let trace_refs: Vec<&PerformanceTrace> = traces.iter().collect();
    let legend_refs: Vec<&str> = legends.iter().map(String::as_str).collect();
    plot_moving_average(&trace_refs, &legend_refs, "Rewards", &path)?;
    tracing::info!(path = %path.display(), "reward plot written");
    Ok(())
}
