//! Life Simulation Runner
//!
//! Runs a single agent's life day by day from the command line, streaming
//! the day log as JSONL and printing the narrative and an end-of-run
//! summary.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use life_core::{SimConfig, Simulation, Tuning};
use life_env::{Action, LifeEnv, ACTION_COUNT};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "life-sim")]
#[command(about = "A stochastic single-agent life simulation")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Maximum number of days to simulate
    #[arg(long, default_value_t = 10_000)]
    days: u32,

    /// Path to a TOML tuning file (defaults are used when absent)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Write the per-day snapshot log as JSONL to this path
    #[arg(long)]
    day_log: Option<PathBuf>,

    /// Print every narrative entry instead of just the summary
    #[arg(long)]
    narrative: bool,

    /// Drive the RL environment with a uniform random policy instead of
    /// running the plain simulation
    #[arg(long)]
    rollout: bool,

    /// Increase log verbosity (RUST_LOG overrides this)
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let tuning = match &args.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Error: could not load tuning from {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        // Pick up ./tuning.toml when present, built-in defaults otherwise
        None => Tuning::load_or_default(),
    };

    println!("Life Simulation");
    println!("===============");
    println!("Seed: {}", args.seed);
    println!("Max days: {}", args.days);
    println!();

    if args.rollout {
        return run_rollout(&args, tuning);
    }

    let config = SimConfig::new(args.seed).with_tuning(tuning);
    let mut sim = Simulation::new(config);

    println!(
        "Starting out: {}, age {:.0}, ${:.2}, {}",
        sim.state().name,
        sim.state().age,
        sim.state().money,
        if sim.state().has_job { "employed" } else { "unemployed" }
    );
    println!();

    for _ in 0..args.days {
        sim.advance_one_day();
        if sim.is_over() {
            break;
        }
        let day = sim.state().day;
        if day % 365 == 0 {
            println!(
                "Year {:>2}: age {:.1}, health {:.0}, happiness {:.0}, net worth ${:.2}",
                day / 365,
                sim.state().age,
                sim.state().health,
                sim.state().happiness,
                sim.state().net_worth()
            );
        }
    }

    if args.narrative {
        println!();
        for entry in sim.narrative() {
            println!("{entry}");
        }
    }

    if let Some(path) = &args.day_log {
        if let Err(e) = write_day_log(&sim, path) {
            eprintln!("Warning: could not write day log to {}: {}", path.display(), e);
        } else {
            println!("Wrote {} day records to {}", sim.day_log().len(), path.display());
        }
    }

    println!();
    let state = sim.state();
    match state.cause_of_end {
        Some(cause) => println!(
            "Run over after {} days: died at age {:.1} ({})",
            state.day,
            state.age,
            cause.as_str()
        ),
        None => println!(
            "Run complete: survived {} days to age {:.1}",
            state.day, state.age
        ),
    }
    println!(
        "Final: health {:.0}, happiness {:.0}, net worth ${:.2}, {} life goals, {} children",
        state.health,
        state.happiness,
        state.net_worth(),
        state.life_goals_completed,
        state.living_children()
    );

    ExitCode::SUCCESS
}

/// Episode loop over the RL environment, sampling actions uniformly. The
/// policy stream is seeded separately from the world so the two do not
/// entangle.
fn run_rollout(args: &Args, tuning: Tuning) -> ExitCode {
    let config = SimConfig::new(args.seed).with_tuning(tuning);
    let mut env = LifeEnv::new(config).with_max_days(args.days);
    env.reset(Some(args.seed));

    let mut policy_rng = SmallRng::seed_from_u64(args.seed.wrapping_add(1));
    let mut total_reward = 0.0f32;
    let mut steps = 0u32;

    println!("Random-policy rollout");
    loop {
        let action = Action::from_id(policy_rng.gen_range(0..ACTION_COUNT));
        let out = env.step(action);
        total_reward += out.reward;
        steps += 1;
        if steps % 365 == 0 {
            println!(
                "Year {:>2}: reward so far {:.1}, net worth ${:.2}",
                steps / 365,
                total_reward,
                out.info.net_worth
            );
        }
        if out.done {
            println!();
            match out.info.cause_of_end {
                Some(cause) => println!(
                    "Episode over after {} steps: died at age {:.1} ({})",
                    steps, out.info.age, cause
                ),
                None => println!(
                    "Episode truncated after {} steps at age {:.1}",
                    steps, out.info.age
                ),
            }
            break;
        }
    }
    println!(
        "Total reward {:.1} over {} steps (mean {:.3})",
        total_reward,
        steps,
        total_reward / steps as f32
    );

    ExitCode::SUCCESS
}

/// One JSON object per line, one line per simulated day.
fn write_day_log(sim: &Simulation, path: &PathBuf) -> std::io::Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    for snap in sim.day_log() {
        let line = serde_json::to_string(snap)?;
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}
