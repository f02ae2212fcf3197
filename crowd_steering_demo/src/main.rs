use anyhow::Result;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;

mod scenarios;
mod world;

use scenarios::Scenario;
use world::World;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless runner for the steering behaviour scenarios", long_about = None)]
struct Args {
    /// Scenario to run
    #[arg(value_enum)]
    scenario: Scenario,

    /// Number of simulation ticks
    #[arg(short, long, default_value_t = 600)]
    ticks: usize,

    /// Tick length in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Seed for agent placement and wandering
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Number of agents in the group scenarios
    #[arg(short, long, default_value_t = 10)]
    agents: usize,

    /// World width
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// World height
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Log every agent every N ticks
    #[arg(long, default_value_t = 60)]
    report_every: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if !(args.dt.is_finite() && args.dt > 0.0) {
        anyhow::bail!("--dt must be a positive number of seconds, got {}", args.dt);
    }

    let world = World::new(args.width, args.height)?;
    let mut rng = SmallRng::seed_from_u64(args.seed);

    log::info!(
        "Running {:?} for {} ticks of {}s in a {}x{} world",
        args.scenario,
        args.ticks,
        args.dt,
        world.width,
        world.height
    );

    let mut run = scenarios::build(args.scenario, &world, args.agents, &mut rng)?;
    for tick in 0..args.ticks {
        run.step(&world, args.dt, &mut rng)?;
        if args.report_every > 0 && tick % args.report_every == 0 {
            run.report(tick);
        }
    }
    run.report(args.ticks);
    Ok(())
}
