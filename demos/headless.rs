//! Run the simulation against an in-memory surface and print the last frame.
//!
//! Usage: `cargo run --example headless -- [SEED] [TICKS]`

mod sim;

use clap::Parser;
use dst_dashboard::{run, Dashboard, DashboardConfig, MemorySurface, RunOptions};
use sim::{Simulation, MAX_TIME_MS, STEP_MS};
use std::error::Error;

/// Run the simulation headless and print the final frame.
#[derive(Parser)]
#[command(name = "headless")]
struct Args {
    /// Simulation seed.
    #[arg(default_value_t = 0)]
    seed: u64,

    /// Ticks to run; one simulated hour by default.
    #[arg(default_value_t = MAX_TIME_MS / STEP_MS / 24)]
    ticks: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Args { seed, ticks } = Args::parse();

    let mut simulation = Simulation::new(seed);
    let mut dashboard = Dashboard::init(MemorySurface::new(80, 10), DashboardConfig::default())?;
    let options = RunOptions {
        max_ticks: Some(ticks),
        ..RunOptions::default()
    };
    let report = run(&mut dashboard, &mut simulation, &options);
    let surface = dashboard.deinit();

    for y in 0..10 {
        println!("{}", surface.row_text(y));
    }
    println!();
    println!(
        "seed {seed}: {:?} after {} ticks ({} ms simulated, {} frames flushed)",
        report.stop,
        report.ticks,
        report.steps.saturating_sub(1) * STEP_MS,
        surface.flush_count()
    );
    Ok(())
}
