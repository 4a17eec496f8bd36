//! Deterministic simulation tester with a live dashboard.
//!
//! Usage: `cargo run --example dst -- [--seed N] [--frame-ms N] [--blocking-pause]`
//!
//! Space pauses, any key resumes, `q` or Ctrl+C quits. Logs go to
//! `dst-dashboard.log` in the current directory; set `RUST_LOG` to change
//! the level.

mod sim;

use clap::Parser;
use dst_dashboard::{run, Dashboard, DashboardConfig, PauseMode, RunOptions};
use sim::Simulation;
use std::error::Error;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Deterministic simulation tester with a live dashboard.
#[derive(Parser)]
#[command(name = "dst")]
#[command(about = "Run a seeded simulation behind a live terminal dashboard")]
struct Args {
    /// Simulation seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Minimum milliseconds per frame.
    #[arg(long, value_name = "MS")]
    frame_ms: Option<u64>,

    /// Block on the next key while paused instead of idling.
    #[arg(long)]
    blocking_pause: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    // stdout belongs to the dashboard, so logs go to a file.
    let appender = tracing_appender::rolling::never(".", "dst-dashboard.log");
    let (writer, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!(seed, "starting simulation");
    dst_dashboard::install_panic_hook();

    let mut simulation = Simulation::new(seed);
    let mut dashboard = Dashboard::init_terminal(DashboardConfig::default())?;
    let options = RunOptions {
        frame_interval: args.frame_ms.map(Duration::from_millis),
        pause_mode: if args.blocking_pause {
            PauseMode::Blocking
        } else {
            PauseMode::Cooperative
        },
        ..RunOptions::default()
    };
    let report = run(&mut dashboard, &mut simulation, &options);
    drop(dashboard.deinit());

    println!("Deterministic Simulation Tester");
    println!("Seed = {seed}");
    println!("Stopped: {:?} after {} steps", report.stop, report.steps);
    println!("Stats: {:?}", report.last);
    Ok(())
}
