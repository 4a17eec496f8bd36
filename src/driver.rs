//! Host loop: step a simulation, tick the dashboard, honour its signals.
//!
//! The simulation sits behind [`SnapshotSource`]; [`run`] never advances it
//! while the dashboard is paused, so simulated time freezes with the display.

use crate::dashboard::{ControlSignal, ControlState, Dashboard};
use crate::stats::StatsSnapshot;
use crate::surface::Surface;
use std::time::{Duration, Instant};

/// Something that produces statistics one step at a time.
pub trait SnapshotSource {
    /// Advance one step. Returns `false` once there is nothing left to run.
    fn step(&mut self) -> bool;

    /// Statistics as of the last step.
    fn snapshot(&self) -> StatsSnapshot;
}

/// How [`run`] waits while the dashboard is paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PauseMode {
    /// Keep ticking, sleeping `paused_idle` between ticks.
    #[default]
    Cooperative,
    /// Block the host thread on the next key.
    Blocking,
}

/// Loop settings.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Minimum wall time per running frame. `None` runs flat out.
    pub frame_interval: Option<Duration>,
    /// Pause behaviour.
    pub pause_mode: PauseMode,
    /// Sleep between ticks while paused in cooperative mode.
    pub paused_idle: Duration,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            frame_interval: None,
            pause_mode: PauseMode::Cooperative,
            paused_idle: Duration::from_millis(50),
            max_ticks: None,
        }
    }
}

/// Why [`run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The operator pressed a quit key.
    Quit,
    /// The source had no more steps.
    SourceExhausted,
    /// `max_ticks` was reached.
    TickLimit,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Calls to [`Dashboard::tick`].
    pub ticks: u64,
    /// Successful source steps.
    pub steps: u64,
    /// Why the loop ended.
    pub stop: StopReason,
    /// Last snapshot handed to the dashboard.
    pub last: StatsSnapshot,
}

/// Drive `source` through `dashboard` until quit, exhaustion, or the tick
/// limit.
///
/// Each running iteration steps the source once and ticks once. While
/// paused the source is left alone and the same snapshot is shown again.
/// The dashboard is not deinitialised; that stays with the caller.
pub fn run<S, P>(dashboard: &mut Dashboard<S>, source: &mut P, options: &RunOptions) -> RunReport
where
    S: Surface,
    P: SnapshotSource + ?Sized,
{
    let mut ticks = 0;
    let mut steps = 0;
    let mut paused = dashboard.state() == ControlState::Paused;

    let stop = loop {
        if options.max_ticks.is_some_and(|max| ticks >= max) {
            break StopReason::TickLimit;
        }
        let frame_start = Instant::now();

        if !paused {
            if !source.step() {
                break StopReason::SourceExhausted;
            }
            steps += 1;
        }

        let snapshot = source.snapshot();
        ticks += 1;
        match dashboard.tick(&snapshot) {
            ControlSignal::Exit => break StopReason::Quit,
            ControlSignal::Continue => {
                paused = false;
                if let Some(interval) = options.frame_interval {
                    pace(frame_start, interval);
                }
            }
            ControlSignal::Paused => {
                paused = true;
                if options.pause_mode == PauseMode::Blocking {
                    match dashboard.wait_for_resume() {
                        ControlSignal::Exit => break StopReason::Quit,
                        ControlSignal::Continue => paused = false,
                        // No input to block on; fall back to idling.
                        ControlSignal::Paused => std::thread::sleep(options.paused_idle),
                    }
                } else {
                    std::thread::sleep(options.paused_idle);
                }
            }
        }
    };

    let report = RunReport {
        ticks,
        steps,
        stop,
        last: source.snapshot(),
    };
    tracing::info!(ticks, steps, stop = ?stop, "run finished");
    report
}

/// Sleep out the remainder of a frame.
fn pace(frame_start: Instant, interval: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < interval {
        std::thread::sleep(interval - elapsed);
    }
}
