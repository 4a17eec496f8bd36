//! # dst-dashboard
//!
//! A live terminal dashboard for a deterministic simulation tester.
//!
//! The host runs its simulation loop and, once per step, hands the dashboard
//! a [`StatsSnapshot`]. The dashboard redraws a clock and four hex counters
//! in a fixed two-region layout, polls the keyboard without blocking, and
//! answers with a [`ControlSignal`]: keep going, paused, or exit.
//!
//! ## Core Concepts
//!
//! - **Surface**: the drawing capability. [`TerminalSurface`] drives the real
//!   terminal through crossterm; [`MemorySurface`] is an in-memory fake.
//! - **Double-buffered output**: draws land on a cell grid, and a flush emits
//!   only the cells that changed, in one write.
//! - **Cooperative pause**: pausing never blocks `tick`; the host stops
//!   advancing simulated time while it sees `Paused`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dst_dashboard::{ControlSignal, Dashboard, DashboardConfig, StatsSnapshot};
//!
//! dst_dashboard::install_panic_hook();
//! let mut dashboard = Dashboard::init_terminal(DashboardConfig::default())?;
//!
//! let mut stats = StatsSnapshot::default();
//! let mut paused = false;
//! loop {
//!     if !paused {
//!         stats.elapsed_ms += 10;
//!     }
//!     match dashboard.tick(&stats) {
//!         ControlSignal::Exit => break,
//!         ControlSignal::Paused => paused = true,
//!         ControlSignal::Continue => paused = false,
//!     }
//! }
//! dashboard.deinit();
//! # Ok::<(), dst_dashboard::InitError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod config;
pub mod dashboard;
pub mod driver;
pub mod error;
pub mod input;
pub mod layout;
pub mod stats;
pub mod surface;

// Re-exports for convenience
pub use buffer::{Buffer, Cell, Modifiers, Rgb, Style};
pub use config::DashboardConfig;
pub use dashboard::{ControlSignal, ControlState, Dashboard};
pub use driver::{run, PauseMode, RunOptions, RunReport, SnapshotSource, StopReason};
pub use error::{InitError, SurfaceError};
pub use input::{Key, KeyCode, KeyModifiers};
pub use layout::{Layout, Rect, RegionId};
pub use stats::{Counter, Section, StatsSnapshot};
pub use surface::{
    install_panic_hook, restore_terminal, Align, MemorySurface, Surface, TerminalSurface,
};
