//! Dashboard: the render/tick engine.
//!
//! The host calls [`Dashboard::init`] once, [`Dashboard::tick`] once per
//! simulation step, and [`Dashboard::deinit`] on the way out:
//!
//! ```rust
//! use dst_dashboard::{ControlSignal, Dashboard, DashboardConfig, MemorySurface, StatsSnapshot};
//!
//! let surface = MemorySurface::new(80, 24);
//! let mut dashboard = Dashboard::init(surface, DashboardConfig::default()).unwrap();
//!
//! let snapshot = StatsSnapshot::at(3_661_000);
//! assert_eq!(dashboard.tick(&snapshot), ControlSignal::Continue);
//! assert_eq!(dashboard.surface().text_at(70, 0, 10), " 01:01:01 ");
//!
//! let surface = dashboard.deinit();
//! assert!(surface.is_released());
//! ```
//!
//! `tick` never blocks. Pause is cooperative: a paused dashboard keeps
//! returning [`ControlSignal::Paused`] until a key arrives, and the host is
//! expected to stop advancing the simulation meanwhile.

pub mod format;

use crate::config::DashboardConfig;
use crate::error::{InitError, SurfaceError};
use crate::input::Key;
use crate::layout::{Layout, RegionId};
use crate::stats::{Counter, Section, StatsSnapshot};
use crate::surface::{Surface, TerminalSurface};
use format::{clock_field, counter_field};

/// Outcome of one tick, telling the host how to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlSignal {
    /// Keep going.
    Continue,
    /// The operator paused; hold simulated time and tick again.
    Paused,
    /// The operator quit; call [`Dashboard::deinit`] and stop ticking.
    Exit,
}

/// Stored control state. `Exit` is returned, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlState {
    /// Drawing every tick.
    Running,
    /// Waiting for any key; nothing is drawn.
    Paused,
}

/// Live statistics display over an exclusively owned [`Surface`].
#[derive(Debug)]
pub struct Dashboard<S: Surface> {
    surface: S,
    config: DashboardConfig,
    layout: Layout,
    title_region: RegionId,
    stats_region: RegionId,
    state: ControlState,
    frames: u64,
}

impl Dashboard<TerminalSurface> {
    /// Acquire the process terminal and initialise on it.
    ///
    /// # Errors
    ///
    /// Fails if the terminal is already held, cannot be set up, or is too
    /// small for the layout. The error is fatal; the host should not tick.
    pub fn init_terminal(config: DashboardConfig) -> Result<Self, InitError> {
        let surface = TerminalSurface::acquire()?;
        Self::init(surface, config)
    }
}

impl<S: Surface> Dashboard<S> {
    /// Take ownership of `surface`, create the two regions, and paint the
    /// static chrome.
    ///
    /// Dimensions are read once here and never again. On failure the
    /// regions created so far are destroyed and the surface is released
    /// before the error is returned.
    ///
    /// # Errors
    ///
    /// [`InitError`] if the configuration does not fit the surface or a
    /// region cannot be created. This is fatal for the display.
    pub fn init(mut surface: S, config: DashboardConfig) -> Result<Self, InitError> {
        let (width, height) = surface.size();
        if let Err(e) = config.validate(width, height) {
            surface.release();
            return Err(e);
        }
        let Some(layout) = Layout::compute(width, height, config.stats_height) else {
            surface.release();
            let (min_width, min_height) = config.min_size();
            return Err(InitError::SurfaceTooSmall {
                width,
                height,
                min_width,
                min_height,
            });
        };

        let [title_rect, stats_rect] = layout.regions();
        let title_region = surface
            .create_region(title_rect, config.title_style)
            .map_err(|e| abandon(&mut surface, &[], e))?;
        let stats_region = surface
            .create_region(stats_rect, config.stats_style)
            .map_err(|e| abandon(&mut surface, &[title_region], e))?;

        tracing::debug!(
            width,
            height,
            title = ?layout.title,
            stats = ?layout.stats,
            "dashboard initialised"
        );

        let mut dashboard = Self {
            surface,
            config,
            layout,
            title_region,
            stats_region,
            state: ControlState::Running,
            frames: 0,
        };
        dashboard.paint_chrome();
        dashboard.flush();
        Ok(dashboard)
    }

    /// Run one input-and-redraw cycle.
    ///
    /// Polls at most one key, without blocking. Quit and pause keys are
    /// handled before any drawing. While running, every other outcome
    /// (no key, unrecognised key) redraws the clock and counters.
    ///
    /// Must not be called again after it returned [`ControlSignal::Exit`].
    pub fn tick(&mut self, snapshot: &StatsSnapshot) -> ControlSignal {
        let key = self.surface.poll_key();
        match self.state {
            ControlState::Running => match key {
                Some(key) if self.config.is_quit(&key) => {
                    tracing::info!(frames = self.frames, "quit requested");
                    ControlSignal::Exit
                }
                Some(key) if self.config.is_pause(&key) => {
                    self.pause();
                    ControlSignal::Paused
                }
                _ => {
                    self.redraw(snapshot);
                    ControlSignal::Continue
                }
            },
            ControlState::Paused => match key {
                None => ControlSignal::Paused,
                Some(key) => self.leave_pause(key),
            },
        }
    }

    /// Block until a key arrives while paused.
    ///
    /// This is the host-level blocking pause: the calling thread does
    /// nothing else until the operator presses a key. `tick` itself never
    /// blocks. Returns [`ControlSignal::Continue`] immediately when not
    /// paused, and [`ControlSignal::Paused`] if the surface has no input to
    /// wait on.
    pub fn wait_for_resume(&mut self) -> ControlSignal {
        if self.state == ControlState::Running {
            return ControlSignal::Continue;
        }
        match self.surface.wait_key() {
            Some(key) => self.leave_pause(key),
            None => ControlSignal::Paused,
        }
    }

    /// Destroy both regions, then release the surface and hand it back.
    ///
    /// Always succeeds, including after [`ControlSignal::Exit`].
    pub fn deinit(mut self) -> S {
        self.surface.destroy_region(self.title_region);
        self.surface.destroy_region(self.stats_region);
        self.surface.release();
        tracing::debug!(frames = self.frames, "dashboard released");
        self.surface
    }

    /// Current control state.
    pub const fn state(&self) -> ControlState {
        self.state
    }

    /// Layout computed at init.
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Configuration in use.
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// The surface, for inspection.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// The surface, e.g. to script input on a [`MemorySurface`](crate::MemorySurface).
    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Number of redraws so far.
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    fn paint_chrome(&mut self) {
        let config = &self.config;
        self.surface
            .write_at(self.title_region, 0, config.title_column, &config.title);

        self.surface.draw_border(self.stats_region);
        for section in Section::ALL {
            self.surface.set_style(self.stats_region, config.header_style);
            self.surface.write_at(
                self.stats_region,
                section.header_row(),
                config.label_column,
                section.header(),
            );
            self.surface.set_style(self.stats_region, config.stats_style);
            for counter in Counter::ALL.into_iter().filter(|c| c.section() == section) {
                self.surface.write_at(
                    self.stats_region,
                    counter.row(),
                    config.label_column,
                    counter.label(),
                );
            }
        }
    }

    fn redraw(&mut self, snapshot: &StatsSnapshot) {
        let width = self.layout.terminal_size.0;
        let clock = clock_field(snapshot.elapsed_ms, self.config.show_seconds);
        self.surface
            .write_at(self.title_region, 0, self.config.clock_column(width), &clock);

        for counter in Counter::ALL {
            self.surface.write_at(
                self.stats_region,
                counter.row(),
                self.config.value_column,
                &counter_field(snapshot.get(counter)),
            );
        }

        self.flush();
        self.frames += 1;
        tracing::trace!(frame = self.frames, elapsed_ms = snapshot.elapsed_ms, "redraw");
    }

    fn pause(&mut self) {
        self.state = ControlState::Paused;
        tracing::info!(frames = self.frames, "paused");
        if self.config.show_pause_indicator {
            let column = self.config.indicator_column(self.layout.terminal_size.0);
            self.surface
                .set_style(self.title_region, self.config.indicator_style);
            self.surface
                .write_at(self.title_region, 0, column, &self.config.pause_indicator);
            self.surface
                .set_style(self.title_region, self.config.title_style);
            self.flush();
        }
    }

    fn leave_pause(&mut self, key: Key) -> ControlSignal {
        if self.config.is_quit(&key) {
            tracing::info!(frames = self.frames, "quit requested while paused");
            return ControlSignal::Exit;
        }
        self.state = ControlState::Running;
        tracing::info!(frames = self.frames, "resumed");
        if self.config.show_pause_indicator {
            let column = self.config.indicator_column(self.layout.terminal_size.0);
            let blank = " ".repeat(usize::from(self.config.indicator_width()));
            self.surface.write_at(self.title_region, 0, column, &blank);
            self.flush();
        }
        ControlSignal::Continue
    }

    fn flush(&mut self) {
        if let Err(e) = self.surface.flush() {
            tracing::warn!(error = %e, "flush failed, frame dropped");
        }
    }
}

/// Best-effort cleanup of a half-built dashboard.
fn abandon<S: Surface>(surface: &mut S, regions: &[RegionId], error: SurfaceError) -> InitError {
    for region in regions {
        surface.destroy_region(*region);
    }
    surface.release();
    tracing::error!(error = %error, "dashboard init failed");
    InitError::from(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Style;
    use crate::layout::Rect;
    use crate::surface::{Align, DrawOp, MemorySurface};
    use std::cell::RefCell;
    use std::rc::Rc;

    // Screen rows of the stats band: band starts at row 1.
    const USER_HEADER_ROW: u16 = 2;
    const OS_HEADER_ROW: u16 = 6;
    const STREAMS_ROW: u16 = 3;
    const DUPLICATES_ROW: u16 = 4;
    const LIMIT_ROW: u16 = 5;
    const FILES_ROW: u16 = 7;
    const VALUE_COLUMN: u16 = 64;
    const CLOCK_COLUMN: u16 = 70;

    fn dashboard() -> Dashboard<MemorySurface> {
        Dashboard::init(MemorySurface::new(80, 24), DashboardConfig::default()).unwrap()
    }

    /// Shares a `MemorySurface` so it can be inspected after `init` gives
    /// up, and refuses regions beyond `limit`.
    #[derive(Debug)]
    struct CappedSurface {
        inner: Rc<RefCell<MemorySurface>>,
        limit: usize,
        created: usize,
    }

    impl CappedSurface {
        fn new(inner: &Rc<RefCell<MemorySurface>>, limit: usize) -> Self {
            Self {
                inner: Rc::clone(inner),
                limit,
                created: 0,
            }
        }
    }

    impl Surface for CappedSurface {
        fn size(&self) -> (u16, u16) {
            self.inner.borrow().size()
        }

        fn create_region(&mut self, rect: Rect, style: Style) -> Result<RegionId, SurfaceError> {
            if self.created == self.limit {
                let (width, height) = self.size();
                return Err(SurfaceError::RegionOutOfBounds { rect, width, height });
            }
            self.created += 1;
            self.inner.borrow_mut().create_region(rect, style)
        }

        fn set_style(&mut self, region: RegionId, style: Style) {
            self.inner.borrow_mut().set_style(region, style);
        }

        fn write_at(&mut self, region: RegionId, row: u16, col: u16, text: &str) -> u16 {
            self.inner.borrow_mut().write_at(region, row, col, text)
        }

        fn write_aligned(&mut self, region: RegionId, row: u16, align: Align, text: &str) -> u16 {
            self.inner.borrow_mut().write_aligned(region, row, align, text)
        }

        fn draw_border(&mut self, region: RegionId) {
            self.inner.borrow_mut().draw_border(region);
        }

        fn poll_key(&mut self) -> Option<Key> {
            self.inner.borrow_mut().poll_key()
        }

        fn wait_key(&mut self) -> Option<Key> {
            self.inner.borrow_mut().wait_key()
        }

        fn flush(&mut self) -> Result<(), SurfaceError> {
            self.inner.borrow_mut().flush()
        }

        fn destroy_region(&mut self, region: RegionId) {
            self.inner.borrow_mut().destroy_region(region);
        }

        fn release(&mut self) {
            self.inner.borrow_mut().release();
        }
    }

    fn screen_rows(dashboard: &Dashboard<MemorySurface>) -> Vec<String> {
        (0..24).map(|y| dashboard.surface().row_text(y)).collect()
    }

    #[test]
    fn test_init_paints_chrome_only() {
        let dashboard = dashboard();
        let surface = dashboard.surface();

        assert_eq!(surface.flush_count(), 1);
        assert_eq!(surface.live_regions(), 2);
        assert_eq!(
            surface.text_at(1, 0, 33),
            " Deterministic Simulation Tester "
        );
        assert_eq!(surface.text_at(1, USER_HEADER_ROW, 10), "User Stats");
        assert_eq!(surface.text_at(1, OS_HEADER_ROW, 8), "OS Stats");
        assert_eq!(surface.text_at(1, STREAMS_ROW, 16), "Streams Created:");
        assert_eq!(surface.text_at(1, DUPLICATES_ROW, 23), "Stream Name Duplicates:");
        assert_eq!(
            surface.text_at(1, LIMIT_ROW, 34),
            "Pending Stream Name Limit Reached:"
        );
        assert_eq!(surface.text_at(1, FILES_ROW, 14), "Files Created:");
        assert_eq!(surface.text_at(0, 1, 1), "┌");
        assert_eq!(surface.text_at(79, 8, 1), "┘");

        // No dynamic content yet.
        assert_eq!(surface.text_at(CLOCK_COLUMN, 0, 10).trim(), "");
        assert_eq!(surface.text_at(VALUE_COLUMN, STREAMS_ROW, 8).trim(), "");
    }

    #[test]
    fn test_headers_are_bold_labels_are_not() {
        let dashboard = dashboard();
        let screen = dashboard.surface().screen();
        let header = screen.get(1, USER_HEADER_ROW).unwrap().style();
        let label = screen.get(1, STREAMS_ROW).unwrap().style();
        assert_eq!(header, DashboardConfig::default().header_style);
        assert_eq!(label, DashboardConfig::default().stats_style);
    }

    #[test]
    fn test_first_tick_on_80x24() {
        let mut dashboard = dashboard();
        let signal = dashboard.tick(&StatsSnapshot::at(3_661_000));

        assert_eq!(signal, ControlSignal::Continue);
        let surface = dashboard.surface();
        assert_eq!(surface.text_at(CLOCK_COLUMN, 0, 10), " 01:01:01 ");
        // Right-aligned: the field ends at the last column.
        assert_eq!(surface.row_text(0).trim_end().len(), 79);
        for row in [STREAMS_ROW, DUPLICATES_ROW, LIMIT_ROW, FILES_ROW] {
            assert_eq!(surface.text_at(VALUE_COLUMN, row, 8), "00000000");
        }
        assert_eq!(surface.flush_count(), 2);
        assert_eq!(dashboard.frames(), 1);
    }

    #[test]
    fn test_counters_land_on_their_rows() {
        let mut dashboard = dashboard();
        let snapshot = StatsSnapshot {
            files_created: 0x1f,
            streams_created: 1,
            stream_name_duplicates: 2,
            stream_name_reservation_limit_exceeded: 3,
            elapsed_ms: 0,
        };
        dashboard.tick(&snapshot);
        let surface = dashboard.surface();
        assert_eq!(surface.text_at(VALUE_COLUMN, STREAMS_ROW, 8), "00000001");
        assert_eq!(surface.text_at(VALUE_COLUMN, DUPLICATES_ROW, 8), "00000002");
        assert_eq!(surface.text_at(VALUE_COLUMN, LIMIT_ROW, 8), "00000003");
        assert_eq!(surface.text_at(VALUE_COLUMN, FILES_ROW, 8), "0000001f");
    }

    #[test]
    fn test_quit_on_second_tick() {
        let mut dashboard = dashboard();
        let snapshot = StatsSnapshot::at(1000);
        assert_eq!(dashboard.tick(&snapshot), ControlSignal::Continue);
        dashboard.surface_mut().push_key(Key::char('q'));
        assert_eq!(dashboard.tick(&snapshot), ControlSignal::Exit);
    }

    #[test]
    fn test_quit_draws_nothing_and_deinit_succeeds() {
        let mut dashboard = dashboard();
        dashboard.tick(&StatsSnapshot::at(1000));
        dashboard.surface_mut().clear_ops();
        let flushes = dashboard.surface().flush_count();
        let before = screen_rows(&dashboard);

        dashboard.surface_mut().push_key(Key::char('q'));
        assert_eq!(dashboard.tick(&StatsSnapshot::at(99_000)), ControlSignal::Exit);

        assert!(dashboard.surface().ops().is_empty());
        assert_eq!(dashboard.surface().flush_count(), flushes);
        assert_eq!(screen_rows(&dashboard), before);

        let (title, stats) = (dashboard.title_region, dashboard.stats_region);
        let surface = dashboard.deinit();
        assert!(surface.is_released());
        assert_eq!(surface.live_regions(), 0);
        assert_eq!(
            surface.ops(),
            &[
                DrawOp::Destroy { region: title },
                DrawOp::Destroy { region: stats },
                DrawOp::Release,
            ]
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut dashboard = dashboard();
        dashboard.surface_mut().push_key(Key::ctrl('c'));
        assert_eq!(dashboard.tick(&StatsSnapshot::default()), ControlSignal::Exit);
    }

    #[test]
    fn test_pause_leaves_counters_unchanged() {
        let mut dashboard = dashboard();
        let mut snapshot = StatsSnapshot::at(60_000);
        snapshot.files_created = 5;
        dashboard.tick(&snapshot);

        snapshot.files_created = 9;
        snapshot.elapsed_ms = 120_000;
        dashboard.surface_mut().push_key(Key::char(' '));
        assert_eq!(dashboard.tick(&snapshot), ControlSignal::Paused);
        assert_eq!(dashboard.state(), ControlState::Paused);

        let surface = dashboard.surface();
        assert_eq!(surface.text_at(VALUE_COLUMN, FILES_ROW, 8), "00000005");
        assert_eq!(surface.text_at(CLOCK_COLUMN, 0, 10), " 00:01:00 ");
        assert_eq!(surface.text_at(62, 0, 8), " PAUSED ");
    }

    #[test]
    fn test_pause_tick_writes_only_the_indicator() {
        let mut dashboard = dashboard();
        dashboard.tick(&StatsSnapshot::at(0));
        dashboard.surface_mut().clear_ops();

        dashboard.surface_mut().push_key(Key::char(' '));
        dashboard.tick(&StatsSnapshot::at(5000));

        let title = dashboard.title_region;
        assert_eq!(
            dashboard.surface().ops(),
            &[DrawOp::Write {
                region: title,
                row: 0,
                col: 62,
                text: " PAUSED ".to_string()
            }]
        );
    }

    #[test]
    fn test_paused_without_key_stays_paused() {
        let mut dashboard = dashboard();
        dashboard.surface_mut().push_key(Key::char(' '));
        dashboard.tick(&StatsSnapshot::at(0));
        dashboard.surface_mut().clear_ops();

        for t in 1..5 {
            assert_eq!(dashboard.tick(&StatsSnapshot::at(t * 1000)), ControlSignal::Paused);
        }
        assert!(dashboard.surface().ops().is_empty());
        assert_eq!(dashboard.frames(), 0);
    }

    #[test]
    fn test_any_key_resumes_and_next_tick_draws() {
        let mut dashboard = dashboard();
        dashboard.surface_mut().push_key(Key::char(' '));
        dashboard.tick(&StatsSnapshot::at(0));

        dashboard.surface_mut().push_key(Key::char('x'));
        assert_eq!(dashboard.tick(&StatsSnapshot::at(61_000)), ControlSignal::Continue);
        assert_eq!(dashboard.state(), ControlState::Running);
        // Resuming erases the indicator but does not draw stats yet.
        assert_eq!(dashboard.surface().text_at(62, 0, 8), "        ");
        assert_eq!(dashboard.frames(), 0);

        assert_eq!(dashboard.tick(&StatsSnapshot::at(61_000)), ControlSignal::Continue);
        assert_eq!(dashboard.surface().text_at(CLOCK_COLUMN, 0, 10), " 00:01:01 ");
        assert_eq!(dashboard.frames(), 1);
    }

    #[test]
    fn test_pause_key_resumes_too() {
        let mut dashboard = dashboard();
        dashboard.surface_mut().push_keys([Key::char(' '), Key::char(' ')]);
        assert_eq!(dashboard.tick(&StatsSnapshot::at(0)), ControlSignal::Paused);
        assert_eq!(dashboard.tick(&StatsSnapshot::at(0)), ControlSignal::Continue);
        assert_eq!(dashboard.state(), ControlState::Running);
    }

    #[test]
    fn test_quit_while_paused_exits() {
        let mut dashboard = dashboard();
        dashboard.surface_mut().push_keys([Key::char(' '), Key::char('q')]);
        assert_eq!(dashboard.tick(&StatsSnapshot::at(0)), ControlSignal::Paused);
        assert_eq!(dashboard.tick(&StatsSnapshot::at(0)), ControlSignal::Exit);
    }

    #[test]
    fn test_unrecognised_key_still_draws() {
        let mut dashboard = dashboard();
        dashboard.surface_mut().push_key(Key::char('z'));
        assert_eq!(dashboard.tick(&StatsSnapshot::at(0)), ControlSignal::Continue);
        assert_eq!(dashboard.frames(), 1);
        assert_eq!(dashboard.surface().text_at(CLOCK_COLUMN, 0, 10), " 00:00:00 ");
    }

    #[test]
    fn test_one_key_per_tick() {
        let mut dashboard = dashboard();
        dashboard.surface_mut().push_keys([Key::char('z'), Key::char('q')]);
        assert_eq!(dashboard.tick(&StatsSnapshot::at(0)), ControlSignal::Continue);
        assert_eq!(dashboard.surface().pending_keys(), 1);
        assert_eq!(dashboard.tick(&StatsSnapshot::at(0)), ControlSignal::Exit);
    }

    #[test]
    fn test_counter_increase_changes_only_its_row() {
        let mut dashboard = dashboard();
        let mut snapshot = StatsSnapshot::at(3_661_000);
        snapshot.files_created = 5;
        dashboard.tick(&snapshot);
        let before = screen_rows(&dashboard);

        snapshot.files_created = 9;
        dashboard.tick(&snapshot);
        let after = screen_rows(&dashboard);

        for (y, (old, new)) in before.iter().zip(&after).enumerate() {
            if y == usize::from(FILES_ROW) {
                assert_ne!(old, new);
            } else {
                assert_eq!(old, new, "row {y} changed");
            }
        }
        let surface = dashboard.surface();
        assert_eq!(surface.text_at(VALUE_COLUMN, FILES_ROW, 8), "00000009");
        assert_eq!(surface.text_at(1, FILES_ROW, 14), "Files Created:");
        assert_eq!(surface.text_at(1, OS_HEADER_ROW, 8), "OS Stats");
    }

    #[test]
    fn test_labels_are_never_rewritten_after_init() {
        let mut dashboard = dashboard();
        dashboard.surface_mut().clear_ops();
        for t in 0..3 {
            dashboard.tick(&StatsSnapshot::at(t * 10));
        }
        for op in dashboard.surface().ops() {
            if let DrawOp::Write { col, .. } = op {
                assert!(*col == VALUE_COLUMN || *col == CLOCK_COLUMN, "write at column {col}");
            }
        }
    }

    #[test]
    fn test_clock_without_seconds() {
        let config = DashboardConfig {
            show_seconds: false,
            ..DashboardConfig::default()
        };
        let mut dashboard = Dashboard::init(MemorySurface::new(80, 24), config).unwrap();
        dashboard.tick(&StatsSnapshot::at(3_661_000));
        assert_eq!(dashboard.surface().text_at(73, 0, 7), " 01:01 ");
        // Still flush with the right edge: nothing stale between it and the
        // title.
        assert_eq!(dashboard.surface().row_text(0).trim_end().len(), 79);
        assert_eq!(dashboard.surface().text_at(70, 0, 3), "   ");
    }

    #[test]
    fn test_pause_without_indicator_writes_nothing() {
        let config = DashboardConfig {
            show_pause_indicator: false,
            ..DashboardConfig::default()
        };
        let mut dashboard = Dashboard::init(MemorySurface::new(80, 24), config).unwrap();
        dashboard.surface_mut().clear_ops();
        let flushes = dashboard.surface().flush_count();

        dashboard.surface_mut().push_keys([Key::char(' '), Key::char('x')]);
        assert_eq!(dashboard.tick(&StatsSnapshot::at(0)), ControlSignal::Paused);
        assert_eq!(dashboard.tick(&StatsSnapshot::at(0)), ControlSignal::Continue);
        assert!(dashboard.surface().ops().is_empty());
        assert_eq!(dashboard.surface().flush_count(), flushes);
    }

    #[test]
    fn test_wait_for_resume() {
        let mut dashboard = dashboard();
        assert_eq!(dashboard.wait_for_resume(), ControlSignal::Continue);

        dashboard.surface_mut().push_key(Key::char(' '));
        dashboard.tick(&StatsSnapshot::at(0));
        // Empty script: nothing to wait on.
        assert_eq!(dashboard.wait_for_resume(), ControlSignal::Paused);

        dashboard.surface_mut().push_key(Key::char('r'));
        assert_eq!(dashboard.wait_for_resume(), ControlSignal::Continue);
        assert_eq!(dashboard.state(), ControlState::Running);
    }

    #[test]
    fn test_init_rejects_small_surface() {
        let err = Dashboard::init(MemorySurface::new(60, 24), DashboardConfig::default())
            .unwrap_err();
        assert!(matches!(err, InitError::SurfaceTooSmall { width: 60, .. }));

        let err = Dashboard::init(MemorySurface::new(80, 5), DashboardConfig::default())
            .unwrap_err();
        assert!(matches!(err, InitError::SurfaceTooSmall { height: 5, .. }));
    }

    #[test]
    fn test_regions_follow_layout() {
        let dashboard = dashboard();
        let surface = dashboard.surface();
        let title = surface.region_rect(dashboard.title_region).unwrap();
        let stats = surface.region_rect(dashboard.stats_region).unwrap();
        assert_eq!(title, dashboard.layout().title);
        assert_eq!(stats, dashboard.layout().stats);
        assert!(!title.intersects(&stats));
    }

    #[test]
    fn test_deinit_destroys_regions_before_release() {
        let mut dashboard = dashboard();
        dashboard.surface_mut().clear_ops();
        let (title, stats) = (dashboard.title_region, dashboard.stats_region);

        let surface = dashboard.deinit();
        assert!(surface.is_released());
        assert_eq!(surface.live_regions(), 0);
        assert_eq!(
            surface.ops(),
            &[
                DrawOp::Destroy { region: title },
                DrawOp::Destroy { region: stats },
                DrawOp::Release,
            ]
        );
    }

    #[test]
    fn test_init_failure_destroys_created_regions_then_releases() {
        let shared = Rc::new(RefCell::new(MemorySurface::new(80, 24)));
        let err = Dashboard::init(CappedSurface::new(&shared, 1), DashboardConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            InitError::Surface(SurfaceError::RegionOutOfBounds { .. })
        ));

        let surface = shared.borrow();
        assert!(surface.is_released());
        assert_eq!(surface.live_regions(), 0);
        assert_eq!(
            surface.ops(),
            &[DrawOp::Destroy { region: RegionId::new(0) }, DrawOp::Release]
        );
        assert_eq!(surface.flush_count(), 0);
    }

    #[test]
    fn test_init_failure_on_first_region_only_releases() {
        let shared = Rc::new(RefCell::new(MemorySurface::new(80, 24)));
        let err = Dashboard::init(CappedSurface::new(&shared, 0), DashboardConfig::default())
            .unwrap_err();
        assert!(matches!(err, InitError::Surface(_)));
        assert_eq!(shared.borrow().ops(), &[DrawOp::Release]);
    }

    #[test]
    fn test_too_small_surface_is_released() {
        let shared = Rc::new(RefCell::new(MemorySurface::new(40, 24)));
        let err = Dashboard::init(CappedSurface::new(&shared, 2), DashboardConfig::default())
            .unwrap_err();
        assert!(matches!(err, InitError::SurfaceTooSmall { .. }));
        assert_eq!(shared.borrow().ops(), &[DrawOp::Release]);
        assert_eq!(shared.borrow().live_regions(), 0);
    }
}
