//! Dashboard configuration.

use crate::buffer::{Rgb, Style};
use crate::dashboard::format::{clock_width, COUNTER_WIDTH};
use crate::error::InitError;
use crate::input::Key;
use crate::stats::{Counter, Section};
use unicode_width::UnicodeWidthStr;

/// Rows the stats band needs: border, two headers, four counters, border.
pub const MIN_STATS_HEIGHT: u16 = 8;

/// Configuration for the [`Dashboard`](crate::Dashboard).
///
/// Positions are fixed for the lifetime of a dashboard; nothing here is
/// re-read after `init`.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Title text drawn once in the title band.
    pub title: String,
    /// Column of the title text.
    pub title_column: u16,
    /// Keys that end the run.
    pub quit_keys: Vec<Key>,
    /// Key that pauses the run.
    pub pause_key: Key,
    /// Height of the stats band, border included.
    pub stats_height: u16,
    /// Column of the counter labels inside the stats band.
    pub label_column: u16,
    /// Column of the counter values inside the stats band.
    pub value_column: u16,
    /// Blank columns between the clock field and the right edge.
    pub clock_right_margin: u16,
    /// Render the clock as `HH:MM:SS` instead of `HH:MM`.
    pub show_seconds: bool,
    /// Draw an indicator in the title band while paused.
    pub show_pause_indicator: bool,
    /// Indicator text.
    pub pause_indicator: String,
    /// Title band style (also its background).
    pub title_style: Style,
    /// Stats band style (also its background).
    pub stats_style: Style,
    /// Section header style.
    pub header_style: Style,
    /// Pause indicator style.
    pub indicator_style: Style,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: " Deterministic Simulation Tester ".to_string(),
            title_column: 1,
            quit_keys: vec![Key::char('q'), Key::ctrl('c')],
            pause_key: Key::char(' '),
            stats_height: MIN_STATS_HEIGHT,
            label_column: 1,
            value_column: 64,
            clock_right_margin: 0,
            show_seconds: true,
            show_pause_indicator: true,
            pause_indicator: " PAUSED ".to_string(),
            title_style: Style::new(Rgb::WHITE, Rgb::BLACK).bold(),
            stats_style: Style::new(Rgb::BLACK, Rgb::WHITE),
            header_style: Style::new(Rgb::BLACK, Rgb::WHITE).bold(),
            indicator_style: Style::new(Rgb::BLACK, Rgb::new(255, 200, 0)).bold(),
        }
    }
}

impl DashboardConfig {
    /// Whether `key` ends the run.
    pub fn is_quit(&self, key: &Key) -> bool {
        self.quit_keys.contains(key)
    }

    /// Whether `key` pauses the run.
    pub fn is_pause(&self, key: &Key) -> bool {
        self.pause_key == *key
    }

    /// Display width of the title text.
    pub fn title_width(&self) -> u16 {
        text_width(&self.title)
    }

    /// Display width of the pause indicator, or 0 when disabled.
    pub fn indicator_width(&self) -> u16 {
        if self.show_pause_indicator {
            text_width(&self.pause_indicator)
        } else {
            0
        }
    }

    /// Column of the clock field on a surface `width` columns wide.
    ///
    /// Follows `show_seconds`, so the field always ends `clock_right_margin`
    /// columns before the edge.
    pub const fn clock_column(&self, width: u16) -> u16 {
        width
            .saturating_sub(self.clock_right_margin)
            .saturating_sub(clock_width(self.show_seconds))
    }

    /// Column of the pause indicator: just left of the clock.
    pub fn indicator_column(&self, width: u16) -> u16 {
        self.clock_column(width).saturating_sub(self.indicator_width())
    }

    /// Smallest surface, as `(width, height)`, the layout fits on.
    pub fn min_size(&self) -> (u16, u16) {
        let title_band = self
            .title_column
            .saturating_add(self.title_width())
            .saturating_add(self.indicator_width())
            .saturating_add(clock_width(self.show_seconds))
            .saturating_add(self.clock_right_margin);
        // Value field plus the right border.
        let stats_band = self.value_column.saturating_add(COUNTER_WIDTH + 1);
        (
            title_band.max(stats_band),
            self.stats_height.saturating_add(1),
        )
    }

    /// Check the configuration against a `width` x `height` surface.
    pub fn validate(&self, width: u16, height: u16) -> Result<(), InitError> {
        if self.stats_height < MIN_STATS_HEIGHT {
            return Err(InitError::Config(format!(
                "stats_height {} is below the minimum of {MIN_STATS_HEIGHT}",
                self.stats_height
            )));
        }
        if self.label_column == 0 {
            return Err(InitError::Config("label_column overlaps the border".to_string()));
        }
        let label_end = self.label_column.saturating_add(longest_label());
        if self.value_column < label_end {
            return Err(InitError::Config(format!(
                "value_column {} overlaps labels ending at column {label_end}",
                self.value_column
            )));
        }

        let (min_width, min_height) = self.min_size();
        if width < min_width || height < min_height {
            return Err(InitError::SurfaceTooSmall {
                width,
                height,
                min_width,
                min_height,
            });
        }
        Ok(())
    }
}

fn text_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

fn longest_label() -> u16 {
    Counter::ALL
        .iter()
        .map(|c| c.label())
        .chain(Section::ALL.iter().map(|s| s.header()))
        .map(text_width)
        .max()
        .unwrap_or(0)
}
