//! Pure formatting of the dynamic fields.
//!
//! Everything here is a function of its inputs; nothing touches a surface.

use std::fmt;

const MS_PER_SECOND: u64 = 1000;
const SECONDS_PER_HOUR: u64 = 3600;
const HOURS_PER_DAY: u64 = 24;

/// Width of a counter field: eight hex digits.
pub const COUNTER_WIDTH: u16 = 8;

/// Simulated wall-clock time, wrapped to a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    /// Hours, `0..=23`.
    pub hours: u8,
    /// Minutes, `0..=59`.
    pub minutes: u8,
    /// Seconds, `0..=59`.
    pub seconds: u8,
}

impl ClockTime {
    /// Split elapsed milliseconds into a clock reading.
    ///
    /// Hours wrap at 24 and do not carry into a day count.
    // All three parts are below 60 by construction.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_elapsed_ms(elapsed_ms: u64) -> Self {
        let seconds_total = elapsed_ms / MS_PER_SECOND;
        let hours = (seconds_total / SECONDS_PER_HOUR) % HOURS_PER_DAY;
        let minutes = (seconds_total % SECONDS_PER_HOUR) / 60;
        let seconds = seconds_total % 60;
        Self {
            hours: hours as u8,
            minutes: minutes as u8,
            seconds: seconds as u8,
        }
    }

    /// Render as `HH:MM:SS` or `HH:MM`.
    pub fn render(&self, show_seconds: bool) -> String {
        if show_seconds {
            self.to_string()
        } else {
            format!("{:02}:{:02}", self.hours, self.minutes)
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// The clock field as written into the title band: the time padded by one
/// space on each side so it overwrites its own previous value cleanly.
pub fn clock_field(elapsed_ms: u64, show_seconds: bool) -> String {
    format!(" {} ", ClockTime::from_elapsed_ms(elapsed_ms).render(show_seconds))
}

/// Width of [`clock_field`] output.
pub const fn clock_width(show_seconds: bool) -> u16 {
    if show_seconds {
        10
    } else {
        7
    }
}

/// A counter value as a fixed-width, zero-padded lowercase hex field.
///
/// Values above `0xffff_ffff` widen the field rather than being truncated.
pub fn counter_field(value: u64) -> String {
    format!("{value:0width$x}", width = COUNTER_WIDTH as usize)
}
