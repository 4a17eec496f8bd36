//! Terminal surface: the drawing capability the dashboard renders through.
//!
//! The dashboard only talks to the [`Surface`] trait. Two implementations
//! ship with the crate:
//!
//! - [`TerminalSurface`]: crossterm backend, raw mode and alternate screen,
//!   double-buffered diff output.
//! - [`MemorySurface`]: in-memory fake with scripted keys and a log of
//!   every write, for tests and headless runs.
//!
//! Both keep their regions on a [`Canvas`].

mod canvas;
mod lease;
mod memory;
mod output;
mod terminal;

pub use canvas::Canvas;
pub use lease::Lease;
pub use memory::{DrawOp, MemorySurface};
pub use output::OutputBuffer;
pub use terminal::{install_panic_hook, restore_terminal, TerminalSurface};

use crate::buffer::Style;
use crate::error::SurfaceError;
use crate::input::Key;
use crate::layout::{Rect, RegionId};

/// Horizontal alignment of a write within a region row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    /// Flush with the left edge.
    #[default]
    Left,
    /// Centered; odd slack goes to the right.
    Center,
    /// Flush with the right edge.
    Right,
}

/// A whole-screen drawing target with rectangular sub-regions.
///
/// Row and column arguments are relative to the region's top-left corner.
/// Writes that run past a region's edge are clipped.
pub trait Surface {
    /// Terminal size as `(width, height)`, captured at acquisition.
    fn size(&self) -> (u16, u16);

    /// Create a region and paint its background with `style`.
    ///
    /// `style` also becomes the region's pen.
    fn create_region(&mut self, rect: Rect, style: Style) -> Result<RegionId, SurfaceError>;

    /// Set the pen used by subsequent writes to `region`.
    fn set_style(&mut self, region: RegionId, style: Style);

    /// Write `text` at (`row`, `col`). Returns the columns written.
    fn write_at(&mut self, region: RegionId, row: u16, col: u16, text: &str) -> u16;

    /// Write `text` on `row` with the given alignment. Returns the columns
    /// written.
    fn write_aligned(&mut self, region: RegionId, row: u16, align: Align, text: &str) -> u16;

    /// Draw a box border along the region's edges.
    fn draw_border(&mut self, region: RegionId);

    /// Take one pending key press without blocking.
    fn poll_key(&mut self) -> Option<Key>;

    /// Block until one key press arrives.
    ///
    /// Returns `None` if input is unavailable (closed terminal, empty
    /// script).
    fn wait_key(&mut self) -> Option<Key>;

    /// Push pending draws to the physical terminal.
    fn flush(&mut self) -> Result<(), SurfaceError>;

    /// Release a region. Its cells stay on screen until overdrawn.
    fn destroy_region(&mut self, region: RegionId);

    /// Release the whole surface. Idempotent.
    fn release(&mut self);
}
