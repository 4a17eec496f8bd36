//! In-memory surface with scripted input and a write log.

use super::{Align, Canvas, Surface};
use crate::buffer::{Buffer, Style};
use crate::error::SurfaceError;
use crate::input::Key;
use crate::layout::{Rect, RegionId};
use std::collections::VecDeque;

/// A draw call recorded by [`MemorySurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    /// Text written at a resolved region-relative position.
    Write {
        /// Target region.
        region: RegionId,
        /// Row within the region.
        row: u16,
        /// Column within the region (after alignment).
        col: u16,
        /// The text as passed in.
        text: String,
    },
    /// A border drawn around a region.
    Border {
        /// Target region.
        region: RegionId,
    },
    /// A region released.
    Destroy {
        /// Released region.
        region: RegionId,
    },
    /// The whole surface released.
    Release,
}

/// Surface that draws into memory.
///
/// Draws land in a pending canvas; [`flush`](Surface::flush) copies it to the
/// "screen" that inspection helpers read, the way a real terminal only
/// shows what was flushed. Keys come from a script queue.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    canvas: Canvas,
    screen: Buffer,
    keys: VecDeque<Key>,
    ops: Vec<DrawOp>,
    flushes: usize,
    released: bool,
}

impl MemorySurface {
    /// Create a blank surface of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            screen: Buffer::new(width, height),
            keys: VecDeque::new(),
            ops: Vec::new(),
            flushes: 0,
            released: false,
        }
    }

    /// Queue a key press for a later `poll_key` / `wait_key`.
    pub fn push_key(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    /// Queue several key presses.
    pub fn push_keys(&mut self, keys: impl IntoIterator<Item = Key>) {
        self.keys.extend(keys);
    }

    /// Key presses not yet consumed.
    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    /// What the last flush put on screen.
    pub const fn screen(&self) -> &Buffer {
        &self.screen
    }

    /// Drawn but not yet flushed contents.
    pub const fn pending(&self) -> &Buffer {
        self.canvas.buffer()
    }

    /// One screen row as text.
    pub fn row_text(&self, y: u16) -> String {
        self.screen.row_text(y)
    }

    /// `len` columns of screen text starting at (x, y).
    pub fn text_at(&self, x: u16, y: u16, len: u16) -> String {
        self.screen.text_at(x, y, len)
    }

    /// Draw and release calls recorded since creation or the last [`clear_ops`](Self::clear_ops).
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget recorded draw calls.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Number of flushes so far.
    pub const fn flush_count(&self) -> usize {
        self.flushes
    }

    /// Whether [`release`](Surface::release) has been called.
    pub const fn is_released(&self) -> bool {
        self.released
    }

    /// Regions created and not yet destroyed.
    pub fn live_regions(&self) -> usize {
        self.canvas.live_regions()
    }

    /// Rectangle of a live region.
    pub fn region_rect(&self, region: RegionId) -> Option<Rect> {
        self.canvas.region_rect(region)
    }
}

impl Surface for MemorySurface {
    fn size(&self) -> (u16, u16) {
        self.canvas.size()
    }

    fn create_region(&mut self, rect: Rect, style: Style) -> Result<RegionId, SurfaceError> {
        self.canvas.create_region(rect, style)
    }

    fn set_style(&mut self, region: RegionId, style: Style) {
        self.canvas.set_style(region, style);
    }

    fn write_at(&mut self, region: RegionId, row: u16, col: u16, text: &str) -> u16 {
        self.ops.push(DrawOp::Write {
            region,
            row,
            col,
            text: text.to_string(),
        });
        self.canvas.write_at(region, row, col, text)
    }

    fn write_aligned(&mut self, region: RegionId, row: u16, align: Align, text: &str) -> u16 {
        let Some(rect) = self.canvas.region_rect(region) else {
            return 0;
        };
        let col = super::canvas::aligned_column(rect.width, text, align);
        self.write_at(region, row, col, text)
    }

    fn draw_border(&mut self, region: RegionId) {
        self.ops.push(DrawOp::Border { region });
        self.canvas.draw_border(region);
    }

    fn poll_key(&mut self) -> Option<Key> {
        self.keys.pop_front()
    }

    fn wait_key(&mut self) -> Option<Key> {
        // A script cannot grow while we wait, so an empty queue never fills.
        self.keys.pop_front()
    }

    fn flush(&mut self) -> Result<(), SurfaceError> {
        self.canvas.take_dirty();
        self.screen.copy_from(self.canvas.buffer());
        self.flushes += 1;
        Ok(())
    }

    fn destroy_region(&mut self, region: RegionId) {
        self.ops.push(DrawOp::Destroy { region });
        self.canvas.destroy_region(region);
    }

    fn release(&mut self) {
        self.ops.push(DrawOp::Release);
        self.released = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_shows_only_flushed_draws() {
        let mut surface = MemorySurface::new(20, 4);
        let id = surface
            .create_region(Rect::new(0, 0, 20, 1), Style::DEFAULT)
            .unwrap();
        surface.write_at(id, 0, 2, "hello");
        assert_eq!(surface.pending().text_at(2, 0, 5), "hello");
        assert_eq!(surface.text_at(2, 0, 5), "     ");

        surface.flush().unwrap();
        assert_eq!(surface.text_at(2, 0, 5), "hello");
        assert_eq!(surface.flush_count(), 1);
    }

    #[test]
    fn test_ops_record_resolved_columns() {
        let mut surface = MemorySurface::new(20, 4);
        let id = surface
            .create_region(Rect::new(0, 1, 20, 2), Style::DEFAULT)
            .unwrap();
        surface.write_aligned(id, 1, Align::Right, "abc");
        surface.draw_border(id);
        assert_eq!(
            surface.ops(),
            &[
                DrawOp::Write {
                    region: id,
                    row: 1,
                    col: 17,
                    text: "abc".to_string()
                },
                DrawOp::Border { region: id },
            ]
        );
        surface.clear_ops();
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn test_scripted_keys_in_order() {
        let mut surface = MemorySurface::new(10, 2);
        surface.push_keys([Key::char('a'), Key::char('b')]);
        assert_eq!(surface.pending_keys(), 2);
        assert_eq!(surface.poll_key(), Some(Key::char('a')));
        assert_eq!(surface.wait_key(), Some(Key::char('b')));
        assert_eq!(surface.poll_key(), None);
        assert_eq!(surface.wait_key(), None);
    }

    #[test]
    fn test_release_and_destroy() {
        let mut surface = MemorySurface::new(10, 2);
        let id = surface
            .create_region(Rect::new(0, 0, 10, 1), Style::DEFAULT)
            .unwrap();
        assert_eq!(surface.live_regions(), 1);
        surface.destroy_region(id);
        assert_eq!(surface.live_regions(), 0);
        assert!(!surface.is_released());
        surface.release();
        surface.release();
        assert!(surface.is_released());
        assert_eq!(
            surface.ops(),
            &[DrawOp::Destroy { region: id }, DrawOp::Release, DrawOp::Release]
        );
    }
}
