//! Canvas: region bookkeeping over a cell buffer.

use super::Align;
use crate::buffer::{Buffer, Cell, Style};
use crate::error::SurfaceError;
use crate::layout::{Rect, RegionId};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy)]
struct RegionSlot {
    rect: Rect,
    pen: Style,
}

/// Pending screen contents plus the regions drawn into it.
///
/// Every write is clipped to its region and marks the touched row dirty, so
/// a presenter only has to look at what changed since the last flush.
#[derive(Debug, Clone)]
pub struct Canvas {
    buffer: Buffer,
    regions: Vec<Option<RegionSlot>>,
    dirty: Vec<Rect>,
}

impl Canvas {
    /// Create a blank canvas.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            regions: Vec::new(),
            dirty: Vec::new(),
        }
    }

    /// Size as `(width, height)`.
    pub const fn size(&self) -> (u16, u16) {
        (self.buffer.width(), self.buffer.height())
    }

    /// Pending screen contents.
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Rectangle of a live region.
    pub fn region_rect(&self, region: RegionId) -> Option<Rect> {
        self.slot(region).map(|slot| slot.rect)
    }

    /// Number of regions not yet destroyed.
    pub fn live_regions(&self) -> usize {
        self.regions.iter().flatten().count()
    }

    /// Dirty rectangles accumulated since the last call.
    pub fn take_dirty(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.dirty)
    }

    /// See [`Surface::create_region`](super::Surface::create_region).
    pub fn create_region(&mut self, rect: Rect, style: Style) -> Result<RegionId, SurfaceError> {
        let (width, height) = self.size();
        if rect.is_empty() || !Rect::from_size(width, height).contains_rect(&rect) {
            return Err(SurfaceError::RegionOutOfBounds { rect, width, height });
        }
        let id = u16::try_from(self.regions.len())
            .map(RegionId::new)
            .map_err(|_| SurfaceError::RegionOutOfBounds { rect, width, height })?;

        self.buffer
            .fill_rect(rect.x, rect.y, rect.width, rect.height, Cell::blank(style));
        self.dirty.push(rect);
        self.regions.push(Some(RegionSlot { rect, pen: style }));
        tracing::debug!(?id, ?rect, "region created");
        Ok(id)
    }

    /// See [`Surface::set_style`](super::Surface::set_style).
    pub fn set_style(&mut self, region: RegionId, style: Style) {
        if let Some(slot) = self.slot_mut(region) {
            slot.pen = style;
        }
    }

    /// See [`Surface::write_at`](super::Surface::write_at).
    pub fn write_at(&mut self, region: RegionId, row: u16, col: u16, text: &str) -> u16 {
        let Some(slot) = self.slot(region).copied() else {
            return 0;
        };
        let rect = slot.rect;
        if row >= rect.height || col >= rect.width {
            return 0;
        }
        let used = self
            .buffer
            .put_str(rect.x + col, rect.y + row, text, slot.pen, rect.right());
        if used > 0 {
            self.dirty.push(Rect::new(rect.x + col, rect.y + row, used, 1));
        }
        used
    }

    /// See [`Surface::write_aligned`](super::Surface::write_aligned).
    pub fn write_aligned(&mut self, region: RegionId, row: u16, align: Align, text: &str) -> u16 {
        let Some(rect) = self.region_rect(region) else {
            return 0;
        };
        let col = aligned_column(rect.width, text, align);
        self.write_at(region, row, col, text)
    }

    /// See [`Surface::draw_border`](super::Surface::draw_border).
    pub fn draw_border(&mut self, region: RegionId) {
        let Some(slot) = self.slot(region).copied() else {
            return;
        };
        let Rect { x, y, width, height } = slot.rect;
        if width < 2 || height < 2 {
            return;
        }
        let (right, bottom) = (x + width - 1, y + height - 1);
        let edge = |c: char| Cell::new(c).with_style(slot.pen);

        for col in x + 1..right {
            self.buffer.set(col, y, edge('─'));
            self.buffer.set(col, bottom, edge('─'));
        }
        for row in y + 1..bottom {
            self.buffer.set(x, row, edge('│'));
            self.buffer.set(right, row, edge('│'));
        }
        self.buffer.set(x, y, edge('┌'));
        self.buffer.set(right, y, edge('┐'));
        self.buffer.set(x, bottom, edge('└'));
        self.buffer.set(right, bottom, edge('┘'));
        self.dirty.push(slot.rect);
    }

    /// See [`Surface::destroy_region`](super::Surface::destroy_region).
    pub fn destroy_region(&mut self, region: RegionId) {
        match self.regions.get_mut(usize::from(region.0)) {
            Some(slot @ Some(_)) => {
                *slot = None;
                tracing::debug!(?region, "region destroyed");
            }
            _ => tracing::warn!(?region, "destroy of unknown region"),
        }
    }

    fn slot(&self, region: RegionId) -> Option<&RegionSlot> {
        let slot = self
            .regions
            .get(usize::from(region.0))
            .and_then(Option::as_ref);
        if slot.is_none() {
            tracing::warn!(?region, "draw to unknown region ignored");
        }
        slot
    }

    fn slot_mut(&mut self, region: RegionId) -> Option<&mut RegionSlot> {
        let slot = self
            .regions
            .get_mut(usize::from(region.0))
            .and_then(Option::as_mut);
        if slot.is_none() {
            tracing::warn!(?region, "style change on unknown region ignored");
        }
        slot
    }
}

/// Starting column for `text` aligned within `width` columns.
pub(super) fn aligned_column(width: u16, text: &str, align: Align) -> u16 {
    let text_width = u16::try_from(text.width()).unwrap_or(u16::MAX).min(width);
    match align {
        Align::Left => 0,
        Align::Center => (width - text_width) / 2,
        Align::Right => width - text_width,
    }
}
