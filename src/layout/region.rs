//! Region ids and the fixed dashboard layout.

use super::rect::Rect;

/// Handle to a region created on a surface.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RegionId(pub u16);

impl RegionId {
    /// Create a new region ID.
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

/// Pre-computed dashboard layout.
///
/// Computed once from the terminal size at init; there is no resize
/// handling. The title band is row 0, the stats band sits directly beneath
/// it, both span the full width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Row 0, full width.
    pub title: Rect,
    /// `stats_height` rows starting at row 1, full width.
    pub stats: Rect,
    /// Terminal size the layout was computed for.
    pub terminal_size: (u16, u16),
}

impl Layout {
    /// Compute the layout for a `width` x `height` terminal.
    ///
    /// Returns `None` if the two bands do not fit.
    pub fn compute(width: u16, height: u16, stats_height: u16) -> Option<Self> {
        if width == 0 || stats_height == 0 || height < stats_height.saturating_add(1) {
            return None;
        }
        let screen = Rect::from_size(width, height);
        let (title, rest) = screen.split_vertical(1);
        let (stats, _) = rest.split_vertical(stats_height);
        Some(Self {
            title,
            stats,
            terminal_size: (width, height),
        })
    }

    /// All regions in creation order.
    pub const fn regions(&self) -> [Rect; 2] {
        [self.title, self.stats]
    }
}
