//! Diffing Engine: Generate minimal ANSI sequences from buffer changes.
//!
//! 1. Compare the visible and pending buffers inside dirty rectangles
//! 2. Emit escape sequences only for changed cells
//! 3. Skip cursor moves between adjacent cells
//! 4. Track color and modifier state to avoid redundant SGR sequences
//!
//! All output is accumulated in a single buffer and flushed with one syscall.

use super::{Buffer, Cell, Modifiers, Rgb};
use crate::layout::Rect;
use std::io::Write;

/// Tracks the terminal's cursor and pen between emitted cells.
#[derive(Debug, Clone)]
pub struct DiffState {
    cursor_x: u16,
    cursor_y: u16,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    modifiers: Option<Modifiers>,
}

impl Default for DiffState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffState {
    /// Create a new diff state with unknown terminal state.
    pub const fn new() -> Self {
        Self {
            cursor_x: u16::MAX,
            cursor_y: u16::MAX,
            fg: None,
            bg: None,
            modifiers: None,
        }
    }

    /// Forget everything (e.g. after a full screen redraw).
    pub const fn reset(&mut self) {
        self.fg = None;
        self.bg = None;
        self.modifiers = None;
        self.cursor_x = u16::MAX;
        self.cursor_y = u16::MAX;
    }
}

/// Result of a diff operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Number of cells that were different.
    pub cells_changed: usize,
    /// Number of cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Number of color change sequences emitted.
    pub color_changes: usize,
}

/// Render the difference between two buffers into an ANSI sequence buffer.
///
/// Only cells inside `dirty_rects` are compared; an empty slice means the
/// whole buffer.
pub fn render_diff(
    current: &Buffer,
    next: &Buffer,
    dirty_rects: &[Rect],
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffResult {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut result = DiffResult::default();
    let full_rect = Rect::from_size(current.width(), current.height());
    let rects: &[Rect] = if dirty_rects.is_empty() {
        std::slice::from_ref(&full_rect)
    } else {
        dirty_rects
    };

    for rect in rects {
        diff_rect(current, next, *rect, output, state, &mut result);
    }

    result
}

fn diff_rect(
    current: &Buffer,
    next: &Buffer,
    rect: Rect,
    output: &mut Vec<u8>,
    state: &mut DiffState,
    result: &mut DiffResult,
) {
    let width = current.width();
    let x_end = rect.right().min(width);
    let y_end = rect.bottom().min(current.height());

    for y in rect.y..y_end {
        for x in rect.x..x_end {
            let idx = (y as usize) * (width as usize) + (x as usize);
            let current_cell = &current.cells()[idx];
            let next_cell = &next.cells()[idx];

            if current_cell == next_cell || next_cell.is_wide_continuation() {
                continue;
            }

            result.cells_changed += 1;

            if state.cursor_y != y || state.cursor_x != x {
                emit_cursor_move(output, x, y);
                state.cursor_x = x;
                state.cursor_y = y;
                result.cursor_moves += 1;
            }

            result.color_changes += emit_style(output, next_cell, state);

            emit_symbol(output, next_cell);
            state.cursor_x += u16::from(next_cell.display_width().max(1));
        }
    }
}

/// Bring the terminal pen in line with `cell`, returning the number of color
/// sequences written.
fn emit_style(output: &mut Vec<u8>, cell: &Cell, state: &mut DiffState) -> usize {
    let style = cell.style();
    let current_mods = state.modifiers.unwrap_or_else(Modifiers::empty);

    // Dropping a modifier needs a full SGR reset, which also drops colors.
    if !current_mods.difference(style.modifiers).is_empty() {
        output.extend_from_slice(b"\x1b[0m");
        state.fg = None;
        state.bg = None;
        state.modifiers = None;
    }

    let mut color_changes = 0;
    if state.fg != Some(style.fg) {
        emit_fg_color(output, style.fg);
        state.fg = Some(style.fg);
        color_changes += 1;
    }
    if state.bg != Some(style.bg) {
        emit_bg_color(output, style.bg);
        state.bg = Some(style.bg);
        color_changes += 1;
    }
    if state.modifiers != Some(style.modifiers) {
        let added = style
            .modifiers
            .difference(state.modifiers.unwrap_or_else(Modifiers::empty));
        emit_modifier_set(output, added);
        state.modifiers = Some(style.modifiers);
    }
    color_changes
}

/// Emit a cursor move sequence (1-indexed, most compact form).
#[inline]
fn emit_cursor_move(output: &mut Vec<u8>, x: u16, y: u16) {
    let row = y + 1;
    let col = x + 1;

    if row == 1 && col == 1 {
        output.extend_from_slice(b"\x1b[H");
    } else if col == 1 {
        let _ = write!(output, "\x1b[{row}H");
    } else {
        let _ = write!(output, "\x1b[{row};{col}H");
    }
}

#[inline]
fn emit_fg_color(output: &mut Vec<u8>, color: Rgb) {
    let _ = write!(output, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
}

#[inline]
fn emit_bg_color(output: &mut Vec<u8>, color: Rgb) {
    let _ = write!(output, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
}

fn emit_modifier_set(output: &mut Vec<u8>, modifiers: Modifiers) {
    if modifiers.contains(Modifiers::BOLD) {
        output.extend_from_slice(b"\x1b[1m");
    }
    if modifiers.contains(Modifiers::DIM) {
        output.extend_from_slice(b"\x1b[2m");
    }
    if modifiers.contains(Modifiers::UNDERLINE) {
        output.extend_from_slice(b"\x1b[4m");
    }
    if modifiers.contains(Modifiers::REVERSED) {
        output.extend_from_slice(b"\x1b[7m");
    }
}

#[inline]
fn emit_symbol(output: &mut Vec<u8>, cell: &Cell) {
    let mut utf8 = [0u8; 4];
    output.extend_from_slice(cell.symbol().encode_utf8(&mut utf8).as_bytes());
}

/// Generate a full redraw sequence (no diffing).
///
/// Used for the first frame, when the terminal contents are unknown.
pub fn render_full(buffer: &Buffer, output: &mut Vec<u8>, state: &mut DiffState) {
    output.extend_from_slice(b"\x1b[?25l");
    state.reset();

    for (y, row) in (0u16..).zip(buffer.rows()) {
        emit_cursor_move(output, 0, y);
        state.cursor_x = 0;
        state.cursor_y = y;
        for cell in row.iter().filter(|cell| !cell.is_wide_continuation()) {
            emit_style(output, cell, state);
            emit_symbol(output, cell);
            state.cursor_x += u16::from(cell.display_width().max(1));
        }
    }

    output.extend_from_slice(b"\x1b[0m");
    state.fg = None;
    state.bg = None;
    state.modifiers = None;
}
