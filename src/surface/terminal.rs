//! Terminal surface backed by crossterm.
//!
//! Owns the real terminal: raw mode, alternate screen, hidden cursor. Draws
//! go to a [`Canvas`]; `flush` diffs it against what is already visible and
//! writes only the changed cells, in one syscall.

use super::{Align, Canvas, Lease, OutputBuffer, Surface};
use crate::buffer::diff::{render_diff, render_full, DiffState};
use crate::buffer::{Buffer, Style};
use crate::error::SurfaceError;
use crate::input::Key;
use crate::layout::{Rect, RegionId};
use crossterm::{
    cursor, event, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout};
use std::panic;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

static TERMINAL_HELD: AtomicBool = AtomicBool::new(false);

/// Turns canvas changes into ANSI output.
///
/// Keeps a copy of what the terminal currently shows; the first frame is a
/// full redraw, later frames only touch dirty rectangles.
#[derive(Debug)]
struct FramePresenter {
    visible: Buffer,
    diff_state: DiffState,
    output: OutputBuffer,
    first_frame: bool,
}

impl FramePresenter {
    fn new(width: u16, height: u16) -> Self {
        Self {
            visible: Buffer::new(width, height),
            diff_state: DiffState::new(),
            output: OutputBuffer::with_capacity(65536),
            first_frame: true,
        }
    }

    /// Encode the pending frame and mark it visible.
    fn present(&mut self, canvas: &mut Canvas) -> &[u8] {
        self.output.clear();
        let dirty = canvas.take_dirty();

        if self.first_frame {
            self.output.clear_screen();
            render_full(canvas.buffer(), self.output.bytes_mut(), &mut self.diff_state);
            self.first_frame = false;
        } else if !dirty.is_empty() {
            let result = render_diff(
                &self.visible,
                canvas.buffer(),
                &dirty,
                self.output.bytes_mut(),
                &mut self.diff_state,
            );
            tracing::trace!(cells = result.cells_changed, moves = result.cursor_moves, "frame diff");
        }
        if !self.output.is_empty() {
            self.output.cursor_hide();
        }

        self.visible.copy_from(canvas.buffer());
        self.output.as_bytes()
    }
}

/// The process's terminal, held exclusively.
///
/// At most one `TerminalSurface` exists at a time; a second
/// [`acquire`](Self::acquire) fails with [`SurfaceError::AlreadyAcquired`].
/// The terminal is restored on [`release`](Surface::release) or drop.
#[derive(Debug)]
pub struct TerminalSurface {
    canvas: Canvas,
    presenter: FramePresenter,
    stdout: Stdout,
    lease: Option<Lease>,
}

impl TerminalSurface {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Fails if the terminal is already held or terminal setup fails. On a
    /// setup failure, whatever was switched on is switched back off.
    pub fn acquire() -> Result<Self, SurfaceError> {
        let lease = Lease::acquire(&TERMINAL_HELD).ok_or(SurfaceError::AlreadyAcquired)?;

        let (width, height) = terminal::size()?;
        if width == 0 || height == 0 {
            return Err(SurfaceError::RegionOutOfBounds {
                rect: Rect::from_size(width, height),
                width,
                height,
            });
        }

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, cursor::Hide) {
            let _ = restore_terminal();
            return Err(e.into());
        }
        tracing::debug!(width, height, "terminal acquired");

        Ok(Self {
            canvas: Canvas::new(width, height),
            presenter: FramePresenter::new(width, height),
            stdout,
            lease: Some(lease),
        })
    }
}

impl Surface for TerminalSurface {
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
        self.canvas.write_at(region, row, col, text)
    }

    fn write_aligned(&mut self, region: RegionId, row: u16, align: Align, text: &str) -> u16 {
        self.canvas.write_aligned(region, row, align, text)
    }

    fn draw_border(&mut self, region: RegionId) {
        self.canvas.draw_border(region);
    }

    fn poll_key(&mut self) -> Option<Key> {
        match event::poll(Duration::ZERO) {
            Ok(true) => match event::read() {
                Ok(event) => Key::from_event(event),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read terminal event");
                    None
                }
            },
            Ok(false) => None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to poll terminal events");
                None
            }
        }
    }

    fn wait_key(&mut self) -> Option<Key> {
        loop {
            match event::read() {
                Ok(event) => {
                    if let Some(key) = Key::from_event(event) {
                        return Some(key);
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read terminal event");
                    return None;
                }
            }
        }
    }

    fn flush(&mut self) -> Result<(), SurfaceError> {
        let frame = self.presenter.present(&mut self.canvas);
        if !frame.is_empty() {
            self.presenter.output.flush_to(&mut self.stdout)?;
        }
        Ok(())
    }

    fn destroy_region(&mut self, region: RegionId) {
        self.canvas.destroy_region(region);
    }

    fn release(&mut self) {
        if self.lease.take().is_some() {
            if let Err(e) = restore_terminal() {
                tracing::warn!(error = %e, "failed to restore terminal");
            }
            tracing::debug!("terminal released");
        }
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        self.release();
    }
}

/// Leave the alternate screen, show the cursor, and disable raw mode.
///
/// Safe to call when none of those are active.
pub fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::Show);
    execute!(stdout, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()
}

/// Installs a panic hook that restores the terminal before printing the panic.
///
/// Call this before acquiring the terminal.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
