//! Error types.
//!
//! Only acquisition and initialisation can fail. Once the dashboard is
//! running, drawing into its fixed regions has no failure mode; a failed
//! flush is logged and dropped.

use crate::layout::Rect;
use thiserror::Error;

/// Errors raised by a [`Surface`](crate::surface::Surface).
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Another owner already holds the terminal.
    #[error("terminal surface is already acquired by another owner")]
    AlreadyAcquired,

    /// Terminal I/O failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A requested region does not fit on the surface.
    #[error("region {rect:?} does not fit a {width}x{height} surface")]
    RegionOutOfBounds {
        /// Requested rectangle.
        rect: Rect,
        /// Surface width.
        width: u16,
        /// Surface height.
        height: u16,
    },
}

/// Fatal error from [`Dashboard::init`](crate::Dashboard::init).
///
/// The host cannot produce any output after this and should not enter its
/// tick loop.
#[derive(Debug, Error)]
pub enum InitError {
    /// The surface could not be acquired or a region could not be created.
    #[error("failed to set up the terminal surface: {0}")]
    Surface(#[from] SurfaceError),

    /// The fixed layout does not fit the terminal.
    #[error("terminal is {width}x{height}, the dashboard needs at least {min_width}x{min_height}")]
    SurfaceTooSmall {
        /// Actual width.
        width: u16,
        /// Actual height.
        height: u16,
        /// Required width.
        min_width: u16,
        /// Required height.
        min_height: u16,
    },

    /// The configured columns overlap each other.
    #[error("invalid dashboard configuration: {0}")]
    Config(String),
}
