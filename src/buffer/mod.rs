//! Buffer module: the cell grid behind every surface.
//!
//! This module contains:
//! - [`Cell`]: one styled character
//! - [`Buffer`]: a grid of cells representing the terminal screen
//! - [`Style`], [`Rgb`], [`Modifiers`]: pen attributes
//! - [`diff`]: diffing engine for generating minimal ANSI sequences

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod diff;

pub use cell::{Cell, Modifiers, Rgb, Style};
pub use buffer::Buffer;
