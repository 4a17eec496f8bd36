//! Layout module: static regions computed once at init.
//!
//! There is no tree and no re-flow; the dashboard draws into two fixed
//! bands for its whole lifetime.

mod rect;
mod region;

pub use rect::Rect;
pub use region::{Layout, RegionId};
