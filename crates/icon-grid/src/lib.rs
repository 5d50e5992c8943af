//! Umbrella crate for the `icon-grid` workspace.
//!
//! Re-exports the image primitives, the grid rasterizer and the bundle
//! builder so callers need a single dependency.

pub use ig_bundle::*;
pub use ig_core::*;
pub use ig_grid::*;
