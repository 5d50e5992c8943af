//! Pixel-averaged icon grids.
//!
//! A [`GridSpec`] describes a `G x G` pixel square split into `C x C` cells,
//! with `C` dividing `G`. [`rasterize`] resamples a source image to `G x G`
//! once, then averages each cell block into one opaque color.
//!
//! Representational meaning:
//! - A [`GridRender`] is the ordered, row-major list of cell colors.
//! - [`paint`] turns it back into pixels (one solid block per cell).
//! - [`to_svg`] turns it into a standalone SVG with one `rect` per cell.
//!   Painting the SVG at 1:1 gives the same pixels as [`paint`].

mod paint;
mod raster;
mod spec;
mod svg;

pub use paint::paint;
pub use raster::{rasterize, rasterize_scaled};
pub use spec::{Cell, GridRender, GridSpec};
pub use svg::{SVG_NAMESPACE, SvgDocument, to_svg};
