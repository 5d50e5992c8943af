//! Foundational primitives for pixel-grid icon generation.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! Source images are stored as [`Rgba8`] samples; averaged output uses the
//! opaque [`Rgb`] type.
//!
//! ## Averaging
//! [`mean_rgb`] averages the R, G and B channels of a square block, counting
//! only positions inside the image. Alpha never contributes.
//!
//! ## Resampling
//! [`resize_bilinear`] uses pixel-center coordinates: integer coordinates
//! refer to pixel centers and the standard floor-based 2x2 neighborhood is
//! interpolated, with edge pixels clamped. Interpolation weights color by
//! alpha, so fully transparent pixels never tint their neighbors and come
//! out as `[0, 0, 0, 0]`.

mod average;
mod color;
mod error;
mod image;
mod sample;

pub use average::mean_rgb;
pub use color::{Rgb, Rgba8};
pub use error::Error;
pub use image::{Image, ImageView, ImageViewMut};
pub use sample::{resize_bilinear, sample_bilinear_premultiplied};
