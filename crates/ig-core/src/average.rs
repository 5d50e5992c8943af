use crate::Error;
use crate::color::{Rgb, Rgba8};
use crate::image::ImageView;

/// Mean color of the square block with top-left corner `(x, y)` and side
/// `size`.
///
/// Only positions inside the image contribute, so a block hanging over the
/// right or bottom edge averages its in-bounds part. Alpha is ignored and
/// each channel mean is floored.
///
/// Returns [`Error::EmptyRegion`] when no position of the block lies inside
/// the image.
pub fn mean_rgb(img: &ImageView<'_, Rgba8>, x: usize, y: usize, size: usize) -> Result<Rgb, Error> {
    let x_end = x.saturating_add(size).min(img.width());
    let y_end = y.saturating_add(size).min(img.height());
    if x >= x_end || y >= y_end {
        return Err(Error::EmptyRegion);
    }

    let block = img.subview(x, y, x_end - x, y_end - y)?;
    let mut sum = [0u64; 3];
    for yy in 0..block.height() {
        for px in block.row(yy) {
            sum[0] += px[0] as u64;
            sum[1] += px[1] as u64;
            sum[2] += px[2] as u64;
        }
    }

    let count = (block.width() * block.height()) as u64;
    Ok(Rgb::new(
        (sum[0] / count) as u8,
        (sum[1] / count) as u8,
        (sum[2] / count) as u8,
    ))
}
