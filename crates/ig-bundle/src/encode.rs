//! Raster encodings of painted grids.

use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use ig_core::{Image, Rgb};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::BundleError;

pub fn encode_png(pixels: &Image<Rgb>) -> Result<Vec<u8>, BundleError> {
    let size = pixels.width();
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            &pixels.to_rgb_bytes(),
            pixels.width() as u32,
            pixels.height() as u32,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| BundleError::EncodingFailure {
            size,
            format: "png",
            reason: e.to_string(),
        })?;
    Ok(out)
}

/// Single-entry ICO container. ICO entries are limited to 256px.
pub fn encode_ico(pixels: &Image<Rgb>) -> Result<Vec<u8>, BundleError> {
    let size = pixels.width();
    let failure = |reason: String| BundleError::EncodingFailure {
        size,
        format: "ico",
        reason,
    };

    if pixels.is_empty() || pixels.width() > 256 || pixels.height() > 256 {
        return Err(failure(format!(
            "{}x{} is outside the 1..=256 ICO range",
            pixels.width(),
            pixels.height()
        )));
    }

    let icon = IconImage::from_rgba_data(
        pixels.width() as u32,
        pixels.height() as u32,
        pixels.to_rgba_bytes(),
    );
    let entry = IconDirEntry::encode(&icon).map_err(|e| failure(e.to_string()))?;

    let mut dir = IconDir::new(ResourceType::Icon);
    dir.add_entry(entry);
    let mut out = Vec::new();
    dir.write(&mut out).map_err(|e| failure(e.to_string()))?;
    Ok(out)
}
