use crate::Error;
use crate::color::Rgba8;
use crate::image::{Image, ImageView};

/// Bilinear sample at pixel-center coordinates `(x, y)` with premultiplied
/// alpha.
///
/// Returns `[r, g, b, a]` where the color channels are already scaled by
/// `a / 255`, so transparent neighbors contribute no color. Integer
/// coordinates hit pixel centers. Neighbors outside the image are clamped
/// to the nearest edge pixel. The view must not be empty.
pub fn sample_bilinear_premultiplied(img: &ImageView<'_, Rgba8>, x: f32, y: f32) -> [f32; 4] {
    assert!(!img.is_empty(), "cannot sample an empty image");

    let x0 = x.floor() as isize;
    let y0 = y.floor() as isize;
    let dx = x - x0 as f32;
    let dy = y - y0 as f32;

    let xa = clamp_index(x0, img.width());
    let xb = clamp_index(x0 + 1, img.width());
    let ya = clamp_index(y0, img.height());
    let yb = clamp_index(y0 + 1, img.height());

    // SAFETY: `clamp_index` returns indices in `[0, len)` for non-empty views.
    let (p00, p10, p01, p11) = unsafe {
        (
            premultiply(img.get_unchecked(xa, ya)),
            premultiply(img.get_unchecked(xb, ya)),
            premultiply(img.get_unchecked(xa, yb)),
            premultiply(img.get_unchecked(xb, yb)),
        )
    };

    let mut out = [0.0f32; 4];
    for (c, o) in out.iter_mut().enumerate() {
        let top = p00[c] * (1.0 - dx) + p10[c] * dx;
        let bottom = p01[c] * (1.0 - dx) + p11[c] * dx;
        *o = top * (1.0 - dy) + bottom * dy;
    }
    out
}

/// Resamples `src` to exactly `dst_w x dst_h` with bilinear filtering.
///
/// Destination pixel centers are mapped onto source pixel centers, so a
/// same-size resize is a copy and a solid image stays solid. Interpolation
/// runs on premultiplied alpha and the result is stored straight again,
/// the way a browser canvas composites a drawn image. Fully transparent
/// output pixels are `[0, 0, 0, 0]` whatever color the source stored.
pub fn resize_bilinear(
    src: &ImageView<'_, Rgba8>,
    dst_w: usize,
    dst_h: usize,
) -> Result<Image<Rgba8>, Error> {
    if src.is_empty() {
        return Err(Error::EmptyImage);
    }
    if dst_w == src.width() && dst_h == src.height() {
        let mut out = src.to_image();
        let mut view = out.as_view_mut();
        for y in 0..dst_h {
            for px in view.row_mut(y) {
                if px[3] == 0 {
                    *px = [0; 4];
                }
            }
        }
        return Ok(out);
    }

    let scale_x = src.width() as f32 / dst_w.max(1) as f32;
    let scale_y = src.height() as f32 / dst_h.max(1) as f32;

    let mut data = Vec::with_capacity(dst_w * dst_h);
    for y in 0..dst_h {
        let sy = (y as f32 + 0.5) * scale_y - 0.5;
        for x in 0..dst_w {
            let sx = (x as f32 + 0.5) * scale_x - 0.5;
            data.push(unpremultiply(sample_bilinear_premultiplied(src, sx, sy)));
        }
    }

    Image::from_vec(dst_w, dst_h, data)
}

#[inline]
fn premultiply(px: &Rgba8) -> [f32; 4] {
    let a = px[3] as f32 / 255.0;
    [
        px[0] as f32 * a,
        px[1] as f32 * a,
        px[2] as f32 * a,
        px[3] as f32,
    ]
}

#[inline]
fn unpremultiply(v: [f32; 4]) -> Rgba8 {
    let alpha = v[3].round().clamp(0.0, 255.0);
    if alpha == 0.0 {
        return [0; 4];
    }
    let k = 255.0 / v[3];
    let channel = |c: f32| (c * k).round().clamp(0.0, 255.0) as u8;
    [channel(v[0]), channel(v[1]), channel(v[2]), alpha as u8]
}

#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    if i < 0 { 0 } else { (i as usize).min(len - 1) }
}

#[cfg(test)]
mod tests {
    use crate::Image;
    use crate::sample::{resize_bilinear, sample_bilinear_premultiplied};

    #[test]
    fn bilinear_center_of_2x2() {
        let img = Image::from_vec(
            2,
            2,
            vec![[0u8, 0, 0, 0], [10, 0, 0, 0], [20, 0, 0, 0], [30, 0, 0, 255]],
        )
        .expect("valid image");
        let v = sample_bilinear_premultiplied(&img.as_view(), 0.5, 0.5);
        // Only the opaque pixel carries color.
        assert!((v[0] - 7.5).abs() < 1e-4);
        assert!((v[3] - 63.75).abs() < 1e-4);

        let clamped = sample_bilinear_premultiplied(&img.as_view(), -0.25, -0.25);
        assert!(clamped[0].abs() < 1e-6);
    }

    #[test]
    fn upscale_solid_stays_solid() {
        let src = Image::new_fill(2, 2, [255u8, 0, 0, 255]);
        let dst = resize_bilinear(&src.as_view(), 4, 4).expect("non-empty source");
        assert_eq!(dst.width(), 4);
        assert_eq!(dst.height(), 4);
        assert!(dst.data().iter().all(|&px| px == [255, 0, 0, 255]));
    }

    #[test]
    fn same_size_is_exact_copy() {
        let src = Image::from_vec(3, 1, vec![[1u8, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]])
            .expect("valid image");
        let dst = resize_bilinear(&src.as_view(), 3, 1).expect("non-empty source");
        assert_eq!(dst, src);
    }

    #[test]
    fn downscale_by_two_averages_pairs() {
        let src = Image::from_vec(
            4,
            1,
            vec![
                [0u8, 0, 0, 255],
                [100, 0, 0, 255],
                [200, 0, 0, 255],
                [0, 0, 0, 255],
            ],
        )
        .expect("valid image");
        let dst = resize_bilinear(&src.as_view(), 2, 1).expect("non-empty source");
        assert_eq!(dst.data(), &[[50, 0, 0, 255], [100, 0, 0, 255]]);
    }

    #[test]
    fn transparent_pixels_lose_their_stored_color() {
        let src = Image::from_vec(2, 1, vec![[255u8, 255, 255, 0], [255, 0, 0, 255]])
            .expect("valid image");
        let dst = resize_bilinear(&src.as_view(), 2, 1).expect("non-empty source");
        assert_eq!(dst.data(), &[[0, 0, 0, 0], [255, 0, 0, 255]]);

        let wide = Image::from_vec(
            4,
            1,
            vec![
                [255u8, 0, 0, 255],
                [255, 0, 0, 255],
                [255, 255, 255, 0],
                [255, 255, 255, 0],
            ],
        )
        .expect("valid image");
        let dst = resize_bilinear(&wide.as_view(), 2, 1).expect("non-empty source");
        assert_eq!(dst.data(), &[[255, 0, 0, 255], [0, 0, 0, 0]]);
    }

    #[test]
    fn edge_blend_keeps_opaque_color_and_fades_alpha() {
        let src = Image::from_vec(2, 1, vec![[255u8, 0, 0, 255], [255, 255, 255, 0]])
            .expect("valid image");
        let dst = resize_bilinear(&src.as_view(), 4, 1).expect("non-empty source");
        assert_eq!(
            dst.data(),
            &[
                [255, 0, 0, 255],
                [255, 0, 0, 191],
                [255, 0, 0, 64],
                [0, 0, 0, 0],
            ]
        );
    }

    #[test]
    fn empty_source_is_rejected() {
        let src = Image::<[u8; 4]>::from_vec(0, 0, Vec::new()).expect("empty image");
        assert!(resize_bilinear(&src.as_view(), 4, 4).is_err());
    }
}
