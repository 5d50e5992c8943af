use ig_core::{Error, ImageView, Rgba8, mean_rgb, resize_bilinear};

use crate::spec::{Cell, GridRender, GridSpec};

/// Resamples `src` to `G x G` and averages every `C x C` block.
///
/// The resize is the only scaling step; block averaging then runs on the
/// scaled pixels. The same source and spec always give the same cells.
pub fn rasterize(src: &ImageView<'_, Rgba8>, spec: GridSpec) -> Result<GridRender, Error> {
    let g = spec.grid_size();
    let scaled = resize_bilinear(src, g, g)?;
    rasterize_scaled(&scaled.as_view(), spec)
}

/// Block-averages an image that is already `G x G`.
pub fn rasterize_scaled(
    scaled: &ImageView<'_, Rgba8>,
    spec: GridSpec,
) -> Result<GridRender, Error> {
    let g = spec.grid_size();
    if scaled.width() != g || scaled.height() != g {
        return Err(Error::SizeMismatch {
            expected: g * g,
            actual: scaled.width() * scaled.height(),
        });
    }

    let c = spec.cell_size();
    let columns = spec.columns();
    let mut cells = Vec::with_capacity(spec.cell_count());
    for row in 0..columns {
        for column in 0..columns {
            let color = mean_rgb(scaled, column * c, row * c, c)?;
            cells.push(Cell { row, column, color });
        }
    }

    GridRender::new(spec, cells)
}

#[cfg(test)]
mod tests {
    use ig_core::{Error, Image, Rgb};
    use proptest::prelude::*;

    use crate::raster::{rasterize, rasterize_scaled};
    use crate::spec::GridSpec;

    #[test]
    fn solid_red_2x2_upscaled_to_4x4() {
        let src = Image::new_fill(2, 2, [255u8, 0, 0, 255]);
        let spec = GridSpec::new(4, 2).expect("valid spec");
        let render = rasterize(&src.as_view(), spec).expect("rasterize");

        assert_eq!(render.cells().len(), 4);
        assert!(render.colors().all(|c| c == Rgb::new(255, 0, 0)));
        let positions: Vec<_> = render.cells().iter().map(|c| (c.row, c.column)).collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn block_means_on_known_values() {
        let data = (0u8..16).map(|v| [v * 10, v, 0, 255]).collect();
        let src = Image::from_vec(4, 4, data).expect("valid image");
        let spec = GridSpec::new(4, 2).expect("valid spec");
        let render = rasterize_scaled(&src.as_view(), spec).expect("rasterize");

        // Block (0,0) holds 0, 1, 4, 5 -> mean 2.5, floored to 2.
        let expected = [
            Rgb::new(25, 2, 0),
            Rgb::new(45, 4, 0),
            Rgb::new(105, 10, 0),
            Rgb::new(125, 12, 0),
        ];
        assert_eq!(render.colors().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn scaled_input_must_match_grid_size() {
        let src = Image::new_fill(3, 4, [0u8; 4]);
        let spec = GridSpec::new(4, 2).expect("valid spec");
        assert_eq!(
            rasterize_scaled(&src.as_view(), spec),
            Err(Error::SizeMismatch {
                expected: 16,
                actual: 12
            })
        );
    }

    #[test]
    fn empty_source_is_rejected() {
        let src = Image::<[u8; 4]>::from_vec(0, 3, Vec::new()).expect("empty image");
        let spec = GridSpec::new(4, 1).expect("valid spec");
        assert_eq!(rasterize(&src.as_view(), spec), Err(Error::EmptyImage));
    }

    #[test]
    fn rasterize_is_deterministic() {
        let data = (0..(13 * 7)).map(|i| [(i * 7 % 256) as u8, (i % 251) as u8, 3, 255]).collect();
        let src = Image::from_vec(13, 7, data).expect("valid image");
        let spec = GridSpec::new(32, 4).expect("valid spec");
        let a = rasterize(&src.as_view(), spec).expect("rasterize");
        let b = rasterize(&src.as_view(), spec).expect("rasterize");
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn cell_count_is_columns_squared(
            columns in 1usize..24,
            cell in 1usize..6,
            w in 1usize..20,
            h in 1usize..20,
        ) {
            let g = columns * cell;
            let spec = GridSpec::new(g, cell).expect("dividing spec");
            let src = Image::new_fill(w, h, [9u8, 8, 7, 6]);
            let render = rasterize(&src.as_view(), spec).expect("rasterize");
            prop_assert_eq!(render.cells().len(), columns * columns);
            prop_assert!(render.colors().all(|c| c == Rgb::new(9, 8, 7)));
        }
    }
}
