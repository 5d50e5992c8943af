use core::fmt;

use crate::spec::GridRender;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Serializes a render as a standalone SVG document.
///
/// Each cell becomes one `rect`. Positions come from the cell's row-major
/// index, not from its stored row and column.
pub fn to_svg(render: &GridRender) -> String {
    SvgDocument(render).to_string()
}

/// `Display` adapter that streams the SVG markup for a render.
#[derive(Debug, Clone, Copy)]
pub struct SvgDocument<'a>(pub &'a GridRender);

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = self.0.spec();
        let g = spec.grid_size();
        let c = spec.cell_size();

        write!(
            f,
            r#"<svg width="{g}" height="{g}" xmlns="{SVG_NAMESPACE}">"#
        )?;
        for (index, cell) in self.0.cells().iter().enumerate() {
            let (x, y) = spec.cell_origin(index);
            write!(
                f,
                r#"<rect x="{x}" y="{y}" width="{c}" height="{c}" fill="{}"></rect>"#,
                cell.color
            )?;
        }
        f.write_str("</svg>")
    }
}

#[cfg(test)]
mod tests {
    use ig_core::{Image, Rgb};

    use crate::paint::paint;
    use crate::raster::rasterize;
    use crate::spec::{GridRender, GridSpec};
    use crate::svg::to_svg;

    struct Rect {
        x: usize,
        y: usize,
        w: usize,
        h: usize,
        fill: Rgb,
    }

    fn attr<'a>(tag: &'a str, name: &str) -> &'a str {
        let key = format!(r#" {name}=""#);
        let start = tag.find(&key).expect("attribute present") + key.len();
        let len = tag[start..].find('"').expect("closing quote");
        &tag[start..start + len]
    }

    fn parse_fill(fill: &str) -> Rgb {
        let inner = fill
            .strip_prefix("rgb(")
            .and_then(|s| s.strip_suffix(')'))
            .expect("rgb() fill");
        let ch: Vec<u8> = inner
            .split(',')
            .map(|s| s.trim().parse().expect("channel"))
            .collect();
        Rgb::new(ch[0], ch[1], ch[2])
    }

    fn parse_rects(svg: &str) -> Vec<Rect> {
        svg.split("<rect")
            .skip(1)
            .map(|tag| Rect {
                x: attr(tag, "x").parse().expect("x"),
                y: attr(tag, "y").parse().expect("y"),
                w: attr(tag, "width").parse().expect("width"),
                h: attr(tag, "height").parse().expect("height"),
                fill: parse_fill(attr(tag, "fill")),
            })
            .collect()
    }

    #[test]
    fn solid_red_example_document() {
        let src = Image::new_fill(2, 2, [255u8, 0, 0, 255]);
        let spec = GridSpec::new(4, 2).expect("valid spec");
        let svg = to_svg(&rasterize(&src.as_view(), spec).expect("rasterize"));

        assert!(svg.starts_with(
            r#"<svg width="4" height="4" xmlns="http://www.w3.org/2000/svg">"#
        ));
        assert!(svg.ends_with("</svg>"));

        let rects = parse_rects(&svg);
        let origins: Vec<_> = rects.iter().map(|r| (r.x, r.y)).collect();
        assert_eq!(origins, vec![(0, 0), (2, 0), (0, 2), (2, 2)]);
        for r in &rects {
            assert_eq!((r.w, r.h), (2, 2));
            assert_eq!(r.fill, Rgb::new(255, 0, 0));
        }
        assert!(svg.contains(r#"fill="rgb(255, 0, 0)""#));
    }

    #[test]
    fn repainting_svg_reproduces_cell_colors() {
        let data = (0..(9 * 5))
            .map(|i| [(i * 37 % 256) as u8, (i * 11 % 256) as u8, (255 - i) as u8, 255])
            .collect();
        let src = Image::from_vec(9, 5, data).expect("valid image");
        let spec = GridSpec::new(12, 3).expect("valid spec");
        let render = rasterize(&src.as_view(), spec).expect("rasterize");
        let svg = to_svg(&render);

        let mut canvas = Image::new_fill(12, 12, Rgb::BLACK);
        {
            let mut view = canvas.as_view_mut();
            for r in parse_rects(&svg) {
                view.subview_mut(r.x, r.y, r.w, r.h)
                    .expect("rect inside canvas")
                    .fill(r.fill);
            }
        }

        assert_eq!(canvas, paint(&render).expect("paint"));
        for cell in render.cells() {
            let px = canvas.as_view().get(cell.column * 3, cell.row * 3).copied();
            assert_eq!(px, Some(cell.color));
        }
    }

    #[test]
    fn output_is_byte_identical_across_calls() {
        let spec = GridSpec::new(16, 4).expect("valid spec");
        let colors = (0u8..16).map(|v| Rgb::new(v, v * 2, v * 3)).collect();
        let render = GridRender::from_colors(spec, colors).expect("16 cells");
        assert_eq!(to_svg(&render), to_svg(&render.clone()));
        assert_eq!(to_svg(&render).matches("<rect ").count(), 16);
    }
}
