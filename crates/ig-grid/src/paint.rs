use ig_core::{Error, Image, Rgb};

use crate::spec::GridRender;

/// Paints a render into a `G x G` pixel buffer, one solid block per cell.
pub fn paint(render: &GridRender) -> Result<Image<Rgb>, Error> {
    let spec = render.spec();
    let g = spec.grid_size();
    let c = spec.cell_size();

    let mut img = Image::new_fill(g, g, Rgb::BLACK);
    let mut view = img.as_view_mut();
    for cell in render.cells() {
        view.subview_mut(cell.column * c, cell.row * c, c, c)?
            .fill(cell.color);
    }
    Ok(img)
}
