use ig_core::{Error, Rgb};

/// Square grid of `grid_size` pixels split into `cell_size` blocks.
///
/// Construction enforces `grid_size % cell_size == 0`, so every grid has
/// exactly `columns() * rows()` full cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSpec {
    grid_size: usize,
    cell_size: usize,
}

impl GridSpec {
    pub fn new(grid_size: usize, cell_size: usize) -> Result<Self, Error> {
        if grid_size == 0 || cell_size == 0 || !grid_size.is_multiple_of(cell_size) {
            return Err(Error::InvalidGridSpec {
                grid_size,
                cell_size,
            });
        }
        Ok(Self {
            grid_size,
            cell_size,
        })
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    /// Cells per row. Rows and columns are always equal.
    pub fn columns(&self) -> usize {
        self.grid_size / self.cell_size
    }

    pub fn rows(&self) -> usize {
        self.columns()
    }

    pub fn cell_count(&self) -> usize {
        self.columns() * self.rows()
    }

    /// `(row, column)` of the cell at row-major `index`.
    pub fn cell_position(&self, index: usize) -> (usize, usize) {
        let columns = self.columns();
        (index / columns, index % columns)
    }

    /// Top-left pixel `(x, y)` of the cell at row-major `index`.
    pub fn cell_origin(&self, index: usize) -> (usize, usize) {
        let (row, column) = self.cell_position(index);
        (column * self.cell_size, row * self.cell_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
    pub color: Rgb,
}

/// Row-major cell colors of one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRender {
    spec: GridSpec,
    cells: Vec<Cell>,
}

impl GridRender {
    pub fn new(spec: GridSpec, cells: Vec<Cell>) -> Result<Self, Error> {
        if cells.len() != spec.cell_count() {
            return Err(Error::SizeMismatch {
                expected: spec.cell_count(),
                actual: cells.len(),
            });
        }
        Ok(Self { spec, cells })
    }

    /// Builds a render from row-major colors, deriving each cell's position.
    pub fn from_colors(spec: GridSpec, colors: Vec<Rgb>) -> Result<Self, Error> {
        let cells = colors
            .into_iter()
            .enumerate()
            .map(|(index, color)| {
                let (row, column) = spec.cell_position(index);
                Cell { row, column, color }
            })
            .collect();
        Self::new(spec, cells)
    }

    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&Cell> {
        let columns = self.spec.columns();
        if row >= columns || column >= columns {
            return None;
        }
        self.cells.get(row * columns + column)
    }

    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.cells.iter().map(|c| c.color)
    }
}

#[cfg(test)]
mod tests {
    use ig_core::{Error, Rgb};

    use super::{GridRender, GridSpec};

    #[test]
    fn rejects_non_dividing_cell_size() {
        assert_eq!(
            GridSpec::new(150, 20),
            Err(Error::InvalidGridSpec {
                grid_size: 150,
                cell_size: 20
            })
        );
        assert!(GridSpec::new(0, 1).is_err());
        assert!(GridSpec::new(16, 0).is_err());
        assert!(GridSpec::new(16, 32).is_err());
    }

    #[test]
    fn reference_sizes_are_valid() {
        for (g, c) in [
            (16, 1),
            (32, 2),
            (64, 4),
            (128, 8),
            (150, 10),
            (180, 15),
            (192, 8),
            (256, 16),
            (512, 32),
        ] {
            let spec = GridSpec::new(g, c).expect("reference spec");
            assert_eq!(spec.columns(), g / c);
            assert_eq!(spec.cell_count(), (g / c) * (g / c));
        }
    }

    #[test]
    fn positions_follow_row_major_order() {
        let spec = GridSpec::new(6, 2).expect("valid spec");
        assert_eq!(spec.cell_position(0), (0, 0));
        assert_eq!(spec.cell_position(2), (0, 2));
        assert_eq!(spec.cell_position(3), (1, 0));
        assert_eq!(spec.cell_origin(5), (4, 2));
    }

    #[test]
    fn render_checks_cell_count() {
        let spec = GridSpec::new(4, 2).expect("valid spec");
        assert!(GridRender::from_colors(spec, vec![Rgb::BLACK; 3]).is_err());

        let render = GridRender::from_colors(spec, vec![Rgb::new(1, 2, 3); 4]).expect("4 cells");
        let cell = render.get(1, 0).expect("in range");
        assert_eq!((cell.row, cell.column), (1, 0));
        assert!(render.get(2, 0).is_none());
    }
}
