use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    OutOfBounds,
    InvalidStride,
    EmptyImage,
    EmptyRegion,
    InvalidGridSpec { grid_size: usize, cell_size: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::InvalidStride => write!(f, "invalid stride"),
            Self::EmptyImage => write!(f, "image has no pixels"),
            Self::EmptyRegion => write!(f, "region has no in-bounds pixels"),
            Self::InvalidGridSpec {
                grid_size,
                cell_size,
            } => write!(
                f,
                "invalid grid spec: cell size {cell_size} does not evenly divide grid size {grid_size}"
            ),
        }
    }
}

impl std::error::Error for Error {}
