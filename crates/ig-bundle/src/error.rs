use thiserror::Error;

use crate::run::RunState;

/// Errors raised while building an icon bundle.
///
/// Per-size problems (`InvalidGridSpec`, `EncodingFailure`, most `Grid`
/// errors) are collected as [`SizeFailure`](crate::SizeFailure)s and do not
/// abort the run. The rest are fatal for the run that raised them.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The uploaded bytes could not be decoded into pixels.
    #[error("invalid image input: {reason}")]
    InvalidImageInput { reason: String },

    #[error("invalid grid spec: cell size {cell_size} does not evenly divide grid size {grid_size}")]
    InvalidGridSpec { grid_size: usize, cell_size: usize },

    #[error("grid error: {0}")]
    Grid(ig_core::Error),

    #[error("encoding {format} for {size}x{size} failed: {reason}")]
    EncodingFailure {
        size: usize,
        format: &'static str,
        reason: String,
    },

    /// A newer upload superseded this run.
    #[error("run was cancelled by a newer upload")]
    Cancelled,

    #[error("run is in state {actual:?}, expected {expected:?}")]
    InvalidState {
        expected: RunState,
        actual: RunState,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ig_core::Error> for BundleError {
    fn from(err: ig_core::Error) -> Self {
        match err {
            ig_core::Error::InvalidGridSpec {
                grid_size,
                cell_size,
            } => Self::InvalidGridSpec {
                grid_size,
                cell_size,
            },
            other => Self::Grid(other),
        }
    }
}
