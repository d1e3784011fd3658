use std::path::PathBuf;

use thiserror::Error;

use crate::frame::FrameDims;

#[derive(Error, Debug)]
pub enum StartrailError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{} is {actual} but the composite is {expected}", .path.display())]
    DimensionMismatch {
        path: PathBuf,
        expected: FrameDims,
        actual: FrameDims,
    },

    #[error("Failed to save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("No images found to stack in {}", .0.display())]
    EmptyInput(PathBuf),

    #[error("Run already {0}; no more frames can be added")]
    RunClosed(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StartrailError>;
