use std::fmt;

use ndarray::{Array3, Axis};

/// A single raster frame.
/// Samples are f32 in [0.0, 1.0].
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width, channels)
    pub data: Array3<f32>,
    /// Bit depth of the source format (8, 16 or 32)
    pub original_bit_depth: u8,
}

impl Frame {
    pub fn new(data: Array3<f32>, bit_depth: u8) -> Self {
        Self {
            data,
            original_bit_depth: bit_depth,
        }
    }

    /// All-black frame with the given dimensions and precision.
    pub fn black(dims: FrameDims, bit_depth: u8) -> Self {
        Self::new(
            Array3::zeros((dims.height, dims.width, dims.channels)),
            bit_depth,
        )
    }

    pub fn width(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    pub fn height(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn channels(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    pub fn dims(&self) -> FrameDims {
        FrameDims {
            width: self.width(),
            height: self.height(),
            channels: self.channels(),
        }
    }
}

/// Width, height and channel count of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameDims {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

impl fmt::Display for FrameDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.channels)
    }
}
