use std::borrow::Cow;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, StartrailError};
use crate::frame::{Frame, FrameDims};

use super::layer::{InsertPosition, Layer};
use super::lighten::lighten_blend;
use super::window::enforce_limit;

/// How the accumulator keeps its contributions. Chosen once per run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccumulatorMode {
    /// Every frame is blended straight into a single raster.
    Flattened,
    /// Every frame is kept as its own layer, bounded by `limit` (0 = unbounded).
    Layered {
        position: InsertPosition,
        limit: usize,
    },
}

/// Ordered layers over a black base.
#[derive(Clone, Debug)]
pub struct LayerStack {
    base: Frame,
    layers: Vec<Layer>,
    position: InsertPosition,
    limit: usize,
}

impl LayerStack {
    pub fn new(base: Frame, position: InsertPosition, limit: usize) -> Self {
        Self {
            base,
            layers: Vec::new(),
            position,
            limit,
        }
    }

    /// Layers front (top) to back (bottom).
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Insert a layer and enforce the trail limit. Returns the retired layer, if any.
    pub fn push(&mut self, layer: Layer) -> Option<Layer> {
        match self.position {
            InsertPosition::Front => self.layers.insert(0, layer),
            InsertPosition::End => self.layers.push(layer),
        }
        enforce_limit(&mut self.layers, self.limit, self.position)
    }

    /// Composite every layer onto the base, bottom to top.
    pub fn render(&self) -> Frame {
        let mut out = self.base.clone();
        for layer in self.layers.iter().rev() {
            lighten_blend(&mut out, &layer.frame, layer.opacity);
        }
        out
    }
}

/// The in-progress composite.
#[derive(Clone, Debug)]
pub enum Accumulator {
    Flattened(Frame),
    Layered(LayerStack),
}

impl Accumulator {
    /// Empty accumulator sized after the first frame.
    pub fn new(mode: AccumulatorMode, dims: FrameDims, bit_depth: u8) -> Self {
        let base = Frame::black(dims, bit_depth);
        match mode {
            AccumulatorMode::Flattened => Self::Flattened(base),
            AccumulatorMode::Layered { position, limit } => {
                Self::Layered(LayerStack::new(base, position, limit))
            }
        }
    }

    pub fn dims(&self) -> FrameDims {
        match self {
            Self::Flattened(frame) => frame.dims(),
            Self::Layered(stack) => stack.base.dims(),
        }
    }

    /// Blend one frame in at `opacity` percent. `index` is the 1-based frame count.
    pub fn add(&mut self, frame: Frame, opacity: f32, index: usize, path: &Path) -> Result<()> {
        if frame.dims() != self.dims() {
            return Err(StartrailError::DimensionMismatch {
                path: path.to_path_buf(),
                expected: self.dims(),
                actual: frame.dims(),
            });
        }
        match self {
            Self::Flattened(base) => lighten_blend(base, &frame, opacity),
            Self::Layered(stack) => {
                let layer = Layer::new(frame, opacity, index);
                debug!(layer = %layer.name(), opacity = layer.opacity, "Adding layer");
                stack.push(layer);
            }
        }
        Ok(())
    }

    /// The visible composite. Borrowed in flattened mode, rendered in layered mode.
    pub fn render(&self) -> Cow<'_, Frame> {
        match self {
            Self::Flattened(frame) => Cow::Borrowed(frame),
            Self::Layered(stack) => Cow::Owned(stack.render()),
        }
    }

    /// Consume the accumulator into its final raster.
    pub fn into_frame(self) -> Frame {
        match self {
            Self::Flattened(frame) => frame,
            Self::Layered(stack) => stack.render(),
        }
    }
}

/// Composite `frame` into `accumulator`, creating it from the frame's
/// dimensions and precision when there is none yet.
pub fn composite(
    accumulator: Option<Accumulator>,
    mode: AccumulatorMode,
    frame: Frame,
    opacity: f32,
    index: usize,
    path: &Path,
) -> Result<Accumulator> {
    let mut acc = accumulator
        .unwrap_or_else(|| Accumulator::new(mode, frame.dims(), frame.original_bit_depth));
    acc.add(frame, opacity, index, path)?;
    Ok(acc)
}
