use crate::consts::{FRAME_COUNTER_DIGITS, OPACITY_MAX};
use crate::frame::Frame;

/// One composited contribution in layered mode.
#[derive(Clone, Debug)]
pub struct Layer {
    pub frame: Frame,
    /// Percent, always within [0, 100].
    pub opacity: f32,
    /// 1-based frame count at the time the layer was added.
    pub index: usize,
}

impl Layer {
    pub fn new(frame: Frame, opacity: f32, index: usize) -> Self {
        Self {
            frame,
            opacity: opacity.clamp(0.0, OPACITY_MAX),
            index,
        }
    }

    /// Display name, e.g. `layer 00007`.
    pub fn name(&self) -> String {
        format!("layer {:0width$}", self.index, width = FRAME_COUNTER_DIGITS)
    }
}

/// Where new layers enter the layer sequence.
///
/// Index 0 is the front of the sequence, i.e. the top of the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertPosition {
    Front,
    End,
}
