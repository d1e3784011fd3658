use std::fmt;

use serde::{Deserialize, Serialize};

use crate::composite::InsertPosition;
use crate::consts::OPACITY_MAX;
use crate::error::StartrailError;

/// Whether trails brighten or dim along their length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FadeMode {
    #[default]
    None,
    In,
    Out,
}

impl FadeMode {
    /// Fading in puts new layers at the end of the layer sequence,
    /// everything else at the front.
    pub fn insert_position(self) -> InsertPosition {
        match self {
            Self::In => InsertPosition::End,
            Self::None | Self::Out => InsertPosition::Front,
        }
    }
}

impl TryFrom<u8> for FadeMode {
    type Error = StartrailError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::In),
            2 => Ok(Self::Out),
            other => Err(StartrailError::Config(format!(
                "fade mode must be 0-2, got {other}"
            ))),
        }
    }
}

impl fmt::Display for FadeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::In => write!(f, "In"),
            Self::Out => write!(f, "Out"),
        }
    }
}

/// Number of frames the fade is spread across: the trail limit when it is
/// set and shorter than the run, the frame count otherwise.
pub fn trail_length(limit: usize, total_frames: usize) -> usize {
    if limit > 0 && limit < total_frames {
        limit
    } else {
        total_frames
    }
}

/// Opacity (percent) of the `index`-th frame (1-based), clamped to [0, 100].
pub fn opacity_for(index: usize, trail_length: usize, fade: FadeMode) -> f32 {
    if trail_length == 0 {
        return OPACITY_MAX;
    }
    let len = trail_length as f32;
    let opacity = match fade {
        FadeMode::None => OPACITY_MAX,
        FadeMode::In => index as f32 * OPACITY_MAX / len,
        FadeMode::Out => OPACITY_MAX - index.saturating_sub(1) as f32 * OPACITY_MAX / len,
    };
    opacity.clamp(0.0, OPACITY_MAX)
}
