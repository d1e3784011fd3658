use std::fmt;

use ndarray::Zip;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::{MAX_SKYGLOW_RADIUS, OPACITY_MAX, PARALLEL_PIXEL_THRESHOLD};
use crate::error::StartrailError;
use crate::frame::Frame;

use super::gaussian_blur::gaussian_blur_radius;

/// How much of the estimated sky-glow gradient to remove.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkyglowStrength {
    #[default]
    None,
    Light,
    Moderate,
    Heavy,
    Full,
}

impl SkyglowStrength {
    /// Opacity (percent) of the subtracted blur layer.
    pub fn opacity(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Light => 25.0,
            Self::Moderate => 50.0,
            Self::Heavy => 75.0,
            Self::Full => 100.0,
        }
    }
}

impl TryFrom<u8> for SkyglowStrength {
    type Error = StartrailError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Light),
            2 => Ok(Self::Moderate),
            3 => Ok(Self::Heavy),
            4 => Ok(Self::Full),
            other => Err(StartrailError::Config(format!(
                "sky-glow strength must be 0-4, got {other}"
            ))),
        }
    }
}

impl fmt::Display for SkyglowStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Light => write!(f, "Light (25%)"),
            Self::Moderate => write!(f, "Moderate (50%)"),
            Self::Heavy => write!(f, "Heavy (75%)"),
            Self::Full => write!(f, "Full (100%)"),
        }
    }
}

/// Flatten the sky-glow gradient of a frame.
///
/// A heavily blurred copy approximates the low-frequency glow while dropping
/// point sources; it is then subtracted at the opacity given by `strength`.
/// `None` hands the frame back untouched, as does a radius rejected by
/// `is_valid_radius`.
pub fn suppress_skyglow(frame: Frame, strength: SkyglowStrength, radius: f32) -> Frame {
    if strength == SkyglowStrength::None {
        return frame;
    }
    if !is_valid_radius(radius) {
        warn!(radius, "Invalid sky-glow radius, skipping suppression");
        return frame;
    }
    debug!(%strength, radius, "Estimating sky-glow");
    let glow = gaussian_blur_radius(&frame, radius);
    subtract_layer(frame, &glow, strength.opacity())
}

/// Finite, positive and no larger than `MAX_SKYGLOW_RADIUS`. NaN is rejected.
pub fn is_valid_radius(radius: f32) -> bool {
    radius.is_finite() && radius > 0.0 && radius <= MAX_SKYGLOW_RADIUS
}

/// Subtract `layer` from `frame` (clamped at zero) and mix the result back in
/// at `opacity` percent. Both frames must share dimensions.
pub fn subtract_layer(mut frame: Frame, layer: &Frame, opacity: f32) -> Frame {
    let alpha = opacity.clamp(0.0, OPACITY_MAX) / OPACITY_MAX;
    let mix = |base: &mut f32, &sub: &f32| {
        let diff = (*base - sub).max(0.0);
        *base += alpha * (diff - *base);
    };

    let parallel = frame.width() * frame.height() >= PARALLEL_PIXEL_THRESHOLD;
    let zip = Zip::from(&mut frame.data).and(&layer.data);
    if parallel {
        zip.par_for_each(mix);
    } else {
        zip.for_each(mix);
    }
    frame
}
