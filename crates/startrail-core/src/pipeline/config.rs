use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::composite::AccumulatorMode;
use crate::consts::{DEFAULT_SKYGLOW_RADIUS, MAX_SKYGLOW_RADIUS};
use crate::error::{Result, StartrailError};
use crate::filters::skyglow::{is_valid_radius, SkyglowStrength};

use super::envelope::FadeMode;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunConfig {
    /// Directory holding the light frames.
    pub light_frames: PathBuf,
    /// Final composite path; the format follows the extension.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub dark_frames: DarkFrameConfig,
    #[serde(default)]
    pub intermediate: IntermediateConfig,
    /// Refresh the live view after every frame.
    #[serde(default)]
    pub live_display: bool,
    /// Blend every frame into a single raster instead of keeping layers.
    #[serde(default = "default_merge_layers")]
    pub merge_layers: bool,
    #[serde(default)]
    pub skyglow: SkyglowConfig,
    #[serde(default)]
    pub fade: FadeMode,
    /// Maximum number of frames in a trail, 0 = unbounded. Layered mode only.
    #[serde(default)]
    pub trail_limit: usize,
}

fn default_output() -> PathBuf {
    PathBuf::from("startrail.tiff")
}

fn default_merge_layers() -> bool {
    true
}

impl RunConfig {
    pub fn new(light_frames: impl Into<PathBuf>) -> Self {
        Self {
            light_frames: light_frames.into(),
            output: default_output(),
            dark_frames: DarkFrameConfig::default(),
            intermediate: IntermediateConfig::default(),
            live_display: false,
            merge_layers: default_merge_layers(),
            skyglow: SkyglowConfig::default(),
            fade: FadeMode::default(),
            trail_limit: 0,
        }
    }

    /// Check every path argument before any frame is touched.
    pub fn validate(&self) -> Result<()> {
        if self.light_frames.as_os_str().is_empty() {
            return Err(StartrailError::Config(
                "No light frame path provided.".into(),
            ));
        }
        if !self.light_frames.exists() {
            return Err(StartrailError::Config(format!(
                "Light frame path {} doesn't exist.",
                self.light_frames.display()
            )));
        }
        if !self.light_frames.is_dir() {
            return Err(StartrailError::Config(format!(
                "Light frame path {} is not a directory.",
                self.light_frames.display()
            )));
        }
        if self.dark_frames.enabled {
            require_dir(self.dark_frames.dir.as_deref(), "Dark frame")?;
        }
        if self.intermediate.enabled {
            require_dir(self.intermediate.dir.as_deref(), "Intermediate frame save")?;
        }
        if self.skyglow.strength != SkyglowStrength::None
            && !is_valid_radius(self.skyglow.radius)
        {
            return Err(StartrailError::Config(format!(
                "Sky-glow radius must be within (0, {MAX_SKYGLOW_RADIUS}], got {}",
                self.skyglow.radius
            )));
        }
        Ok(())
    }

    pub fn accumulator_mode(&self) -> AccumulatorMode {
        if self.merge_layers {
            AccumulatorMode::Flattened
        } else {
            AccumulatorMode::Layered {
                position: self.fade.insert_position(),
                limit: self.trail_limit,
            }
        }
    }
}

fn require_dir(dir: Option<&Path>, what: &str) -> Result<()> {
    match dir {
        None => Err(StartrailError::Config(format!(
            "No {} path provided.",
            what.to_lowercase()
        ))),
        Some(d) if !d.exists() => Err(StartrailError::Config(format!(
            "{what} path {} doesn't exist.",
            d.display()
        ))),
        Some(d) if !d.is_dir() => Err(StartrailError::Config(format!(
            "{what} path {} is not a directory.",
            d.display()
        ))),
        Some(_) => Ok(()),
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DarkFrameConfig {
    pub enabled: bool,
    pub dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntermediateConfig {
    /// Save a snapshot after every processed frame.
    pub enabled: bool,
    pub dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyglowConfig {
    pub strength: SkyglowStrength,
    /// Blur radius in pixels used to estimate the glow.
    pub radius: f32,
}

impl Default for SkyglowConfig {
    fn default() -> Self {
        Self {
            strength: SkyglowStrength::None,
            radius: DEFAULT_SKYGLOW_RADIUS,
        }
    }
}
