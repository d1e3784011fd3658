use tracing::{info, warn};

use crate::calibration::{calibrate, CalibrationFrame};
use crate::error::{Result, StartrailError};
use crate::frame::Frame;
use crate::io::{list_images, FsImageStore, ImageStore};

use super::config::RunConfig;
use super::driver::{AccumulationDriver, DriverSettings};
use super::envelope::trail_length;
use super::types::{LiveView, NoOpReporter, ProgressReporter, RunStage};

/// Average the configured dark frames, if dark-frame use is enabled.
pub fn build_calibration(
    config: &RunConfig,
    store: &dyn ImageStore,
    reporter: &dyn ProgressReporter,
) -> Result<Option<CalibrationFrame>> {
    let dir = match (config.dark_frames.enabled, config.dark_frames.dir.as_ref()) {
        (true, Some(dir)) => dir,
        (true, None) => {
            return Err(StartrailError::Config(
                "No dark frame path provided.".into(),
            ))
        }
        (false, _) => return Ok(None),
    };

    let paths = list_images(dir)?;
    reporter.begin_stage(RunStage::Calibrating, Some(paths.len()));
    let calibration = calibrate(&paths, store, |n| reporter.advance(n))?;
    reporter.finish_stage();

    if calibration.is_none() {
        warn!(dir = %dir.display(), "No dark frames found, skipping calibration");
    }
    Ok(calibration)
}

/// Run a full star-trail composite with explicit collaborators.
///
/// Validates the config, builds the calibration frame, then composites every
/// light frame in file-name order. The first failing frame aborts the run.
pub fn run_startrail_reported(
    config: &RunConfig,
    store: &dyn ImageStore,
    reporter: &dyn ProgressReporter,
    view: Option<&dyn LiveView>,
) -> Result<Frame> {
    config.validate()?;

    let calibration = build_calibration(config, store, reporter)?;

    reporter.begin_stage(RunStage::Scanning, None);
    let frames = list_images(&config.light_frames)?;
    reporter.finish_stage();
    if frames.is_empty() {
        return Err(StartrailError::EmptyInput(config.light_frames.clone()));
    }

    let trail = trail_length(config.trail_limit, frames.len());
    info!(
        light_frames = frames.len(),
        trail_length = trail,
        fade = %config.fade,
        skyglow = %config.skyglow.strength,
        merge_layers = config.merge_layers,
        "Starting run"
    );

    let settings = DriverSettings::from_config(config, trail);
    let mut driver = AccumulationDriver::new(settings, calibration, store, view);

    reporter.begin_stage(RunStage::Compositing, Some(frames.len()));
    for (i, path) in frames.iter().enumerate() {
        driver.process(path)?;
        reporter.advance(i + 1);
    }
    reporter.finish_stage();

    reporter.begin_stage(RunStage::Finalizing, None);
    let result = driver
        .finish()
        .ok_or_else(|| StartrailError::EmptyInput(config.light_frames.clone()));
    reporter.finish_stage();
    result
}

/// Run a star-trail composite against the filesystem, without progress
/// reporting or live view.
pub fn run_startrail(config: &RunConfig) -> Result<Frame> {
    run_startrail_reported(config, &FsImageStore, &NoOpReporter, None)
}
