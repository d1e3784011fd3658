use std::path::{Path, PathBuf};

use ndarray::Zip;
use tracing::{debug, info};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{Result, StartrailError};
use crate::frame::Frame;
use crate::io::{list_images, ImageStore};

/// Incremental mean over a stream of frames.
///
/// Only the running average is kept in memory: the i-th frame is folded in
/// with weight `1/i`, which matches a plain arithmetic mean of every frame
/// seen so far.
#[derive(Debug, Default)]
pub struct RunningMean {
    average: Option<Frame>,
    count: usize,
}

impl RunningMean {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames folded in so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Fold one frame into the average. `path` is only used for error reporting.
    pub fn add(&mut self, frame: &Frame, path: &Path) -> Result<()> {
        match self.average.as_mut() {
            None => {
                self.average = Some(frame.clone());
            }
            Some(average) => {
                if average.dims() != frame.dims() {
                    return Err(StartrailError::DimensionMismatch {
                        path: path.to_path_buf(),
                        expected: average.dims(),
                        actual: frame.dims(),
                    });
                }
                let w = 1.0 / (self.count + 1) as f32;
                let fold = |avg: &mut f32, &v: &f32| *avg = *avg * (1.0 - w) + v * w;
                let parallel = average.width() * average.height() >= PARALLEL_PIXEL_THRESHOLD;
                let zip = Zip::from(&mut average.data).and(&frame.data);
                if parallel {
                    zip.par_for_each(fold);
                } else {
                    zip.for_each(fold);
                }
            }
        }
        self.count += 1;
        Ok(())
    }

    /// The finished average, or `None` if no frame was added.
    pub fn finish(self) -> Option<CalibrationFrame> {
        self.average.map(CalibrationFrame)
    }
}

/// Averaged dark frame, subtracted from every light frame.
///
/// Read-only once built.
#[derive(Clone, Debug)]
pub struct CalibrationFrame(Frame);

impl CalibrationFrame {
    pub fn frame(&self) -> &Frame {
        &self.0
    }

    pub fn into_frame(self) -> Frame {
        self.0
    }

    /// Subtract the noise floor from a light frame, clamping at zero.
    pub fn subtract_from(&self, mut light: Frame, path: &Path) -> Result<Frame> {
        if light.dims() != self.0.dims() {
            return Err(StartrailError::DimensionMismatch {
                path: path.to_path_buf(),
                expected: self.0.dims(),
                actual: light.dims(),
            });
        }
        let sub = |v: &mut f32, &d: &f32| *v = (*v - d).max(0.0);
        let parallel = light.width() * light.height() >= PARALLEL_PIXEL_THRESHOLD;
        let zip = Zip::from(&mut light.data).and(&self.0.data);
        if parallel {
            zip.par_for_each(sub);
        } else {
            zip.for_each(sub);
        }
        Ok(light)
    }
}

/// Average a sorted sequence of dark frames into one calibration frame.
///
/// Frames are loaded one at a time. An empty sequence yields `None`, meaning
/// no subtraction should happen downstream.
pub fn calibrate(
    paths: &[PathBuf],
    store: &dyn ImageStore,
    mut on_frame: impl FnMut(usize),
) -> Result<Option<CalibrationFrame>> {
    let mut mean = RunningMean::new();
    for path in paths {
        let frame = store.load(path)?;
        mean.add(&frame, path)?;
        debug!(path = %path.display(), count = mean.count(), "Added dark frame");
        on_frame(mean.count());
    }
    if mean.count() > 0 {
        info!(dark_frames = mean.count(), "Calibration frame built");
    }
    Ok(mean.finish())
}

/// Build the calibration frame from every image in `dir`.
pub fn calibrate_dir(dir: &Path, store: &dyn ImageStore) -> Result<Option<CalibrationFrame>> {
    let paths = list_images(dir)?;
    calibrate(&paths, store, |_| {})
}
