use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::calibration::CalibrationFrame;
use crate::composite::{composite, Accumulator, AccumulatorMode};
use crate::error::{Result, StartrailError};
use crate::filters::skyglow::suppress_skyglow;
use crate::frame::Frame;
use crate::io::{snapshot_path, ImageStore};

use super::config::{RunConfig, SkyglowConfig};
use super::envelope::{opacity_for, FadeMode};
use super::types::LiveView;

/// Lifecycle of an accumulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// No frame processed yet.
    Empty,
    /// At least one frame composited.
    Accumulating,
    /// The composite has been handed to the caller.
    Finalized,
    /// A frame failed to load, match, or save; the run is over.
    Failed,
}

/// Per-run settings the driver needs from `RunConfig`.
#[derive(Clone, Debug)]
pub struct DriverSettings {
    pub mode: AccumulatorMode,
    pub fade: FadeMode,
    /// Denominator of the fade envelope.
    pub trail_length: usize,
    pub skyglow: SkyglowConfig,
    /// Where intermediate snapshots go, if enabled.
    pub snapshot_dir: Option<PathBuf>,
    pub live_display: bool,
}

impl DriverSettings {
    pub fn from_config(config: &RunConfig, trail_length: usize) -> Self {
        Self {
            mode: config.accumulator_mode(),
            fade: config.fade,
            trail_length,
            skyglow: config.skyglow.clone(),
            snapshot_dir: config
                .intermediate
                .enabled
                .then(|| config.intermediate.dir.clone())
                .flatten(),
            live_display: config.live_display,
        }
    }
}

/// Feeds light frames, in order, through calibration, sky-glow suppression
/// and compositing.
///
/// Holds the calibration frame, the accumulator and at most one in-flight
/// frame. Both are released on `finish` or on the first error.
pub struct AccumulationDriver<'a> {
    settings: DriverSettings,
    calibration: Option<CalibrationFrame>,
    store: &'a dyn ImageStore,
    view: Option<&'a dyn LiveView>,
    accumulator: Option<Accumulator>,
    frame_count: usize,
    state: DriverState,
}

impl<'a> AccumulationDriver<'a> {
    pub fn new(
        settings: DriverSettings,
        calibration: Option<CalibrationFrame>,
        store: &'a dyn ImageStore,
        view: Option<&'a dyn LiveView>,
    ) -> Self {
        Self {
            settings,
            calibration,
            store,
            view,
            accumulator: None,
            frame_count: 0,
            state: DriverState::Empty,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Frames composited so far.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn accumulator(&self) -> Option<&Accumulator> {
        self.accumulator.as_ref()
    }

    /// The calibration frame, until the run finishes or fails.
    pub fn calibration(&self) -> Option<&CalibrationFrame> {
        self.calibration.as_ref()
    }

    /// Load, calibrate, suppress and composite one light frame.
    ///
    /// Any error moves the driver to `Failed` and drops everything it holds.
    pub fn process(&mut self, path: &Path) -> Result<()> {
        match self.state {
            DriverState::Finalized => return Err(StartrailError::RunClosed("finalized")),
            DriverState::Failed => return Err(StartrailError::RunClosed("failed")),
            DriverState::Empty | DriverState::Accumulating => {}
        }

        let result = self.process_frame(path);
        if result.is_err() {
            self.state = DriverState::Failed;
            self.calibration = None;
            self.accumulator = None;
        }
        result
    }

    fn process_frame(&mut self, path: &Path) -> Result<()> {
        let index = self.frame_count + 1;
        let opacity = opacity_for(index, self.settings.trail_length, self.settings.fade);

        let mut frame = self.store.load(path)?;
        if let Some(acc) = &self.accumulator {
            if acc.dims() != frame.dims() {
                return Err(StartrailError::DimensionMismatch {
                    path: path.to_path_buf(),
                    expected: acc.dims(),
                    actual: frame.dims(),
                });
            }
        }
        if let Some(calibration) = &self.calibration {
            frame = calibration.subtract_from(frame, path)?;
        }
        frame = suppress_skyglow(
            frame,
            self.settings.skyglow.strength,
            self.settings.skyglow.radius,
        );

        let acc = composite(
            self.accumulator.take(),
            self.settings.mode,
            frame,
            opacity,
            index,
            path,
        )?;
        self.frame_count = index;
        self.state = DriverState::Accumulating;
        info!(frame = index, opacity, path = %path.display(), "Composited frame");

        let view = self.view.filter(|_| self.settings.live_display);
        if self.settings.snapshot_dir.is_some() || view.is_some() {
            let current = acc.render();
            if let Some(dir) = &self.settings.snapshot_dir {
                let target = snapshot_path(dir, index);
                debug!(path = %target.display(), "Saving intermediate frame");
                self.store.save(&current, &target)?;
            }
            if let Some(view) = view {
                view.refresh(index, &current);
            }
        }

        self.accumulator = Some(acc);
        Ok(())
    }

    /// End the run, releasing the calibration frame and returning the final
    /// composite. `None` when no frame was ever processed.
    pub fn finish(&mut self) -> Option<Frame> {
        self.calibration = None;
        let frame = self.accumulator.take().map(Accumulator::into_frame);
        if self.state != DriverState::Failed {
            self.state = DriverState::Finalized;
        }
        info!(frames = self.frame_count, "Run finished");
        frame
    }
}
