use crate::frame::Frame;

/// Run stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStage {
    Calibrating,
    Scanning,
    Compositing,
    Finalizing,
}

impl std::fmt::Display for RunStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Calibrating => write!(f, "Averaging dark frames"),
            Self::Scanning => write!(f, "Scanning light frames"),
            Self::Compositing => write!(f, "Compositing"),
            Self::Finalizing => write!(f, "Finalizing"),
        }
    }
}

/// Progress reporting for a run.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter {
    /// A new stage has started. `total_items` is the number of frames in
    /// this stage, if known.
    fn begin_stage(&self, _stage: RunStage, _total_items: Option<usize>) {}

    /// One frame within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_startrail` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Live view of the composite as it builds up.
pub trait LiveView {
    /// Called after each processed frame with the current composite.
    fn refresh(&self, frame_count: usize, composite: &Frame);
}
