pub mod config;
pub mod driver;
pub mod envelope;
mod orchestrator;
mod types;

pub use driver::{AccumulationDriver, DriverSettings, DriverState};
pub use envelope::{opacity_for, trail_length, FadeMode};
pub use orchestrator::{build_calibration, run_startrail, run_startrail_reported};
pub use types::{LiveView, ProgressReporter, RunStage};
