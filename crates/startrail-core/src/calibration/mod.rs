pub mod dark;

pub use dark::{calibrate, calibrate_dir, CalibrationFrame, RunningMean};
