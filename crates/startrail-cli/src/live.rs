use std::path::PathBuf;

use startrail_core::frame::Frame;
use startrail_core::io::image_io::save_image;
use startrail_core::pipeline::LiveView;
use tracing::warn;

/// Live view that rewrites a preview image after every frame, so any
/// auto-reloading image viewer can follow the run.
pub struct PreviewFile {
    path: PathBuf,
}

impl PreviewFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl LiveView for PreviewFile {
    fn refresh(&self, frame_count: usize, composite: &Frame) {
        if let Err(err) = save_image(composite, &self.path) {
            warn!(frame = frame_count, %err, "Failed to refresh live preview");
        }
    }
}
