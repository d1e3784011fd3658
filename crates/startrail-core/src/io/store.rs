use std::path::Path;

use crate::error::Result;
use crate::frame::Frame;

use super::image_io::{load_image, save_image};

/// Where frames come from and where composites go.
///
/// The driver only ever holds one loaded frame at a time, so implementors can
/// decode lazily from any backing storage.
pub trait ImageStore {
    /// Decode the raster stored at `path`.
    fn load(&self, path: &Path) -> Result<Frame>;

    /// Encode `frame` to `path`; the format follows the extension.
    fn save(&self, frame: &Frame, path: &Path) -> Result<()>;
}

/// Image store backed by the local filesystem and the `image` codecs.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsImageStore;

impl ImageStore for FsImageStore {
    fn load(&self, path: &Path) -> Result<Frame> {
        load_image(path)
    }

    fn save(&self, frame: &Frame, path: &Path) -> Result<()> {
        save_image(frame, path)
    }
}
