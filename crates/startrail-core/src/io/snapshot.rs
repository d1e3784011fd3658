use std::path::{Path, PathBuf};

use crate::consts::{FRAME_COUNTER_DIGITS, SNAPSHOT_EXTENSION, SNAPSHOT_PREFIX};

/// Path of the intermediate snapshot taken after `frame_count` frames,
/// e.g. `dir/trail00001.jpg`.
pub fn snapshot_path(dir: &Path, frame_count: usize) -> PathBuf {
    dir.join(format!(
        "{SNAPSHOT_PREFIX}{frame_count:0width$}.{SNAPSHOT_EXTENSION}",
        width = FRAME_COUNTER_DIGITS
    ))
}
