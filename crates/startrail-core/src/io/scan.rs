use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::IMAGE_EXTENSIONS;
use crate::error::Result;

/// True when the file extension (case-insensitive) is a supported image type.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// List the image files of a directory, sorted ascending by file name.
///
/// Subdirectories and files with other extensions are skipped silently.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    let mut skipped = 0usize;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image_file(&path) {
            images.push(path);
        } else {
            skipped += 1;
        }
    }
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(
        dir = %dir.display(),
        images = images.len(),
        skipped,
        "Scanned directory"
    );
    Ok(images)
}
