#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use ndarray::Array3;

use startrail_core::error::{Result, StartrailError};
use startrail_core::frame::Frame;
use startrail_core::io::ImageStore;

/// Uniform frame of shape (h, w, c).
pub fn make_frame(h: usize, w: usize, c: usize, fill: f32) -> Frame {
    Frame::new(Array3::from_elem((h, w, c), fill), 8)
}

/// Frame whose samples follow `f(row, col, channel)`.
pub fn make_frame_fn(h: usize, w: usize, c: usize, f: impl Fn(usize, usize, usize) -> f32) -> Frame {
    Frame::new(Array3::from_shape_fn((h, w, c), |(r, col, ch)| f(r, col, ch)), 8)
}

/// Normalized value of an 8-bit sample.
pub fn level(v: u8) -> f32 {
    v as f32 / 255.0
}

/// Write a uniform 8-bit RGB PNG.
pub fn write_uniform_png(dir: &Path, name: &str, w: u32, h: u32, value: u8) -> PathBuf {
    let img = RgbImage::from_pixel(w, h, Rgb([value, value, value]));
    let path = dir.join(name);
    img.save(&path).expect("write png");
    path
}

/// Write an 8-bit RGB PNG whose pixels follow `f(x, y)`.
pub fn write_png_fn(dir: &Path, name: &str, w: u32, h: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> PathBuf {
    let img = RgbImage::from_fn(w, h, |x, y| Rgb(f(x, y)));
    let path = dir.join(name);
    img.save(&path).expect("write png");
    path
}

/// In-memory image store. Loads come from a fixed map; saves are recorded.
#[derive(Default)]
pub struct MemoryStore {
    pub frames: HashMap<PathBuf, Frame>,
    pub saved: RefCell<Vec<(PathBuf, Frame)>>,
    /// Every save fails with a permission error when set.
    pub fail_saves: bool,
}

impl MemoryStore {
    pub fn with_frames(frames: Vec<(&str, Frame)>) -> Self {
        Self {
            frames: frames
                .into_iter()
                .map(|(name, f)| (PathBuf::from(name), f))
                .collect(),
            saved: RefCell::new(Vec::new()),
            fail_saves: false,
        }
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.frames.keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl ImageStore for MemoryStore {
    fn load(&self, path: &Path) -> Result<Frame> {
        self.frames.get(path).cloned().ok_or_else(|| StartrailError::Load {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "not in store",
            )),
        })
    }

    fn save(&self, frame: &Frame, path: &Path) -> Result<()> {
        if self.fail_saves {
            return Err(StartrailError::Save {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only store",
                )),
            });
        }
        self.saved.borrow_mut().push((path.to_path_buf(), frame.clone()));
        Ok(())
    }
}

pub fn assert_all_close(frame: &Frame, expected: f32, tol: f32) {
    for v in frame.data.iter() {
        assert!((v - expected).abs() <= tol, "expected {expected}, got {v}");
    }
}
