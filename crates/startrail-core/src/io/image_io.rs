use std::path::Path;

use image::error::{ParameterError, ParameterErrorKind};
use image::{DynamicImage, ImageBuffer, ImageError, ImageFormat, Luma, Rgb};
use ndarray::Array3;

use crate::error::{Result, StartrailError};
use crate::frame::Frame;

/// Load an image file into an RGB Frame.
///
/// Alpha is dropped and grayscale sources are expanded to three channels.
/// The source precision (8, 16 or 32 bits) is kept as the frame's bit depth.
pub fn load_image(path: &Path) -> Result<Frame> {
    let img = image::open(path).map_err(|source| StartrailError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(frame_from_dynamic(&img))
}

/// Convert a decoded image into a normalized RGB Frame.
pub fn frame_from_dynamic(img: &DynamicImage) -> Frame {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let bit_depth = bit_depth_of(img);

    let data = match bit_depth {
        8 => {
            let rgb = img.to_rgb8();
            Array3::from_shape_fn((h, w, 3), |(row, col, ch)| {
                rgb.get_pixel(col as u32, row as u32).0[ch] as f32 / 255.0
            })
        }
        16 => {
            let rgb = img.to_rgb16();
            Array3::from_shape_fn((h, w, 3), |(row, col, ch)| {
                rgb.get_pixel(col as u32, row as u32).0[ch] as f32 / 65535.0
            })
        }
        _ => {
            let rgb = img.to_rgb32f();
            Array3::from_shape_fn((h, w, 3), |(row, col, ch)| {
                rgb.get_pixel(col as u32, row as u32).0[ch].clamp(0.0, 1.0)
            })
        }
    };

    Frame::new(data, bit_depth)
}

fn bit_depth_of(img: &DynamicImage) -> u8 {
    match img {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_) => 8,
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => 32,
        _ => 16,
    }
}

/// Save a frame, choosing format from file extension.
///
/// JPEG and BMP are written 8-bit. PNG and TIFF keep 16 bits when the
/// source had more than 8. Unknown extensions fall back to TIFF.
pub fn save_image(frame: &Frame, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let (format, wide) = match ext.as_deref() {
        Some("jpg" | "jpeg") => (ImageFormat::Jpeg, false),
        Some("bmp") => (ImageFormat::Bmp, false),
        Some("png") => (ImageFormat::Png, frame.original_bit_depth > 8),
        Some("tiff" | "tif") => (ImageFormat::Tiff, frame.original_bit_depth > 8),
        _ => (ImageFormat::Tiff, frame.original_bit_depth > 8),
    };

    to_dynamic(frame, wide)
        .and_then(|img| img.save_with_format(path, format))
        .map_err(|source| StartrailError::Save {
            path: path.to_path_buf(),
            source,
        })
}

/// Quantize a frame into an 8- or 16-bit image buffer.
fn to_dynamic(frame: &Frame, wide: bool) -> std::result::Result<DynamicImage, ImageError> {
    let (w, h) = (frame.width() as u32, frame.height() as u32);
    let unsupported =
        || ImageError::Parameter(ParameterError::from_kind(ParameterErrorKind::DimensionMismatch));

    match (frame.channels(), wide) {
        (1, false) => ImageBuffer::<Luma<u8>, _>::from_raw(w, h, quantize_u8(frame))
            .map(DynamicImage::ImageLuma8)
            .ok_or_else(unsupported),
        (1, true) => ImageBuffer::<Luma<u16>, _>::from_raw(w, h, quantize_u16(frame))
            .map(DynamicImage::ImageLuma16)
            .ok_or_else(unsupported),
        (3, false) => ImageBuffer::<Rgb<u8>, _>::from_raw(w, h, quantize_u8(frame))
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(unsupported),
        (3, true) => ImageBuffer::<Rgb<u16>, _>::from_raw(w, h, quantize_u16(frame))
            .map(DynamicImage::ImageRgb16)
            .ok_or_else(unsupported),
        _ => Err(unsupported()),
    }
}

fn quantize_u8(frame: &Frame) -> Vec<u8> {
    frame
        .data
        .iter()
        .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect()
}

fn quantize_u16(frame: &Frame) -> Vec<u16> {
    frame
        .data
        .iter()
        .map(|v| (v.clamp(0.0, 1.0) * 65535.0).round() as u16)
        .collect()
}
