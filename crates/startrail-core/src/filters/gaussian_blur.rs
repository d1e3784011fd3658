use ndarray::{Array2, ArrayView1, ArrayViewMut1, Axis, Zip};
use rayon::prelude::*;

use crate::consts::{
    BLUR_RADIUS_CUTOFF, BOX_BLUR_PASSES, BOX_BLUR_SIGMA_THRESHOLD, PARALLEL_PIXEL_THRESHOLD,
};
use crate::frame::Frame;

/// Convert a blur radius into a Gaussian sigma.
///
/// The radius is the distance at which the kernel weight drops to
/// `BLUR_RADIUS_CUTOFF` of its peak.
pub fn radius_to_sigma(radius: f32) -> f32 {
    radius / (-2.0 * BLUR_RADIUS_CUTOFF.ln()).sqrt()
}

/// Blur every channel of a frame with a symmetric Gaussian of the given radius.
pub fn gaussian_blur_radius(frame: &Frame, radius: f32) -> Frame {
    gaussian_blur(frame, radius_to_sigma(radius))
}

/// Apply Gaussian blur to each channel of a frame using separable 1D passes.
/// Channels are blurred in parallel.
pub fn gaussian_blur(frame: &Frame, sigma: f32) -> Frame {
    let mut out = frame.clone();
    if !sigma.is_finite() || sigma <= 0.0 {
        return out;
    }
    let blurred: Vec<Array2<f32>> = (0..frame.channels())
        .into_par_iter()
        .map(|c| gaussian_blur_array(&frame.data.index_axis(Axis(2), c).to_owned(), sigma))
        .collect();
    for (c, channel) in blurred.iter().enumerate() {
        out.data.index_axis_mut(Axis(2), c).assign(channel);
    }
    out
}

/// Apply Gaussian blur to a raw array.
///
/// Small sigmas use an exact kernel; large ones use repeated box blurs,
/// which cost the same regardless of radius.
pub fn gaussian_blur_array(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    if sigma > BOX_BLUR_SIGMA_THRESHOLD {
        let radii = box_radii_for_sigma(sigma, BOX_BLUR_PASSES);
        let mut current = data.to_owned();
        for r in radii {
            current = filter_rows(&current, |src, dst| box_blur_line(src, dst, r));
            current = transpose(&filter_rows(&transpose(&current), |src, dst| {
                box_blur_line(src, dst, r)
            }));
        }
        current
    } else {
        let kernel = make_gaussian_kernel(sigma);
        let row_pass = filter_rows(data, |src, dst| convolve_line(src, dst, &kernel));
        transpose(&filter_rows(&transpose(&row_pass), |src, dst| {
            convolve_line(src, dst, &kernel)
        }))
    }
}

fn make_gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil() as usize;
    let size = 2 * radius + 1;
    let mut kernel = vec![0.0f32; size];
    let s2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

/// Box radii whose successive application approximates a Gaussian of `sigma`.
fn box_radii_for_sigma(sigma: f32, passes: usize) -> Vec<usize> {
    let n = passes as f32;
    let ideal = (12.0 * sigma * sigma / n + 1.0).sqrt();
    let mut lower = ideal.floor() as i64;
    if lower % 2 == 0 {
        lower -= 1;
    }
    let lower = lower.max(1);
    let upper = lower.saturating_add(2);
    let lf = lower as f32;
    let m = ((12.0 * sigma * sigma - n * lf * lf - 4.0 * n * lf - 3.0 * n) / (-4.0 * lf - 4.0))
        .round()
        .max(0.0) as usize;

    (0..passes)
        .map(|i| {
            let width = if i < m { lower } else { upper };
            ((width - 1) / 2) as usize
        })
        .collect()
}

fn clamped(src: &[f32], i: isize) -> f32 {
    src[i.clamp(0, src.len() as isize - 1) as usize]
}

fn convolve_line(src: &[f32], dst: &mut [f32], kernel: &[f32]) {
    let radius = (kernel.len() / 2) as isize;
    for (i, out) in dst.iter_mut().enumerate() {
        let mut sum = 0.0f32;
        for (ki, &kv) in kernel.iter().enumerate() {
            sum += clamped(src, i as isize + ki as isize - radius) * kv;
        }
        *out = sum;
    }
}

/// Running-sum box blur with edge clamping.
fn box_blur_line(src: &[f32], dst: &mut [f32], radius: usize) {
    if src.is_empty() {
        return;
    }
    let r = radius as isize;
    let norm = 1.0 / (2.0 * radius as f64 + 1.0);
    let mut acc = clamped_window_sum(src, radius);
    for (i, out) in dst.iter_mut().enumerate() {
        *out = (acc * norm) as f32;
        let i = i as isize;
        acc += clamped(src, i + r + 1) as f64 - clamped(src, i - r) as f64;
    }
}

/// Sum of `clamped(src, k)` for `k` in `-radius..=radius`, in O(len) for any radius.
fn clamped_window_sum(src: &[f32], radius: usize) -> f64 {
    let last = src.len() - 1;
    let head = (radius as f64 + 1.0) * src[0] as f64;
    let inner: f64 = src[1..=radius.min(last)].iter().map(|&v| v as f64).sum();
    let tail = radius.saturating_sub(last) as f64 * src[last] as f64;
    head + inner + tail
}

fn transpose(data: &Array2<f32>) -> Array2<f32> {
    data.t().as_standard_layout().into_owned()
}

/// Apply a 1D filter to every row of an array.
fn filter_rows<F>(data: &Array2<f32>, filter: F) -> Array2<f32>
where
    F: Fn(&[f32], &mut [f32]) + Sync,
{
    let (h, w) = data.dim();
    let src = data.as_standard_layout();
    let mut result = Array2::<f32>::zeros((h, w));

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        Zip::from(src.rows())
            .and(result.rows_mut())
            .par_for_each(|s, d| filter_row(&filter, s, d));
    } else {
        Zip::from(src.rows())
            .and(result.rows_mut())
            .for_each(|s, d| filter_row(&filter, s, d));
    }
    result
}

fn filter_row<F>(filter: &F, src: ArrayView1<'_, f32>, mut dst: ArrayViewMut1<'_, f32>)
where
    F: Fn(&[f32], &mut [f32]),
{
    let line = src.to_vec();
    let mut out = vec![0.0f32; line.len()];
    filter(&line, &mut out);
    dst.assign(&ArrayView1::from(&out));
}
