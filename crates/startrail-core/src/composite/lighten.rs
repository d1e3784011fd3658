use ndarray::Zip;

use crate::consts::{OPACITY_MAX, PARALLEL_PIXEL_THRESHOLD};
use crate::frame::Frame;

/// Lighten-only blend of `src` onto `base` at `opacity` percent.
///
/// Per channel the source is `max(base, src)`, alpha-composited over the
/// base: `base + opacity/100 * (max(base, src) - base)`. At 100 this is a
/// plain per-channel maximum; at 0 the base is left alone.
/// Both frames must share dimensions.
pub fn lighten_blend(base: &mut Frame, src: &Frame, opacity: f32) {
    let alpha = opacity.clamp(0.0, OPACITY_MAX) / OPACITY_MAX;
    if alpha == 0.0 {
        return;
    }
    let blend = |b: &mut f32, &s: &f32| {
        let lighter = b.max(s);
        if alpha >= 1.0 {
            *b = lighter;
        } else {
            *b += alpha * (lighter - *b);
        }
    };

    let parallel = base.width() * base.height() >= PARALLEL_PIXEL_THRESHOLD;
    let zip = Zip::from(&mut base.data).and(&src.data);
    if parallel {
        zip.par_for_each(blend);
    } else {
        zip.for_each(blend);
    }
}
