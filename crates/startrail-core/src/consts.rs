/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// File extensions (lowercase, without the dot) accepted as input frames.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "tiff", "tif", "bmp", "png"];

/// Blur radius, in pixels, used to estimate the sky-glow gradient.
pub const DEFAULT_SKYGLOW_RADIUS: f32 = 500.0;

/// Largest accepted sky-glow blur radius, in pixels.
pub const MAX_SKYGLOW_RADIUS: f32 = 100_000.0;

/// Relative kernel weight at the blur radius. A radius of `r` means the
/// Gaussian has fallen to 1/255 of its peak `r` pixels out.
pub const BLUR_RADIUS_CUTOFF: f32 = 1.0 / 255.0;

/// Above this sigma the Gaussian is approximated with repeated box blurs.
pub const BOX_BLUR_SIGMA_THRESHOLD: f32 = 16.0;

/// Number of box-blur passes used for the Gaussian approximation.
pub const BOX_BLUR_PASSES: usize = 3;

/// Prefix of intermediate snapshot file names.
pub const SNAPSHOT_PREFIX: &str = "trail";

/// Extension of intermediate snapshot file names.
pub const SNAPSHOT_EXTENSION: &str = "jpg";

/// Zero-padded width of frame counters in snapshot and layer names.
pub const FRAME_COUNTER_DIGITS: usize = 5;

/// Full opacity, in percent.
pub const OPACITY_MAX: f32 = 100.0;
