//! Pipeline constants and runtime configuration defaults

// Canonical output settings
/// Default canonical square edge length in pixels
pub const DEFAULT_TARGET_SIZE: usize = 2048;

/// Default width of the border strips used for seam matching
pub const DEFAULT_BLEND_WIDTH: usize = 64;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed canvas edge length
pub const MAX_TARGET_SIZE: usize = 8192;

// Seam softening settings
/// Opacity of the blurred copy composited back over the stamped canvas
pub const SEAM_SOFTEN_WEIGHT: f64 = 0.3;

/// Radius of the box blur used by the softening pass
pub const SEAM_BLUR_RADIUS: usize = 4;

/// Multiplier applied to R, G and B by the detail enhancement pass
pub const DETAIL_GAIN: f64 = 1.1;

// Fast fallback profile
/// Canvas edge length of the low-fidelity profile
pub const FAST_PROFILE_SIZE: usize = 1024;

/// Number of edge blocks stamped per axis by the low-fidelity profile
pub const FAST_GRID_DIVISIONS: usize = 8;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_tileable";

/// Name of the lossless output format reported in metadata
pub const OUTPUT_FORMAT: &str = "png";

// Network settings for the fetch adapter and the delivery shell
/// Timeout for image download requests, in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Long-poll window for Telegram update requests, in seconds
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 50;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Number of reported stages per processed file (decode, synthesize, write)
pub const PIPELINE_STAGES: usize = 3;
