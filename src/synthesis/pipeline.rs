//! Pipeline orchestration: resize, blend, enhance, encode
//!
//! One entry point turns a decoded source image plus a per-invocation
//! configuration into encoded texture bytes and descriptive metadata. The
//! pipeline is synchronous CPU work on invocation-local buffers; fetching
//! and decoding happen strictly before it runs.

use std::fmt;

use crate::io::codec;
use crate::io::configuration::{
    DEFAULT_BLEND_WIDTH, DEFAULT_TARGET_SIZE, MAX_TARGET_SIZE, OUTPUT_FORMAT,
};
use crate::io::error::{Result, invalid_configuration};
use crate::raster::RasterBuffer;
use crate::synthesis::blend::EdgeWrapBlender;
use crate::synthesis::enhance::DetailEnhancer;

/// Per-invocation synthesis configuration
///
/// Immutable once constructed; supplied by the caller for every run and
/// never read from global or environment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendConfig {
    /// Canonical square edge length of the output canvas
    pub target_size: usize,
    /// Whether to run the edge-wrap seam blending pass
    pub blend_edges: bool,
    /// Pixel width of the border strips used for seam matching
    pub blend_width: usize,
    /// Whether to run the detail enhancement pass
    pub enhance_details: bool,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            blend_edges: true,
            blend_width: DEFAULT_BLEND_WIDTH,
            enhance_details: false,
        }
    }
}

impl BlendConfig {
    /// Check every parameter against its declared range
    ///
    /// The blend width bound is enforced even when edge blending is
    /// disabled, because the configuration type declares the invariant.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextureError::InvalidConfiguration`] naming the
    /// offending parameter and its limit.
    pub fn validate(&self) -> Result<()> {
        if self.target_size == 0 {
            return Err(invalid_configuration(
                "target_size",
                &self.target_size,
                &"must be at least 1",
            ));
        }
        if self.target_size > MAX_TARGET_SIZE {
            return Err(invalid_configuration(
                "target_size",
                &self.target_size,
                &format!("exceeds the maximum canvas edge ({MAX_TARGET_SIZE})"),
            ));
        }
        if self.blend_width == 0 {
            return Err(invalid_configuration(
                "blend_width",
                &self.blend_width,
                &"must be at least 1",
            ));
        }
        if self.blend_width * 2 > self.target_size {
            return Err(invalid_configuration(
                "blend_width",
                &self.blend_width,
                &format!(
                    "must be at most half the target size ({})",
                    self.target_size
                ),
            ));
        }
        Ok(())
    }
}

/// Structured description of a finished texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureMetadata {
    /// Output width in pixels
    pub width: usize,
    /// Output height in pixels
    pub height: usize,
    /// Source image width in pixels
    pub source_width: usize,
    /// Source image height in pixels
    pub source_height: usize,
    /// Whether the seam blending pass ran
    pub tileable: bool,
    /// Whether the detail enhancement pass ran
    pub enhanced: bool,
    /// Name of the lossless encoding format
    pub format: &'static str,
}

impl fmt::Display for TextureMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Size: {}x{} pixels", self.width, self.height)?;
        writeln!(f, "Format: {} (lossless)", self.format.to_uppercase())?;
        writeln!(f, "Type: diffuse/albedo map")?;
        writeln!(
            f,
            "Tiling: {}",
            if self.tileable { "seamless" } else { "none" }
        )?;
        write!(
            f,
            "Source: {}x{} -> {}x{}",
            self.source_width, self.source_height, self.width, self.height
        )
    }
}

/// Encoded texture bytes plus their metadata
///
/// Ownership transfers to the caller; the synthesizer keeps nothing.
#[derive(Debug, Clone)]
pub struct TextureResult {
    /// Losslessly encoded image bytes
    pub bytes: Vec<u8>,
    /// Description of the produced texture
    pub metadata: TextureMetadata,
}

/// Orchestrates resize, blend, enhance, and encode
#[derive(Debug, Clone, Copy)]
pub struct TextureSynthesizer {
    config: BlendConfig,
}

impl TextureSynthesizer {
    /// Create a synthesizer after validating the configuration
    ///
    /// Validation happens here, before any canvas is allocated.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextureError::InvalidConfiguration`] for
    /// out-of-range parameters; see [`BlendConfig::validate`].
    pub fn new(config: BlendConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration this synthesizer runs with
    pub const fn config(&self) -> &BlendConfig {
        &self.config
    }

    /// Run the full pipeline over a decoded source image
    ///
    /// The source is stretched to fill the square canvas; aspect ratio is
    /// deliberately not preserved (the historical behavior of this
    /// pipeline, kept for output compatibility).
    ///
    /// Either returns a complete [`TextureResult`] or fails with a typed
    /// error; a partially processed buffer is never handed out.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextureError::Encode`] if PNG serialization fails,
    /// or any error produced by the blending pass.
    pub fn synthesize(&self, source: &RasterBuffer) -> Result<TextureResult> {
        let size = self.config.target_size;
        let mut canvas = RasterBuffer::allocate(size, size)?;
        canvas.draw_scaled(source, 0, 0, size, size);

        if self.config.blend_edges {
            EdgeWrapBlender::new(self.config.blend_width).apply(&mut canvas)?;
        }
        if self.config.enhance_details {
            DetailEnhancer::default().apply(&mut canvas);
        }

        let bytes = codec::encode_png(&canvas)?;
        Ok(TextureResult {
            bytes,
            metadata: TextureMetadata {
                width: size,
                height: size,
                source_width: source.width(),
                source_height: source.height(),
                tileable: self.config.blend_edges,
                enhanced: self.config.enhance_details,
                format: OUTPUT_FORMAT,
            },
        })
    }
}
