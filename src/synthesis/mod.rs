//! The texture synthesis pipeline
//!
//! This module contains the transforms that turn a decoded photograph into
//! a seamless tileable texture:
//! - Edge-wrap blending for seam elimination
//! - Optional detail enhancement
//! - Pipeline orchestration and result metadata
//! - A low-fidelity fast profile

/// Edge-wrap seam blending
pub mod blend;
/// Per-pixel local contrast boost
pub mod enhance;
/// Low-fidelity fast synthesis profile
pub mod fallback;
/// Pipeline orchestration, configuration, and result types
pub mod pipeline;

pub use blend::EdgeWrapBlender;
pub use enhance::DetailEnhancer;
pub use fallback::synthesize_fast;
pub use pipeline::{BlendConfig, TextureMetadata, TextureResult, TextureSynthesizer};
