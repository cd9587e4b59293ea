//! Remote image retrieval
//!
//! The seam between the synthesis core and the network: a small HTTP
//! transport abstraction plus an adapter that downloads and decodes a
//! source image in one step.

/// Download-and-decode adapter producing raster buffers
pub mod adapter;
/// HTTP transport abstraction and the reqwest-backed client
pub mod http;

pub use adapter::ImageFetchAdapter;
pub use http::{HttpClient, ReqwestClient};
