//! Download-and-decode adapter for remote source images

use crate::fetch::http::HttpClient;
use crate::io::codec;
use crate::io::error::Result;
use crate::raster::RasterBuffer;
use tracing::debug;

/// Resolves a URL into a decoded raster buffer
///
/// Composes an HTTP transport with the image codec. This is the only
/// place the pipeline's input crosses the network; everything downstream
/// is synchronous CPU work.
pub struct ImageFetchAdapter<C: HttpClient> {
    http: C,
}

impl<C: HttpClient> ImageFetchAdapter<C> {
    /// Create an adapter over the given transport
    pub const fn new(http: C) -> Self {
        Self { http }
    }

    /// Download an image and decode it into a raster buffer
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextureError::Http`] for transport failures and
    /// [`crate::TextureError::Decode`] for unreadable image data.
    pub fn fetch_raster(&self, url: &str) -> Result<RasterBuffer> {
        debug!(url, "fetching source image");
        let bytes = self.http.get(url)?;
        debug!(bytes = bytes.len(), "source image downloaded");
        codec::decode(&bytes)
    }
}
