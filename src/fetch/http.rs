//! HTTP transport abstraction for image downloads

use crate::io::configuration::HTTP_TIMEOUT_SECS;
use crate::io::error::{Result, http_error};
use std::time::Duration;

/// User agent reported on outgoing requests
const USER_AGENT: &str = concat!("seamweave/", env!("CARGO_PKG_VERSION"));

/// Synchronous HTTP operations needed by the fetch adapter
///
/// Abstracting the transport keeps the adapter testable with an in-memory
/// client.
pub trait HttpClient {
    /// Perform an HTTP GET request and return the response body
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextureError::Http`] for transport failures and
    /// non-success status codes.
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// Real HTTP client implementation backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Create a client with the default download timeout
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextureError::Http`] if the underlying client
    /// cannot be constructed.
    pub fn new() -> Result<Self> {
        Self::with_timeout(HTTP_TIMEOUT_SECS)
    }

    /// Create a client with a custom timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextureError::Http`] if the underlying client
    /// cannot be constructed.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                http_error(&"<client setup>", &format!("failed to create HTTP client: {e}"))
            })?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| http_error(&url, &format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_error(&url, &format!("HTTP status {status}")));
        }

        response
            .bytes()
            .map(|body| body.to_vec())
            .map_err(|e| http_error(&url, &format!("failed to read response body: {e}")))
    }
}
