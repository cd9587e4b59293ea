//! Error types for texture synthesis and the surrounding I/O shell

use std::fmt;
use std::path::PathBuf;

/// Main error type for all texture operations
///
/// Every failure carries enough context (offending dimension, parameter,
/// stage) for the caller to construct a user-facing message. The core
/// pipeline never retries and never swallows an error.
#[derive(Debug)]
pub enum TextureError {
    /// Buffer allocation requested with a zero-sized dimension
    InvalidDimension {
        /// Requested width in pixels
        width: usize,
        /// Requested height in pixels
        height: usize,
    },

    /// Region access outside the buffer extents
    ///
    /// Indicates a programming error: valid configurations never produce
    /// out-of-range region rectangles.
    OutOfBounds {
        /// Left edge of the requested rectangle
        x: usize,
        /// Top edge of the requested rectangle
        y: usize,
        /// Width of the requested rectangle
        width: usize,
        /// Height of the requested rectangle
        height: usize,
        /// Width of the buffer that rejected the access
        buffer_width: usize,
        /// Height of the buffer that rejected the access
        buffer_height: usize,
    },

    /// Pipeline parameter validation failed
    InvalidConfiguration {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Source image bytes could not be decoded
    Decode {
        /// Description of the decode failure
        reason: String,
    },

    /// Encoding the finished texture failed
    Encode {
        /// Description of the encode failure
        reason: String,
    },

    /// Failed to load a source image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// HTTP transport failure while fetching a remote image
    Http {
        /// URL of the failed request
        url: String,
        /// Description of the transport failure
        reason: String,
    },

    /// Telegram Bot API call failed
    BotApi {
        /// Name of the API method that failed
        method: &'static str,
        /// Description reported by the API or the transport
        reason: String,
    },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { width, height } => {
                write!(f, "Invalid buffer dimensions {width}x{height}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
                buffer_width,
                buffer_height,
            } => {
                write!(
                    f,
                    "Region {width}x{height} at ({x}, {y}) exceeds buffer extents {buffer_width}x{buffer_height}"
                )
            }
            Self::InvalidConfiguration {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Decode { reason } => {
                write!(f, "Failed to decode image data: {reason}")
            }
            Self::Encode { reason } => {
                write!(f, "Failed to encode texture: {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Http { url, reason } => {
                write!(f, "HTTP request to '{url}' failed: {reason}")
            }
            Self::BotApi { method, reason } => {
                write!(f, "Telegram API method '{method}' failed: {reason}")
            }
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for texture operation results
pub type Result<T> = std::result::Result<T, TextureError>;

impl From<image::ImageError> for TextureError {
    fn from(err: image::ImageError) -> Self {
        Self::Decode {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for TextureError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid configuration error
pub fn invalid_configuration(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TextureError {
    TextureError::InvalidConfiguration {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an HTTP transport error
pub fn http_error(url: &impl ToString, reason: &impl ToString) -> TextureError {
    TextureError::Http {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a Telegram API error
pub fn bot_api_error(method: &'static str, reason: &impl ToString) -> TextureError {
    TextureError::BotApi {
        method,
        reason: reason.to_string(),
    }
}
