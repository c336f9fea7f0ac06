//! Error types returned by the compositing engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ComposeError>;

/// Every way a compose call can fail.
///
/// Geometric overflow is deliberately absent: text that does not fit is
/// rendered at the floor size instead of being rejected.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("unknown format type: {0}")]
    UnknownFormat(String),

    #[error("the {0} format requires a background image")]
    MissingImage(&'static str),

    #[error("background image unavailable: {0}")]
    BackgroundFetch(#[source] FetchError),

    #[error("invalid image data from {source_name}: {reason}")]
    ImageDecode { source_name: String, reason: String },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid batch variations: {0}")]
    InvalidVariations(String),

    #[error("failed to encode output image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Failures while fetching remote or local image bytes.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no image registered for {0}")]
    NotFound(String),
}
