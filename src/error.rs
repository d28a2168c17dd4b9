// src/error.rs
use thiserror::Error;

/// Failures that abort a load or a publish.
///
/// Malformed rows and unreadable dates are not errors; the pipeline absorbs
/// them as skipped rows and absent dates.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to fetch {url}: HTTP {status}")]
    Fetch { url: String, status: u16 },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
