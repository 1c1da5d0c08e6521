//! ARSO client error types.

/// Errors from fetching or scanning ARSO documents.
#[derive(Debug, thiserror::Error)]
pub enum ArsoError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A CSS selector failed to compile
    #[error("selector error: {message}")]
    Selector { message: String },
}
