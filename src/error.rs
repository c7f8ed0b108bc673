//! Error types for the albumscout library.

use thiserror::Error;

/// Result type alias for albumscout operations
pub type Result<T> = std::result::Result<T, AlbumScoutError>;

/// Errors that can occur while searching the forum
#[derive(Error, Debug)]
pub enum AlbumScoutError {
    /// Query was empty after trimming
    #[error("Query must not be empty")]
    EmptyQuery,

    /// Invalid URL provided or produced while resolving a link
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport failure or non-success status while fetching a page
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// Cookie/session data could not be loaded
    #[error("Session error: {0}")]
    Session(String),
}

impl AlbumScoutError {
    pub(crate) fn fetch(url: &str, err: impl std::fmt::Display) -> Self {
        AlbumScoutError::Fetch {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
