//! Error types for the practice feed client.
//!
//! This module defines the centralized error type [`PracticeError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with the
//! `thiserror` crate.
//!
//! The feed loader never lets these escape to the front-end: failures are logged
//! and folded into state changes by the event handler. Only configuration and
//! start-up failures travel up to `main`.

use reqwest::StatusCode;
use thiserror::Error;

/// The main error type for practice feed operations.
#[derive(Debug, Error)]
pub enum PracticeError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status code.
    ///
    /// `body` holds whatever text the server returned, which is usually a JSON
    /// error document. It is logged as-is.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// Status code returned by the backend.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// A payload could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A page arrived with a different number of thumbnails than entries.
    #[error("page has {practices} practices but {thumbnails} thumbnails")]
    MisalignedPage {
        /// Number of entries in the page.
        practices: usize,
        /// Number of thumbnail URLs in the page.
        thumbnails: usize,
    },

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Communication with the background fetch worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

/// A specialized `Result` type for practice feed operations.
pub type Result<T> = std::result::Result<T, PracticeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misaligned_page_message_names_both_lengths() {
        let err = PracticeError::MisalignedPage {
            practices: 10,
            thumbnails: 9,
        };
        assert_eq!(err.to_string(), "page has 10 practices but 9 thumbnails");
    }

    #[test]
    fn unexpected_status_includes_body() {
        let err = PracticeError::UnexpectedStatus {
            status: StatusCode::UNAUTHORIZED,
            body: "{\"message\":\"jwt expired\"}".to_string(),
        };
        assert!(err.to_string().starts_with("unexpected status 401"));
        assert!(err.to_string().contains("jwt expired"));
    }
}
