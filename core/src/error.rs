//! Error types for the student API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers distinguish "the
//! student does not exist" from every other failure. Everything else is a
//! request error: a non-2xx status, a transport failure, or a JSON codec
//! failure.

use thiserror::Error;

/// Errors returned by `StudentClient` parse methods, transports and
/// `StudentService`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("not found: {detail}")]
    NotFound { detail: String },

    /// The server returned a non-2xx status other than 404. `message` is the
    /// `detail` field of the error body when present, the raw body otherwise.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (connect, timeout, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Any failure other than `NotFound`.
    pub fn is_request_error(&self) -> bool {
        !self.is_not_found()
    }

    /// Status code reported by the server, if the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while loading `ClientConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },
}
