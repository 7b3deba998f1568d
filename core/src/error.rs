//! Error types for the todo API client.
//!
//! # Design
//! Three families of failure reach the user: validation (caught before any
//! request exists), transport (the host could not complete the round-trip)
//! and server rejection (non-2xx). `NotFound` keeps its own variant because
//! a vanished todo is worth telling apart from a generic rejection. Body
//! (de)serialization failures are grouped under `ErrorKind::Malformed`.

use thiserror::Error;

/// A required form field was left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("description must not be empty")]
    EmptyDescription,
}

/// Errors produced while building requests or interpreting responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The host failed to complete the HTTP round-trip.
    #[error("network error: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("todo not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("server responded with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("could not encode request: {0}")]
    Serialization(String),

    #[error("unexpected response body: {0}")]
    Deserialization(String),
}

/// Coarse classification of an `ApiError`, for the UI to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Transport,
    Rejected,
    Malformed,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::NotFound | ApiError::Rejected { .. } => ErrorKind::Rejected,
            ApiError::Serialization(_) | ApiError::Deserialization(_) => ErrorKind::Malformed,
        }
    }

    /// Transient failures: the same request may succeed if retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Rejected { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_and_5xx_are_retryable() {
        assert!(ApiError::Transport("connection refused".into()).is_retryable());
        assert!(ApiError::Rejected {
            status: 503,
            body: String::new()
        }
        .is_retryable());
        assert!(!ApiError::Rejected {
            status: 400,
            body: String::new()
        }
        .is_retryable());
        assert!(!ApiError::NotFound.is_retryable());
        assert!(!ApiError::from(ValidationError::EmptyTitle).is_retryable());
    }

    #[test]
    fn kinds() {
        assert_eq!(
            ApiError::from(ValidationError::EmptyDescription).kind(),
            ErrorKind::Validation
        );
        assert_eq!(ApiError::NotFound.kind(), ErrorKind::Rejected);
        assert_eq!(
            ApiError::Deserialization("eof".into()).kind(),
            ErrorKind::Malformed
        );
    }

    #[test]
    fn messages_are_user_readable() {
        let err = ApiError::Rejected {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "server responded with HTTP 500: boom");
        assert_eq!(
            ApiError::from(ValidationError::EmptyTitle).to_string(),
            "title must not be empty"
        );
    }
}
