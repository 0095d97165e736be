//! Error types for the enterprise management client.
//!
//! This module defines the errors a remote call can produce and the error
//! raised when no client can be obtained at all.

use std::fmt;

/// Errors that can occur during a remote enterprise management call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The addressed enterprise does not exist.
    #[error("Enterprise not found: {id}")]
    NotFound {
        /// The enterprise ID that was requested.
        id: String,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// Message extracted from the error body, or the body itself.
        message: String,
        /// The raw response body.
        body: String,
    },

    /// The request never produced a response (connect, TLS, timeout).
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// A success response could not be decoded.
    #[error("Failed to decode response: {message}")]
    Decode {
        /// Description of the decoding failure.
        message: String,
        /// The raw response body.
        body: String,
    },
}

impl ApiError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a new `Http` error.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body: body.into(),
        }
    }

    /// Creates a new `Transport` error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a new `Decode` error.
    #[must_use]
    pub fn decode(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            body: body.into(),
        }
    }

    /// Returns `true` if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the HTTP status code, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Http { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    /// Returns the raw response body, if one was received.
    #[must_use]
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } | Self::Decode { body, .. } => Some(body),
            Self::NotFound { .. } | Self::Transport { .. } => None,
        }
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Http { status, .. } if *status == 401 || *status == 403 => ErrorCategory::Auth,
            Self::Http { status, .. } if (400..500).contains(status) => ErrorCategory::Validation,
            Self::Http { .. } => ErrorCategory::Remote,
            Self::Transport { .. } => ErrorCategory::Infrastructure,
            Self::Decode { .. } => ErrorCategory::Protocol,
        }
    }
}

/// The remote-call capability could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Enterprise management client unavailable: {reason}")]
pub struct ClientUnavailable {
    /// Why no client could be built.
    pub reason: String,
}

impl ClientUnavailable {
    /// Creates a new `ClientUnavailable` error.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Categories of client errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Enterprise not found.
    NotFound,
    /// Rejected credentials or missing permission.
    Auth,
    /// Request rejected by the server (other 4xx).
    Validation,
    /// Server-side failure (5xx and anything unclassified).
    Remote,
    /// Network or connection failure.
    Infrastructure,
    /// Response did not match the expected shape.
    Protocol,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Auth => write!(f, "auth"),
            Self::Validation => write!(f, "validation"),
            Self::Remote => write!(f, "remote"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Protocol => write!(f, "protocol"),
        }
    }
}
