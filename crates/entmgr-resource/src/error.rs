//! Reconciliation error types.
//!
//! Remote absence on read is not an error here: it is reported as
//! [`ReadOutcome::Absent`](crate::ReadOutcome::Absent).

use std::fmt;

use entmgr_client::{ApiError, ClientUnavailable};

use crate::record::InstanceState;

/// Errors returned by the four reconciliation operations and import.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// No client could be obtained from the session.
    #[error(transparent)]
    ClientUnavailable(#[from] ClientUnavailable),

    /// A remote call failed for any reason other than expected absence.
    #[error("{call} failed")]
    RemoteFailure {
        /// Name of the remote call, e.g. `GetEnterprise`.
        call: &'static str,
        /// The error as returned by the client, raw response included.
        #[source]
        source: ApiError,
    },

    /// The operation does not apply to the instance's lifecycle state.
    #[error("cannot {operation} an enterprise that is {state}")]
    InvalidState {
        /// The operation that was attempted.
        operation: &'static str,
        /// The state the instance was in.
        state: InstanceState,
    },

    /// A fetched value could not be stored on the record.
    #[error("error setting {attribute}: {message}")]
    AttributeAssignment {
        /// The attribute that failed.
        attribute: &'static str,
        /// Why it failed.
        message: String,
    },

    /// Import pointed at an enterprise the remote does not know.
    #[error("cannot import enterprise {id}: it does not exist")]
    ImportTargetMissing {
        /// The identifier that was looked up.
        id: String,
    },
}

impl ReconcileError {
    /// Creates a new `RemoteFailure` error.
    #[must_use]
    pub fn remote(call: &'static str, source: ApiError) -> Self {
        Self::RemoteFailure { call, source }
    }

    /// Creates a new `InvalidState` error.
    #[must_use]
    pub fn invalid_state(operation: &'static str, state: InstanceState) -> Self {
        Self::InvalidState { operation, state }
    }

    /// Creates a new `AttributeAssignment` error.
    #[must_use]
    pub fn attribute_assignment(attribute: &'static str, message: impl Into<String>) -> Self {
        Self::AttributeAssignment {
            attribute,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an invalid state error.
    #[must_use]
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }

    /// Returns the remote call name, for remote failures.
    #[must_use]
    pub fn call(&self) -> Option<&'static str> {
        match self {
            Self::RemoteFailure { call, .. } => Some(call),
            _ => None,
        }
    }

    /// Returns the underlying client error, for remote failures.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::RemoteFailure { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ClientUnavailable(_) => ErrorCategory::Client,
            Self::RemoteFailure { .. } | Self::ImportTargetMissing { .. } => ErrorCategory::Remote,
            Self::InvalidState { .. } => ErrorCategory::State,
            Self::AttributeAssignment { .. } => ErrorCategory::Assignment,
        }
    }
}

/// Categories of reconciliation errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Capability could not be constructed.
    Client,
    /// Remote call failed.
    Remote,
    /// Caller invoked an operation in the wrong lifecycle state.
    State,
    /// Local assignment of a fetched value failed.
    Assignment,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client => write!(f, "client"),
            Self::Remote => write!(f, "remote"),
            Self::State => write!(f, "state"),
            Self::Assignment => write!(f, "assignment"),
        }
    }
}

/// Type alias for a reconciliation result.
pub type ReconcileResult<T> = Result<T, ReconcileError>;
