use thiserror::Error;

/// Core error types for enterprise binding operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

impl CoreError {
    /// Create a new InvalidTimestamp error
    pub fn invalid_timestamp(message: impl Into<String>) -> Self {
        Self::InvalidTimestamp(message.into())
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTimestamp(_) => ErrorCategory::Serialization,
            Self::Validation(_) => ErrorCategory::Validation,
        }
    }
}

/// A single declared value rejected by the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{attribute}: {reason}")]
pub struct ValidationError {
    pub attribute: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(attribute: &'static str, reason: impl Into<String>) -> Self {
        Self {
            attribute,
            reason: reason.into(),
        }
    }
}

/// Every violation found in one validation pass, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("{}", join_errors(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Names of the attributes that failed, in order.
    pub fn attributes(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.attribute).collect()
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error categories for monitoring and classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Serialization,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Serialization => write!(f, "serialization"),
        }
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
