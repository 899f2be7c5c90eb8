use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes carried alongside every failed response.
///
/// The first three are produced by the registry. `Unimplemented` and
/// `Internal` only originate in the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A required identifying field is missing or the payload is malformed.
    InvalidArgument,
    /// A referenced student or course does not exist.
    NotFound,
    /// Duplicate registration or duplicate enrollment.
    AlreadyExists,
    /// The requested method does not exist.
    Unimplemented,
    /// The server failed to produce a response.
    Internal,
}

impl ErrorCode {
    /// Wire name of the code (e.g., "NOT_FOUND").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::AlreadyExists => "ALREADY_EXISTS",
            ErrorCode::Unimplemented => "UNIMPLEMENTED",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Missing required identifying field (student id or course code).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Referenced student or course is not in its catalog.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate registration or duplicate enrollment.
    #[error("Already exists: {0}")]
    AlreadyExists(String),
}

impl RegistryError {
    /// The taxonomy code callers should branch on.
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistryError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            RegistryError::NotFound(_) => ErrorCode::NotFound,
            RegistryError::AlreadyExists(_) => ErrorCode::AlreadyExists,
        }
    }

    /// The human-readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            RegistryError::InvalidArgument(m)
            | RegistryError::NotFound(m)
            | RegistryError::AlreadyExists(m) => m,
        }
    }
}
