// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Unknown prefix style name
    UnknownStyle(String),
    /// Extension list entry that cannot be used for matching
    InvalidExtension(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::UnknownStyle(msg) => {
                write!(f, "Unknown prefix style '{}' (expected numeric or episode)", msg)
            }
            DomainError::InvalidExtension(msg) => write!(f, "Invalid extension: '{}'", msg),
        }
    }
}

impl std::error::Error for DomainError {}
