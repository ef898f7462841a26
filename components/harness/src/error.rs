//! Error types for the harness

use thiserror::Error;

/// Errors raised by the harness itself (not by test entry procedures).
///
/// A value raised by a test body is a [`Thrown`], never a `HarnessError`:
/// the first is test data that becomes part of a verdict, the second means
/// the harness could not do its job.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Reading a fixture file from disk failed
    #[error("failed to read test file: {0}")]
    Io(#[from] std::io::Error),

    /// Fixture file has no `/*--- ... ---*/` metadata block
    #[error("no metadata block found in test file")]
    MissingMetadata,

    /// Metadata block exists but could not be parsed
    #[error("malformed metadata: {0}")]
    Metadata(String),

    /// A declared helper include does not resolve to a known module
    #[error("unknown helper module: {0}")]
    UnknownHelper(String),

    /// A fixture file's identifier has no registered entry procedure
    #[error("no entry procedure registered for test {0}")]
    UnboundTest(String),
}

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// A value raised by a test entry procedure or a helper assertion.
///
/// Mirrors the name/message pair of the source runtime's error objects so
/// the payload survives into the verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thrown {
    /// Error constructor name ("Error", "TypeError", "Test262Error", ...)
    pub name: String,
    /// Human-readable message
    pub message: String,
}

impl Thrown {
    /// A plain error, equivalent to `new Error(message)`
    pub fn error(message: impl Into<String>) -> Self {
        Self::custom("Error", message)
    }

    /// A type error, raised by rejected property redefinitions
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::custom("TypeError", message)
    }

    /// An assertion failure from the property-helper family
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::custom("Test262Error", message)
    }

    /// An error with an arbitrary constructor name
    pub fn custom(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Thrown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}
