//! Error types for the CLI

use conformance_harness::HarnessError;
use std::fmt;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Harness-level error (fixture loading, helper resolution)
    Harness(HarnessError),

    /// File I/O error
    IoError(std::io::Error),

    /// Invalid invocation
    Usage(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Harness(e) => write!(f, "Harness error: {}", e),
            CliError::IoError(e) => write!(f, "File error: {}", e),
            CliError::Usage(s) => write!(f, "Usage error: {}", s),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Harness(e) => Some(e),
            CliError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HarnessError> for CliError {
    fn from(err: HarnessError) -> Self {
        CliError::Harness(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError(err)
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
