//! Classified outcomes of test execution.

use std::fmt;

/// Why a test ended in an error verdict, as opposed to failing its check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestError {
    /// The entry procedure raised an uncaught error
    Runtime {
        /// Error constructor name
        name: String,
        /// Error message, preserved for the report
        message: String,
    },
    /// A declared helper could not be resolved; the entry never ran
    Configuration(String),
    /// The entry procedure did not return within the per-test budget
    Timeout,
}

impl TestError {
    /// The error payload message
    pub fn message(&self) -> &str {
        match self {
            TestError::Runtime { message, .. } => message,
            TestError::Configuration(message) => message,
            TestError::Timeout => "test timed out",
        }
    }
}

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestError::Runtime { name, message } => write!(f, "{}: {}", name, message),
            TestError::Configuration(message) => write!(f, "configuration error: {}", message),
            TestError::Timeout => write!(f, "timed out"),
        }
    }
}

/// Outcome of executing one test case.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Entry procedure returned exactly `true`
    Pass,
    /// Entry procedure completed but its check did not hold
    Fail(String),
    /// The test could not complete its check
    Error(TestError),
}

impl Outcome {
    /// Check if the outcome is a pass
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    /// Check if the outcome is a failure
    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Fail(_))
    }

    /// Check if the outcome is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    /// Check if the outcome is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Outcome::Error(TestError::Timeout))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Pass => write!(f, "PASS"),
            Outcome::Fail(reason) => write!(f, "FAIL ({})", reason),
            Outcome::Error(error) => write!(f, "ERROR ({})", error),
        }
    }
}

/// Verdict for one test case: identifier plus classified outcome.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Identifier of the test this verdict belongs to
    pub id: String,
    /// Classified outcome
    pub outcome: Outcome,
}

impl Verdict {
    /// Create a verdict
    pub fn new(id: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            id: id.into(),
            outcome,
        }
    }

    /// Check if this verdict is a pass
    pub fn is_pass(&self) -> bool {
        self.outcome.is_pass()
    }

    /// The error payload, when the outcome is an error verdict
    pub fn error(&self) -> Option<&TestError> {
        match &self.outcome {
            Outcome::Error(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.outcome)
    }
}
