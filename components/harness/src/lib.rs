//! ES5 Conformance Test Harness
//!
//! This crate executes conformance test cases against a shared, resettable
//! execution environment: it resolves each case's declared helper modules,
//! invokes the entry procedure, and classifies the result as pass, fail or
//! error. Fixture files on disk carry their metadata in YAML frontmatter
//! and bind to registered native entry procedures by identifier.

pub mod cases;
pub mod environment;
pub mod error;
pub mod helpers;
pub mod object;
pub mod report;
pub mod runner;
pub mod test_case;
pub mod value;
pub mod verdict;

pub use environment::Environment;
pub use error::{HarnessError, HarnessResult, Thrown};
pub use helpers::{HelperModule, HelperRegistry};
pub use object::{ObjectRef, PropertyDescriptor};
pub use report::{Report, ReportBuilder};
pub use runner::{Runner, DEFAULT_TIMEOUT_MS};
pub use test_case::{EntryFn, EntryResult, TestCase, TestFile, TestMetadata};
pub use value::{FunctionRef, Value};
pub use verdict::{Outcome, TestError, Verdict};
