//! Conformance Runner CLI Library
//!
//! Provides argument parsing and the file-discovery/run loop behind the
//! `conformance_runner` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod run;

pub use cli::Cli;
pub use error::{CliError, CliResult};
pub use run::{collect_fixture_files, run_fixture_files, RunSummary};
