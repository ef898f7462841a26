//! Command-line argument definitions

use clap::Parser;

/// ES5 conformance test runner
#[derive(Parser, Debug)]
#[command(name = "conformance_runner", version, about = "Runs ES5 conformance test fixtures")]
pub struct Cli {
    /// Fixture files or directories to run (directories are searched
    /// recursively for .js files)
    pub paths: Vec<String>,

    /// Run the built-in native suite instead of fixture files
    #[arg(short, long)]
    pub builtin: bool,

    /// Per-test timeout in milliseconds
    #[arg(short, long, default_value_t = 10_000)]
    pub timeout: u64,

    /// Limit the number of tests to run
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Emit the final report as JSON
    #[arg(long)]
    pub json: bool,

    /// Print a verdict line for every test, not only a summary
    #[arg(short, long)]
    pub verbose: bool,
}
