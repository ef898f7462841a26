//! ES5 Conformance Runner
//!
//! Command-line entry point: discovers fixture files (or selects the
//! built-in suite), runs them through the harness, and reports
//! identifier → verdict plus a summary. Exit status is 0 iff every
//! verdict is a pass.

use std::time::Instant;

use clap::Parser as ClapParser;
use conformance_cli::run::{run_builtin, run_fixture_files};
use conformance_cli::{collect_fixture_files, Cli, RunSummary};
use conformance_harness::{Report, Runner};

fn main() {
    let cli = Cli::parse();

    if !cli.builtin && cli.paths.is_empty() {
        eprintln!("Error: no fixture paths given (or use --builtin)");
        eprintln!("Run 'conformance_runner --help' for usage.");
        std::process::exit(2);
    }

    let mut runner = Runner::new();
    runner.set_timeout(cli.timeout);

    let start = Instant::now();
    let summary = if cli.builtin {
        run_builtin(&runner, cli.limit)
    } else {
        let files = match collect_fixture_files(&cli.paths) {
            Ok(files) => files,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        };
        if files.is_empty() {
            eprintln!("Error: no .js fixture files found under the given paths");
            std::process::exit(2);
        }
        run_fixture_files(&runner, &files, cli.limit)
    };
    let duration = start.elapsed();

    if cli.verbose {
        for verdict in &summary.verdicts {
            println!("{}", verdict);
        }
        println!();
    }

    let report = summary.report();

    if cli.json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: could not serialize report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_report(&report, &summary, duration);
    }

    if !report.is_success() {
        std::process::exit(1);
    }
}

/// Print the text report
fn print_report(report: &Report, summary: &RunSummary, duration: std::time::Duration) {
    println!("====================================");
    println!("RESULTS");
    println!("====================================");
    println!("Total:     {}", report.total);
    println!("Passed:    {} ({:.1}%)", report.passed, report.pass_rate());
    println!("Failed:    {} ({:.1}%)", report.failed, report.failure_rate());
    println!("Errored:   {}", report.errored);
    println!("Timed out: {}", report.timed_out);
    if summary.skipped > 0 {
        println!("Skipped:   {} (onlyStrict)", summary.skipped);
    }
    println!("Duration:  {:.2}s", duration.as_secs_f64());

    if !report.failures.is_empty() {
        println!("\nFailures:");
        for (id, reason) in &report.failures {
            println!("  - {}", id);
            println!("    Reason: {}", reason);
        }
    }
    if !report.errors.is_empty() {
        println!("\nErrors:");
        for (id, description) in &report.errors {
            println!("  - {}", id);
            println!("    {}", description);
        }
    }

    if report.is_success() {
        println!("\n✓ All tests passed!");
    } else {
        println!("\n✗ {} of {} tests did not pass", report.total - report.passed, report.total);
    }
}
