//! Aggregated results of a test run.

use serde::{Deserialize, Serialize};

use crate::verdict::{Outcome, TestError, Verdict};

/// Accumulated verdicts of a run, with per-case detail for everything that
/// did not pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Total number of tests run
    pub total: usize,
    /// Number of passing tests
    pub passed: usize,
    /// Number of tests whose check did not hold
    pub failed: usize,
    /// Number of tests that could not complete (runtime or configuration)
    pub errored: usize,
    /// Number of tests that exceeded the per-test budget
    pub timed_out: usize,
    /// Failures as (identifier, reason)
    pub failures: Vec<(String, String)>,
    /// Errors as (identifier, description), timeouts included
    pub errors: Vec<(String, String)>,
}

impl Report {
    /// Create an empty report
    pub fn new() -> Self {
        Self {
            total: 0,
            passed: 0,
            failed: 0,
            errored: 0,
            timed_out: 0,
            failures: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Record one verdict
    pub fn record(&mut self, verdict: Verdict) {
        self.total += 1;
        match verdict.outcome {
            Outcome::Pass => self.passed += 1,
            Outcome::Fail(reason) => {
                self.failed += 1;
                self.failures.push((verdict.id, reason));
            }
            Outcome::Error(TestError::Timeout) => {
                self.timed_out += 1;
                self.errors.push((verdict.id, TestError::Timeout.to_string()));
            }
            Outcome::Error(error) => {
                self.errored += 1;
                self.errors.push((verdict.id, error.to_string()));
            }
        }
    }

    /// Pass rate as a percentage of all tests run
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    /// Failure rate as a percentage of all tests run
    pub fn failure_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.failed as f64 / self.total as f64) * 100.0
        }
    }

    /// True iff every recorded verdict was a pass
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.errored == 0 && self.timed_out == 0
    }

    /// Human-readable summary block
    pub fn summary(&self) -> String {
        format!(
            "Conformance Results:\n\
             Total: {}\n\
             Passed: {} ({:.1}%)\n\
             Failed: {}\n\
             Errored: {}\n\
             Timed out: {}",
            self.total, self.passed,
            self.pass_rate(),
            self.failed, self.errored, self.timed_out
        )
    }

    /// Summary plus per-case failure and error detail
    pub fn detailed_summary(&self) -> String {
        let mut output = self.summary();

        if !self.failures.is_empty() {
            output.push_str("\n\nFailures:\n");
            for (id, reason) in &self.failures {
                output.push_str(&format!("  - {}\n    Reason: {}\n", id, reason));
            }
        }
        if !self.errors.is_empty() {
            output.push_str("\n\nErrors:\n");
            for (id, description) in &self.errors {
                output.push_str(&format!("  - {}\n    {}\n", id, description));
            }
        }

        output
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: &Report) {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
        self.errored += other.errored;
        self.timed_out += other.timed_out;
        self.failures.extend(other.failures.clone());
        self.errors.extend(other.errors.clone());
    }

    /// Export the report as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Import a report from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregates reports from multiple runs into one.
pub struct ReportBuilder {
    reports: Vec<Report>,
}

impl ReportBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            reports: Vec::new(),
        }
    }

    /// Add a report to be aggregated
    pub fn add_report(&mut self, report: Report) -> &mut Self {
        self.reports.push(report);
        self
    }

    /// Build the combined report
    pub fn build(&self) -> Report {
        let mut combined = Report::new();
        for report in &self.reports {
            combined.merge(report);
        }
        combined
    }

    /// Number of reports added so far
    pub fn count(&self) -> usize {
        self.reports.len()
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
