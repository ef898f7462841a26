//! Unit tests for report accounting

use conformance_harness::{Outcome, Report, ReportBuilder, TestError, Verdict};

fn pass(id: &str) -> Verdict {
    Verdict::new(id, Outcome::Pass)
}

fn fail(id: &str, reason: &str) -> Verdict {
    Verdict::new(id, Outcome::Fail(reason.to_string()))
}

fn error(id: &str, message: &str) -> Verdict {
    Verdict::new(
        id,
        Outcome::Error(TestError::Runtime {
            name: "Error".to_string(),
            message: message.to_string(),
        }),
    )
}

#[test]
fn empty_report() {
    let report = Report::new();
    assert_eq!(report.total, 0);
    assert_eq!(report.pass_rate(), 0.0);
    assert!(report.is_success());
}

#[test]
fn record_counts_each_outcome() {
    let mut report = Report::new();
    report.record(pass("a"));
    report.record(fail("b", "returned 1"));
    report.record(error("c", "boom"));
    report.record(Verdict::new("d", Outcome::Error(TestError::Timeout)));

    assert_eq!(report.total, 4);
    assert_eq!(report.passed, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.errored, 1);
    assert_eq!(report.timed_out, 1);
    assert!(!report.is_success());
}

#[test]
fn failure_detail_is_recorded() {
    let mut report = Report::new();
    report.record(fail("15.2.3.6-4-103", "returned 1"));

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, "15.2.3.6-4-103");
    assert_eq!(report.failures[0].1, "returned 1");
}

#[test]
fn error_detail_includes_timeouts() {
    let mut report = Report::new();
    report.record(error("a", "boom"));
    report.record(Verdict::new("b", Outcome::Error(TestError::Timeout)));

    assert_eq!(report.errors.len(), 2);
    assert!(report.errors[0].1.contains("boom"));
    assert!(report.errors[1].1.contains("timed out"));
}

#[test]
fn rates() {
    let mut report = Report::new();
    report.record(pass("a"));
    report.record(pass("b"));
    report.record(fail("c", "no"));
    report.record(fail("d", "no"));

    assert_eq!(report.pass_rate(), 50.0);
    assert_eq!(report.failure_rate(), 50.0);
}

#[test]
fn all_pass_is_success() {
    let mut report = Report::new();
    report.record(pass("a"));
    report.record(pass("b"));
    assert!(report.is_success());
}

#[test]
fn summary_mentions_counts() {
    let mut report = Report::new();
    report.record(pass("a"));
    report.record(fail("b", "no"));

    let summary = report.summary();
    assert!(summary.contains("Total: 2"));
    assert!(summary.contains("Passed: 1"));
    assert!(summary.contains("Failed: 1"));
}

#[test]
fn detailed_summary_lists_failures_and_errors() {
    let mut report = Report::new();
    report.record(fail("b", "returned undefined"));
    report.record(error("c", "boom"));

    let detail = report.detailed_summary();
    assert!(detail.contains("Failures:"));
    assert!(detail.contains("returned undefined"));
    assert!(detail.contains("Errors:"));
    assert!(detail.contains("boom"));
}

#[test]
fn merge_combines_counts_and_detail() {
    let mut left = Report::new();
    left.record(pass("a"));
    left.record(fail("b", "no"));

    let mut right = Report::new();
    right.record(error("c", "boom"));

    left.merge(&right);
    assert_eq!(left.total, 3);
    assert_eq!(left.passed, 1);
    assert_eq!(left.failed, 1);
    assert_eq!(left.errored, 1);
    assert_eq!(left.errors.len(), 1);
}

#[test]
fn json_round_trip() {
    let mut report = Report::new();
    report.record(pass("a"));
    report.record(fail("b", "reason"));

    let json = report.to_json().unwrap();
    let restored = Report::from_json(&json).unwrap();
    assert_eq!(restored.total, 2);
    assert_eq!(restored.passed, 1);
    assert_eq!(restored.failures, report.failures);
}

#[test]
fn builder_aggregates_reports() {
    let mut a = Report::new();
    a.record(pass("a"));
    let mut b = Report::new();
    b.record(fail("b", "no"));

    let mut builder = ReportBuilder::new();
    builder.add_report(a).add_report(b);

    assert_eq!(builder.count(), 2);
    let combined = builder.build();
    assert_eq!(combined.total, 2);
    assert_eq!(combined.passed, 1);
    assert_eq!(combined.failed, 1);
}
