//! Unit tests for the runner: classification, isolation, helpers, timeout

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use conformance_harness::helpers::fn_global_object;
use conformance_harness::{
    Environment, HelperRegistry, Outcome, Runner, TestCase, TestError, Thrown, Value,
};

#[test]
fn returning_true_passes() {
    let runner = Runner::new();
    let case = TestCase::new("returns-true", "returns true", |_| Ok(Value::Boolean(true)));
    let verdict = runner.run_case(&case);
    assert_eq!(verdict.outcome, Outcome::Pass);
}

#[test]
fn returning_one_fails() {
    let runner = Runner::new();
    let case = TestCase::new("returns-one", "returns 1", |_| Ok(Value::Int(1)));
    let verdict = runner.run_case(&case);
    assert!(verdict.outcome.is_fail());
}

#[test]
fn non_true_returns_never_pass() {
    let runner = Runner::new();
    let returns: [(&str, fn() -> Value); 4] = [
        ("false", || Value::Boolean(false)),
        ("undefined", || Value::Undefined),
        ("string-true", || Value::Str("true".to_string())),
        ("double-one", || Value::Double(1.0)),
    ];
    for (id, make) in returns {
        let case = TestCase::new(id, "non-true return", move |_| Ok(make()));
        let verdict = runner.run_case(&case);
        assert!(verdict.outcome.is_fail(), "{} should fail", id);
    }
}

#[test]
fn thrown_error_is_an_error_verdict_with_payload() {
    let runner = Runner::new();
    let case = TestCase::new("throws", "throws", |_| Err(Thrown::error("boom")));
    let verdict = runner.run_case(&case);

    assert!(verdict.outcome.is_error());
    let error = verdict.error().unwrap();
    assert_eq!(error.message(), "boom");
    assert!(matches!(error, TestError::Runtime { name, .. } if name.as_str() == "Error"));
}

#[test]
fn panic_is_contained_as_an_error_verdict() {
    let runner = Runner::new();
    let case = TestCase::new("panics", "panics", |_| panic!("entry went sideways"));
    let verdict = runner.run_case(&case);

    let error = verdict.error().unwrap();
    assert!(error.message().contains("entry went sideways"));
}

#[test]
fn unresolvable_helper_is_a_configuration_error_and_entry_never_runs() {
    let runner = Runner::new();
    let invoked = Arc::new(AtomicBool::new(false));
    let witness = Arc::clone(&invoked);

    let case = TestCase::new("bad-include", "bad include", move |_| {
        witness.store(true, Ordering::SeqCst);
        Ok(Value::Boolean(true))
    })
    .with_includes(&["doesNotExist"]);

    let verdict = runner.run_case(&case);

    assert!(
        matches!(verdict.error(), Some(TestError::Configuration(msg)) if msg.contains("doesNotExist"))
    );
    assert!(!invoked.load(Ordering::SeqCst));
}

#[test]
fn declared_helpers_are_loaded_before_the_entry() {
    let runner = Runner::new();
    let case = TestCase::new("includes", "sees loaded helpers", |env: &Environment| {
        Ok(Value::Boolean(
            env.is_loaded("runTestCase.js") && env.is_loaded("fnGlobalObject.js"),
        ))
    })
    .with_includes(&["runTestCase.js", "fnGlobalObject.js"]);

    assert!(runner.run_case(&case).is_pass());
}

#[test]
fn zero_include_case_runs_with_an_empty_registry() {
    let runner = Runner::with_registry(HelperRegistry::empty());
    let case = TestCase::new("no-helpers", "", |_| Ok(Value::Boolean(true)));
    assert!(runner.run_case(&case).is_pass());
}

#[test]
fn suite_isolates_global_state_between_cases() {
    // The first case leaves a global property behind without cleaning up;
    // the second case must still see a clean environment.
    let leaky = TestCase::new("leaky", "mutates the global object", |env: &Environment| {
        let global = fn_global_object(env);
        global.set("temp", Value::Str("leak".to_string()))?;
        Ok(Value::Boolean(global.has_own("temp")))
    })
    .with_includes(&["fnGlobalObject.js"]);

    let clean = TestCase::new("clean", "expects a fresh global", |env: &Environment| {
        Ok(Value::Boolean(!env.global().has_own("temp")))
    });

    let runner = Runner::new();
    let report = runner.run_suite(&[Arc::new(leaky), Arc::new(clean)]);
    assert_eq!(report.passed, 2);
    assert!(report.is_success());
}

#[test]
fn suite_continues_past_failing_and_erroring_cases() {
    let cases = vec![
        Arc::new(TestCase::new("bad", "", |_| Err(Thrown::error("boom")))),
        Arc::new(TestCase::new("worse", "", |_| panic!("down"))),
        Arc::new(TestCase::new("good", "", |_| Ok(Value::Boolean(true)))),
    ];

    let runner = Runner::new();
    let report = runner.run_suite(&cases);
    assert_eq!(report.total, 3);
    assert_eq!(report.passed, 1);
    assert_eq!(report.errored, 2);
}

#[test]
fn rerunning_a_case_yields_the_same_verdict() {
    let runner = Runner::new();
    let case = TestCase::new("stable", "global write then check", |env: &Environment| {
        env.global().set("x", Value::Int(1))?;
        Ok(Value::Boolean(env.global().get("x")? == Value::Int(1)))
    });

    let first = runner.run_case(&case);
    let second = runner.run_case(&case);
    assert_eq!(first, second);
    assert!(first.is_pass());
}

#[test]
fn runaway_entry_times_out() {
    let mut runner = Runner::new();
    runner.set_timeout(50);

    let case = Arc::new(TestCase::new("hangs", "never returns in time", |_| {
        std::thread::sleep(Duration::from_millis(5_000));
        Ok(Value::Boolean(true))
    }));

    let verdict = runner.run_case_guarded(&case);
    assert!(verdict.outcome.is_timeout());
}

#[test]
fn guarded_run_passes_results_through() {
    let runner = Runner::new();
    let case = Arc::new(TestCase::new("quick", "", |_| Ok(Value::Boolean(true))));
    assert!(runner.run_case_guarded(&case).is_pass());
}

#[test]
fn run_in_reuses_the_given_environment() {
    let runner = Runner::new();
    let mut env = Environment::new();
    env.global().set("persisted", Value::Int(7)).unwrap();

    let case = TestCase::new("reuse", "", |env: &Environment| {
        Ok(Value::Boolean(env.global().has_own("persisted")))
    });

    assert!(runner.run_in(&mut env, &case).is_pass());
}
