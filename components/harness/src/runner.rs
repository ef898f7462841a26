//! Test execution and verdict classification.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::environment::Environment;
use crate::helpers::HelperRegistry;
use crate::report::Report;
use crate::test_case::TestCase;
use crate::verdict::{Outcome, TestError, Verdict};

/// Default per-test budget, matching the original runner's 10 seconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Executes test cases and classifies their outcomes.
///
/// Each case runs against a fresh [`Environment`]; helpers declared by the
/// case are resolved and loaded before its entry procedure is invoked.
/// Classification is strict: only the boolean `true` passes. Raised errors,
/// panics, unresolvable helpers and timeouts all become error verdicts on
/// that one case and never abort the rest of a batch.
pub struct Runner {
    registry: HelperRegistry,
    timeout_ms: u64,
}

impl Runner {
    /// Runner with the built-in helper registry and default timeout
    pub fn new() -> Self {
        Self {
            registry: HelperRegistry::builtin(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Runner with a custom helper registry
    pub fn with_registry(registry: HelperRegistry) -> Self {
        Self {
            registry,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Set the per-test timeout
    pub fn set_timeout(&mut self, timeout_ms: u64) {
        self.timeout_ms = timeout_ms;
    }

    /// Current per-test timeout in milliseconds
    pub fn timeout(&self) -> u64 {
        self.timeout_ms
    }

    /// The helper registry in use
    pub fn registry(&self) -> &HelperRegistry {
        &self.registry
    }

    /// Run one case in a fresh environment, without a timeout guard.
    pub fn run_case(&self, case: &TestCase) -> Verdict {
        let mut env = Environment::new();
        self.run_in(&mut env, case)
    }

    /// Run one case in the given environment.
    ///
    /// Helpers load first, in declared order; an unresolvable name yields a
    /// configuration-error verdict and the entry is never invoked.
    pub fn run_in(&self, env: &mut Environment, case: &TestCase) -> Verdict {
        for include in &case.includes {
            if let Err(e) = self.registry.load_into(env, include) {
                return Verdict::new(
                    &case.id,
                    Outcome::Error(TestError::Configuration(e.to_string())),
                );
            }
        }

        let entry = case.entry.as_ref();
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| entry(env))) {
            Ok(Ok(value)) if value.is_true() => Outcome::Pass,
            Ok(Ok(value)) => Outcome::Fail(format!(
                "entry procedure returned {} instead of true",
                value
            )),
            Ok(Err(thrown)) => Outcome::Error(TestError::Runtime {
                name: thrown.name,
                message: thrown.message,
            }),
            Err(payload) => Outcome::Error(TestError::Runtime {
                name: "panic".to_string(),
                message: panic_message(payload),
            }),
        };

        Verdict::new(&case.id, outcome)
    }

    /// Run one case on its own worker thread, guarded by the timeout.
    ///
    /// The worker owns an isolated environment, so a runaway entry cannot
    /// touch state any later case will see. On expiry the worker is
    /// detached (it cannot be killed) and the verdict is a timeout error,
    /// the same strategy the original thread-per-test runner used.
    pub fn run_case_guarded(&self, case: &Arc<TestCase>) -> Verdict {
        let (tx, rx) = mpsc::channel();
        let worker_case = Arc::clone(case);
        let worker = Runner {
            registry: self.registry.clone(),
            timeout_ms: self.timeout_ms,
        };

        thread::spawn(move || {
            let verdict = worker.run_case(&worker_case);
            // Receiver may be gone if we already timed out.
            let _ = tx.send(verdict);
        });

        match rx.recv_timeout(Duration::from_millis(self.timeout_ms)) {
            Ok(verdict) => verdict,
            Err(_) => Verdict::new(&case.id, Outcome::Error(TestError::Timeout)),
        }
    }

    /// Run a batch of cases sequentially, one isolated environment each,
    /// accumulating verdicts into a report. A failing or erroring case
    /// never stops the batch.
    pub fn run_suite(&self, cases: &[Arc<TestCase>]) -> Report {
        let mut report = Report::new();
        for case in cases {
            report.record(self.run_case_guarded(case));
        }
        report
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "entry procedure panicked".to_string()
    }
}
