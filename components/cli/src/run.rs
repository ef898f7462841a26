//! Fixture discovery and the run loop

use std::path::{Path, PathBuf};

use conformance_harness::{cases, Outcome, Report, Runner, TestError, TestFile, Verdict};
use walkdir::WalkDir;

use crate::error::{CliError, CliResult};

/// Everything one invocation produced: per-case verdicts plus the count of
/// fixtures that were skipped without a verdict (strict-mode-only tests).
#[derive(Debug)]
pub struct RunSummary {
    /// Verdicts in execution order
    pub verdicts: Vec<Verdict>,
    /// Number of fixtures skipped because they are strict-mode only
    pub skipped: usize,
}

impl RunSummary {
    /// Fold the verdicts into an aggregate report
    pub fn report(&self) -> Report {
        let mut report = Report::new();
        for verdict in &self.verdicts {
            report.record(verdict.clone());
        }
        report
    }
}

/// Expand files and directories into the list of fixture files to run.
/// Directories are walked recursively for `.js` files; naming a path that
/// does not exist is a usage error.
pub fn collect_fixture_files(paths: &[String]) -> CliResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let path = Path::new(path);
        if !path.exists() {
            return Err(CliError::Usage(format!(
                "path not found: {}",
                path.display()
            )));
        }
        if path.is_dir() {
            let walker = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| {
                    e.path()
                        .extension()
                        .map(|ext| ext == "js")
                        .unwrap_or(false)
                });
            for entry in walker {
                files.push(entry.path().to_path_buf());
            }
        } else {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// Run fixture files, at most `limit` of them.
///
/// A file that cannot be loaded, or whose identifier has no registered
/// entry procedure, gets a configuration-error verdict; strict-mode-only
/// fixtures are skipped without one. Execution continues past every
/// non-pass verdict.
pub fn run_fixture_files(
    runner: &Runner,
    files: &[PathBuf],
    limit: Option<usize>,
) -> RunSummary {
    let mut verdicts = Vec::new();
    let mut skipped = 0;
    let budget = limit.unwrap_or(files.len());

    for path in files.iter().take(budget) {
        let file = match TestFile::load(path) {
            Ok(file) => file,
            Err(e) => {
                let id = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("unknown")
                    .to_string();
                verdicts.push(Verdict::new(
                    id,
                    Outcome::Error(TestError::Configuration(e.to_string())),
                ));
                continue;
            }
        };

        if file.metadata.is_strict_only() {
            skipped += 1;
            continue;
        }

        match cases::bind(&file) {
            Ok(case) => verdicts.push(runner.run_case_guarded(&case)),
            Err(e) => verdicts.push(Verdict::new(
                file.id(),
                Outcome::Error(TestError::Configuration(e.to_string())),
            )),
        }
    }

    RunSummary { verdicts, skipped }
}

/// Run the built-in native suite.
pub fn run_builtin(runner: &Runner, limit: Option<usize>) -> RunSummary {
    let suite = cases::builtin_suite();
    let budget = limit.unwrap_or(suite.len());

    let verdicts = suite
        .iter()
        .take(budget)
        .map(|case| runner.run_case_guarded(case))
        .collect();

    RunSummary {
        verdicts,
        skipped: 0,
    }
}
