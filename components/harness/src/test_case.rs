//! Test cases: executable units and fixture files on disk.
//!
//! A [`TestCase`] pairs metadata with a native entry procedure. A
//! [`TestFile`] is the on-disk form: an ES5-era conformance fixture whose
//! metadata lives in a YAML block between `/*---` and `---*/`. Metadata is
//! extracted statically, before anything executes, so the runner can load
//! declared helpers first.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::environment::Environment;
use crate::error::{HarnessError, HarnessResult, Thrown};
use crate::value::Value;

/// What an entry procedure produces: a value, or a raised error.
pub type EntryResult = Result<Value, Thrown>;

/// Entry procedure of a test case.
///
/// The source convention is a zero-argument `testcase` function whose only
/// channels are its return value and anything it raises; helpers are free
/// identifiers in the ambient scope. Rust has no ambient scope, so the
/// environment handle is passed explicitly and stands in for it.
pub type EntryFn = Arc<dyn Fn(&Environment) -> EntryResult + Send + Sync>;

/// One unit of conformance verification.
#[derive(Clone)]
pub struct TestCase {
    /// Test identifier, e.g. "15.2.3.5-4-9"
    pub id: String,
    /// Free-text description of the behavior under test
    pub description: String,
    /// Helper modules to load, in order, before the entry runs
    pub includes: Vec<String>,
    /// The executable check
    pub entry: EntryFn,
}

impl TestCase {
    /// Create a test case with no helper dependencies
    pub fn new<F>(id: impl Into<String>, description: impl Into<String>, entry: F) -> Self
    where
        F: Fn(&Environment) -> EntryResult + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            description: description.into(),
            includes: Vec::new(),
            entry: Arc::new(entry),
        }
    }

    /// Declare helper modules this case needs
    pub fn with_includes(mut self, includes: &[&str]) -> Self {
        self.includes = includes.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Build a case from a fixture file's metadata and an already-built
    /// entry procedure. The file's statically extracted include list wins.
    pub fn from_file(file: &TestFile, entry: EntryFn) -> Self {
        Self {
            id: file.id().to_string(),
            description: file.metadata.description.clone(),
            includes: file.metadata.includes.clone(),
            entry,
        }
    }
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("includes", &self.includes)
            .finish()
    }
}

/// Fixture metadata parsed from YAML frontmatter.
///
/// Field set matches what the ES5-era suite carries; `negative` is the
/// old-style bare error name, not the modern phase/type pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TestMetadata {
    /// ES5.1 section identifier
    pub es5id: Option<String>,
    /// Human-readable description of what the test verifies
    pub description: String,
    /// Additional information about the test
    pub info: Option<String>,
    /// Helper files that must be loaded before the test
    pub includes: Vec<String>,
    /// Test execution flags (e.g. "onlyStrict", "noStrict")
    pub flags: HashSet<String>,
    /// Expected error name for negative tests
    pub negative: Option<String>,
    /// Author of the test
    pub author: Option<String>,
}

impl Default for TestMetadata {
    fn default() -> Self {
        Self {
            es5id: None,
            description: String::new(),
            info: None,
            includes: Vec::new(),
            flags: HashSet::new(),
            negative: None,
            author: None,
        }
    }
}

impl TestMetadata {
    /// Parse YAML frontmatter out of fixture source.
    ///
    /// Fixtures keep their metadata in a YAML block between `/*---` and
    /// `---*/`; both the flow form `includes: [a.js, b.js]` and the block
    /// list form are accepted.
    pub fn parse(source: &str) -> HarnessResult<Self> {
        let re = Regex::new(r"(?s)/\*---\n(.+?)\n---\*/")
            .map_err(|e| HarnessError::Metadata(format!("failed to compile regex: {}", e)))?;

        let yaml = re
            .captures(source)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or(HarnessError::MissingMetadata)?;

        serde_yaml::from_str(yaml).map_err(|e| HarnessError::Metadata(e.to_string()))
    }

    /// Check if the test runs only in strict mode
    pub fn is_strict_only(&self) -> bool {
        self.flags.contains("onlyStrict")
    }

    /// Check if the test expects an error to be raised
    pub fn is_negative(&self) -> bool {
        self.negative.is_some()
    }
}

/// Fixture file with source and parsed metadata.
#[derive(Debug, Clone)]
pub struct TestFile {
    /// Path to the fixture file
    pub path: String,
    /// Full source text
    pub source: String,
    /// Parsed metadata from the frontmatter block
    pub metadata: TestMetadata,
}

impl TestFile {
    /// Load a fixture file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> HarnessResult<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let source = std::fs::read_to_string(path.as_ref())?;
        let metadata = TestMetadata::parse(&source)?;

        Ok(Self {
            path: path_str,
            source,
            metadata,
        })
    }

    /// Parse a fixture from in-memory source
    pub fn from_source(path: impl Into<String>, source: impl Into<String>) -> HarnessResult<Self> {
        let source = source.into();
        let metadata = TestMetadata::parse(&source)?;
        Ok(Self {
            path: path.into(),
            source,
            metadata,
        })
    }

    /// Test identifier: the declared `es5id`, falling back to the file stem
    pub fn id(&self) -> &str {
        self.metadata.es5id.as_deref().unwrap_or_else(|| self.name())
    }

    /// File name without extension
    pub fn name(&self) -> &str {
        Path::new(&self.path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.path)
    }

    /// Source with the metadata block stripped
    pub fn body(&self) -> String {
        let re = Regex::new(r"(?s)/\*---\n.+?\n---\*/\s*").unwrap();
        re.replace(&self.source, "").to_string()
    }
}
