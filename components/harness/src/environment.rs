//! Shared execution environment for test cases.

use crate::object::ObjectRef;

/// The environment a test case executes in: one global-like object plus the
/// record of which helper modules have been loaded into scope.
///
/// The runner builds a fresh environment for every case, so mutations made
/// by one test can never leak into the next. `reset` exists for embedders
/// that reuse a single environment across runs.
pub struct Environment {
    global: ObjectRef,
    loaded: Vec<String>,
}

impl Environment {
    /// Create a fresh environment with an empty global object
    pub fn new() -> Self {
        Self {
            global: ObjectRef::new(),
            loaded: Vec::new(),
        }
    }

    /// Handle to the process-wide global-like object of this environment.
    /// Clones alias the same object.
    pub fn global(&self) -> ObjectRef {
        self.global.clone()
    }

    /// Whether a helper module has already been loaded
    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.iter().any(|n| n == name)
    }

    /// Names of loaded helper modules, in load order
    pub fn loaded_helpers(&self) -> &[String] {
        &self.loaded
    }

    pub(crate) fn mark_loaded(&mut self, name: &str) {
        if !self.is_loaded(name) {
            self.loaded.push(name.to_string());
        }
    }

    /// Discard all global state and loaded helpers
    pub fn reset(&mut self) {
        self.global = ObjectRef::new();
        self.loaded.clear();
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
