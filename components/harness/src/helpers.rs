//! Helper module resolution and the shared assertion helpers.
//!
//! Fixtures declare the helper files they need (`runTestCase.js`,
//! `propertyHelper.js`, `fnGlobalObject.js`) in their metadata; the runner
//! resolves those names here and loads them into the environment before the
//! entry procedure runs. The exported bindings themselves are native
//! functions in this module. An include name the registry does not know is
//! a configuration error, reported before any test code executes.

use crate::environment::Environment;
use crate::error::{HarnessError, HarnessResult, Thrown};
use crate::object::ObjectRef;
use crate::value::Value;

/// A named, shared helper module and the bindings it exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelperModule {
    name: &'static str,
    exports: &'static [&'static str],
}

impl HelperModule {
    /// Module name as declared in fixture includes
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Names of the bindings this module makes visible
    pub fn exports(&self) -> &'static [&'static str] {
        self.exports
    }
}

/// Strict-true execution convention for `testcase` entry procedures.
/// The classification itself lives in the runner; the module resolves so
/// fixtures declaring it load cleanly.
pub const RUN_TEST_CASE: HelperModule = HelperModule {
    name: "runTestCase.js",
    exports: &["runTestCase"],
};

/// The property-assertion family
pub const PROPERTY_HELPER: HelperModule = HelperModule {
    name: "propertyHelper.js",
    exports: &[
        "verifyEqualTo",
        "verifyWritable",
        "verifyNotWritable",
        "verifyEnumerable",
        "verifyNotEnumerable",
        "verifyConfigurable",
        "verifyNotConfigurable",
    ],
};

/// Accessor for the global-like object
pub const FN_GLOBAL_OBJECT: HelperModule = HelperModule {
    name: "fnGlobalObject.js",
    exports: &["fnGlobalObject"],
};

/// Resolves helper names declared by test cases to helper modules.
#[derive(Debug, Clone)]
pub struct HelperRegistry {
    modules: Vec<HelperModule>,
}

impl HelperRegistry {
    /// Registry with no modules
    pub fn empty() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Registry with the built-in helper modules
    pub fn builtin() -> Self {
        Self {
            modules: vec![RUN_TEST_CASE, PROPERTY_HELPER, FN_GLOBAL_OBJECT],
        }
    }

    /// Add a module to the registry
    pub fn register(&mut self, module: HelperModule) {
        if !self.modules.contains(&module) {
            self.modules.push(module);
        }
    }

    /// Resolve a helper name to its module
    pub fn resolve(&self, name: &str) -> HarnessResult<&HelperModule> {
        self.modules
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| HarnessError::UnknownHelper(name.to_string()))
    }

    /// Resolve a helper and load it into the environment. Loading twice is
    /// a no-op; the module keeps its original identity.
    pub fn load_into(&self, env: &mut Environment, name: &str) -> HarnessResult<()> {
        let module = self.resolve(name)?;
        env.mark_loaded(module.name);
        Ok(())
    }

    /// Names of all registered modules
    pub fn names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|m| m.name).collect()
    }
}

impl Default for HelperRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The `fnGlobalObject` binding: a reference to the environment's single
/// global-like object.
pub fn fn_global_object(env: &Environment) -> ObjectRef {
    env.global()
}

// The verify* family raises Test262Error on violation, like the source
// propertyHelper. verifyWritable and verifyConfigurable mutate the property
// they probe, also like the source helpers; callers order their assertions
// accordingly.

/// Assert a named property currently holds the expected value
pub fn verify_equal_to(obj: &ObjectRef, name: &str, expected: &Value) -> Result<(), Thrown> {
    let actual = obj.get(name)?;
    if actual.strict_equals(expected) {
        Ok(())
    } else {
        Err(Thrown::assertion(format!(
            "property {} has value {}, expected {}",
            name, actual, expected
        )))
    }
}

const WRITE_PROBE: &str = "unlikely probe value";

/// Assert a named data property accepts ordinary writes
pub fn verify_writable(obj: &ObjectRef, name: &str) -> Result<(), Thrown> {
    obj.set(name, Value::Str(WRITE_PROBE.to_string()))?;
    let after = obj.get(name)?;
    if after == Value::Str(WRITE_PROBE.to_string()) {
        Ok(())
    } else {
        Err(Thrown::assertion(format!(
            "property {} should be writable but a write did not stick",
            name
        )))
    }
}

/// Assert a named data property rejects ordinary writes
pub fn verify_not_writable(obj: &ObjectRef, name: &str) -> Result<(), Thrown> {
    let before = obj.get(name)?;
    obj.set(name, Value::Str(WRITE_PROBE.to_string()))?;
    let after = obj.get(name)?;
    if after == Value::Str(WRITE_PROBE.to_string()) {
        return Err(Thrown::assertion(format!(
            "property {} should not be writable but a write changed it",
            name
        )));
    }
    if !after.strict_equals(&before) {
        return Err(Thrown::assertion(format!(
            "property {} changed value during a rejected write",
            name
        )));
    }
    Ok(())
}

/// Assert a named own property shows up in enumeration
pub fn verify_enumerable(obj: &ObjectRef, name: &str) -> Result<(), Thrown> {
    if obj.enumerable_keys().iter().any(|k| k == name) {
        Ok(())
    } else {
        Err(Thrown::assertion(format!(
            "property {} should be enumerable",
            name
        )))
    }
}

/// Assert a named own property is hidden from enumeration
pub fn verify_not_enumerable(obj: &ObjectRef, name: &str) -> Result<(), Thrown> {
    if !obj.has_own(name) {
        return Err(Thrown::assertion(format!(
            "property {} does not exist",
            name
        )));
    }
    if obj.enumerable_keys().iter().any(|k| k == name) {
        Err(Thrown::assertion(format!(
            "property {} should not be enumerable",
            name
        )))
    } else {
        Ok(())
    }
}

/// Assert a named property can be deleted. The property is gone afterwards.
pub fn verify_configurable(obj: &ObjectRef, name: &str) -> Result<(), Thrown> {
    let deleted = obj.delete(name)?;
    if deleted && !obj.has_own(name) {
        Ok(())
    } else {
        Err(Thrown::assertion(format!(
            "property {} should be configurable but delete failed",
            name
        )))
    }
}

/// Assert a named property survives a delete attempt
pub fn verify_not_configurable(obj: &ObjectRef, name: &str) -> Result<(), Thrown> {
    let deleted = obj.delete(name)?;
    if deleted || !obj.has_own(name) {
        Err(Thrown::assertion(format!(
            "property {} should not be configurable but was deleted",
            name
        )))
    } else {
        Ok(())
    }
}
