//! Unit tests for the shared execution environment

use conformance_harness::{Environment, HelperRegistry, Value};

#[test]
fn fresh_environment_has_empty_global() {
    let env = Environment::new();
    assert!(env.global().is_empty());
    assert!(env.loaded_helpers().is_empty());
}

#[test]
fn global_handle_aliases_one_object() {
    let env = Environment::new();
    let a = env.global();
    let b = env.global();
    a.set("shared", Value::Int(1)).unwrap();
    assert_eq!(b.get("shared").unwrap(), Value::Int(1));
    assert_eq!(a, b);
}

#[test]
fn reset_discards_global_state() {
    let mut env = Environment::new();
    env.global().set("leftover", Value::Int(1)).unwrap();
    let registry = HelperRegistry::builtin();
    registry.load_into(&mut env, "fnGlobalObject.js").unwrap();

    env.reset();

    assert!(env.global().is_empty());
    assert!(env.loaded_helpers().is_empty());
    assert!(!env.is_loaded("fnGlobalObject.js"));
}

#[test]
fn reset_produces_a_distinct_global_object() {
    let mut env = Environment::new();
    let before = env.global();
    env.reset();
    assert_ne!(before, env.global());
}

#[test]
fn default_is_fresh() {
    let env = Environment::default();
    assert!(env.global().is_empty());
}
