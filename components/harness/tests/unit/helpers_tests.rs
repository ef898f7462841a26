//! Unit tests for helper resolution and the assertion family

use conformance_harness::helpers::{
    fn_global_object, verify_configurable, verify_enumerable, verify_equal_to,
    verify_not_configurable, verify_not_enumerable, verify_not_writable, verify_writable,
};
use conformance_harness::{
    Environment, HarnessError, HelperRegistry, ObjectRef, PropertyDescriptor, Value,
};

#[test]
fn builtin_registry_resolves_known_helpers() {
    let registry = HelperRegistry::builtin();
    assert!(registry.resolve("runTestCase.js").is_ok());
    assert!(registry.resolve("propertyHelper.js").is_ok());
    assert!(registry.resolve("fnGlobalObject.js").is_ok());
}

#[test]
fn unknown_helper_is_a_configuration_error() {
    let registry = HelperRegistry::builtin();
    let err = registry.resolve("doesNotExist.js").unwrap_err();
    assert!(matches!(err, HarnessError::UnknownHelper(name) if name == "doesNotExist.js"));
}

#[test]
fn empty_registry_resolves_nothing() {
    let registry = HelperRegistry::empty();
    assert!(registry.resolve("runTestCase.js").is_err());
    assert!(registry.names().is_empty());
}

#[test]
fn loading_is_idempotent() {
    let registry = HelperRegistry::builtin();
    let mut env = Environment::new();

    registry.load_into(&mut env, "propertyHelper.js").unwrap();
    registry.load_into(&mut env, "propertyHelper.js").unwrap();

    assert_eq!(env.loaded_helpers(), ["propertyHelper.js".to_string()]);
}

#[test]
fn load_order_is_preserved() {
    let registry = HelperRegistry::builtin();
    let mut env = Environment::new();

    registry.load_into(&mut env, "runTestCase.js").unwrap();
    registry.load_into(&mut env, "fnGlobalObject.js").unwrap();

    assert_eq!(
        env.loaded_helpers(),
        ["runTestCase.js".to_string(), "fnGlobalObject.js".to_string()]
    );
}

#[test]
fn property_helper_exports_the_verify_family() {
    let registry = HelperRegistry::builtin();
    let module = registry.resolve("propertyHelper.js").unwrap();
    assert!(module.exports().contains(&"verifyEqualTo"));
    assert!(module.exports().contains(&"verifyNotConfigurable"));
}

#[test]
fn fn_global_object_returns_the_environment_global() {
    let env = Environment::new();
    let global = fn_global_object(&env);
    assert_eq!(global, env.global());

    global.set("marker", Value::Int(9)).unwrap();
    assert_eq!(env.global().get("marker").unwrap(), Value::Int(9));
}

#[test]
fn verify_equal_to_checks_strict_equality() {
    let obj = ObjectRef::new();
    obj.set("p", Value::Int(3)).unwrap();

    assert!(verify_equal_to(&obj, "p", &Value::Int(3)).is_ok());
    assert!(verify_equal_to(&obj, "p", &Value::Double(3.0)).is_ok());
    let err = verify_equal_to(&obj, "p", &Value::Str("3".to_string())).unwrap_err();
    assert_eq!(err.name, "Test262Error");
}

#[test]
fn verify_writable_accepts_writable_property() {
    let obj = ObjectRef::new();
    obj.set("p", Value::Int(1)).unwrap();
    assert!(verify_writable(&obj, "p").is_ok());
}

#[test]
fn verify_writable_rejects_non_writable_property() {
    let obj = ObjectRef::new();
    obj.define_property(
        "p",
        &PropertyDescriptor::data(Value::Int(1)).configurable(true),
    )
    .unwrap();
    assert!(verify_writable(&obj, "p").is_err());
}

#[test]
fn verify_not_writable_accepts_non_writable_property() {
    let obj = ObjectRef::new();
    obj.define_property("p", &PropertyDescriptor::data(Value::Int(1)))
        .unwrap();
    assert!(verify_not_writable(&obj, "p").is_ok());
    // Rejected write left the value alone.
    assert_eq!(obj.get("p").unwrap(), Value::Int(1));
}

#[test]
fn verify_not_writable_rejects_writable_property() {
    let obj = ObjectRef::new();
    obj.set("p", Value::Int(1)).unwrap();
    assert!(verify_not_writable(&obj, "p").is_err());
}

#[test]
fn verify_enumerable_both_directions() {
    let obj = ObjectRef::new();
    obj.set("shown", Value::Int(1)).unwrap();
    obj.define_property("hidden", &PropertyDescriptor::data(Value::Int(2)))
        .unwrap();

    assert!(verify_enumerable(&obj, "shown").is_ok());
    assert!(verify_enumerable(&obj, "hidden").is_err());
    assert!(verify_not_enumerable(&obj, "hidden").is_ok());
    assert!(verify_not_enumerable(&obj, "shown").is_err());
}

#[test]
fn verify_not_enumerable_requires_the_property_to_exist() {
    let obj = ObjectRef::new();
    assert!(verify_not_enumerable(&obj, "ghost").is_err());
}

#[test]
fn verify_configurable_deletes_the_property() {
    let obj = ObjectRef::new();
    obj.set("p", Value::Int(1)).unwrap();
    assert!(verify_configurable(&obj, "p").is_ok());
    assert!(!obj.has_own("p"));
}

#[test]
fn verify_not_configurable_keeps_the_property() {
    let obj = ObjectRef::new();
    obj.define_property("p", &PropertyDescriptor::data(Value::Int(1)))
        .unwrap();
    assert!(verify_not_configurable(&obj, "p").is_ok());
    assert!(obj.has_own("p"));

    let writable = ObjectRef::new();
    writable.set("q", Value::Int(1)).unwrap();
    assert!(verify_not_configurable(&writable, "q").is_err());
}
