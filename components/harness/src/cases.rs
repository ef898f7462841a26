//! Built-in conformance cases.
//!
//! Native ports of the fixture suite, expressed against the harness object
//! model. Each case keeps the identifier and description of the fixture
//! file it corresponds to, so on-disk fixtures can be bound to their
//! executable entry by id.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use crate::environment::Environment;
use crate::error::{HarnessError, HarnessResult, Thrown};
use crate::helpers::{
    fn_global_object, verify_configurable, verify_equal_to, verify_not_enumerable,
    verify_writable,
};
use crate::object::{ObjectRef, PropertyDescriptor};
use crate::test_case::{EntryResult, TestCase, TestFile};
use crate::value::{FunctionRef, Value};

/// All built-in cases, in suite order.
pub fn builtin_suite() -> Vec<Arc<TestCase>> {
    vec![
        Arc::new(
            TestCase::new(
                "15.2.3.5-4-9",
                "Object.create - argument 'Properties' is an object whose getter \
                 observes the properties object as its receiver (15.2.3.7 step 2)",
                create_getter_observes_receiver,
            )
            .with_includes(&["runTestCase.js"]),
        ),
        Arc::new(
            TestCase::new(
                "15.2.3.6-4-571",
                "ES5 Attributes - [[Get]] attribute is a function which involves \
                 'this' object into statement(s)",
                accessor_getter_returns_receiver,
            )
            .with_includes(&["runTestCase.js"]),
        ),
        Arc::new(
            TestCase::new(
                "15.2.3.6-3-177",
                "Object.defineProperty - 'Attributes' is the global object that \
                 uses [[Get]] to access the 'writable' property (8.10.5 step 6.a)",
                global_object_as_attributes,
            )
            .with_includes(&["runTestCase.js", "fnGlobalObject.js"]),
        ),
        Arc::new(
            TestCase::new(
                "15.2.3.6-4-103",
                "Object.defineProperty - 'name' and 'desc' are data properties, \
                 name.writable and desc.writable are different values (8.12.9 step 12)",
                redefine_writable_on_configurable,
            )
            .with_includes(&["propertyHelper.js"]),
        ),
    ]
}

/// Look up a built-in case by identifier.
pub fn find(id: &str) -> Option<Arc<TestCase>> {
    builtin_suite().into_iter().find(|case| case.id == id)
}

/// Bind an on-disk fixture to its registered entry procedure. The fixture's
/// own metadata (description, include list) drives the resulting case; an
/// identifier with no registered entry is a configuration error.
pub fn bind(file: &TestFile) -> HarnessResult<Arc<TestCase>> {
    let registered =
        find(file.id()).ok_or_else(|| HarnessError::UnboundTest(file.id().to_string()))?;
    Ok(Arc::new(TestCase::from_file(file, registered.entry.clone())))
}

// A getter defined on the properties argument of a create-from-properties
// call must see that argument as its receiver when the properties are read.
fn create_getter_observes_receiver(_env: &Environment) -> EntryResult {
    let props = ObjectRef::new();
    let observed = Rc::new(Cell::new(false));

    let seen = Rc::clone(&observed);
    let expected = props.clone();
    let getter = FunctionRef::new(move |this, _args| {
        seen.set(matches!(this, Value::Object(o) if *o == expected));
        // An empty descriptor bag; the defined property gets defaults.
        Ok(Value::Object(ObjectRef::new()))
    });

    props.define_property(
        "prop",
        &PropertyDescriptor::accessor(Some(getter), None).enumerable(true),
    )?;
    ObjectRef::create(&props)?;

    Ok(Value::Boolean(observed.get()))
}

// Installing a getter that returns its receiver: reading the property
// through the object yields the object itself, and the reported descriptor
// carries the very function that was installed.
fn accessor_getter_returns_receiver(_env: &Environment) -> EntryResult {
    let obj = ObjectRef::new();
    obj.set("len", Value::Int(2010))?;

    let get_func = FunctionRef::new(|this, _args| Ok(this.clone()));
    obj.define_property(
        "prop",
        &PropertyDescriptor::accessor(Some(get_func.clone()), None),
    )?;

    let desc = obj
        .own_property("prop")
        .ok_or_else(|| Thrown::error("prop was not defined"))?;
    let through_getter = obj.get("prop")?;

    Ok(Value::Boolean(
        obj.has_own("prop")
            && through_getter == Value::Object(obj.clone())
            && desc.get == Some(get_func),
    ))
}

// The global object itself serves as the attributes argument; its
// 'writable' field is read through ordinary [[Get]]. The added global
// property is removed again on every path.
fn global_object_as_attributes(env: &Environment) -> EntryResult {
    let global = fn_global_object(env);

    let run = || -> Result<bool, Thrown> {
        global.set("writable", Value::Boolean(true))?;

        let obj = ObjectRef::new();
        let attributes = PropertyDescriptor::from_object(&global)?;
        obj.define_property("property", &attributes)?;

        let before_write = obj.has_own("property");
        obj.set("property", Value::Str("isWritable".to_string()))?;
        let after_write = obj.get("property")? == Value::Str("isWritable".to_string());

        Ok(before_write && after_write)
    };

    let outcome = run();
    global.delete("writable")?;

    Ok(Value::Boolean(outcome?))
}

// Redefining 'writable' from false to true is allowed while the property
// stays configurable; the other attributes keep their values.
fn redefine_writable_on_configurable(_env: &Environment) -> EntryResult {
    let obj = ObjectRef::new();

    obj.define_property(
        "foo",
        &PropertyDescriptor::default()
            .writable(false)
            .configurable(true),
    )?;
    obj.define_property("foo", &PropertyDescriptor::default().writable(true))?;

    verify_equal_to(&obj, "foo", &Value::Undefined)?;
    verify_writable(&obj, "foo")?;
    verify_not_enumerable(&obj, "foo")?;
    verify_configurable(&obj, "foo")?;

    Ok(Value::Boolean(true))
}
