//! Reflective object model with descriptor-level property control.
//!
//! The fixtures in this suite probe property attribute semantics
//! (writable / enumerable / configurable, accessor pairs, redefinition
//! rules), so the execution environment has to expose the same reflective
//! surface the source runtime does. This module is that adapter layer: a
//! minimal own-property model implementing the ES5 8.12.9 validation rules
//! the tests depend on. There is no prototype chain; the fixtures only ever
//! inspect own properties.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::Thrown;
use crate::value::{FunctionRef, Value};

/// Partial property descriptor, as handed to `define_property`.
///
/// `None` fields are absent, matching descriptor bags in the source runtime
/// where `{writable: true}` says nothing about value or enumerability.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDescriptor {
    /// Data value
    pub value: Option<Value>,
    /// Accessor getter
    pub get: Option<FunctionRef>,
    /// Accessor setter
    pub set: Option<FunctionRef>,
    /// Whether the value may be changed by ordinary writes
    pub writable: Option<bool>,
    /// Whether the property shows up in enumeration
    pub enumerable: Option<bool>,
    /// Whether the property may be deleted or redefined
    pub configurable: Option<bool>,
}

impl PropertyDescriptor {
    /// Descriptor carrying only a data value
    pub fn data(value: Value) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// Descriptor carrying an accessor pair
    pub fn accessor(get: Option<FunctionRef>, set: Option<FunctionRef>) -> Self {
        Self {
            get,
            set,
            ..Self::default()
        }
    }

    /// Set the writable attribute
    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = Some(writable);
        self
    }

    /// Set the enumerable attribute
    pub fn enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = Some(enumerable);
        self
    }

    /// Set the configurable attribute
    pub fn configurable(mut self, configurable: bool) -> Self {
        self.configurable = Some(configurable);
        self
    }

    /// True if any accessor field is present
    pub fn is_accessor(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }

    /// True if any data field is present
    pub fn is_data(&self) -> bool {
        self.value.is_some() || self.writable.is_some()
    }

    /// Read a descriptor out of an ordinary object's fields (8.10.5).
    ///
    /// Only fields present as own properties contribute; reads go through
    /// `get`, so accessor-backed fields are observed with `bag` as the
    /// receiver. This is how the "attributes object" fixtures exercise
    /// dynamic receiver binding.
    pub fn from_object(bag: &ObjectRef) -> Result<Self, Thrown> {
        let mut desc = Self::default();
        if bag.has_own("value") {
            desc.value = Some(bag.get("value")?);
        }
        if bag.has_own("writable") {
            desc.writable = Some(to_boolean(&bag.get("writable")?));
        }
        if bag.has_own("enumerable") {
            desc.enumerable = Some(to_boolean(&bag.get("enumerable")?));
        }
        if bag.has_own("configurable") {
            desc.configurable = Some(to_boolean(&bag.get("configurable")?));
        }
        if bag.has_own("get") {
            match bag.get("get")? {
                Value::Function(f) => desc.get = Some(f),
                Value::Undefined => {}
                other => {
                    return Err(Thrown::type_error(format!(
                        "Getter must be a function: {}",
                        other
                    )))
                }
            }
        }
        if bag.has_own("set") {
            match bag.get("set")? {
                Value::Function(f) => desc.set = Some(f),
                Value::Undefined => {}
                other => {
                    return Err(Thrown::type_error(format!(
                        "Setter must be a function: {}",
                        other
                    )))
                }
            }
        }
        if desc.is_accessor() && desc.is_data() {
            return Err(Thrown::type_error(
                "Descriptor cannot be both a data and an accessor descriptor",
            ));
        }
        Ok(desc)
    }
}

fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Boolean(b) => *b,
        Value::Int(n) => *n != 0,
        Value::Double(n) => *n != 0.0 && !n.is_nan(),
        Value::Str(s) => !s.is_empty(),
        Value::Object(_) | Value::Function(_) => true,
    }
}

#[derive(Clone)]
enum PropertyKind {
    Data { value: Value, writable: bool },
    Accessor { get: Option<FunctionRef>, set: Option<FunctionRef> },
}

#[derive(Clone)]
struct Property {
    kind: PropertyKind,
    enumerable: bool,
    configurable: bool,
}

impl Property {
    fn descriptor(&self) -> PropertyDescriptor {
        let mut desc = PropertyDescriptor {
            enumerable: Some(self.enumerable),
            configurable: Some(self.configurable),
            ..PropertyDescriptor::default()
        };
        match &self.kind {
            PropertyKind::Data { value, writable } => {
                desc.value = Some(value.clone());
                desc.writable = Some(*writable);
            }
            PropertyKind::Accessor { get, set } => {
                desc.get = get.clone();
                desc.set = set.clone();
            }
        }
        desc
    }
}

struct ObjectData {
    // Insertion order preserved; enumeration order matters to fixtures.
    properties: Vec<(String, Property)>,
}

/// Shared handle to an object; clones alias the same object.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<ObjectData>>);

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        let keys: Vec<&str> = data.properties.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_tuple("ObjectRef").field(&keys).finish()
    }
}

impl Default for ObjectRef {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectRef {
    /// Create a new empty object
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(ObjectData {
            properties: Vec::new(),
        })))
    }

    /// Create a new object from a property bag, the way `Object.create`
    /// consumes its `Properties` argument: every enumerable own property of
    /// `props` is read (getters run with `props` as receiver), interpreted
    /// as a descriptor bag, and defined on the fresh object.
    pub fn create(props: &ObjectRef) -> Result<ObjectRef, Thrown> {
        let target = ObjectRef::new();
        for key in props.enumerable_keys() {
            let bag = match props.get(&key)? {
                Value::Object(o) => o,
                other => {
                    return Err(Thrown::type_error(format!(
                        "Property description must be an object: {}",
                        other
                    )))
                }
            };
            let desc = PropertyDescriptor::from_object(&bag)?;
            target.define_property(&key, &desc)?;
        }
        Ok(target)
    }

    fn find(&self, key: &str) -> Option<Property> {
        let data = self.0.borrow();
        data.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, p)| p.clone())
    }

    fn store(&self, key: &str, property: Property) {
        let mut data = self.0.borrow_mut();
        if let Some(slot) = data.properties.iter_mut().find(|(k, _)| k == key) {
            slot.1 = property;
        } else {
            data.properties.push((key.to_string(), property));
        }
    }

    /// Whether the object has an own property with this key
    pub fn has_own(&self, key: &str) -> bool {
        self.0.borrow().properties.iter().any(|(k, _)| k == key)
    }

    /// Read a property with the object itself as receiver
    pub fn get(&self, key: &str) -> Result<Value, Thrown> {
        self.get_with_receiver(key, &Value::Object(self.clone()))
    }

    /// Read a property with an explicit receiver.
    ///
    /// Accessor getters observe `receiver` as their dynamic `this`.
    pub fn get_with_receiver(&self, key: &str, receiver: &Value) -> Result<Value, Thrown> {
        match self.find(key) {
            None => Ok(Value::Undefined),
            Some(property) => match property.kind {
                PropertyKind::Data { value, .. } => Ok(value),
                PropertyKind::Accessor { get: Some(getter), .. } => getter.call(receiver, &[]),
                PropertyKind::Accessor { get: None, .. } => Ok(Value::Undefined),
            },
        }
    }

    /// Ordinary write. Creates a plain data property when the key is
    /// absent; silently ignored on a non-writable data property (non-strict
    /// semantics, which is what the fixtures rely on when probing
    /// writability by writing and reading back).
    pub fn set(&self, key: &str, value: Value) -> Result<(), Thrown> {
        match self.find(key) {
            None => {
                self.store(
                    key,
                    Property {
                        kind: PropertyKind::Data {
                            value,
                            writable: true,
                        },
                        enumerable: true,
                        configurable: true,
                    },
                );
                Ok(())
            }
            Some(property) => match property.kind {
                PropertyKind::Data { writable: true, .. } => {
                    self.store(
                        key,
                        Property {
                            kind: PropertyKind::Data {
                                value,
                                writable: true,
                            },
                            enumerable: property.enumerable,
                            configurable: property.configurable,
                        },
                    );
                    Ok(())
                }
                PropertyKind::Data { writable: false, .. } => Ok(()),
                PropertyKind::Accessor { set: Some(setter), .. } => {
                    setter
                        .call(&Value::Object(self.clone()), &[value])
                        .map(|_| ())
                }
                PropertyKind::Accessor { set: None, .. } => Ok(()),
            },
        }
    }

    /// Define or redefine a property with attribute-level control,
    /// enforcing the 8.12.9 redefinition rules.
    pub fn define_property(&self, key: &str, desc: &PropertyDescriptor) -> Result<(), Thrown> {
        if desc.is_accessor() && desc.is_data() {
            return Err(Thrown::type_error(
                "Descriptor cannot be both a data and an accessor descriptor",
            ));
        }

        let current = self.find(key);
        let property = match current {
            None => self.build_new(desc),
            Some(current) => self.validate_redefine(key, &current, desc)?,
        };
        self.store(key, property);
        Ok(())
    }

    fn build_new(&self, desc: &PropertyDescriptor) -> Property {
        let kind = if desc.is_accessor() {
            PropertyKind::Accessor {
                get: desc.get.clone(),
                set: desc.set.clone(),
            }
        } else {
            PropertyKind::Data {
                value: desc.value.clone().unwrap_or(Value::Undefined),
                writable: desc.writable.unwrap_or(false),
            }
        };
        Property {
            kind,
            enumerable: desc.enumerable.unwrap_or(false),
            configurable: desc.configurable.unwrap_or(false),
        }
    }

    fn validate_redefine(
        &self,
        key: &str,
        current: &Property,
        desc: &PropertyDescriptor,
    ) -> Result<Property, Thrown> {
        let reject = || Err(Thrown::type_error(format!("Cannot redefine property: {}", key)));

        if !current.configurable {
            if desc.configurable == Some(true) {
                return reject();
            }
            if let Some(enumerable) = desc.enumerable {
                if enumerable != current.enumerable {
                    return reject();
                }
            }
            match &current.kind {
                PropertyKind::Data { value, writable } => {
                    if desc.is_accessor() {
                        return reject();
                    }
                    if !*writable {
                        if desc.writable == Some(true) {
                            return reject();
                        }
                        if let Some(new_value) = &desc.value {
                            if !new_value.strict_equals(value) {
                                return reject();
                            }
                        }
                    }
                }
                PropertyKind::Accessor { get, set } => {
                    if desc.is_data() {
                        return reject();
                    }
                    if desc.get.is_some() && desc.get != *get {
                        return reject();
                    }
                    if desc.set.is_some() && desc.set != *set {
                        return reject();
                    }
                }
            }
        }

        // Validation passed; fold the requested changes into the current
        // property, switching kind when the descriptor asks for it.
        let kind = match (&current.kind, desc.is_accessor(), desc.is_data()) {
            (PropertyKind::Data { value, writable }, false, _) => PropertyKind::Data {
                value: desc.value.clone().unwrap_or_else(|| value.clone()),
                writable: desc.writable.unwrap_or(*writable),
            },
            (PropertyKind::Accessor { get, set }, _, false) => PropertyKind::Accessor {
                get: desc.get.clone().or_else(|| get.clone()),
                set: desc.set.clone().or_else(|| set.clone()),
            },
            // Kind switch: attributes not carried over get fresh defaults.
            (_, true, _) => PropertyKind::Accessor {
                get: desc.get.clone(),
                set: desc.set.clone(),
            },
            (_, _, true) => PropertyKind::Data {
                value: desc.value.clone().unwrap_or(Value::Undefined),
                writable: desc.writable.unwrap_or(false),
            },
        };

        Ok(Property {
            kind,
            enumerable: desc.enumerable.unwrap_or(current.enumerable),
            configurable: desc.configurable.unwrap_or(current.configurable),
        })
    }

    /// Delete a property. Returns `false` (without removing anything) when
    /// the property exists but is not configurable.
    pub fn delete(&self, key: &str) -> Result<bool, Thrown> {
        let mut data = self.0.borrow_mut();
        match data.properties.iter().position(|(k, _)| k == key) {
            None => Ok(true),
            Some(index) => {
                if data.properties[index].1.configurable {
                    data.properties.remove(index);
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
        }
    }

    /// Full descriptor of an own property, if present
    pub fn own_property(&self, key: &str) -> Option<PropertyDescriptor> {
        self.find(key).map(|p| p.descriptor())
    }

    /// All own property keys, in insertion order
    pub fn keys(&self) -> Vec<String> {
        self.0
            .borrow()
            .properties
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Enumerable own property keys, in insertion order
    pub fn enumerable_keys(&self) -> Vec<String> {
        self.0
            .borrow()
            .properties
            .iter()
            .filter(|(_, p)| p.enumerable)
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Number of own properties
    pub fn len(&self) -> usize {
        self.0.borrow().properties.len()
    }

    /// Whether the object has no own properties
    pub fn is_empty(&self) -> bool {
        self.0.borrow().properties.is_empty()
    }
}
