//! Values exchanged between test entry procedures and the harness.
//!
//! The harness only needs enough of the source runtime's value model to
//! classify verdicts (strict identity against `true`) and to let fixtures
//! exercise descriptor-level property semantics. Objects and functions are
//! reference values compared by identity; everything else is compared by
//! content.

use std::fmt;
use std::rc::Rc;

use crate::error::Thrown;
use crate::object::ObjectRef;

/// Signature shared by native functions: dynamic receiver plus arguments.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> Result<Value, Thrown>;

/// Reference to a native function with pointer identity.
///
/// Accessor functions installed in property descriptors must compare by
/// identity: fixtures check that the descriptor reports back the very
/// function that was installed (`desc.get === getFunc`).
#[derive(Clone)]
pub struct FunctionRef(Rc<NativeFn>);

impl FunctionRef {
    /// Wrap a native closure as a callable function value
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Thrown> + 'static,
    {
        Self(Rc::new(f))
    }

    /// Invoke the function with the given receiver and arguments
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value, Thrown> {
        (self.0)(this, args)
    }
}

impl PartialEq for FunctionRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function(...)")
    }
}

/// A value in the harness's execution model.
#[derive(Clone)]
pub enum Value {
    /// The undefined value
    Undefined,
    /// The null value
    Null,
    /// Boolean (true or false)
    Boolean(bool),
    /// Integer that fits in 32 bits
    Int(i32),
    /// IEEE 754 double-precision floating point
    Double(f64),
    /// String value
    Str(String),
    /// Object reference (identity semantics)
    Object(ObjectRef),
    /// Function reference (identity semantics)
    Function(FunctionRef),
}

impl Value {
    /// Strict identity check against the boolean `true`.
    ///
    /// This is the pass criterion for entry procedures: `1`, `"true"` and
    /// truthy objects are all rejected.
    pub fn is_true(&self) -> bool {
        matches!(self, Value::Boolean(true))
    }

    /// Strict equality in the sense of the source runtime's `===`.
    ///
    /// Same as `PartialEq` except that integer and double representations
    /// of the same number compare equal.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Double(b)) => f64::from(*a) == *b,
            (Value::Double(a), Value::Int(b)) => *a == f64::from(*b),
            _ => self == other,
        }
    }

    /// Type name as the source runtime's `typeof` would report it
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Boolean(_) => "boolean",
            Value::Int(_) | Value::Double(_) => "number",
            Value::Str(_) => "string",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Value::Double(n) => f.debug_tuple("Double").field(n).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Object(_) => write!(f, "Object(...)"),
            Value::Function(_) => write!(f, "Function(...)"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Double(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Object(_) => write!(f, "[object]"),
            Value::Function(_) => write!(f, "[function]"),
        }
    }
}
