//! Dynamic member values for templates, statics, and instances

use crate::errors::ComposeResult;
use crate::instance::Instance;
use crate::type_object::Type;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// An ordered collection of named members
///
/// Insertion order is preserved so merge order stays observable and
/// deterministic across composition steps.
pub type Members = IndexMap<String, Value>;

/// A callable member
///
/// The first argument is the bound call target (`this`): an [`Instance`] for
/// instance methods and initializers, a [`Type`] for static methods and
/// type-level initializers. Methods compare equal only to themselves.
///
/// # Example
///
/// ```
/// use proto_compose::{Method, Value};
///
/// let double = Method::new(|_this, args| {
///     let n = args.first().and_then(Value::as_i64).unwrap_or(0);
///     Ok(Value::from(n * 2))
/// });
///
/// let result = double.invoke(&Value::null(), &[Value::from(21)]).unwrap();
/// assert_eq!(result, Value::from(42));
/// ```
#[derive(Clone)]
pub struct Method(Arc<MethodFn>);

type MethodFn = dyn Fn(&Value, &[Value]) -> ComposeResult<Value> + Send + Sync;

impl Method {
    /// Wrap a function as a callable member
    pub fn new(f: impl Fn(&Value, &[Value]) -> ComposeResult<Value> + Send + Sync + 'static) -> Self {
        Method(Arc::new(f))
    }

    /// Invoke the method with `this` bound to the given call target
    pub fn invoke(&self, this: &Value, args: &[Value]) -> ComposeResult<Value> {
        (self.0)(this, args)
    }

    /// Check whether two methods are the same callable
    pub fn ptr_eq(&self, other: &Method) -> bool {
        Arc::as_ptr(&self.0) as *const () == Arc::as_ptr(&other.0) as *const ()
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method({:p})", Arc::as_ptr(&self.0))
    }
}

/// A dynamic member value
///
/// Values are what templates, static members, and instance slots hold.
/// Plain data rides on `serde_json::Value`; callables, instances, and types
/// are first-class variants so initializers can return alternate objects or
/// hand types around.
#[derive(Clone, Debug)]
pub enum Value {
    /// Plain data (null, bool, number, string, array, object)
    Data(serde_json::Value),
    /// A callable member
    Method(Method),
    /// A reference to an instance
    Instance(Instance),
    /// A reference to a composed type
    Type(Type),
}

impl Value {
    /// The null data value
    pub fn null() -> Value {
        Value::Data(serde_json::Value::Null)
    }

    /// A short name for the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Data(serde_json::Value::Null) => "null",
            Value::Data(_) => "data",
            Value::Method(_) => "method",
            Value::Instance(_) => "instance",
            Value::Type(_) => "type",
        }
    }

    /// Check whether this is the null data value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Data(serde_json::Value::Null))
    }

    /// Borrow the data payload, if this is a data value
    pub fn as_data(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Data(data) => Some(data),
            _ => None,
        }
    }

    /// Borrow the string payload, if this is string data
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Data(serde_json::Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if this is integer data
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Data(data) => data.as_i64(),
            _ => None,
        }
    }

    /// The boolean payload, if this is boolean data
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Data(data) => data.as_bool(),
            _ => None,
        }
    }

    /// Borrow the method, if this is a callable member
    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Value::Method(method) => Some(method),
            _ => None,
        }
    }

    /// Borrow the instance, if this value references one
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// Borrow the type, if this value references one
    pub fn as_type(&self) -> Option<&Type> {
        match self {
            Value::Type(ty) => Some(ty),
            _ => None,
        }
    }

    /// Take the instance out of this value
    pub fn into_instance(self) -> Option<Instance> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// Take the type out of this value
    pub fn into_type(self) -> Option<Type> {
        match self {
            Value::Type(ty) => Some(ty),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Data(a), Value::Data(b)) => a == b,
            (Value::Method(a), Value::Method(b)) => a == b,
            (Value::Instance(a), Value::Instance(b)) => a == b,
            (Value::Type(a), Value::Type(b)) => a == b,
            _ => false,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(data: serde_json::Value) -> Self {
        Value::Data(data)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Data(serde_json::Value::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Data(serde_json::Value::from(s))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Data(serde_json::Value::from(b))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Data(serde_json::Value::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Data(serde_json::Value::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Data(serde_json::Value::from(n))
    }
}

impl From<Method> for Value {
    fn from(method: Method) -> Self {
        Value::Method(method)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Instance(instance)
    }
}

impl From<Type> for Value {
    fn from(ty: Type) -> Self {
        Value::Type(ty)
    }
}
